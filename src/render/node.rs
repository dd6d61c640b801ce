use crate::domain::{ColumnId, TaskId};

/// Opaque reference from a view node back to the board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Column(ColumnId),
    Task(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Div,
    Button,
    Span,
}

impl Element {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Button => "button",
            Self::Span => "span",
        }
    }
}

/// What a node is for; doubles as its primary class name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Column,
    ColumnHeader,
    ColumnTitle,
    ColumnCount,
    DeleteColumn,
    AddTask,
    TaskList,
    Task,
    TaskContent,
    TaskMeta,
    TaskDate,
    DeleteTask,
}

impl Role {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::ColumnHeader => "column-header",
            Self::ColumnTitle => "column-title",
            Self::ColumnCount => "column-count",
            Self::DeleteColumn => "delete-column",
            Self::AddTask => "add-task",
            Self::TaskList => "task-list",
            Self::Task => "task",
            Self::TaskContent => "task-content",
            Self::TaskMeta => "task-meta",
            Self::TaskDate => "task-date",
            Self::DeleteTask => "delete-task",
        }
    }
}

/// Height hints for an expanded task, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHint {
    /// None when the host has not reported a content height yet
    pub height: Option<u32>,
    pub max_height: u32,
    pub scrollable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub element: Element,
    pub role: Role,
    pub classes: Vec<String>,
    pub entity: Option<EntityRef>,
    pub text: Option<String>,
    pub label: Option<String>,
    pub editable: bool,
    pub draggable: bool,
    pub size: Option<SizeHint>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(element: Element, role: Role) -> Self {
        Self {
            element,
            role,
            classes: Vec::new(),
            entity: None,
            text: None,
            label: None,
            editable: false,
            draggable: false,
            size: None,
            children: Vec::new(),
        }
    }

    pub fn entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn class_if(self, condition: bool, class: &str) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn size(mut self, size: SizeHint) -> Self {
        self.size = Some(size);
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// All class names, role class first
    pub fn class_list(&self) -> Vec<&str> {
        std::iter::once(self.role.class())
            .chain(self.classes.iter().map(String::as_str))
            .collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.role.class() == class || self.classes.iter().any(|c| c == class)
    }

    /// Depth-first iterator over this node and everything below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn find_by_role(&self, role: Role) -> Option<&ViewNode> {
        self.descendants().find(|n| n.role == role)
    }

    pub fn find_all_by_role(&self, role: Role) -> Vec<&ViewNode> {
        self.descendants().filter(|n| n.role == role).collect()
    }

    pub fn find_entity(&self, entity: &EntityRef) -> Option<&ViewNode> {
        self.descendants()
            .find(|n| n.entity.as_ref() == Some(entity))
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a ViewNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ViewNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
