//! View tree construction.
//!
//! The renderer is a pure function from the board (plus transient
//! presentation state) to a tree of [`ViewNode`]s. Nodes only carry opaque
//! entity ids; all lookups go back to the [`Board`].

use crate::{
    config::WidgetConfig,
    domain::{Board, Column, ColumnId, Task, TaskId},
};
use chrono::{format::StrftimeItems, format::Item, DateTime, Local, Utc};

pub mod html;
mod node;

pub use node::{Descendants, Element, EntityRef, Role, SizeHint, ViewNode};

/// Something the renderer can populate. Every render replaces all children.
pub trait RenderTarget {
    fn replace_children(&mut self, children: Vec<ViewNode>);
}

/// In-memory render target holding the latest tree
#[derive(Debug, Default)]
pub struct ViewRoot {
    children: Vec<ViewNode>,
    rebuilds: usize,
}

impl ViewRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// How many times the tree has been rebuilt
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Finds the view of a column by id
    pub fn column_view(&self, id: &ColumnId) -> Option<&ViewNode> {
        let entity = EntityRef::Column(id.clone());
        self.children.iter().find_map(|n| n.find_entity(&entity))
    }

    /// Finds the view of a task by id
    pub fn task_view(&self, id: &TaskId) -> Option<&ViewNode> {
        let entity = EntityRef::Task(id.clone());
        self.children.iter().find_map(|n| n.find_entity(&entity))
    }

    pub fn to_html(&self) -> crate::error::Result<String> {
        html::render_html(&self.children)
    }
}

impl RenderTarget for ViewRoot {
    fn replace_children(&mut self, children: Vec<ViewNode>) {
        self.children = children;
        self.rebuilds += 1;
    }
}

/// A task whose content is focused, with the height its content reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub task_id: TaskId,
    pub content_height: Option<u32>,
}

/// Presentation state that never reaches storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub expanded: Option<Expansion>,
    pub dragging: Option<EntityRef>,
}

pub struct Renderer {
    date_format: String,
    max_expanded_height: u32,
}

impl Renderer {
    const FALLBACK_DATE_FORMAT: &'static str = "%-m/%-d/%Y";

    /// Creates a renderer. An unparsable date format falls back to `m/d/yyyy`.
    pub fn new(date_format: &str, max_expanded_height: u32) -> Self {
        let valid = !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
        let date_format = if valid {
            date_format.to_string()
        } else {
            tracing::warn!("Invalid date format {:?}, using default", date_format);
            Self::FALLBACK_DATE_FORMAT.to_string()
        };
        Self {
            date_format,
            max_expanded_height,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(&config.date_format, config.max_expanded_height)
    }

    /// Formats a creation timestamp as a local calendar date
    pub fn format_date(&self, created: &DateTime<Utc>) -> String {
        created
            .with_timezone(&Local)
            .format(&self.date_format)
            .to_string()
    }

    /// Builds the complete view tree for the board
    pub fn render(&self, board: &Board, state: &ViewState) -> Vec<ViewNode> {
        board
            .columns()
            .iter()
            .map(|column| self.column_view(column, state))
            .collect()
    }

    /// Renders the board into a target, replacing whatever it held
    pub fn render_into<T: RenderTarget>(&self, target: &mut T, board: &Board, state: &ViewState) {
        target.replace_children(self.render(board, state));
    }

    fn column_view(&self, column: &Column, state: &ViewState) -> ViewNode {
        let entity = EntityRef::Column(column.id.clone());
        let dragging = state.dragging.as_ref() == Some(&entity);

        let header = ViewNode::new(Element::Div, Role::ColumnHeader)
            .child(
                ViewNode::new(Element::Div, Role::ColumnTitle)
                    .text(&column.title)
                    .editable(),
            )
            .child(
                ViewNode::new(Element::Div, Role::ColumnCount)
                    .text(column.task_count().to_string()),
            )
            .child(
                ViewNode::new(Element::Button, Role::DeleteColumn)
                    .text("×")
                    .label("Delete Column"),
            );

        let task_list = ViewNode::new(Element::Div, Role::TaskList)
            .children(column.tasks.iter().map(|task| self.task_view(task, state)));

        ViewNode::new(Element::Div, Role::Column)
            .entity(entity)
            .draggable()
            .class_if(dragging, "dragging")
            .child(header)
            .child(ViewNode::new(Element::Button, Role::AddTask).text("+ Add Task"))
            .child(task_list)
    }

    fn task_view(&self, task: &Task, state: &ViewState) -> ViewNode {
        let entity = EntityRef::Task(task.id.clone());
        let dragging = state.dragging.as_ref() == Some(&entity);
        let expansion = state
            .expanded
            .as_ref()
            .filter(|expansion| expansion.task_id == task.id);

        let meta = ViewNode::new(Element::Div, Role::TaskMeta)
            .child(ViewNode::new(Element::Span, Role::TaskDate).text(self.format_date(&task.created)))
            .child(ViewNode::new(Element::Button, Role::DeleteTask).text("×"));

        let mut node = ViewNode::new(Element::Div, Role::Task)
            .entity(entity)
            .class(format!("priority-{}", task.priority))
            .draggable()
            .class_if(dragging, "dragging")
            .child(
                ViewNode::new(Element::Div, Role::TaskContent)
                    .text(&task.content)
                    .editable(),
            )
            .child(meta);

        if let Some(expansion) = expansion {
            node = node
                .class("expanded")
                .size(self.expanded_size(expansion.content_height));
        }
        node
    }

    fn expanded_size(&self, content_height: Option<u32>) -> SizeHint {
        let max = self.max_expanded_height;
        match content_height {
            Some(height) => SizeHint {
                height: Some(height.min(max)),
                max_height: max,
                scrollable: height > max,
            },
            None => SizeHint {
                height: None,
                max_height: max,
                scrollable: false,
            },
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}
