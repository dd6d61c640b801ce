use crate::render::EntityRef;

/// Drag-and-drop state of the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(EntityRef),
}

impl DragState {
    /// Starts dragging, replacing any drag already in progress
    pub fn start(&mut self, subject: EntityRef) {
        *self = Self::Dragging(subject);
    }

    /// Ends the drag and hands back what was being dragged
    pub fn finish(&mut self) -> Option<EntityRef> {
        match std::mem::take(self) {
            Self::Dragging(subject) => Some(subject),
            Self::Idle => None,
        }
    }

    pub fn subject(&self) -> Option<&EntityRef> {
        match self {
            Self::Dragging(subject) => Some(subject),
            Self::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
