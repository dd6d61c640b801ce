use crate::{
    domain::{ColumnId, TaskId},
    render::EntityRef,
};

/// Editable field that gained or lost focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    ColumnTitle(ColumnId),
    TaskContent(TaskId),
    /// Anything else on the board
    Other,
}

/// A user gesture reported by the host, already resolved to entity ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AddColumnClicked,
    AddTaskClicked(ColumnId),
    DeleteColumnClicked(ColumnId),
    DeleteTaskClicked(TaskId),
    ColumnTitleInput {
        column_id: ColumnId,
        text: String,
    },
    /// `content_height` is the rendered height of the content, when the host knows it
    TaskContentInput {
        task_id: TaskId,
        text: String,
        content_height: Option<u32>,
    },
    FocusIn(FocusTarget),
    /// `text` is the field's final value, if it is an editable field
    FocusOut {
        target: FocusTarget,
        text: Option<String>,
    },
    DragStart(EntityRef),
    DragEnd,
    /// Something was dropped on a column body
    Drop(ColumnId),
}
