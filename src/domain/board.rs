use crate::{
    config::WidgetConfig,
    domain::{
        id::{ColumnId, IdGenerator, TaskId},
        task::Task,
    },
    error::{KanbanError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column of the board and the tasks it holds, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            tasks: Vec::new(),
        }
    }

    /// Number of tasks currently in the column
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == task_id)
    }
}

/// Kanban board state.
///
/// Serializes as the bare array of columns. Every task lives in exactly one
/// column, and ids are never reissued within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Column>,
    #[serde(skip)]
    ids: IdGenerator,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ids: IdGenerator::new(),
        }
    }

    /// Builds a board of empty columns from `(id, title)` pairs
    pub fn with_columns<I, K, V>(seeds: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            seeds
                .into_iter()
                .map(|(id, title)| Column::new(ColumnId::new(id), title.into()))
                .collect(),
        )
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == id)
    }

    /// Locates a task, returning the index of its column and its index within it
    pub fn find_task(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, col)| col.position_of(id).map(|ti| (ci, ti)))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.find_task(id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    /// Gets the column currently holding a task
    pub fn column_of_task(&self, id: &TaskId) -> Option<&Column> {
        self.find_task(id).map(|(ci, _)| &self.columns[ci])
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::task_count).sum()
    }

    /// Checks whether any column or task already uses the id
    pub fn contains_id(&self, id: &str) -> bool {
        self.columns.iter().any(|col| {
            col.id.as_str() == id || col.tasks.iter().any(|t| t.id.as_str() == id)
        })
    }

    /// Checks that no column or task id appears twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(KanbanError::DuplicateId(column.id.to_string()));
            }
            for task in &column.tasks {
                if !seen.insert(task.id.as_str()) {
                    return Err(KanbanError::DuplicateId(task.id.to_string()));
                }
            }
        }
        Ok(())
    }

    fn fresh_column_id(&mut self) -> ColumnId {
        loop {
            let id = self.ids.next_column_id();
            if !self.contains_id(id.as_str()) {
                return id;
            }
        }
    }

    fn fresh_task_id(&mut self) -> TaskId {
        loop {
            let id = self.ids.next_task_id();
            if !self.contains_id(id.as_str()) {
                return id;
            }
        }
    }

    /// Appends a new empty column
    pub fn add_column(&mut self, title: impl Into<String>) -> &Column {
        let id = self.fresh_column_id();
        self.columns.push(Column::new(id, title.into()));
        &self.columns[self.columns.len() - 1]
    }

    /// Removes a column together with all of its tasks
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<Column> {
        let index = self
            .columns
            .iter()
            .position(|col| &col.id == id)
            .ok_or_else(|| KanbanError::ColumnNotFound(id.to_string()))?;
        Ok(self.columns.remove(index))
    }

    /// Appends a new task to the end of a column
    pub fn add_task(&mut self, column_id: &ColumnId, content: impl Into<String>) -> Result<&Task> {
        if self.column(column_id).is_none() {
            return Err(KanbanError::ColumnNotFound(column_id.to_string()));
        }

        let task = Task::new(self.fresh_task_id(), content.into());
        let column = self
            .column_mut(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))?;
        column.tasks.push(task);
        Ok(&column.tasks[column.tasks.len() - 1])
    }

    /// Removes a task from whichever column holds it
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task> {
        let (ci, ti) = self
            .find_task(id)
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))?;
        Ok(self.columns[ci].tasks.remove(ti))
    }

    /// Moves a task to the end of the target column.
    ///
    /// Both ids are resolved before anything changes, so a stale target
    /// leaves the task where it was.
    pub fn move_task(&mut self, id: &TaskId, target: &ColumnId) -> Result<()> {
        let target_index = self
            .columns
            .iter()
            .position(|col| &col.id == target)
            .ok_or_else(|| KanbanError::ColumnNotFound(target.to_string()))?;
        let (ci, ti) = self
            .find_task(id)
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))?;

        let task = self.columns[ci].tasks.remove(ti);
        self.columns[target_index].tasks.push(task);
        Ok(())
    }

    pub fn edit_column_title(&mut self, id: &ColumnId, title: impl Into<String>) -> Result<()> {
        let column = self
            .column_mut(id)
            .ok_or_else(|| KanbanError::ColumnNotFound(id.to_string()))?;
        column.title = title.into();
        Ok(())
    }

    pub fn edit_task_content(&mut self, id: &TaskId, content: impl Into<String>) -> Result<()> {
        let (ci, ti) = self
            .find_task(id)
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))?;
        self.columns[ci].tasks[ti].set_content(content.into());
        Ok(())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        WidgetConfig::default().default_board()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Priority;
    use std::collections::HashSet;

    fn todo() -> ColumnId {
        ColumnId::new("todo")
    }

    fn done() -> ColumnId {
        ColumnId::new("done")
    }

    #[test]
    fn test_default_board() {
        let board = Board::default();

        let ids: Vec<&str> = board.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "inprogress", "done"]);
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn test_add_column_appends() {
        let mut board = Board::default();
        let id = board.add_column("Backlog").id.clone();

        assert_eq!(board.len(), 4);
        assert_eq!(board.columns()[3].id, id);
        assert_eq!(board.columns()[3].title, "Backlog");
        assert!(board.columns()[3].tasks.is_empty());
    }

    #[test]
    fn test_add_then_delete_column_restores_board() {
        let mut board = Board::default();
        board.add_task(&todo(), "keep me").unwrap();
        let before = board.clone();

        let id = board.add_column("Backlog").id.clone();
        board.delete_column(&id).unwrap();

        assert_eq!(board, before);
    }

    #[test]
    fn test_delete_column_removes_its_tasks() {
        let mut board = Board::default();
        let task_id = board.add_task(&todo(), "gone").unwrap().id.clone();

        let removed = board.delete_column(&todo()).unwrap();
        assert_eq!(removed.tasks.len(), 1);
        assert!(board.task(&task_id).is_none());

        // Removing again is a no-op
        let snapshot = board.clone();
        assert!(board.delete_task(&task_id).is_err());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_add_task_to_missing_column() {
        let mut board = Board::default();
        let before = board.clone();

        let err = board.add_task(&ColumnId::new("nope"), "lost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_task_appends_in_order() {
        let mut board = Board::default();
        board.add_task(&todo(), "first").unwrap();
        board.add_task(&todo(), "second").unwrap();

        let contents: Vec<&str> = board
            .column(&todo())
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut board = Board::default();
        let mut seen: HashSet<String> = board
            .columns()
            .iter()
            .map(|c| c.id.to_string())
            .collect();

        for i in 0..50 {
            let column_id = board.add_column(format!("col {}", i)).id.clone();
            assert!(seen.insert(column_id.to_string()));
            for _ in 0..3 {
                let task_id = board.add_task(&column_id, "task").unwrap().id.clone();
                assert!(seen.insert(task_id.to_string()));
            }
        }
    }

    #[test]
    fn test_loaded_ids_are_not_reissued() {
        let mut fresh = Board::default();
        let first = fresh.add_task(&todo(), "x").unwrap().clone();

        // A new session whose counter restarts must skip the stored id
        let json = serde_json::to_string(&fresh).unwrap();
        let mut reloaded: Board = serde_json::from_str(&json).unwrap();
        let second = reloaded.add_task(&todo(), "y").unwrap().id.clone();

        assert_ne!(first.id, second);
    }

    #[test]
    fn test_move_task_preserves_fields() {
        let mut board = Board::default();
        let original = board.add_task(&todo(), "write spec").unwrap().clone();

        board.move_task(&original.id, &done()).unwrap();

        assert_eq!(board.column(&todo()).unwrap().task_count(), 0);
        let moved = &board.column(&done()).unwrap().tasks[0];
        assert_eq!(moved, &original);
        assert_eq!(moved.priority, Priority::Medium);
        assert_eq!(board.column_of_task(&original.id).unwrap().id, done());
        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn test_move_task_appends_to_end() {
        let mut board = Board::default();
        board.add_task(&done(), "already done").unwrap();
        let id = board.add_task(&todo(), "late").unwrap().id.clone();

        board.move_task(&id, &done()).unwrap();

        let tasks = &board.column(&done()).unwrap().tasks;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, id);
    }

    #[test]
    fn test_move_within_same_column_goes_to_end() {
        let mut board = Board::default();
        let first = board.add_task(&todo(), "a").unwrap().id.clone();
        board.add_task(&todo(), "b").unwrap();

        board.move_task(&first, &todo()).unwrap();

        assert_eq!(board.column(&todo()).unwrap().tasks[1].id, first);
    }

    #[test]
    fn test_move_to_missing_column_keeps_task() {
        let mut board = Board::default();
        let id = board.add_task(&todo(), "stay").unwrap().id.clone();
        let before = board.clone();

        assert!(board.move_task(&id, &ColumnId::new("gone")).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_edit_fields_without_validation() {
        let mut board = Board::default();
        let id = board.add_task(&todo(), "draft").unwrap().id.clone();

        board.edit_task_content(&id, "").unwrap();
        board.edit_column_title(&todo(), "").unwrap();

        assert_eq!(board.task(&id).unwrap().content, "");
        assert_eq!(board.column(&todo()).unwrap().title, "");
        assert!(board
            .edit_task_content(&TaskId::new("missing"), "x")
            .is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_column_ids() {
        let board = Board::with_columns([("todo", "A"), ("todo", "B")]);

        let err = board.validate().unwrap_err();
        assert!(matches!(err, KanbanError::DuplicateId(id) if id == "todo"));
    }

    #[test]
    fn test_validate_rejects_duplicate_task_ids() {
        let mut first = Column::new(ColumnId::new("a"), "A".to_string());
        let mut second = Column::new(ColumnId::new("b"), "B".to_string());
        first.tasks.push(Task::new(TaskId::new("t1"), "one".to_string()));
        second.tasks.push(Task::new(TaskId::new("t1"), "two".to_string()));

        assert!(Board::new(vec![first, second]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_task_sharing_column_id() {
        let mut column = Column::new(ColumnId::new("x"), "X".to_string());
        column.tasks.push(Task::new(TaskId::new("x"), "clash".to_string()));

        assert!(Board::new(vec![column]).validate().is_err());
    }

    #[test]
    fn test_validate_accepts_generated_board() {
        let mut board = Board::default();
        let id = board.add_column("Backlog").id.clone();
        board.add_task(&id, "a").unwrap();
        board.add_task(&ColumnId::new("todo"), "b").unwrap();

        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_board_serializes_as_column_array() {
        let board = Board::default();
        let json = serde_json::to_value(&board).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["id"], "todo");
        assert_eq!(json[0]["title"], "To Do");
        assert_eq!(json[0]["tasks"], serde_json::json!([]));
    }
}
