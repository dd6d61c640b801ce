use crate::{config::WidgetConfig, domain::Board, error::Result};

#[cfg(feature = "file-storage")]
pub mod file_store;
pub mod memory_store;

#[cfg(feature = "file-storage")]
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Blocking string key-value storage the board is persisted into
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Persists a whole board as one JSON value under a fixed key
pub struct BoardStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> BoardStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Creates a board store using the configured storage key
    pub fn from_config(store: S, config: &WidgetConfig) -> Self {
        Self::new(store, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Serializes the full board and writes it under the key
    pub fn save(&mut self, board: &Board) -> Result<()> {
        let json = serde_json::to_string(board)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!("Saved board under '{}' ({} bytes)", self.key, json.len());
        Ok(())
    }

    /// Loads the stored board, surfacing read, parse and duplicate-id failures
    pub fn try_load(&self) -> Result<Option<Board>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let board: Board = serde_json::from_str(&raw)?;
        board.validate()?;
        Ok(Some(board))
    }

    /// Loads the stored board. Unreadable or malformed state counts as absent.
    pub fn load(&self) -> Option<Board> {
        match self.try_load() {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!("Discarding stored board under '{}': {}", self.key, e);
                None
            }
        }
    }

    /// Loads the stored board or builds the configured default
    pub fn load_or_default(&self, config: &WidgetConfig) -> Board {
        self.load().unwrap_or_else(|| {
            tracing::info!("No stored board under '{}', starting fresh", self.key);
            config.default_board()
        })
    }

    /// Removes the stored board
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, ColumnId, Priority, Task, TaskId};
    use chrono::{TimeZone, Utc};

    fn board_store() -> (BoardStore<MemoryStore>, MemoryStore) {
        let memory = MemoryStore::new();
        (BoardStore::new(memory.clone(), "kanban9"), memory)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (mut store, _) = board_store();
        let mut board = Board::default();
        let todo = ColumnId::new("todo");
        board.add_task(&todo, "one\ntwo").unwrap();
        board.add_column("Backlog");

        store.save(&board).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, board);
    }

    #[test]
    fn test_round_trip_keeps_sub_millisecond_timestamps() {
        let (mut store, _) = board_store();
        let mut column = Column::new(ColumnId::new("todo"), "To Do".to_string());
        column.tasks.push(Task {
            id: TaskId::new("task1"),
            content: "hand built".to_string(),
            priority: Priority::Low,
            created: Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap(),
        });
        let board = Board::new(vec![column]);

        store.save(&board).unwrap();

        assert_eq!(store.load(), Some(board));
    }

    #[test]
    fn test_saved_value_is_column_array_under_key() {
        let (mut store, memory) = board_store();
        store.save(&Board::default()).unwrap();

        let raw = memory.get("kanban9").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_absent_value_loads_none() {
        let (store, _) = board_store();
        assert!(store.load().is_none());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_value_falls_back_to_default() {
        let (store, mut memory) = board_store();
        memory.set("kanban9", "{not json").unwrap();

        assert!(store.try_load().is_err());
        assert!(store.load().is_none());
        assert_eq!(
            store.load_or_default(&WidgetConfig::default()),
            Board::default()
        );
    }

    #[test]
    fn test_schema_mismatch_is_treated_as_absent() {
        let (store, mut memory) = board_store();
        memory
            .set("kanban9", r#"[{"id": "todo", "tasks": []}]"#)
            .unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_duplicate_ids_are_treated_as_absent() {
        let (store, mut memory) = board_store();
        memory
            .set(
                "kanban9",
                r#"[{"id":"todo","title":"A","tasks":[]},{"id":"todo","title":"B","tasks":[]}]"#,
            )
            .unwrap();

        assert!(matches!(
            store.try_load(),
            Err(crate::error::KanbanError::DuplicateId(_))
        ));
        assert!(store.load().is_none());
        assert_eq!(
            store.load_or_default(&WidgetConfig::default()),
            Board::default()
        );
    }

    #[test]
    fn test_clear_removes_value() {
        let (mut store, memory) = board_store();
        store.save(&Board::default()).unwrap();
        store.clear().unwrap();

        assert!(memory.get("kanban9").unwrap().is_none());
    }
}
