use crate::{
    config::WidgetConfig,
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Directory-backed key-value store, one `<key>.json` file per key
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    /// Creates a store in the platform data directory
    pub fn in_data_dir() -> Result<Self> {
        WidgetConfig::data_dir().map(Self::new).ok_or_else(|| {
            KanbanError::StorageError("No data directory on this platform".to_string())
        })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn entry_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(KanbanError::StorageError(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root_path.join(format!("{}.json", key)))
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_file(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        tracing::debug!("Read {} bytes from {}", contents.len(), path.display());
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_file(key)?;
        self.ensure_directory_exists()?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut temp = tempfile::NamedTempFile::new_in(&self.root_path)?;
        temp.write_all(value.as_bytes())?;
        temp.persist(&path).map_err(|e| KanbanError::IoError(e.error))?;

        tracing::debug!("Atomically wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.entry_file(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Board, storage::BoardStore};
    use tempfile::TempDir;

    #[test]
    fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("nested"));

        store.set("kanban9", "[]").unwrap();

        assert!(temp_dir.path().join("nested/kanban9.json").exists());
        assert_eq!(store.get("kanban9").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();

        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(store.set("../escape", "v").is_err());
        assert!(store.set("", "v").is_err());
        assert!(store.get("a/b").is_err());
    }

    #[test]
    fn test_board_survives_new_store_instance() {
        let temp_dir = TempDir::new().unwrap();
        let mut board = Board::default();
        board.add_column("Backlog");

        BoardStore::new(FileStore::new(temp_dir.path()), "kanban9")
            .save(&board)
            .unwrap();
        let loaded = BoardStore::new(FileStore::new(temp_dir.path()), "kanban9").load();

        assert_eq!(loaded, Some(board));
    }
}
