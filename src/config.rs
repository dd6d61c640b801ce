use crate::{
    domain::Board,
    error::{KanbanError, Result},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// Id and title of a column on a fresh board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSeed {
    pub id: String,
    pub title: String,
}

impl ColumnSeed {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Widget settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Key the board is stored under
    pub storage_key: String,
    /// Columns of the board used when nothing usable is stored
    pub default_columns: Vec<ColumnSeed>,
    /// Title used when the column prompt is cancelled or left empty
    pub new_column_title: String,
    /// Content used when the task prompt is cancelled or left empty
    pub new_task_title: String,
    pub column_prompt: String,
    pub task_prompt: String,
    pub delete_column_confirm: String,
    /// Upper bound for an expanded task, in pixels
    pub max_expanded_height: u32,
    /// chrono format string for task creation dates
    pub date_format: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: "kanban9".to_string(),
            default_columns: vec![
                ColumnSeed::new("todo", "To Do"),
                ColumnSeed::new("inprogress", "In Progress"),
                ColumnSeed::new("done", "Done"),
            ],
            new_column_title: "New Column".to_string(),
            new_task_title: "New Task".to_string(),
            column_prompt: "Column title:".to_string(),
            task_prompt: "Task description:".to_string(),
            delete_column_confirm: "Delete this column and all its tasks?".to_string(),
            max_expanded_height: 400,
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

impl WidgetConfig {
    const APP_DIR: &'static str = "kanban-widget";
    const CONFIG_FILE: &'static str = "config.toml";

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::CONFIG_FILE))
    }

    /// Default directory for file-backed board storage
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(Self::APP_DIR))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects default column seeds that share an id
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for seed in &self.default_columns {
            if !seen.insert(seed.id.as_str()) {
                return Err(KanbanError::ConfigError(format!(
                    "Duplicate default column id: {}",
                    seed.id
                )));
            }
        }
        Ok(())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads the user config, or the defaults if it is missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Builds the board used when nothing usable is stored.
    /// A seed repeating an earlier id is skipped.
    pub fn default_board(&self) -> Board {
        let mut seen = HashSet::new();
        Board::with_columns(
            self.default_columns
                .iter()
                .filter(|seed| {
                    let fresh = seen.insert(seed.id.as_str());
                    if !fresh {
                        tracing::warn!("Skipping duplicate default column '{}'", seed.id);
                    }
                    fresh
                })
                .map(|seed| (seed.id.clone(), seed.title.clone())),
        )
    }
}
