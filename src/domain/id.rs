use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a column (e.g., todo, col17000000000001)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a task (e.g., task17000000000001)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Session-scoped id source.
///
/// Ids are `{prefix}{unix millis}{counter}`. The counter never resets during a
/// session, so two ids minted within the same millisecond still differ.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    const COLUMN_PREFIX: &'static str = "col";
    const TASK_PREFIX: &'static str = "task";

    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Produces the next raw id for the given prefix
    pub fn next_raw(&mut self, prefix: &str) -> String {
        let id = format!("{}{}{}", prefix, Utc::now().timestamp_millis(), self.next);
        self.next += 1;
        id
    }

    /// Generates the next column id
    pub fn next_column_id(&mut self) -> ColumnId {
        ColumnId(self.next_raw(Self::COLUMN_PREFIX))
    }

    /// Generates the next task id
    pub fn next_task_id(&mut self) -> TaskId {
        TaskId(self.next_raw(Self::TASK_PREFIX))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
