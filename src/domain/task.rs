use crate::domain::id::TaskId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a task. Only rendered as a marker; there is no UI to change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "iso8601_millis")]
    pub created: DateTime<Utc>,
}

impl Task {
    /// Creates a new medium-priority task stamped with the current time
    pub fn new(id: TaskId, content: String) -> Self {
        Self {
            id,
            content,
            priority: Priority::default(),
            // Stored form keeps milliseconds only
            created: Utc::now().trunc_subsecs(3),
        }
    }

    /// Replaces the content. Empty content is allowed.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// `created` is written the way a browser's `Date.toISOString` writes it
/// (`2024-01-01T09:30:00.000Z`) and read back from any RFC 3339 string.
/// Timestamps finer than a millisecond keep their full precision.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Timelike, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if value.nanosecond() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        serializer.serialize_str(&value.to_rfc3339_opts(format, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
