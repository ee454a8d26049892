//! Task status values and the codec between internal and remote statuses.
//!
//! The board works with three internal statuses that double as column keys.
//! The remote service names the same three states differently; this module
//! is the only place that knows both vocabularies.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal task status, one per board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// All statuses in fixed column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical internal representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns the human-readable column title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Status vocabulary of the remote task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteStatus {
    /// Remote name for [`TaskStatus::Todo`].
    Backlog,
    /// Remote name for [`TaskStatus::InProgress`].
    InProgress,
    /// Remote name for [`TaskStatus::Done`].
    Done,
}

impl RemoteStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RemoteStatus> for TaskStatus {
    fn from(value: RemoteStatus) -> Self {
        match value {
            RemoteStatus::Backlog => Self::Todo,
            RemoteStatus::InProgress => Self::InProgress,
            RemoteStatus::Done => Self::Done,
        }
    }
}

impl From<TaskStatus> for RemoteStatus {
    fn from(value: TaskStatus) -> Self {
        to_remote(value)
    }
}

/// Maps a remote status string to the internal status.
///
/// Unrecognised input falls back to [`TaskStatus::Todo`] so that a task with
/// an unexpected status still lands in a column.
#[must_use]
pub fn to_internal(remote: &str) -> TaskStatus {
    match remote.trim() {
        "Backlog" => TaskStatus::Todo,
        "InProgress" => TaskStatus::InProgress,
        "Done" => TaskStatus::Done,
        _ => TaskStatus::default(),
    }
}

/// Maps an internal status to the remote vocabulary.
#[must_use]
pub const fn to_remote(status: TaskStatus) -> RemoteStatus {
    match status {
        TaskStatus::Todo => RemoteStatus::Backlog,
        TaskStatus::InProgress => RemoteStatus::InProgress,
        TaskStatus::Done => RemoteStatus::Done,
    }
}
