//! Board and assignee read models supplied by the directory endpoints.

use super::{AssigneeId, BoardId};
use serde::{Deserialize, Serialize};

/// A named collection of tasks on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board identifier.
    pub id: BoardId,
    /// Display name.
    pub name: String,
    /// Task count reported by the service; informational only.
    pub task_count: usize,
}

impl Board {
    /// Creates a board entry.
    #[must_use]
    pub fn new(id: BoardId, name: impl Into<String>, task_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            task_count,
        }
    }
}

/// A user tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// User identifier.
    pub id: AssigneeId,
    /// Display name.
    pub full_name: String,
    /// Contact address, possibly empty.
    pub email: String,
    /// Avatar location, possibly empty.
    pub avatar_url: String,
}

impl Assignee {
    /// Creates an assignee entry with no contact details.
    #[must_use]
    pub fn new(id: AssigneeId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: String::new(),
            avatar_url: String::new(),
        }
    }
}
