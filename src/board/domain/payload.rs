//! Remote task payloads and their conversion into [`Task`] records.
//!
//! The service is loose about its shapes: identifiers arrive as numbers or
//! strings and any field may be missing. Payload types therefore accept
//! everything optionally and [`Task::from_remote_payload`] decides what is
//! required.

use super::{
    AssigneeId, BoardDomainError, BoardId, Priority, Task, TaskData, TaskId, status,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as sent by the service, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    /// Numeric identifier.
    Number(u64),
    /// Textual identifier.
    Text(String),
}

impl RemoteId {
    /// Returns the numeric value when the identifier is or parses as one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Assignee block embedded in a remote task payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAssignee {
    /// User identifier.
    pub id: Option<RemoteId>,
    /// Display name.
    pub full_name: Option<String>,
    /// Contact address.
    pub email: Option<String>,
    /// Avatar location.
    pub avatar_url: Option<String>,
}

/// Task as returned by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTaskPayload {
    /// Remote task identifier.
    pub id: Option<RemoteId>,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Priority in remote vocabulary (`Low`, `Medium`, `High`).
    pub priority: Option<String>,
    /// Status in remote vocabulary (`Backlog`, `InProgress`, `Done`).
    pub status: Option<String>,
    /// Assigned user.
    pub assignee: Option<RemoteAssignee>,
    /// Owning board identifier.
    pub board_id: Option<RemoteId>,
    /// Owning board name.
    pub board_name: Option<String>,
}

impl RemoteTaskPayload {
    /// Renders a task in the remote shape.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().as_str().parse::<u64>().map_or_else(
                |_| Some(RemoteId::Text(task.id().to_string())),
                |numeric| Some(RemoteId::Number(numeric)),
            ),
            title: Some(task.title().to_owned()),
            description: Some(task.description().to_owned()),
            priority: Some(task.priority().as_remote_str().to_owned()),
            status: Some(status::to_remote(task.status()).as_str().to_owned()),
            assignee: task.assignee_id().map(|id| RemoteAssignee {
                id: Some(RemoteId::Number(id.value())),
                full_name: Some(task.assignee_name().to_owned()),
                email: None,
                avatar_url: None,
            }),
            board_id: Some(RemoteId::Number(task.board_id().value())),
            board_name: Some(task.board_name().to_owned()),
        }
    }
}

impl Task {
    /// Builds a task from a remote payload.
    ///
    /// `context_board_id` supplies the owning board when the payload was
    /// fetched through a board-scoped request and its `boardId` is absent,
    /// zero, or not numeric. A missing assignee block yields an empty
    /// assignee, and an assignee block without a usable `id` keeps only the
    /// display name; neither fails the record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::MissingField`] when the identifier, title,
    /// or owning board cannot be determined, and [`BoardDomainError::EmptyTitle`]
    /// for a blank title.
    pub fn from_remote_payload(
        payload: RemoteTaskPayload,
        context_board_id: Option<BoardId>,
    ) -> Result<Self, BoardDomainError> {
        let id = payload
            .id
            .ok_or(BoardDomainError::MissingField("id"))
            .and_then(|raw| TaskId::new(raw.to_string()))?;
        let title = payload
            .title
            .ok_or(BoardDomainError::MissingField("title"))?;
        let board_id = payload
            .board_id
            .as_ref()
            .and_then(RemoteId::as_u64)
            .and_then(|raw| BoardId::new(raw).ok())
            .or(context_board_id)
            .ok_or(BoardDomainError::MissingField("boardId"))?;
        let assignee = payload.assignee.unwrap_or_default();

        Self::new(TaskData {
            id,
            title,
            description: payload.description.unwrap_or_default(),
            priority: payload
                .priority
                .as_deref()
                .map_or_else(Priority::default, Priority::from_remote_lossy),
            status: payload
                .status
                .as_deref()
                .map_or_else(Default::default, status::to_internal),
            assignee_name: assignee.full_name.unwrap_or_default(),
            assignee_id: assignee
                .id
                .as_ref()
                .and_then(RemoteId::as_u64)
                .map(AssigneeId::new)
                .filter(|id| !id.is_unassigned()),
            board_id,
            board_name: payload.board_name.unwrap_or_default(),
        })
    }
}
