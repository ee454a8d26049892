//! Gateway port for the remote task service.
//!
//! All knowledge of the wire format lives behind this trait. Every call is
//! single-shot: implementations must not retry, coalesce, or deduplicate
//! requests, so that each remote interaction stays observable to callers.

use crate::board::domain::{
    Assignee, Board, BoardId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote task service contract.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Creates a task and returns it with the identifier the service assigned.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::CreateFailed`] when the service rejects the
    /// request or [`GatewayError::MissingTaskId`] when the response carries
    /// no identifier.
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task>;

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UpdateFailed`] when the service rejects the
    /// request.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()>;

    /// Changes only the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UpdateFailed`] when the service rejects the
    /// request.
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> GatewayResult<()>;

    /// Reads a single task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FetchFailed`] on a non-success response and
    /// [`GatewayError::MalformedResponse`] when the body is not a task.
    async fn fetch_task(&self, id: &TaskId) -> GatewayResult<Task>;

    /// Reads every task on one board.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FetchFailed`] on a non-success response and
    /// [`GatewayError::MalformedResponse`] when the body holds no task list.
    async fn fetch_board_tasks(&self, board_id: BoardId) -> GatewayResult<Vec<Task>>;

    /// Reads every task on every board.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FetchFailed`] on a non-success response and
    /// [`GatewayError::MalformedResponse`] when the body holds no task list.
    async fn fetch_all_tasks(&self) -> GatewayResult<Vec<Task>>;

    /// Reads the board directory.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FetchFailed`] on a non-success response and
    /// [`GatewayError::MalformedResponse`] when the body holds no board list.
    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>>;

    /// Reads the users tasks can be assigned to.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FetchFailed`] on a non-success response and
    /// [`GatewayError::MalformedResponse`] when the body holds no user list.
    async fn fetch_assignees(&self) -> GatewayResult<Vec<Assignee>>;
}

/// Errors returned by gateway implementations.
///
/// Every variant renders a message suitable for an error banner; variants
/// that stem from an HTTP response also expose its status through
/// [`GatewayError::status`].
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// A read returned a non-success status.
    #[error("failed to load data (status {status}): {reason}")]
    FetchFailed {
        /// Response status code.
        status: u16,
        /// Reason reported by the service.
        reason: String,
    },

    /// A read succeeded but its body did not have the expected shape.
    #[error("unexpected response from task service: {0}")]
    MalformedResponse(String),

    /// The service rejected a create request.
    #[error("failed to create task (status {status}): {reason}")]
    CreateFailed {
        /// Response status code.
        status: u16,
        /// Reason reported by the service.
        reason: String,
    },

    /// The service rejected an update or status change.
    #[error("failed to update task (status {status}): {reason}")]
    UpdateFailed {
        /// Response status code.
        status: u16,
        /// Reason reported by the service.
        reason: String,
    },

    /// A create succeeded but no task identifier could be read back.
    #[error("task was created but the response carried no task identifier")]
    MissingTaskId,

    /// A request URL could not be built on the configured base URL.
    #[error("cannot build a request URL from '{0}'")]
    InvalidEndpoint(String),

    /// The request could not be delivered or the response not read.
    #[error("task service unreachable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the response status code when the error stems from one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. }
            | Self::CreateFailed { status, .. }
            | Self::UpdateFailed { status, .. } => Some(*status),
            Self::MalformedResponse(_)
            | Self::MissingTaskId
            | Self::InvalidEndpoint(_)
            | Self::Transport(_) => None,
        }
    }
}
