//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The board identifier is not a positive integer.
    #[error("invalid board identifier '{0}', expected a positive integer")]
    InvalidBoardId(String),

    /// The assignee identifier is not a non-negative integer.
    #[error("invalid assignee identifier '{0}', expected a non-negative integer")]
    InvalidAssigneeId(String),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A remote payload lacks a field required to build a task.
    #[error("remote task payload is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Error returned while strictly parsing a task status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while strictly parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
