//! Identifier types for the board domain.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote-assigned identifier of a persisted task.
///
/// The service issues numeric identifiers, but the domain keeps them as
/// opaque strings so that a task's identity never depends on the wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Positive identifier of a board on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(u64);

impl BoardId {
    /// Creates a validated board identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidBoardId`] when the value is zero.
    pub fn new(value: u64) -> Result<Self, BoardDomainError> {
        if value == 0 {
            return Err(BoardDomainError::InvalidBoardId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses a board identifier from a route segment or form value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidBoardId`] when the value is not a
    /// positive integer.
    pub fn parse(value: &str) -> Result<Self, BoardDomainError> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|parsed| *parsed > 0)
            .map(Self)
            .ok_or_else(|| BoardDomainError::InvalidBoardId(value.to_owned()))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user a task may be assigned to.
///
/// Zero is the service's sentinel for "unassigned"; [`AssigneeId::UNASSIGNED`]
/// names it so callers never pass a bare `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssigneeId(u64);

impl AssigneeId {
    /// Sentinel sent to the service when no assignee is selected.
    pub const UNASSIGNED: Self = Self(0);

    /// Wraps a numeric assignee identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parses an optional form value, treating absence or blank input as
    /// [`AssigneeId::UNASSIGNED`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidAssigneeId`] when a non-blank value
    /// is not a non-negative integer.
    pub fn parse_optional(value: Option<&str>) -> Result<Self, BoardDomainError> {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(Self::UNASSIGNED);
        };
        raw.parse::<u64>()
            .map(Self)
            .map_err(|_| BoardDomainError::InvalidAssigneeId(raw.to_owned()))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns `true` for the unassigned sentinel.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AssigneeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
