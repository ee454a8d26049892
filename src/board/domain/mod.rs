//! Domain model for board state.
//!
//! Holds the task record, the status codec between internal and remote
//! vocabularies, and the pure projections used by views: status columns and
//! filtered task lists. Nothing here performs I/O.

mod board;
mod column;
mod error;
mod filter;
mod ids;
mod payload;
mod priority;
pub mod status;
mod task;

pub use board::{Assignee, Board};
pub use column::{BoardColumns, Column, project};
pub use error::{BoardDomainError, ParsePriorityError, ParseTaskStatusError};
pub use filter::{TaskQuery, filter};
pub use ids::{AssigneeId, BoardId, TaskId};
pub use payload::{RemoteAssignee, RemoteId, RemoteTaskPayload};
pub use priority::Priority;
pub use status::{RemoteStatus, TaskStatus};
pub use task::{Task, TaskData, TaskDraft, TaskPatch};
