//! Application services for board state synchronisation.

mod directory;
mod drag;
mod store;
mod submission;
mod sync;

pub use directory::DirectoryCache;
pub use drag::{
    DragController, DragError, DragPhase, DropIgnored, DropOutcome, PendingTransition,
    TransitionSettled,
};
pub use store::{BoardScope, BoardStore, SharedBoardStore};
pub use submission::{BoardSelection, SubmissionOutcome, TaskForm};
pub use sync::{BoardSyncError, BoardSyncResult, BoardSyncService};
