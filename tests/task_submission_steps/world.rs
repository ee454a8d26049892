//! Shared world state for task submission BDD scenarios.

use std::sync::Arc;

use boardsync::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::TaskStatus,
    services::{
        BoardSyncResult, BoardSyncService, SharedBoardStore, SubmissionOutcome, TaskForm,
    },
};
use rstest::fixture;

/// Scenario world for task submission behaviour tests.
pub struct SubmissionWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub sync: BoardSyncService<InMemoryTaskGateway>,
    pub form: Option<TaskForm>,
    pub last_outcome: Option<BoardSyncResult<SubmissionOutcome>>,
}

impl SubmissionWorld {
    /// Creates a world with an empty service and an all-boards view.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryTaskGateway::new());
        Self {
            sync: BoardSyncService::new(Arc::clone(&gateway), SharedBoardStore::default()),
            gateway,
            form: None,
            last_outcome: None,
        }
    }

    /// Returns the titles of one column, top to bottom.
    #[must_use]
    pub fn column_titles(&self, status: TaskStatus) -> Vec<String> {
        self.sync
            .store()
            .columns()
            .column(status)
            .tasks()
            .iter()
            .map(|task| task.title().to_owned())
            .collect()
    }
}

impl Default for SubmissionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SubmissionWorld {
    SubmissionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
