//! Shared world state for board drag BDD scenarios.

use std::sync::Arc;

use boardsync::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Board, BoardId, TaskStatus},
    services::{
        BoardScope, BoardStore, BoardSyncService, DragController, DragError, DropIgnored,
        SharedBoardStore, TransitionSettled,
    },
};
use rstest::fixture;

/// Scenario world for board drag behaviour tests.
pub struct DragWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub sync: BoardSyncService<InMemoryTaskGateway>,
    pub drag: DragController<InMemoryTaskGateway>,
    pub last_ignored: Option<DropIgnored>,
    pub last_settle: Option<Result<TransitionSettled, DragError>>,
}

impl DragWorld {
    /// Creates a world viewing board 1 of an empty task service.
    ///
    /// # Panics
    ///
    /// Panics when the board cannot be registered.
    #[must_use]
    pub fn new() -> Self {
        let board_id = BoardId::new(1).expect("valid board id");
        let gateway = Arc::new(InMemoryTaskGateway::new());
        gateway
            .insert_board(Board::new(board_id, "Platform", 0))
            .expect("board registered");
        let store = SharedBoardStore::new(BoardStore::new(BoardScope::Board(board_id)));

        Self {
            sync: BoardSyncService::new(Arc::clone(&gateway), store.clone()),
            drag: DragController::new(Arc::clone(&gateway), store),
            gateway,
            last_ignored: None,
            last_settle: None,
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

impl Default for DragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragWorld {
    DragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Resolves a column title to its status.
///
/// # Errors
///
/// Returns an error when no column has that title.
pub fn status_from_label(label: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::ALL
        .into_iter()
        .find(|status| status.label() == label)
        .ok_or_else(|| eyre::eyre!("unknown column {label:?}"))
}
