//! Shared helpers for in-memory integration tests.

use boardsync::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{AssigneeId, Board, BoardId, Priority, Task, TaskData, TaskId, TaskStatus},
    services::{BoardScope, BoardStore, BoardSyncService, DragController, SharedBoardStore},
};
use rstest::fixture;
use std::sync::Arc;

/// Builds a board identifier, failing the test on invalid input.
///
/// # Panics
///
/// Panics when `value` is zero.
#[must_use]
pub fn board_id(value: u64) -> BoardId {
    BoardId::new(value).expect("valid board id")
}

/// Builds a task identifier, failing the test on invalid input.
///
/// # Panics
///
/// Panics when `value` is blank.
#[must_use]
pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Task field values for seeding the service.
pub struct Seed<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub priority: Priority,
    pub status: TaskStatus,
    pub assignee: &'a str,
    pub board: u64,
}

impl Seed<'_> {
    /// Converts the seed into a task. The board name is left for the
    /// directory to fill.
    ///
    /// # Panics
    ///
    /// Panics when the seed holds invalid identifiers or a blank title.
    #[must_use]
    pub fn task(&self) -> Task {
        Task::new(TaskData {
            id: task_id(self.id),
            title: self.title.to_owned(),
            description: String::new(),
            priority: self.priority,
            status: self.status,
            assignee_name: self.assignee.to_owned(),
            assignee_id: (!self.assignee.is_empty()).then(|| AssigneeId::new(7)),
            board_id: board_id(self.board),
            board_name: String::new(),
        })
        .expect("valid seed task")
    }
}

/// Two boards, four tasks spread across them.
pub const SEEDS: [Seed<'static>; 4] = [
    Seed {
        id: "1",
        title: "Fix login redirect",
        priority: Priority::High,
        status: TaskStatus::Todo,
        assignee: "Ivan Ivanov",
        board: 1,
    },
    Seed {
        id: "2",
        title: "Add audit trail",
        priority: Priority::Medium,
        status: TaskStatus::InProgress,
        assignee: "Petr Petrov",
        board: 1,
    },
    Seed {
        id: "3",
        title: "Document API",
        priority: Priority::Low,
        status: TaskStatus::Todo,
        assignee: "",
        board: 2,
    },
    Seed {
        id: "4",
        title: "Archive old releases",
        priority: Priority::Low,
        status: TaskStatus::Done,
        assignee: "Ivan Ivanov",
        board: 2,
    },
];

/// Provides a service seeded with two boards and [`SEEDS`].
///
/// # Panics
///
/// Panics when seeding fails.
#[fixture]
pub fn gateway() -> Arc<InMemoryTaskGateway> {
    let gateway = InMemoryTaskGateway::new();
    gateway
        .insert_board(Board::new(board_id(1), "Identity", 0))
        .expect("board inserted");
    gateway
        .insert_board(Board::new(board_id(2), "Docs", 0))
        .expect("board inserted");
    for seed in &SEEDS {
        gateway.insert_task(seed.task()).expect("task inserted");
    }
    Arc::new(gateway)
}

/// Sync service and drag controller sharing one store.
pub struct BoardView {
    pub sync: BoardSyncService<InMemoryTaskGateway>,
    pub drag: DragController<InMemoryTaskGateway>,
}

impl BoardView {
    /// Wires a view of `scope` over `gateway`.
    #[must_use]
    pub fn new(gateway: &Arc<InMemoryTaskGateway>, scope: BoardScope) -> Self {
        let store = SharedBoardStore::new(BoardStore::new(scope));
        Self {
            sync: BoardSyncService::new(Arc::clone(gateway), store.clone()),
            drag: DragController::new(Arc::clone(gateway), store),
        }
    }

    /// Returns the store behind the view.
    #[must_use]
    pub const fn store(&self) -> &SharedBoardStore {
        self.sync.store()
    }
}
