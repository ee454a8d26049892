//! In-memory task service for tests and offline flows.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Assignee, Board, BoardId, Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{GatewayError, GatewayResult, TaskGateway},
};

/// Gateway operations, used to script failures and inspect call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// [`TaskGateway::create_task`].
    CreateTask,
    /// [`TaskGateway::update_task`].
    UpdateTask,
    /// [`TaskGateway::update_status`].
    UpdateStatus,
    /// [`TaskGateway::fetch_task`].
    FetchTask,
    /// [`TaskGateway::fetch_board_tasks`].
    FetchBoardTasks,
    /// [`TaskGateway::fetch_all_tasks`].
    FetchAllTasks,
    /// [`TaskGateway::fetch_boards`].
    FetchBoards,
    /// [`TaskGateway::fetch_assignees`].
    FetchAssignees,
}

/// Thread-safe in-memory task service.
///
/// Behaves like the remote service (assigns numeric identifiers, rejects
/// unknown tasks with 404-style errors) without any I/O. Failures can be
/// scripted per operation with [`InMemoryTaskGateway::fail_next`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryServiceState>>,
}

#[derive(Debug, Default)]
struct InMemoryServiceState {
    tasks: Vec<Task>,
    boards: Vec<Board>,
    assignees: Vec<Assignee>,
    last_id: u64,
    scripted_failures: HashMap<GatewayOperation, VecDeque<GatewayError>>,
    calls: Vec<GatewayOperation>,
}

impl InMemoryServiceState {
    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn board_name(&self, board_id: BoardId) -> Option<&str> {
        self.boards
            .iter()
            .find(|board| board.id == board_id)
            .map(|board| board.name.as_str())
    }

    /// Records the call and pops a scripted failure for it, if any.
    fn begin(&mut self, operation: GatewayOperation) -> GatewayResult<()> {
        self.calls.push(operation);
        match self
            .scripted_failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn lock_error(err: impl ToString) -> GatewayError {
    GatewayError::transport(std::io::Error::other(err.to_string()))
}

fn not_found(kind: &str, id: impl std::fmt::Display) -> String {
    format!("{kind} {id} not found")
}

impl InMemoryTaskGateway {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a board.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn insert_board(&self, board: Board) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.boards.retain(|existing| existing.id != board.id);
        state.boards.push(board);
        Ok(())
    }

    /// Registers an assignee.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn insert_assignee(&self, assignee: Assignee) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.assignees.retain(|existing| existing.id != assignee.id);
        state.assignees.push(assignee);
        Ok(())
    }

    /// Stores a task as if it had been created earlier. Numeric identifiers
    /// advance the id sequence so later creates never collide.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn insert_task(&self, task: Task) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Ok(numeric) = task.id().as_str().parse::<u64>() {
            state.last_id = state.last_id.max(numeric);
        }
        match state.position(task.id()) {
            Some(index) => {
                if let Some(slot) = state.tasks.get_mut(index) {
                    *slot = task;
                }
            }
            None => state.tasks.push(task),
        }
        Ok(())
    }

    /// Removes a task, as another client deleting it would.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn delete_task(&self, id: &TaskId) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tasks.retain(|task| task.id() != id);
        Ok(())
    }

    /// Makes the next call of `operation` fail with `error`. Scripted
    /// failures queue up and are consumed in order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_next(&self, operation: GatewayOperation, error: GatewayError) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .scripted_failures
            .entry(operation)
            .or_default()
            .push_back(error);
        Ok(())
    }

    /// Returns the service-side copy of a task.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn task(&self, id: &TaskId) -> GatewayResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.position(id).and_then(|index| state.tasks.get(index)).cloned())
    }

    /// Returns every operation invoked so far, in call order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn calls(&self) -> GatewayResult<Vec<GatewayOperation>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.calls.clone())
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::CreateTask)?;
        state.last_id += 1;
        let mut task = draft.clone().into_task(TaskId::from(state.last_id));
        if task.board_name().is_empty()
            && let Some(name) = state.board_name(task.board_id())
        {
            task.set_board_name(name.to_owned());
        }
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::UpdateTask)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| GatewayError::UpdateFailed {
                status: 404,
                reason: not_found("task", id),
            })?;
        task.apply_patch(patch);
        Ok(())
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::UpdateStatus)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| GatewayError::UpdateFailed {
                status: 404,
                reason: not_found("task", id),
            })?;
        task.set_status(status);
        Ok(())
    }

    async fn fetch_task(&self, id: &TaskId) -> GatewayResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::FetchTask)?;
        state
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or_else(|| GatewayError::FetchFailed {
                status: 404,
                reason: not_found("task", id),
            })
    }

    async fn fetch_board_tasks(&self, board_id: BoardId) -> GatewayResult<Vec<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::FetchBoardTasks)?;
        if !state.boards.is_empty() && state.board_name(board_id).is_none() {
            return Err(GatewayError::FetchFailed {
                status: 404,
                reason: not_found("board", board_id),
            });
        }
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.board_id() == board_id)
            .cloned()
            .collect())
    }

    async fn fetch_all_tasks(&self) -> GatewayResult<Vec<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::FetchAllTasks)?;
        Ok(state.tasks.clone())
    }

    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::FetchBoards)?;
        Ok(state
            .boards
            .iter()
            .map(|board| {
                let task_count = state
                    .tasks
                    .iter()
                    .filter(|task| task.board_id() == board.id)
                    .count();
                Board::new(board.id, board.name.clone(), task_count)
            })
            .collect())
    }

    async fn fetch_assignees(&self) -> GatewayResult<Vec<Assignee>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.begin(GatewayOperation::FetchAssignees)?;
        Ok(state.assignees.clone())
    }
}
