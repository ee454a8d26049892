//! Board store: the authoritative task collection behind one board view.

use crate::board::domain::{
    BoardColumns, BoardId, Task, TaskId, TaskPatch, TaskQuery, TaskStatus, filter, project,
};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Which tasks a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardScope {
    /// Tasks of every board, as shown by the global task list.
    #[default]
    AllBoards,
    /// Tasks of a single board.
    Board(BoardId),
}

impl BoardScope {
    /// Returns `true` when a task belongs in this scope.
    #[must_use]
    pub fn includes(self, task: &Task) -> bool {
        match self {
            Self::AllBoards => true,
            Self::Board(board_id) => task.board_id() == board_id,
        }
    }
}

/// Flat task collection with a lazily cached column projection.
///
/// Every mutation is a complete, synchronous step and drops the cached
/// projection; the next call to [`BoardStore::project`] rebuilds it.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    scope: BoardScope,
    tasks: Vec<Task>,
    projection: OnceCell<BoardColumns>,
}

impl BoardStore {
    /// Creates an empty store for a scope.
    #[must_use]
    pub const fn new(scope: BoardScope) -> Self {
        Self {
            scope,
            tasks: Vec::new(),
            projection: OnceCell::new(),
        }
    }

    /// Returns the scope of this store.
    #[must_use]
    pub const fn scope(&self) -> BoardScope {
        self.scope
    }

    /// Replaces the whole collection.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.invalidate();
    }

    /// Inserts a task with a new identifier or replaces the task with the
    /// same identifier in place.
    ///
    /// A new task outside the store's scope is not inserted; returns whether
    /// the collection changed.
    pub fn upsert(&mut self, task: Task) -> bool {
        if let Some(existing) = self.tasks.iter_mut().find(|held| held.id() == task.id()) {
            *existing = task;
        } else if self.scope.includes(&task) {
            self.tasks.push(task);
        } else {
            return false;
        }
        self.invalidate();
        true
    }

    /// Removes a task. Removing an unknown identifier does nothing.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        let removed = self.tasks.remove(index);
        self.invalidate();
        Some(removed)
    }

    /// Sets the status of one task and returns the status it had before.
    ///
    /// An unknown identifier leaves the store untouched and returns `None`:
    /// a move may race with a removal of the same task.
    pub fn move_status(&mut self, id: &TaskId, status: TaskStatus) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        let previous = task.status();
        task.set_status(status);
        self.invalidate();
        Some(previous)
    }

    /// Applies a confirmed edit to a held task; returns the updated task.
    pub fn apply_patch(&mut self, id: &TaskId, patch: &TaskPatch) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        task.apply_patch(patch);
        let updated = task.clone();
        self.invalidate();
        Some(updated)
    }

    /// Returns the status columns for the current collection.
    #[must_use]
    pub fn project(&self) -> &BoardColumns {
        self.projection.get_or_init(|| project(&self.tasks))
    }

    /// Returns the tasks matching a query, in collection order.
    #[must_use]
    pub fn filter(&self, query: &TaskQuery) -> Vec<Task> {
        filter(&self.tasks, query)
    }

    /// Returns the collection in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of held tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no task is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counts held tasks per board.
    #[must_use]
    pub fn task_counts(&self) -> BTreeMap<BoardId, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            *counts.entry(task.board_id()).or_insert(0) += 1;
        }
        counts
    }

    fn invalidate(&mut self) {
        self.projection.take();
    }
}

/// Cloneable handle to a [`BoardStore`] shared by the services of one view.
///
/// The lock is held only for the duration of a single synchronous store
/// operation, never across an `await`.
#[derive(Debug, Clone, Default)]
pub struct SharedBoardStore {
    inner: Arc<Mutex<BoardStore>>,
}

impl SharedBoardStore {
    /// Wraps a store for sharing.
    #[must_use]
    pub fn new(store: BoardStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs one operation against the store.
    pub fn with<R>(&self, operation: impl FnOnce(&mut BoardStore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        operation(&mut *guard)
    }

    /// Returns a copy of the current columns.
    #[must_use]
    pub fn columns(&self) -> BoardColumns {
        self.with(|store| store.project().clone())
    }

    /// Returns a copy of the current collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.with(|store| store.tasks().to_vec())
    }

    /// Returns a copy of one task.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.with(|store| store.get(id).cloned())
    }

    /// Returns the scope of the shared store.
    #[must_use]
    pub fn scope(&self) -> BoardScope {
        self.with(|store| store.scope())
    }
}
