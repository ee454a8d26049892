//! Reconciliation of remote reads and writes with the board store.

use super::{DirectoryCache, SharedBoardStore, store::BoardScope};
use crate::board::{
    domain::{BoardDomainError, Task, TaskDraft, TaskId, TaskPatch},
    ports::{GatewayError, TaskGateway},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for board synchronisation.
#[derive(Debug, Error)]
pub enum BoardSyncError {
    /// Domain validation failed before any request was sent.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The remote service call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// A new task could not be attributed to a board.
    #[error("no board selected for the new task ({0:?} is not a known board)")]
    BoardNotSelected(String),
}

impl BoardSyncError {
    /// Returns the response status code when the error stems from one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway(err) => err.status(),
            Self::Domain(_) | Self::BoardNotSelected(_) => None,
        }
    }
}

/// Result type for board synchronisation operations.
pub type BoardSyncResult<T> = Result<T, BoardSyncError>;

/// Issues remote reads and writes and folds their results into the store.
///
/// A failed call never touches the store, so a failed refresh leaves the
/// previous collection in place. Calls are never retried.
pub struct BoardSyncService<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    store: SharedBoardStore,
    directory: DirectoryCache<G>,
}

impl<G> Clone for BoardSyncService<G>
where
    G: TaskGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
            directory: self.directory.clone(),
        }
    }
}

impl<G> BoardSyncService<G>
where
    G: TaskGateway,
{
    /// Creates a service with its own directory cache.
    #[must_use]
    pub fn new(gateway: Arc<G>, store: SharedBoardStore) -> Self {
        let directory = DirectoryCache::new(Arc::clone(&gateway));
        Self::with_directory(gateway, store, directory)
    }

    /// Creates a service that shares an existing directory cache.
    #[must_use]
    pub const fn with_directory(
        gateway: Arc<G>,
        store: SharedBoardStore,
        directory: DirectoryCache<G>,
    ) -> Self {
        Self {
            gateway,
            store,
            directory,
        }
    }

    /// Returns the store this service reconciles into.
    #[must_use]
    pub const fn store(&self) -> &SharedBoardStore {
        &self.store
    }

    /// Returns the directory cache.
    #[must_use]
    pub const fn directory(&self) -> &DirectoryCache<G> {
        &self.directory
    }

    /// Returns the gateway.
    #[must_use]
    pub const fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Re-reads every task in the store's scope and replaces the collection.
    ///
    /// Missing board names are filled from the directory when it can be
    /// read; a directory failure leaves them blank rather than failing the
    /// refresh. Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Gateway`] when the task read fails; the
    /// store is left unchanged.
    pub async fn refresh(&self) -> BoardSyncResult<usize> {
        let scope = self.store.scope();
        let mut tasks = match scope {
            BoardScope::Board(board_id) => self.gateway.fetch_board_tasks(board_id).await?,
            BoardScope::AllBoards => self.gateway.fetch_all_tasks().await?,
        };
        self.fill_board_names(&mut tasks).await;
        let count = tasks.len();
        self.store.with(|store| store.load(tasks));
        debug!(count, ?scope, "board store reloaded");
        Ok(count)
    }

    /// Creates a task remotely and adds the confirmed task to the store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Gateway`] when the create fails or its
    /// response carries no identifier; the store is left unchanged.
    pub async fn create_task(&self, draft: TaskDraft) -> BoardSyncResult<Task> {
        let task = self.gateway.create_task(&draft).await?;
        self.store.with(|store| store.upsert(task.clone()));
        self.directory.invalidate_boards();
        debug!(task_id = %task.id(), "task created and stored");
        Ok(task)
    }

    /// Sends an edit and applies it to the store once confirmed.
    ///
    /// Returns the updated task, or `None` when the store no longer holds it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for an invalid patch and
    /// [`BoardSyncError::Gateway`] when the update is rejected.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> BoardSyncResult<Option<Task>> {
        patch.validate()?;
        self.gateway.update_task(id, &patch).await?;
        let updated = self.store.with(|store| store.apply_patch(id, &patch));
        if updated.is_none() {
            debug!(task_id = %id, "updated task no longer held by the store");
        }
        self.directory.invalidate_boards();
        Ok(updated)
    }

    /// Reads one task, refreshing the store's copy when it holds one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Gateway`] when the read fails.
    pub async fn load_task(&self, id: &TaskId) -> BoardSyncResult<Task> {
        let task = self.gateway.fetch_task(id).await?;
        self.store.with(|store| {
            if store.get(id).is_some() {
                store.upsert(task.clone());
            }
        });
        Ok(task)
    }

    /// Drops a task from the local collection.
    pub fn remove_local(&self, id: &TaskId) -> Option<Task> {
        self.store.with(|store| store.remove(id))
    }

    async fn fill_board_names(&self, tasks: &mut [Task]) {
        if tasks.iter().all(|task| !task.board_name().is_empty()) {
            return;
        }
        let names: BTreeMap<_, _> = match self.directory.boards().await {
            Ok(boards) => boards.into_iter().map(|board| (board.id, board.name)).collect(),
            Err(err) => {
                warn!(error = %err, "board directory unavailable, board names left blank");
                return;
            }
        };
        for task in tasks.iter_mut().filter(|task| task.board_name().is_empty()) {
            if let Some(name) = names.get(&task.board_id()) {
                task.set_board_name(name.clone());
            }
        }
    }
}
