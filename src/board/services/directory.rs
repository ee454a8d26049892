//! Shared read cache for the board and assignee directories.
//!
//! Views that need board names or the assignee list read them through one
//! [`DirectoryCache`] instead of fetching per view. Entries stay cached until
//! explicitly invalidated; the sync service invalidates boards after every
//! successful write because task counts change. A fetch that was already in
//! flight when an invalidation happened returns its result to its caller but
//! does not cache it.

use crate::board::{
    domain::{Assignee, AssigneeId, Board, BoardId},
    ports::{GatewayResult, TaskGateway},
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Read-through cache over the directory endpoints of a gateway.
pub struct DirectoryCache<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    boards: Arc<Mutex<Slot<Vec<Board>>>>,
    assignees: Arc<Mutex<Slot<Vec<Assignee>>>>,
}

/// A cached value and the number of invalidations it has seen.
#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<G> Clone for DirectoryCache<G>
where
    G: TaskGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            boards: Arc::clone(&self.boards),
            assignees: Arc::clone(&self.assignees),
        }
    }
}

/// Returns the cached value, or the generation a fetch must match to fill
/// the slot.
fn cached<T: Clone>(slot: &Mutex<Slot<T>>) -> Result<T, u64> {
    let held = slot.lock().unwrap_or_else(PoisonError::into_inner);
    held.value.clone().ok_or(held.generation)
}

fn fill<T>(slot: &Mutex<Slot<T>>, generation: u64, value: T) -> bool {
    let mut held = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if held.generation != generation {
        return false;
    }
    held.value = Some(value);
    true
}

fn clear<T>(slot: &Mutex<Slot<T>>) {
    let mut held = slot.lock().unwrap_or_else(PoisonError::into_inner);
    held.value = None;
    held.generation = held.generation.wrapping_add(1);
}

impl<G> DirectoryCache<G>
where
    G: TaskGateway,
{
    /// Creates an empty cache over a gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            boards: Arc::default(),
            assignees: Arc::default(),
        }
    }

    /// Returns the board directory, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns gateway errors from the fetch; failures are not cached.
    pub async fn boards(&self) -> GatewayResult<Vec<Board>> {
        let generation = match cached(&self.boards) {
            Ok(boards) => return Ok(boards),
            Err(generation) => generation,
        };
        debug!("board directory not cached, fetching");
        let boards = self.gateway.fetch_boards().await?;
        if !fill(&self.boards, generation, boards.clone()) {
            debug!("board directory invalidated during fetch, not caching");
        }
        Ok(boards)
    }

    /// Returns the assignee directory, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns gateway errors from the fetch; failures are not cached.
    pub async fn assignees(&self) -> GatewayResult<Vec<Assignee>> {
        let generation = match cached(&self.assignees) {
            Ok(assignees) => return Ok(assignees),
            Err(generation) => generation,
        };
        debug!("assignee directory not cached, fetching");
        let assignees = self.gateway.fetch_assignees().await?;
        if !fill(&self.assignees, generation, assignees.clone()) {
            debug!("assignee directory invalidated during fetch, not caching");
        }
        Ok(assignees)
    }

    /// Resolves a board identifier to its display name.
    ///
    /// # Errors
    ///
    /// Returns gateway errors when the directory must be fetched and fails.
    pub async fn board_name(&self, id: BoardId) -> GatewayResult<Option<String>> {
        Ok(self
            .boards()
            .await?
            .into_iter()
            .find(|board| board.id == id)
            .map(|board| board.name))
    }

    /// Finds a board by its exact display name, as chosen in a picker.
    ///
    /// # Errors
    ///
    /// Returns gateway errors when the directory must be fetched and fails.
    pub async fn board_by_name(&self, name: &str) -> GatewayResult<Option<Board>> {
        Ok(self
            .boards()
            .await?
            .into_iter()
            .find(|board| board.name == name))
    }

    /// Looks up an assignee by identifier.
    ///
    /// # Errors
    ///
    /// Returns gateway errors when the directory must be fetched and fails.
    pub async fn assignee(&self, id: AssigneeId) -> GatewayResult<Option<Assignee>> {
        Ok(self
            .assignees()
            .await?
            .into_iter()
            .find(|assignee| assignee.id == id))
    }

    /// Drops the cached board directory.
    pub fn invalidate_boards(&self) {
        clear(&self.boards);
    }

    /// Drops the cached assignee directory.
    pub fn invalidate_assignees(&self) {
        clear(&self.assignees);
    }

    /// Drops both directories.
    pub fn invalidate(&self) {
        self.invalidate_boards();
        self.invalidate_assignees();
    }
}
