//! Drag-and-drop transitions between status columns.
//!
//! A drop onto another column moves the task in the store immediately and
//! then confirms the move with the remote service. If the service rejects
//! the move, the task is moved back to the last status the service
//! accepted, provided nothing else has moved it in the meantime, and the
//! failure is reported to the caller. While several moves of one task are
//! outstanding the rollback waits for the last of them to answer.

use super::SharedBoardStore;
use crate::board::{
    domain::{TaskId, TaskStatus},
    ports::{GatewayError, TaskGateway},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where a drag gesture currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card has been picked up.
    Dragging {
        /// Task being dragged.
        task_id: TaskId,
        /// Column the card was picked up from.
        source: TaskStatus,
    },
    /// A card was dropped on another column and the move awaits
    /// confirmation.
    Transitioning {
        /// Task being moved.
        task_id: TaskId,
        /// Column the task left.
        from: TaskStatus,
        /// Column the task entered.
        to: TaskStatus,
    },
}

/// Why a drop produced no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIgnored {
    /// The gesture ended outside any column.
    Cancelled,
    /// The card was dropped back on its own column.
    SameColumn,
    /// The task is no longer in the source column, for example because it
    /// was removed while being dragged.
    StaleTask,
}

/// Errors surfaced once a move has been sent to the remote service.
#[derive(Debug, Error)]
pub enum DragError {
    /// The remote service rejected the status change.
    #[error("could not move task {task_id}: {source}")]
    SyncFailed {
        /// Task whose move failed.
        task_id: TaskId,
        /// Underlying gateway failure.
        source: GatewayError,
        /// Whether the store was moved back on this answer. Stays `false`
        /// while a later move of the same task is still outstanding.
        reverted: bool,
    },
}

/// A confirmed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSettled {
    /// Task that moved.
    pub task_id: TaskId,
    /// Status now held both locally and remotely.
    pub status: TaskStatus,
}

/// Moves of one task sent to the remote service and not all answered yet.
#[derive(Debug)]
struct MoveLedger {
    /// Last status the service is known to hold.
    confirmed: TaskStatus,
    /// Drop that produced `confirmed`; zero for the status held before the
    /// first outstanding drop.
    confirmed_seq: u64,
    latest_seq: u64,
    latest_to: TaskStatus,
    in_flight: usize,
}

type Ledgers = Arc<Mutex<HashMap<TaskId, MoveLedger>>>;

/// Outcome of handling a drop.
#[must_use]
pub enum DropOutcome<G>
where
    G: TaskGateway,
{
    /// Nothing changed.
    Ignored(DropIgnored),
    /// The store already shows the move; the transition still has to be
    /// confirmed remotely.
    Moved(PendingTransition<G>),
}

impl<G> DropOutcome<G>
where
    G: TaskGateway,
{
    /// Returns the reason the drop was ignored, if it was.
    #[must_use]
    pub const fn ignored(&self) -> Option<DropIgnored> {
        match self {
            Self::Ignored(reason) => Some(*reason),
            Self::Moved(_) => None,
        }
    }
}

/// A move applied locally and not yet confirmed by the remote service.
#[must_use = "a pending transition does nothing until settled or spawned"]
pub struct PendingTransition<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    store: SharedBoardStore,
    phase: Arc<Mutex<DragPhase>>,
    ledgers: Ledgers,
    task_id: TaskId,
    seq: u64,
    from: TaskStatus,
    to: TaskStatus,
    answered: bool,
}

impl<G> PendingTransition<G>
where
    G: TaskGateway,
{
    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status the task moved away from.
    #[must_use]
    pub const fn from(&self) -> TaskStatus {
        self.from
    }

    /// Returns the status the task moved to.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Sends the status change and reconciles the result.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::SyncFailed`] when the remote service rejects the
    /// change. Once no other move of the task is outstanding, the store is
    /// put back on the last status the service accepted, unless the task has
    /// been removed or changed by something other than a drop since.
    pub async fn settle(mut self) -> Result<TransitionSettled, DragError> {
        let result = self.gateway.update_status(&self.task_id, self.to).await;
        self.finish_phase();
        let restored = self.reconcile(result.is_ok());
        match result {
            Ok(()) => {
                debug!(task_id = %self.task_id, status = %self.to, restored, "move confirmed");
                Ok(TransitionSettled {
                    task_id: self.task_id.clone(),
                    status: self.to,
                })
            }
            Err(source) => {
                warn!(
                    task_id = %self.task_id,
                    error = %source,
                    reverted = restored,
                    "move rejected by task service"
                );
                Err(DragError::SyncFailed {
                    task_id: self.task_id.clone(),
                    source,
                    reverted: restored,
                })
            }
        }
    }

    /// Settles the transition on the runtime in the background.
    pub fn spawn(self) -> JoinHandle<Result<TransitionSettled, DragError>>
    where
        G: 'static,
    {
        tokio::spawn(self.settle())
    }

    /// Records the service's answer. When this was the last outstanding
    /// move of the task and the newest drop did not stick remotely, moves the
    /// task back to the last accepted status. Returns whether the store was
    /// changed.
    fn reconcile(&mut self, accepted: bool) -> bool {
        self.answered = true;
        self.store.with(|store| {
            let mut ledgers = self.ledgers.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(ledger) = ledgers.get_mut(&self.task_id) else {
                return false;
            };
            if accepted && self.seq > ledger.confirmed_seq {
                ledger.confirmed = self.to;
                ledger.confirmed_seq = self.seq;
            }
            ledger.in_flight = ledger.in_flight.saturating_sub(1);
            if ledger.in_flight > 0 {
                return false;
            }
            let (target, latest) = (ledger.confirmed, ledger.latest_to);
            ledgers.remove(&self.task_id);

            let untouched = store
                .get(&self.task_id)
                .is_some_and(|task| task.status() == latest);
            if untouched && target != latest {
                store.move_status(&self.task_id, target);
                return true;
            }
            false
        })
    }

    fn finish_phase(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(&*phase, DragPhase::Transitioning { task_id, .. } if *task_id == self.task_id) {
            *phase = DragPhase::Idle;
        }
    }
}

impl<G> Drop for PendingTransition<G>
where
    G: TaskGateway,
{
    fn drop(&mut self) {
        if !self.answered {
            debug!(task_id = %self.task_id, "transition dropped before settling");
            self.finish_phase();
            self.reconcile(false);
        }
    }
}

/// Turns drag gestures into store moves and remote status changes.
pub struct DragController<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    store: SharedBoardStore,
    phase: Arc<Mutex<DragPhase>>,
    ledgers: Ledgers,
}

impl<G> Clone for DragController<G>
where
    G: TaskGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
            phase: Arc::clone(&self.phase),
            ledgers: Arc::clone(&self.ledgers),
        }
    }
}

impl<G> DragController<G>
where
    G: TaskGateway,
{
    /// Creates a controller over a store and gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>, store: SharedBoardStore) -> Self {
        Self {
            gateway,
            store,
            phase: Arc::new(Mutex::new(DragPhase::Idle)),
            ledgers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the current gesture phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records that a card was picked up.
    pub fn on_drag_start(&self, task_id: TaskId, source: TaskStatus) {
        self.set_phase(DragPhase::Dragging { task_id, source });
    }

    /// Records that the gesture was abandoned.
    pub fn on_drag_cancel(&self) {
        self.set_phase(DragPhase::Idle);
    }

    /// Handles a drop of `task_id` from `source` onto `destination`.
    ///
    /// `destination` is `None` when the card was released outside any
    /// column. Drops onto the source column, cancelled drops, and drops of
    /// tasks no longer in the source column change nothing. Otherwise the
    /// task is moved in the store before this returns and the returned
    /// [`PendingTransition`] confirms the move remotely.
    pub fn on_drop(
        &self,
        source: TaskStatus,
        destination: Option<TaskStatus>,
        task_id: &TaskId,
    ) -> DropOutcome<G> {
        let Some(destination) = destination else {
            self.set_phase(DragPhase::Idle);
            return DropOutcome::Ignored(DropIgnored::Cancelled);
        };
        if destination == source {
            self.set_phase(DragPhase::Idle);
            return DropOutcome::Ignored(DropIgnored::SameColumn);
        }

        let seq = self.store.with(|store| {
            let in_source = store.project().column(source).find(task_id).is_some();
            if !in_source || store.move_status(task_id, destination).is_none() {
                return None;
            }
            let mut ledgers = self.ledgers.lock().unwrap_or_else(PoisonError::into_inner);
            let ledger = ledgers.entry(task_id.clone()).or_insert(MoveLedger {
                confirmed: source,
                confirmed_seq: 0,
                latest_seq: 0,
                latest_to: source,
                in_flight: 0,
            });
            ledger.latest_seq += 1;
            ledger.latest_to = destination;
            ledger.in_flight += 1;
            Some(ledger.latest_seq)
        });
        let Some(seq) = seq else {
            debug!(task_id = %task_id, %source, "drop refers to a task no longer in its column");
            self.set_phase(DragPhase::Idle);
            return DropOutcome::Ignored(DropIgnored::StaleTask);
        };

        self.set_phase(DragPhase::Transitioning {
            task_id: task_id.clone(),
            from: source,
            to: destination,
        });
        DropOutcome::Moved(PendingTransition {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
            phase: Arc::clone(&self.phase),
            ledgers: Arc::clone(&self.ledgers),
            task_id: task_id.clone(),
            seq,
            from: source,
            to: destination,
            answered: false,
        })
    }

    fn set_phase(&self, next: DragPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
