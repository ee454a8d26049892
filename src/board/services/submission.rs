//! Task form submission: deciding between create and update, resolving the
//! owning board, and reconciling the outcome into the store.

use super::{BoardSyncError, BoardSyncResult, BoardSyncService};
use crate::board::{
    domain::{AssigneeId, BoardId, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::TaskGateway,
};
use tracing::warn;

/// How the owning board of a new task is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSelection {
    /// The form was opened from a board page; the page's board owns the task.
    Context(BoardId),
    /// The user picked a board by name.
    Picker(String),
}

/// Values captured by the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Identifier of the task being edited; `None` for a new task.
    pub id: Option<TaskId>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Status.
    pub status: TaskStatus,
    /// Selected assignee display name.
    pub assignee_name: String,
    /// Selected assignee identifier as carried by the picker, if any.
    pub assignee_id: Option<String>,
    /// Owning board of a new task. Ignored for edits.
    pub board: BoardSelection,
}

impl TaskForm {
    /// Creates an empty form for a new task with the form defaults.
    #[must_use]
    pub fn new(title: impl Into<String>, board: BoardSelection) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee_name: String::new(),
            assignee_id: None,
            board,
        }
    }

    /// Prefills a form for editing an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            id: Some(task.id().clone()),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            priority: task.priority(),
            status: task.status(),
            assignee_name: task.assignee_name().to_owned(),
            assignee_id: task.assignee_id().map(|id| id.to_string()),
            board: BoardSelection::Context(task.board_id()),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A new task was created.
    Created(Task),
    /// An existing task was updated; `None` when the store no longer holds
    /// it.
    Updated(Option<Task>),
}

impl<G> BoardSyncService<G>
where
    G: TaskGateway,
{
    /// Submits a task form.
    ///
    /// A form carrying a task identifier updates that task; otherwise a new
    /// task is created on the selected board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for invalid field values,
    /// [`BoardSyncError::BoardNotSelected`] when a picked board name is
    /// unknown, and [`BoardSyncError::Gateway`] when the remote call fails.
    pub async fn submit(&self, form: TaskForm) -> BoardSyncResult<SubmissionOutcome> {
        let assignee_id = AssigneeId::parse_optional(form.assignee_id.as_deref())?;

        if let Some(id) = form.id {
            let patch = TaskPatch {
                title: form.title,
                description: form.description,
                priority: form.priority,
                status: form.status,
                assignee_name: form.assignee_name,
                assignee_id,
            };
            let updated = self.update_task(&id, patch).await?;
            return Ok(SubmissionOutcome::Updated(updated));
        }

        let (board_id, board_name) = self.resolve_board(&form.board).await?;
        let draft = TaskDraft::new(form.title, board_id)?
            .with_description(form.description)
            .with_priority(form.priority)
            .with_status(form.status)
            .with_assignee(form.assignee_name, assignee_id)
            .with_board_name(board_name);
        let task = self.create_task(draft).await?;
        Ok(SubmissionOutcome::Created(task))
    }

    async fn resolve_board(&self, selection: &BoardSelection) -> BoardSyncResult<(BoardId, String)> {
        match selection {
            BoardSelection::Context(board_id) => {
                let name = self
                    .directory()
                    .board_name(*board_id)
                    .await
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "board directory unavailable, board name left blank");
                        None
                    })
                    .unwrap_or_default();
                Ok((*board_id, name))
            }
            BoardSelection::Picker(name) => {
                if name.trim().is_empty() {
                    return Err(BoardSyncError::BoardNotSelected(name.clone()));
                }
                let board = self
                    .directory()
                    .board_by_name(name)
                    .await?
                    .ok_or_else(|| BoardSyncError::BoardNotSelected(name.clone()))?;
                Ok((board.id, board.name))
            }
        }
    }
}
