//! Task record and the draft and patch shapes used to create and edit it.

use super::{AssigneeId, BoardDomainError, BoardId, Priority, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A persisted task as held by the board store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    assignee_name: String,
    assignee_id: Option<AssigneeId>,
    board_id: BoardId,
    board_name: String,
}

/// Parameter object for assembling a task from known field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Remote-assigned identifier.
    pub id: TaskId,
    /// Task title; must not be blank.
    pub title: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Task priority.
    pub priority: Priority,
    /// Current status.
    pub status: TaskStatus,
    /// Display name of the assignee, possibly empty.
    pub assignee_name: String,
    /// Remote identity of the assignee, if known.
    pub assignee_id: Option<AssigneeId>,
    /// Owning board.
    pub board_id: BoardId,
    /// Denormalised owning board name, possibly empty.
    pub board_name: String,
}

impl Task {
    /// Builds a task from field values.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(data: TaskData) -> Result<Self, BoardDomainError> {
        let title = validated_title(data.title)?;
        Ok(Self {
            id: data.id,
            title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignee_name: data.assignee_name,
            assignee_id: data.assignee_id,
            board_id: data.board_id,
            board_name: data.board_name,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee display name.
    #[must_use]
    pub fn assignee_name(&self) -> &str {
        &self.assignee_name
    }

    /// Returns the assignee identity, if known.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<AssigneeId> {
        self.assignee_id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning board display name.
    #[must_use]
    pub fn board_name(&self) -> &str {
        &self.board_name
    }

    /// Sets the status; used by optimistic drag moves and their reverts.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Fills in the board name when the remote payload omitted it.
    pub fn set_board_name(&mut self, board_name: impl Into<String>) {
        self.board_name = board_name.into();
    }

    /// Applies an edit confirmed by the remote service.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        self.title.clone_from(&patch.title);
        self.description.clone_from(&patch.description);
        self.priority = patch.priority;
        self.status = patch.status;
        self.assignee_name.clone_from(&patch.assignee_name);
        self.assignee_id = (!patch.assignee_id.is_unassigned()).then_some(patch.assignee_id);
    }
}

/// A task that has not yet been assigned a remote identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    assignee_name: String,
    assignee_id: AssigneeId,
    board_id: BoardId,
    board_name: String,
}

impl TaskDraft {
    /// Creates a draft with required fields and form defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>, board_id: BoardId) -> Result<Self, BoardDomainError> {
        Ok(Self {
            title: validated_title(title.into())?,
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee_name: String::new(),
            assignee_id: AssigneeId::UNASSIGNED,
            board_id,
            board_name: String::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee display name and identity.
    #[must_use]
    pub fn with_assignee(mut self, name: impl Into<String>, id: AssigneeId) -> Self {
        self.assignee_name = name.into();
        self.assignee_id = id;
        self
    }

    /// Sets the denormalised board name.
    #[must_use]
    pub fn with_board_name(mut self, board_name: impl Into<String>) -> Self {
        self.board_name = board_name.into();
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee identity, [`AssigneeId::UNASSIGNED`] when none.
    #[must_use]
    pub const fn assignee_id(&self) -> AssigneeId {
        self.assignee_id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Combines the draft with the identifier the service assigned to it.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            assignee_name: self.assignee_name,
            assignee_id: (!self.assignee_id.is_unassigned()).then_some(self.assignee_id),
            board_id: self.board_id,
            board_name: self.board_name,
        }
    }
}

/// Full set of editable fields sent with a task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title; must not be blank.
    pub title: String,
    /// New description.
    pub description: String,
    /// New priority.
    pub priority: Priority,
    /// New status.
    pub status: TaskStatus,
    /// New assignee display name.
    pub assignee_name: String,
    /// New assignee identity, [`AssigneeId::UNASSIGNED`] when none.
    pub assignee_id: AssigneeId,
}

impl TaskPatch {
    /// Starts an edit from the current state of a task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            assignee_name: task.assignee_name.clone(),
            assignee_id: task.assignee_id.unwrap_or(AssigneeId::UNASSIGNED),
        }
    }

    /// Checks the patch before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), BoardDomainError> {
        if self.title.trim().is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(())
    }
}

fn validated_title(title: String) -> Result<String, BoardDomainError> {
    if title.trim().is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(title)
}
