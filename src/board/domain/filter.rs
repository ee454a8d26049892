//! Free-text and facet filtering over a task list.

use super::Task;

/// Active predicates for a task list view. Unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    text: Option<String>,
    board_name: Option<String>,
    status: Option<String>,
}

impl TaskQuery {
    /// Creates a query that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches tasks whose title or assignee name contains `text`,
    /// ignoring case. Blank text clears the predicate.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let value = text.into();
        self.text = (!value.trim().is_empty()).then(|| value.trim().to_lowercase());
        self
    }

    /// Matches tasks on the board with exactly this name.
    #[must_use]
    pub fn with_board_name(mut self, board_name: impl Into<String>) -> Self {
        self.board_name = Some(board_name.into());
        self
    }

    /// Matches tasks whose status label (`To Do`, `In Progress`, `Done`)
    /// equals `label`.
    #[must_use]
    pub fn with_status_label(mut self, label: impl Into<String>) -> Self {
        self.status = Some(label.into());
        self
    }

    /// Returns `true` when no predicate is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.board_name.is_none() && self.status.is_none()
    }

    /// Tests a single task against every active predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let text_matches = self.text.as_deref().is_none_or(|needle| {
            task.title().to_lowercase().contains(needle)
                || task.assignee_name().to_lowercase().contains(needle)
        });
        let board_matches = self
            .board_name
            .as_deref()
            .is_none_or(|name| task.board_name() == name);
        let status_matches = self
            .status
            .as_deref()
            .is_none_or(|label| task.status().label() == label);

        text_matches && board_matches && status_matches
    }
}

/// Returns the tasks matching `query`, in collection order.
#[must_use]
pub fn filter(tasks: &[Task], query: &TaskQuery) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| query.matches(task))
        .cloned()
        .collect()
}
