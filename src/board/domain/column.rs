//! Column projection: splitting a flat task list into ordered status columns.

use super::{Task, TaskId, TaskStatus};
use std::cmp::Ordering;

/// One status column of the board, derived from the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl Column {
    /// Returns the status this column collects.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.label()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task in this column by identifier.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }
}

/// The three board columns in fixed order: to do, in progress, done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumns([Column; 3]);

impl BoardColumns {
    /// Returns the column for a status.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &Column {
        let [todo, in_progress, done] = &self.0;
        match status {
            TaskStatus::Todo => todo,
            TaskStatus::InProgress => in_progress,
            TaskStatus::Done => done,
        }
    }

    /// Iterates the columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.0.iter()
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.0.iter().map(Column::len).sum()
    }

    /// Returns the column currently holding the task, if any.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<&Column> {
        self.0.iter().find(|column| column.find(id).is_some())
    }
}

impl<'a> IntoIterator for &'a BoardColumns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Projects a task collection into the three status columns.
///
/// Each column is ordered by priority (high first), then by title. The sort
/// is stable, so tasks equal on both keys keep their collection order.
#[must_use]
pub fn project(tasks: &[Task]) -> BoardColumns {
    BoardColumns(TaskStatus::ALL.map(|status| {
        let mut bucket: Vec<Task> = tasks
            .iter()
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        bucket.sort_by(column_order);
        Column {
            status,
            tasks: bucket,
        }
    }))
}

fn column_order(left: &Task, right: &Task) -> Ordering {
    right
        .priority()
        .rank()
        .cmp(&left.priority().rank())
        .then_with(|| left.title().cmp(right.title()))
}
