//! In-memory integration tests for a single board view.

use super::helpers::{BoardView, board_id, gateway, task_id};
use boardsync::board::{
    adapters::memory::{GatewayOperation, InMemoryTaskGateway},
    domain::{Task, TaskQuery, TaskStatus},
    ports::GatewayError,
    services::{BoardScope, BoardSelection, DragError, DropOutcome, SubmissionOutcome, TaskForm},
};
use rstest::rstest;
use std::sync::Arc;

fn column_titles(view: &BoardView, status: TaskStatus) -> Vec<String> {
    view.store()
        .columns()
        .column(status)
        .tasks()
        .iter()
        .map(|task| task.title().to_owned())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_projects_board_with_names(gateway: Arc<InMemoryTaskGateway>) {
    let view = BoardView::new(&gateway, BoardScope::Board(board_id(1)));

    let count = view.sync.refresh().await.expect("refresh succeeds");

    assert_eq!(count, 2);
    assert_eq!(column_titles(&view, TaskStatus::Todo), ["Fix login redirect"]);
    assert_eq!(column_titles(&view, TaskStatus::InProgress), ["Add audit trail"]);
    assert!(column_titles(&view, TaskStatus::Done).is_empty());
    assert!(
        view.store()
            .tasks()
            .iter()
            .all(|task| task.board_name() == "Identity")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_drag_matches_remote_state(gateway: Arc<InMemoryTaskGateway>) {
    let view = BoardView::new(&gateway, BoardScope::Board(board_id(1)));
    view.sync.refresh().await.expect("refresh succeeds");

    let DropOutcome::Moved(pending) =
        view.drag
            .on_drop(TaskStatus::Todo, Some(TaskStatus::Done), &task_id("1"))
    else {
        panic!("drop onto another column should move the task");
    };
    assert_eq!(column_titles(&view, TaskStatus::Done), ["Fix login redirect"]);
    pending.settle().await.expect("move confirmed");

    view.sync.refresh().await.expect("second refresh succeeds");
    assert_eq!(column_titles(&view, TaskStatus::Done), ["Fix login redirect"]);
    assert!(column_titles(&view, TaskStatus::Todo).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_drag_restores_column(gateway: Arc<InMemoryTaskGateway>) {
    let view = BoardView::new(&gateway, BoardScope::Board(board_id(1)));
    view.sync.refresh().await.expect("refresh succeeds");
    gateway
        .fail_next(
            GatewayOperation::UpdateStatus,
            GatewayError::UpdateFailed {
                status: 500,
                reason: "database offline".to_owned(),
            },
        )
        .expect("lock available");

    let DropOutcome::Moved(pending) =
        view.drag
            .on_drop(TaskStatus::InProgress, Some(TaskStatus::Done), &task_id("2"))
    else {
        panic!("drop onto another column should move the task");
    };
    let result = pending.settle().await;

    let Err(DragError::SyncFailed { source, reverted, .. }) = result else {
        panic!("move should have been rejected");
    };
    assert!(reverted);
    assert_eq!(source.status(), Some(500));
    assert_eq!(column_titles(&view, TaskStatus::InProgress), ["Add audit trail"]);
    assert_eq!(
        gateway
            .task(&task_id("2"))
            .expect("lock available")
            .map(|task| task.status()),
        Some(TaskStatus::InProgress)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_and_edited_tasks_appear_in_columns(gateway: Arc<InMemoryTaskGateway>) {
    let view = BoardView::new(&gateway, BoardScope::Board(board_id(1)));
    view.sync.refresh().await.expect("refresh succeeds");

    let mut form = TaskForm::new("Add rate limiting", BoardSelection::Context(board_id(1)));
    form.status = TaskStatus::InProgress;
    let SubmissionOutcome::Created(created) = view.sync.submit(form).await.expect("created")
    else {
        panic!("form without id should create");
    };
    assert_eq!(
        column_titles(&view, TaskStatus::InProgress),
        ["Add audit trail", "Add rate limiting"]
    );

    let mut edit = TaskForm::edit(&created);
    edit.title = "Add request rate limiting".to_owned();
    edit.status = TaskStatus::Done;
    view.sync.submit(edit).await.expect("updated");

    assert_eq!(column_titles(&view, TaskStatus::Done), ["Add request rate limiting"]);
    assert_eq!(
        gateway
            .task(created.id())
            .expect("lock available")
            .map(|task| task.title().to_owned()),
        Some("Add request rate limiting".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_search_the_loaded_collection(gateway: Arc<InMemoryTaskGateway>) {
    let view = BoardView::new(&gateway, BoardScope::AllBoards);
    view.sync.refresh().await.expect("refresh succeeds");

    let ivan: Vec<Task> = view
        .store()
        .with(|store| store.filter(&TaskQuery::new().with_text("ivan")));
    let docs_done: Vec<Task> = view.store().with(|store| {
        store.filter(
            &TaskQuery::new()
                .with_board_name("Docs")
                .with_status_label("Done"),
        )
    });

    let ivan_ids: Vec<&str> = ivan.iter().map(|task| task.id().as_str()).collect();
    assert_eq!(ivan_ids, ["1", "4"]);
    assert_eq!(docs_done.len(), 1);
    assert_eq!(docs_done.first().map(Task::title), Some("Archive old releases"));
}
