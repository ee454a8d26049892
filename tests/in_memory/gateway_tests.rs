//! In-memory integration tests for the task service double.

use super::helpers::{board_id, gateway, task_id};
use boardsync::board::{
    adapters::memory::{GatewayOperation, InMemoryTaskGateway},
    domain::{TaskDraft, TaskPatch, TaskStatus},
    ports::{GatewayError, TaskGateway},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_next_numeric_id(gateway: Arc<InMemoryTaskGateway>) {
    let draft = TaskDraft::new("Rotate signing keys", board_id(1)).expect("valid draft");

    let created = gateway.create_task(&draft).await.expect("create succeeds");

    assert_eq!(created.id().as_str(), "5");
    assert_eq!(created.board_name(), "Identity");
    let stored = gateway.task(created.id()).expect("lock available");
    assert_eq!(stored, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tasks_are_rejected_with_not_found(gateway: Arc<InMemoryTaskGateway>) {
    let missing = task_id("99");
    let status = gateway.update_status(&missing, TaskStatus::Done).await;
    let fetched = gateway.fetch_task(&missing).await;
    let held = gateway.fetch_task(&task_id("1")).await.expect("task 1 held");
    let updated = gateway
        .update_task(&missing, &TaskPatch::from_task(&held))
        .await;

    assert_eq!(status.err().and_then(|err| err.status()), Some(404));
    assert!(matches!(
        fetched,
        Err(GatewayError::FetchFailed { status: 404, .. })
    ));
    assert!(matches!(
        updated,
        Err(GatewayError::UpdateFailed { status: 404, .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reads_are_scoped(gateway: Arc<InMemoryTaskGateway>) {
    let docs = gateway
        .fetch_board_tasks(board_id(2))
        .await
        .expect("board 2 exists");
    let unknown = gateway.fetch_board_tasks(board_id(9)).await;

    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|task| task.board_id() == board_id(2)));
    assert_eq!(unknown.err().and_then(|err| err.status()), Some(404));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_directory_reports_task_counts(gateway: Arc<InMemoryTaskGateway>) {
    gateway.delete_task(&task_id("3")).expect("lock available");

    let boards = gateway.fetch_boards().await.expect("boards listed");

    let counts: Vec<(u64, usize)> = boards
        .iter()
        .map(|board| (board.id.value(), board.task_count))
        .collect();
    assert_eq!(counts, [(1, 2), (2, 1)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scripted_failures_are_consumed_in_order(gateway: Arc<InMemoryTaskGateway>) {
    gateway
        .fail_next(
            GatewayOperation::FetchAllTasks,
            GatewayError::MalformedResponse("first".to_owned()),
        )
        .expect("lock available");
    gateway
        .fail_next(
            GatewayOperation::FetchAllTasks,
            GatewayError::MalformedResponse("second".to_owned()),
        )
        .expect("lock available");

    let first = gateway.fetch_all_tasks().await;
    let second = gateway.fetch_all_tasks().await;
    let third = gateway.fetch_all_tasks().await;

    assert!(matches!(first, Err(GatewayError::MalformedResponse(ref reason)) if reason == "first"));
    assert!(matches!(second, Err(GatewayError::MalformedResponse(ref reason)) if reason == "second"));
    assert_eq!(third.map(|tasks| tasks.len()).ok(), Some(4));
    assert_eq!(
        gateway.calls().expect("lock available"),
        vec![GatewayOperation::FetchAllTasks; 3]
    );
}
