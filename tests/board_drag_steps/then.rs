//! Then steps for board drag BDD scenarios.

use super::world::{DragWorld, status_from_label};
use boardsync::board::{
    adapters::memory::GatewayOperation,
    domain::TaskId,
    services::{DragError, DragPhase},
};
use rstest_bdd_macros::then;

#[then(r#"the "{column}" column lists "{titles}""#)]
fn column_lists(world: &DragWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = titles.split(", ").collect();
    let actual = world.column_titles(status_from_label(&column)?);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected {column} to list {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &DragWorld, column: String) -> Result<(), eyre::Report> {
    let actual = world.column_titles(status_from_label(&column)?);
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected {column} to be empty, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the task service holds task "{id}" in "{column}""#)]
fn service_holds_status(world: &DragWorld, id: String, column: String) -> Result<(), eyre::Report> {
    let expected = status_from_label(&column)?;
    let remote = world
        .gateway
        .task(&TaskId::new(id.as_str())?)?
        .ok_or_else(|| eyre::eyre!("task {id} missing from the service"))?;
    if remote.status() != expected {
        return Err(eyre::eyre!(
            "expected remote status {expected}, found {}",
            remote.status()
        ));
    }
    Ok(())
}

#[then("the move fails and the task is put back")]
fn move_fails_and_reverts(world: &DragWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_settle
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no move was settled"))?;
    if !matches!(result, Err(DragError::SyncFailed { reverted: true, .. })) {
        return Err(eyre::eyre!("expected a reverted sync failure, got {result:?}"));
    }
    if world.drag.phase() != DragPhase::Idle {
        return Err(eyre::eyre!("drag phase should be idle after settling"));
    }
    Ok(())
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &DragWorld) -> Result<(), eyre::Report> {
    if world.last_ignored.is_none() {
        return Err(eyre::eyre!("expected the drop to be ignored"));
    }
    Ok(())
}

#[then("no status change was sent")]
fn no_status_change_sent(world: &DragWorld) -> Result<(), eyre::Report> {
    if world.gateway.calls()?.contains(&GatewayOperation::UpdateStatus) {
        return Err(eyre::eyre!("a status change was sent"));
    }
    Ok(())
}
