//! When steps for board drag BDD scenarios.

use super::world::{DragWorld, run_async, status_from_label};
use boardsync::board::{domain::TaskId, services::DropOutcome};
use rstest_bdd_macros::when;

#[when(r#"task "{id}" is dragged from "{source}" to "{destination}""#)]
fn drag_task(
    world: &mut DragWorld,
    id: String,
    source: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id)?;
    let from = status_from_label(&source)?;
    let to = status_from_label(&destination)?;

    world.drag.on_drag_start(task_id.clone(), from);
    match world.drag.on_drop(from, Some(to), &task_id) {
        DropOutcome::Ignored(reason) => world.last_ignored = Some(reason),
        DropOutcome::Moved(pending) => world.last_settle = Some(run_async(pending.settle())),
    }
    Ok(())
}
