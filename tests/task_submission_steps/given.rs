//! Given steps for task submission BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use boardsync::board::{
    domain::{Board, BoardId, TaskDraft, TaskId},
    services::{BoardSelection, TaskForm},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a board {board:u64} named "{name}""#)]
fn board_named(world: &mut SubmissionWorld, board: u64, name: String) -> Result<(), eyre::Report> {
    world
        .gateway
        .insert_board(Board::new(BoardId::new(board)?, name, 0))?;
    world.sync.directory().invalidate_boards();
    Ok(())
}

#[given(r#"task "{id}" titled "{title}" exists on board {board:u64}"#)]
fn task_exists(
    world: &mut SubmissionWorld,
    id: String,
    title: String,
    board: u64,
) -> Result<(), eyre::Report> {
    let task = TaskDraft::new(title, BoardId::new(board)?)?.into_task(TaskId::new(id)?);
    world.gateway.insert_task(task)?;
    run_async(world.sync.refresh()).wrap_err("load tasks for submission scenario")?;
    Ok(())
}

#[given("the task form is opened on board {board:u64}")]
fn form_on_board(world: &mut SubmissionWorld, board: u64) -> Result<(), eyre::Report> {
    world.form = Some(TaskForm::new(
        "",
        BoardSelection::Context(BoardId::new(board)?),
    ));
    Ok(())
}

#[given(r#"the task form is opened with board choice "{choice}""#)]
fn form_with_choice(world: &mut SubmissionWorld, choice: String) {
    world.form = Some(TaskForm::new("", BoardSelection::Picker(choice)));
}

#[given(r#"the task form is opened to edit task "{id}""#)]
fn form_for_edit(world: &mut SubmissionWorld, id: String) -> Result<(), eyre::Report> {
    let task = world
        .sync
        .store()
        .get(&TaskId::new(id.as_str())?)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    world.form = Some(TaskForm::edit(&task));
    Ok(())
}
