//! When steps for task submission BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the form is submitted with title "{title}""#)]
fn submit_form(world: &mut SubmissionWorld, title: String) -> Result<(), eyre::Report> {
    let mut form = world
        .form
        .take()
        .ok_or_else(|| eyre::eyre!("missing task form in scenario world"))?;
    form.title = title;
    world.last_outcome = Some(run_async(world.sync.submit(form)));
    Ok(())
}
