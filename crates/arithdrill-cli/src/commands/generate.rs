//! The `arithdrill generate` command.

use std::path::PathBuf;

use anyhow::Result;

use arithdrill_core::generator::ProblemGenerator;
use arithdrill_core::session::Session;

use super::settings;
use crate::DrillArgs;

pub fn execute(drill: DrillArgs, session_path: PathBuf) -> Result<()> {
    let config = settings::load(drill.config.as_deref())?;
    let batch = settings::resolve_batch(&drill, &config)?;

    let session = Session::start_with(
        &mut ProblemGenerator::thread_local(),
        batch.operator,
        batch.range,
        batch.count,
    )?;

    for (i, problem) in session.problems().iter().enumerate() {
        println!("{}) {} =", i + 1, problem);
    }

    session.save_json(&session_path)?;
    eprintln!(
        "Session {} saved to: {}",
        session.id,
        session_path.display()
    );

    Ok(())
}
