//! The `arithdrill practice` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use arithdrill_core::generator::ProblemGenerator;
use arithdrill_core::grader::grade;
use arithdrill_core::session::Session;

use super::output::{print_summary, write_exports};
use super::settings;
use crate::DrillArgs;

pub fn execute(drill: DrillArgs, output: Option<PathBuf>, format: Option<String>) -> Result<()> {
    let config = settings::load(drill.config.as_deref())?;
    let batch = settings::resolve_batch(&drill, &config)?;
    let (output, formats) = settings::resolve_exports(output, format, &config)?;

    let session = Session::start_with(
        &mut ProblemGenerator::thread_local(),
        batch.operator,
        batch.range,
        batch.count,
    )?;

    println!(
        "arithdrill — {} problems, operator {}, {}",
        session.len(),
        session.operator,
        session.range
    );
    println!();

    let stdin = io::stdin();
    let answers = collect_answers(&session, &mut stdin.lock(), &mut io::stdout())?;

    let report = grade(&session, &answers)?;
    print_summary(&report);
    write_exports(&report, &output, &formats)?;

    Ok(())
}

/// Prompt for each problem and read one answer per line.
///
/// Blank or non-numeric input counts as 0, and so does every problem left
/// unanswered when input ends early.
fn collect_answers<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<i64>> {
    let mut answers = Vec::with_capacity(session.len());
    let mut line = String::new();

    for (i, problem) in session.problems().iter().enumerate() {
        write!(out, "{}) {} = ", i + 1, problem)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::warn!(
                "input ended after {i} of {} answers, remaining count as 0",
                session.len()
            );
            writeln!(out)?;
            answers.resize(session.len(), 0);
            break;
        }
        answers.push(parse_answer(&line));
    }

    Ok(answers)
}

fn parse_answer(line: &str) -> i64 {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        tracing::warn!("'{trimmed}' is not an integer, counted as 0");
        0
    })
}
