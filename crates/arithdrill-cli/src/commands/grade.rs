//! The `arithdrill grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use arithdrill_core::grader::grade;
use arithdrill_core::session::Session;

use super::output::{print_summary, write_exports};
use super::settings;

pub fn execute(
    session_path: PathBuf,
    answers: String,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = settings::load(config_path.as_deref())?;
    let (output, formats) = settings::resolve_exports(output, format, &config)?;

    let session = Session::load_json(&session_path)?;

    let raw = match answers.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers from {path}"))?,
        None => answers,
    };
    let answers = parse_answer_list(&raw)?;

    let report = grade(&session, &answers)?;
    print_summary(&report);
    write_exports(&report, &output, &formats)?;

    Ok(())
}

/// Parse a comma- or whitespace-separated list of integers.
fn parse_answer_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("invalid answer: '{s}'"))
        })
        .collect()
}
