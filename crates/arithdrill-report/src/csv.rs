//! CSV export of graded reports.
//!
//! One row per problem: `problem,user_answer,correct_answer,result`.

use std::path::Path;

use anyhow::{Context, Result};

use arithdrill_core::grader::Report;

use crate::result_mark;

/// Column headers, in order.
pub const HEADERS: [&str; 4] = ["problem", "user_answer", "correct_answer", "result"];

/// Render a report as CSV with a header row.
pub fn report_to_csv(report: &Report) -> Result<String, ::csv::Error> {
    let mut wtr = ::csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;

    for r in &report.records {
        wtr.write_record([
            r.problem.to_string(),
            r.user_answer.to_string(),
            r.correct_answer.to_string(),
            result_mark(r.is_correct).to_string(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| ::csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        ::csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Write a CSV report to a file.
pub fn write_csv_report(report: &Report, path: &Path) -> Result<()> {
    let csv = report_to_csv(report).context("failed to serialize report as CSV")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write CSV report to {}", path.display()))?;
    Ok(())
}
