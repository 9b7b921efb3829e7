//! Terminal rendering and file export of graded reports.

use std::path::{Path, PathBuf};

use anyhow::Result;

use arithdrill_core::grader::Report;
use arithdrill_report::csv::write_csv_report;
use arithdrill_report::html::write_html_report;
use arithdrill_report::result_mark;

const BAR_WIDTH: usize = 40;

pub fn print_summary(report: &Report) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Problem", "Your answer", "Correct answer", "Result"]);

    for r in &report.records {
        table.add_row(vec![
            Cell::new(r.index + 1),
            Cell::new(r.problem),
            Cell::new(r.user_answer),
            Cell::new(r.correct_answer),
            Cell::new(result_mark(r.is_correct)),
        ]);
    }

    println!("\n{table}");
    println!("Correct: {}/{}", report.correct, report.total);
    if report.total > 0 && report.is_perfect() {
        println!("All correct!");
    }
    if let Some(elapsed) = report.elapsed {
        println!("Time: {elapsed}");
    }
    println!();
    print!("{}", bar_chart(report.correct, report.incorrect()));
}

/// Text bar chart of correct vs incorrect counts.
fn bar_chart(correct: usize, incorrect: usize) -> String {
    let total = correct + incorrect;
    let bar = |count: usize| {
        let width = if total == 0 {
            0
        } else {
            count * BAR_WIDTH / total
        };
        "█".repeat(width)
    };
    format!(
        "Correct   {} {correct}\nIncorrect {} {incorrect}\n",
        bar(correct),
        bar(incorrect)
    )
}

/// Write the report in each requested format; returns the written paths.
pub fn write_exports(report: &Report, output: &Path, formats: &[String]) -> Result<Vec<PathBuf>> {
    if formats.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(output)?;
    let timestamp = report.graded_at.format("%Y-%m-%dT%H%M%S");
    let mut written = Vec::new();

    for fmt in formats {
        let path = output.join(format!("results-{timestamp}.{fmt}"));
        match fmt.as_str() {
            "csv" => write_csv_report(report, &path)?,
            "html" => write_html_report(report, &path)?,
            "json" => report.save_json(&path)?,
            other => {
                tracing::warn!("unknown format: {other}");
                continue;
            }
        }
        eprintln!("Saved {fmt} report: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
