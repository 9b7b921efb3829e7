//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use arithdrill_core::grader::Report;

use crate::result_mark;

const CORRECT_COLOR: &str = "#22c55e";
const INCORRECT_COLOR: &str = "#ef4444";

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a graded report.
pub fn generate_html(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>arithdrill report — {} {}/{}</title>\n",
        report.operator.name(),
        report.correct,
        report.total
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>arithdrill report</h1>\n");
    let elapsed = report
        .elapsed
        .map(|e| format!(" | time {e}"))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">Operator: <strong>{}</strong> | {} problems{} | {}</p>\n",
        html_escape(report.operator.symbol()),
        report.total,
        elapsed,
        report.graded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    let accuracy = report
        .accuracy()
        .map(|a| format!("{:.1}%", a * 100.0))
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        "<p class=\"score\">Correct: <strong>{}/{}</strong> ({})</p>\n",
        report.correct, report.total, accuracy
    ));
    html.push_str(&generate_bar_chart(report.correct, report.incorrect()));
    html.push_str("</section>\n");

    // Per-problem results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Problem</th><th onclick=\"sortTable(2)\">Your answer</th><th onclick=\"sortTable(3)\">Correct answer</th><th onclick=\"sortTable(4)\">Result</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.records {
        let class = if r.is_correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            r.index + 1,
            html_escape(&r.problem.to_string()),
            r.user_answer,
            r.correct_answer,
            result_mark(r.is_correct)
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &Report, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Two horizontal bars: correct and incorrect counts, scaled to the total.
fn generate_bar_chart(correct: usize, incorrect: usize) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total = correct + incorrect;
    let bars = [
        ("Correct", correct, CORRECT_COLOR),
        ("Incorrect", incorrect, INCORRECT_COLOR),
    ];

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"correct vs incorrect\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, count, color)) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = if total == 0 {
            0
        } else {
            count * max_width / total
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            label
        ));
        svg.push_str(&format!(
            "  <rect class=\"bar\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans JP', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 1.25rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use arithdrill_core::grader::grade;
    use arithdrill_core::model::{DigitRange, Operator, Problem};
    use arithdrill_core::session::Session;

    fn make_test_report() -> Report {
        let range = DigitRange::new(1, 1).unwrap();
        let session = Session::from_problems(
            Operator::Subtract,
            range,
            vec![
                Problem::from_draws(Operator::Subtract, 3, 7).unwrap(),
                Problem::from_draws(Operator::Subtract, 9, 2).unwrap(),
                Problem::from_draws(Operator::Subtract, 5, 5).unwrap(),
            ],
        );
        grade(&session, &[4, 6, 0]).unwrap()
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("7 - 3"));
        assert!(html.contains("Correct: <strong>2/3</strong> (66.7%)"));
        assert!(html.contains("<svg"));
        assert!(html.contains(CORRECT_COLOR));
        assert!(html.contains(INCORRECT_COLOR));
    }

    #[test]
    fn bar_chart_scales_to_total() {
        let svg = generate_bar_chart(3, 1);
        assert!(svg.contains("width=\"300\""));
        assert!(svg.contains("width=\"100\""));
    }

    #[test]
    fn bar_chart_handles_empty_report() {
        let svg = generate_bar_chart(0, 0);
        assert_eq!(svg.matches("width=\"0\"").count(), 2);
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(html_escape("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");
    }
}
