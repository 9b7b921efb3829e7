//! arithdrill-report — Export graded drill reports.
//!
//! CSV for spreadsheets, self-contained HTML with a result chart.

pub mod csv;
pub mod html;

/// Marker for a correct answer in exported tables.
pub const CORRECT_MARK: &str = "◯";
/// Marker for an incorrect answer in exported tables.
pub const INCORRECT_MARK: &str = "×";

/// Table marker for a single record.
pub fn result_mark(is_correct: bool) -> &'static str {
    if is_correct {
        CORRECT_MARK
    } else {
        INCORRECT_MARK
    }
}
