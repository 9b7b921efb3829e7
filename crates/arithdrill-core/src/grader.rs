//! Grading: compare submitted answers against a session and build a report.
//!
//! Grading never mutates the session. Given the same session, answers, and
//! grading time, [`grade_at`] always produces the same [`Report`].

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DrillError;
use crate::model::{Operator, Problem};
use crate::session::Session;

/// The graded outcome of one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Zero-based position in the session.
    pub index: usize,
    pub problem: Problem,
    pub user_answer: i64,
    pub correct_answer: i64,
    pub is_correct: bool,
}

/// Wall-clock time between session start and grading, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    /// Decompose a duration; negative durations (clock skew) clamp to zero.
    pub fn from_duration(duration: chrono::TimeDelta) -> Self {
        let total = duration.num_seconds().max(0) as u64;
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A graded batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Session that was graded.
    pub session_id: Uuid,
    pub operator: Operator,
    /// One record per problem, in session order.
    pub records: Vec<AnswerRecord>,
    pub total: usize,
    pub correct: usize,
    /// Present only when the session recorded a start time.
    pub elapsed: Option<Elapsed>,
    pub graded_at: DateTime<Utc>,
}

impl Report {
    pub fn incorrect(&self) -> usize {
        self.total.saturating_sub(self.correct)
    }

    /// Fraction of correct answers, or `None` for an empty batch.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: Report =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        let marked = report.records.iter().filter(|r| r.is_correct).count();
        anyhow::ensure!(
            report.total == report.records.len() && report.correct == marked,
            "report {} totals do not match its records: {}/{} stated, {}/{} recorded",
            report.session_id,
            report.correct,
            report.total,
            marked,
            report.records.len()
        );
        Ok(report)
    }
}

/// Grade `user_answers` against `session`, timed against the current clock.
pub fn grade(session: &Session, user_answers: &[i64]) -> Result<Report, DrillError> {
    grade_at(session, user_answers, Utc::now())
}

/// Grade `user_answers` against `session` as of `graded_at`.
///
/// Answers must be index-aligned with the session's problems.
pub fn grade_at(
    session: &Session,
    user_answers: &[i64],
    graded_at: DateTime<Utc>,
) -> Result<Report, DrillError> {
    if user_answers.len() != session.len() {
        return Err(DrillError::AnswerCountMismatch {
            expected: session.len(),
            actual: user_answers.len(),
        });
    }

    let records: Vec<AnswerRecord> = session
        .problems()
        .iter()
        .zip(user_answers)
        .enumerate()
        .map(|(index, (problem, &user_answer))| AnswerRecord {
            index,
            problem: *problem,
            user_answer,
            correct_answer: problem.answer(),
            is_correct: problem.is_correct(user_answer),
        })
        .collect();

    let correct = records.iter().filter(|r| r.is_correct).count();
    let elapsed = session
        .started_at
        .map(|started| Elapsed::from_duration(graded_at - started));

    tracing::info!(
        session = %session.id,
        correct,
        total = records.len(),
        "graded session"
    );

    Ok(Report {
        session_id: session.id,
        operator: session.operator,
        total: records.len(),
        correct,
        records,
        elapsed,
        graded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ProblemGenerator;
    use crate::model::DigitRange;
    use chrono::TimeDelta;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_session(operator: Operator, count: usize) -> Session {
        let range = DigitRange::new(1, 2).unwrap();
        let mut generator = ProblemGenerator::new(StdRng::seed_from_u64(11));
        Session::start_with(&mut generator, operator, range, count).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn all_correct_answers() {
        let session = seeded_session(Operator::Multiply, 10);
        let answers: Vec<i64> = session.problems().iter().map(|p| p.answer()).collect();

        let report = grade(&session, &answers).unwrap();
        assert_eq!(report.total, 10);
        assert_eq!(report.correct, 10);
        assert!(report.is_perfect());
        assert_eq!(report.accuracy(), Some(1.0));
    }

    #[test]
    fn mixed_answers_are_counted_per_index() {
        let session = seeded_session(Operator::Add, 4);
        let mut answers: Vec<i64> = session.problems().iter().map(|p| p.answer()).collect();
        answers[1] += 1;
        answers[3] = 0;

        let report = grade(&session, &answers).unwrap();
        assert_eq!(report.correct, 2);
        assert_eq!(report.incorrect(), 2);
        let flags: Vec<bool> = report.records.iter().map(|r| r.is_correct).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert_eq!(report.records[1].user_answer, answers[1]);
        assert_eq!(report.records[1].correct_answer, session.problems()[1].answer());
        assert!(report.records.iter().enumerate().all(|(i, r)| r.index == i));
    }

    #[test]
    fn empty_session_grades_zero_of_zero() {
        let session = seeded_session(Operator::Divide, 0);
        let report = grade(&session, &[]).unwrap();
        assert_eq!((report.total, report.correct), (0, 0));
        assert_eq!(report.accuracy(), None);
        assert!(report.records.is_empty());
    }

    #[test]
    fn answer_count_mismatch_is_rejected() {
        let session = seeded_session(Operator::Add, 3);
        assert_eq!(
            grade(&session, &[1, 2]).unwrap_err(),
            DrillError::AnswerCountMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(grade(&session, &[1, 2, 3, 4]).is_err());
    }

    #[test]
    fn grading_is_deterministic() {
        let session = seeded_session(Operator::Subtract, 6);
        let answers = vec![0, 1, 2, 3, 4, 5];
        let at = Utc::now();

        let first = grade_at(&session, &answers, at).unwrap();
        let second = grade_at(&session, &answers, at).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn grading_does_not_mutate_session() {
        let session = seeded_session(Operator::Add, 5);
        let before = session.clone();
        grade(&session, &[0; 5]).unwrap();
        assert_eq!(session, before);
    }

    #[test]
    fn division_example_is_graded_correct() {
        let range = DigitRange::new(2, 2).unwrap();
        let problem = Problem::from_draws(Operator::Divide, 14, 57).unwrap();
        assert_eq!(problem.operand_a(), 798);
        let session = Session::from_problems(Operator::Divide, range, vec![problem]);

        let report = grade(&session, &[57]).unwrap();
        assert_eq!(report.correct, 1);
        assert!(report.records[0].is_correct);
    }

    #[test]
    fn elapsed_is_decomposed() {
        let range = DigitRange::new(1, 1).unwrap();
        let start = fixed_time();
        let session = Session::from_problems(Operator::Add, range, vec![])
            .with_started_at(start);

        let at = start + TimeDelta::seconds(3 * 3600 + 25 * 60 + 7);
        let report = grade_at(&session, &[], at).unwrap();
        let elapsed = report.elapsed.unwrap();
        assert_eq!((elapsed.hours, elapsed.minutes, elapsed.seconds), (3, 25, 7));
        assert_eq!(elapsed.to_string(), "03:25:07");
    }

    #[test]
    fn elapsed_absent_without_start_time() {
        let range = DigitRange::new(1, 1).unwrap();
        let session = Session::from_problems(Operator::Add, range, vec![]);
        let report = grade(&session, &[]).unwrap();
        assert!(report.elapsed.is_none());
    }

    #[test]
    fn negative_elapsed_clamps_to_zero() {
        let elapsed = Elapsed::from_duration(TimeDelta::seconds(-30));
        assert_eq!(elapsed.to_string(), "00:00:00");
    }

    #[test]
    fn json_roundtrip() {
        let session = seeded_session(Operator::Multiply, 3);
        let report = grade(&session, &[1, 2, 3]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = Report::load_json(&path).unwrap();

        assert_eq!(loaded, report);
    }

    #[test]
    fn load_rejects_tampered_totals() {
        let session = seeded_session(Operator::Add, 2);
        let mut report = grade(&session, &[0, 0]).unwrap();
        report.correct = 5;
        assert_eq!(report.incorrect(), 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.save_json(&path).unwrap();

        let err = Report::load_json(&path).unwrap_err();
        assert!(err.to_string().contains("do not match its records"));
    }
}
