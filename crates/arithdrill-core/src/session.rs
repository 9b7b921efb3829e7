//! Drill sessions: an ordered batch of problems for one operator.
//!
//! A session is an owned value. Starting a new batch builds a new `Session`;
//! nothing appends to or edits an existing one. Sessions serialize to JSON so
//! the step that shows problems and the step that grades answers can run in
//! separate processes.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DrillError;
use crate::generator::ProblemGenerator;
use crate::model::{DigitRange, Operator, Problem};

/// An ordered batch of problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Operator shared by every problem in the batch.
    pub operator: Operator,
    /// Digit range the operands were drawn from.
    pub range: DigitRange,
    /// Problems in display order.
    problems: Vec<Problem>,
    /// When the batch was started, if recorded.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session by drawing `count` problems from `generator`.
    pub fn start_with<R: Rng>(
        generator: &mut ProblemGenerator<R>,
        operator: Operator,
        range: DigitRange,
        count: usize,
    ) -> Result<Self, DrillError> {
        let problems = generator.generate_batch(operator, range, count)?;
        let session = Self {
            id: Uuid::new_v4(),
            operator,
            range,
            problems,
            started_at: Some(Utc::now()),
        };
        tracing::debug!(
            session = %session.id,
            operator = operator.name(),
            %range,
            count,
            "started session"
        );
        Ok(session)
    }

    /// Build a session from already-generated problems, without a start
    /// timestamp.
    pub fn from_problems(operator: Operator, range: DigitRange, problems: Vec<Problem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator,
            range,
            problems,
            started_at: None,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Save the session as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        Ok(())
    }

    /// Load a session from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        let session: Session =
            serde_json::from_str(&content).context("failed to parse session JSON")?;
        if let Some(stray) = session
            .problems
            .iter()
            .find(|p| p.operator() != session.operator)
        {
            anyhow::bail!(
                "session {} mixes operators: '{}' in a '{}' session",
                session.id,
                stray,
                session.operator
            );
        }
        Ok(session)
    }
}

/// Start a session of `count` problems using the thread-local RNG.
///
/// `count == 0` is valid and yields an empty session.
pub fn start_session(
    operator: Operator,
    count: usize,
    min_digits: u32,
    max_digits: u32,
) -> Result<Session, DrillError> {
    let range = DigitRange::new(min_digits, max_digits)?;
    Session::start_with(&mut ProblemGenerator::thread_local(), operator, range, count)
}
