//! Random problem generation.
//!
//! Operands are drawn uniformly and independently from the digit range; the
//! per-operator policy (subtraction swap, multiply-back division) is applied
//! by [`Problem::from_draws`].

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::DrillError;
use crate::model::{DigitRange, Operator, Problem};

/// Generates problems from a random source.
///
/// Deterministic for a seeded RNG such as `rand::rngs::StdRng`.
#[derive(Debug, Clone)]
pub struct ProblemGenerator<R> {
    rng: R,
}

impl ProblemGenerator<ThreadRng> {
    /// A generator backed by the thread-local RNG.
    pub fn thread_local() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one problem for `operator` with operands in `range`.
    ///
    /// For division the two draws are the divisor and the quotient, so the
    /// dividend can be longer than `range.max_digits()`.
    pub fn generate(
        &mut self,
        operator: Operator,
        range: DigitRange,
    ) -> Result<Problem, DrillError> {
        let (low, high) = (range.low(), range.high());
        let first = self.rng.random_range(low..=high);
        let second = self.rng.random_range(low..=high);
        let problem = Problem::from_draws(operator, first, second)?;
        tracing::trace!(%problem, answer = problem.answer(), "generated problem");
        Ok(problem)
    }

    /// Generate `count` problems in order.
    pub fn generate_batch(
        &mut self,
        operator: Operator,
        range: DigitRange,
        count: usize,
    ) -> Result<Vec<Problem>, DrillError> {
        (0..count).map(|_| self.generate(operator, range)).collect()
    }
}

/// Generate a single problem using the thread-local RNG.
pub fn generate(
    operator: Operator,
    min_digits: u32,
    max_digits: u32,
) -> Result<Problem, DrillError> {
    let range = DigitRange::new(min_digits, max_digits)?;
    ProblemGenerator::thread_local().generate(operator, range)
}
