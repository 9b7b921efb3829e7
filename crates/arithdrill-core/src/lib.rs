//! arithdrill-core — Problem generation, sessions, and grading.
//!
//! This crate defines the arithmetic drill engine that every front end
//! (CLI, exporters) builds on. It knows nothing about rendering.

pub mod config;
pub mod error;
pub mod generator;
pub mod grader;
pub mod model;
pub mod session;

pub use error::DrillError;
pub use generator::{generate, ProblemGenerator};
pub use grader::{grade, grade_at, AnswerRecord, Elapsed, Report};
pub use model::{DigitRange, Operator, Problem};
pub use session::{start_session, Session};
