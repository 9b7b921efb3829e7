//! Core data model types for arithdrill.
//!
//! These are the value types that the generator, sessions, and the grader
//! pass between each other: operators, digit ranges, and problems.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// Smallest supported operand length in decimal digits.
pub const MIN_DIGITS: u32 = 1;
/// Largest supported operand length in decimal digits.
pub const MAX_DIGITS: u32 = 9;

/// The four arithmetic operations a drill can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[serde(alias = "+")]
    Add,
    #[serde(alias = "-")]
    Subtract,
    #[serde(alias = "×", alias = "*", alias = "x")]
    Multiply,
    #[serde(alias = "÷", alias = "/")]
    Divide,
}

impl Operator {
    /// All operators in display order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The symbol shown between operands.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Lowercase name, also accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Operator::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(Operator::Subtract),
            "*" | "x" | "×" | "mul" | "multiply" | "times" => Ok(Operator::Multiply),
            "/" | "÷" | "div" | "divide" => Ok(Operator::Divide),
            other => Err(DrillError::UnknownOperator(other.to_string())),
        }
    }
}

/// Inclusive bounds on the number of decimal digits of generated operands.
///
/// Always satisfies `MIN_DIGITS <= min <= max <= MAX_DIGITS`; the only ways
/// to build one are [`DigitRange::new`] and deserialization, which both
/// validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDigitRange")]
pub struct DigitRange {
    min_digits: u32,
    max_digits: u32,
}

#[derive(Deserialize)]
struct RawDigitRange {
    min_digits: u32,
    max_digits: u32,
}

impl TryFrom<RawDigitRange> for DigitRange {
    type Error = DrillError;

    fn try_from(raw: RawDigitRange) -> Result<Self, Self::Error> {
        DigitRange::new(raw.min_digits, raw.max_digits)
    }
}

impl DigitRange {
    pub fn new(min_digits: u32, max_digits: u32) -> Result<Self, DrillError> {
        let in_bounds = |d: u32| (MIN_DIGITS..=MAX_DIGITS).contains(&d);
        if !in_bounds(min_digits) || !in_bounds(max_digits) || min_digits > max_digits {
            return Err(DrillError::InvalidRange {
                min: min_digits,
                max: max_digits,
            });
        }
        Ok(Self {
            min_digits,
            max_digits,
        })
    }

    pub fn min_digits(&self) -> u32 {
        self.min_digits
    }

    pub fn max_digits(&self) -> u32 {
        self.max_digits
    }

    /// Smallest operand value: `10^(min_digits - 1)`.
    pub fn low(&self) -> i64 {
        10_i64.pow(self.min_digits - 1)
    }

    /// Largest operand value: `10^max_digits - 1`.
    pub fn high(&self) -> i64 {
        10_i64.pow(self.max_digits) - 1
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.low()..=self.high()).contains(&value)
    }
}

impl fmt::Display for DigitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_digits == self.max_digits {
            write!(f, "{} digit(s)", self.min_digits)
        } else {
            write!(f, "{}-{} digits", self.min_digits, self.max_digits)
        }
    }
}

/// A single arithmetic problem with its correct answer.
///
/// Operands are stored in display order. The answer is fixed at construction
/// and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct Problem {
    operand_a: i64,
    operand_b: i64,
    operator: Operator,
    answer: i64,
}

#[derive(Deserialize)]
struct RawProblem {
    operand_a: i64,
    operand_b: i64,
    operator: Operator,
    answer: i64,
}

impl TryFrom<RawProblem> for Problem {
    type Error = DrillError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        let consistent = match raw.operator {
            Operator::Add => raw.operand_a.checked_add(raw.operand_b) == Some(raw.answer),
            Operator::Subtract => {
                raw.answer >= 0 && raw.operand_a.checked_sub(raw.operand_b) == Some(raw.answer)
            }
            Operator::Multiply => raw.operand_a.checked_mul(raw.operand_b) == Some(raw.answer),
            Operator::Divide => raw.operand_b.checked_mul(raw.answer) == Some(raw.operand_a),
        };
        if !consistent {
            return Err(DrillError::InconsistentProblem(format!(
                "{} {} {} != {}",
                raw.operand_a, raw.operator, raw.operand_b, raw.answer
            )));
        }
        Ok(Self {
            operand_a: raw.operand_a,
            operand_b: raw.operand_b,
            operator: raw.operator,
            answer: raw.answer,
        })
    }
}

impl Problem {
    /// Build a problem from two raw draws, applying the operator's policy.
    ///
    /// For [`Operator::Divide`], `first` is the divisor and `second` is the
    /// quotient; the dividend is their product. For [`Operator::Subtract`],
    /// the draws are swapped when `first < second` so the answer is never
    /// negative. Draws whose result does not fit in `i64` are rejected.
    pub fn from_draws(operator: Operator, first: i64, second: i64) -> Result<Self, DrillError> {
        let parts = match operator {
            Operator::Add => first.checked_add(second).map(|sum| (first, second, sum)),
            Operator::Subtract => {
                let (a, b) = if first < second {
                    (second, first)
                } else {
                    (first, second)
                };
                a.checked_sub(b).map(|diff| (a, b, diff))
            }
            Operator::Multiply => first
                .checked_mul(second)
                .map(|product| (first, second, product)),
            Operator::Divide => first
                .checked_mul(second)
                .map(|dividend| (dividend, first, second)),
        };
        let (operand_a, operand_b, answer) = parts.ok_or(DrillError::Overflow {
            operator,
            first,
            second,
        })?;
        Ok(Self {
            operand_a,
            operand_b,
            operator,
            answer,
        })
    }

    pub fn operand_a(&self) -> i64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> i64 {
        self.operand_b
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn answer(&self) -> i64 {
        self.answer
    }

    /// Exact integer comparison against the stored answer.
    pub fn is_correct(&self, answer: i64) -> bool {
        self.answer == answer
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.operand_a, self.operator, self.operand_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_display_and_parse() {
        assert_eq!(Operator::Add.to_string(), "+");
        assert_eq!(Operator::Multiply.to_string(), "×");
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("Subtract".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("x".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::Divide);
        assert_eq!(
            "mod".parse::<Operator>(),
            Err(DrillError::UnknownOperator("mod".into()))
        );
        for op in Operator::ALL {
            assert_eq!(op.name().parse::<Operator>().unwrap(), op);
            assert_eq!(op.symbol().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn operator_serde_accepts_symbols() {
        let op: Operator = serde_json::from_str("\"÷\"").unwrap();
        assert_eq!(op, Operator::Divide);
        assert_eq!(serde_json::to_string(&Operator::Add).unwrap(), "\"add\"");
    }

    #[test]
    fn digit_range_bounds() {
        let range = DigitRange::new(1, 1).unwrap();
        assert_eq!((range.low(), range.high()), (1, 9));

        let range = DigitRange::new(2, 3).unwrap();
        assert_eq!((range.low(), range.high()), (10, 999));

        let range = DigitRange::new(9, 9).unwrap();
        assert_eq!((range.low(), range.high()), (100_000_000, 999_999_999));
    }

    #[test]
    fn digit_range_rejects_invalid() {
        assert_eq!(
            DigitRange::new(3, 2),
            Err(DrillError::InvalidRange { min: 3, max: 2 })
        );
        assert!(DigitRange::new(0, 2).is_err());
        assert!(DigitRange::new(1, 10).is_err());
    }

    #[test]
    fn digit_range_deserialize_validates() {
        let ok: DigitRange = serde_json::from_str(r#"{"min_digits":2,"max_digits":4}"#).unwrap();
        assert_eq!(ok, DigitRange::new(2, 4).unwrap());
        assert!(serde_json::from_str::<DigitRange>(r#"{"min_digits":5,"max_digits":4}"#).is_err());
    }

    #[test]
    fn subtract_swaps_to_keep_answer_non_negative() {
        let p = Problem::from_draws(Operator::Subtract, 3, 7).unwrap();
        assert_eq!((p.operand_a(), p.operand_b(), p.answer()), (7, 3, 4));
        assert_eq!(p.to_string(), "7 - 3");

        let p = Problem::from_draws(Operator::Subtract, 5, 5).unwrap();
        assert_eq!(p.answer(), 0);
    }

    #[test]
    fn divide_multiplies_back() {
        let p = Problem::from_draws(Operator::Divide, 14, 57).unwrap();
        assert_eq!((p.operand_a(), p.operand_b(), p.answer()), (798, 14, 57));
        assert_eq!(p.to_string(), "798 ÷ 14");
        assert!(p.is_correct(57));
        assert!(!p.is_correct(56));
    }

    #[test]
    fn problem_deserialize_rejects_wrong_answer() {
        let p = Problem::from_draws(Operator::Divide, 14, 57).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Problem>(&json).unwrap(), p);

        let tampered = json.replace("\"answer\":57", "\"answer\":58");
        assert!(serde_json::from_str::<Problem>(&tampered).is_err());

        let negative = r#"{"operand_a":3,"operand_b":7,"operator":"subtract","answer":-4}"#;
        assert!(serde_json::from_str::<Problem>(negative).is_err());
    }

    #[test]
    fn largest_product_fits() {
        let max = DigitRange::new(9, 9).unwrap().high();
        let p = Problem::from_draws(Operator::Multiply, max, max).unwrap();
        assert_eq!(p.answer(), 999_999_998_000_000_001);
    }

    #[test]
    fn draws_that_overflow_are_rejected() {
        assert_eq!(
            Problem::from_draws(Operator::Multiply, i64::MAX, 2),
            Err(DrillError::Overflow {
                operator: Operator::Multiply,
                first: i64::MAX,
                second: 2
            })
        );
        assert!(Problem::from_draws(Operator::Add, i64::MAX, 1).is_err());
        assert!(Problem::from_draws(Operator::Divide, i64::MAX, 3).is_err());
        assert!(Problem::from_draws(Operator::Subtract, i64::MIN, 1).is_err());
        assert!(Problem::from_draws(Operator::Subtract, 0, i64::MAX).is_ok());
    }
}
