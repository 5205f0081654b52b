//! Answer verification.
//!
//! Two tiers, in a load-bearing order: first exact rational evaluation
//! compared against `1/a` (so `1/7`, `0.142857...` typed as a fraction,
//! `sqrt(1/49)` and friends are judged without float rounding), then a
//! numeric fallback with an absolute tolerance for answers that only
//! have a floating value, like `1/sqrt(3)` against `3^(-1/2)`.

use drill_ast::{eval_exact, eval_f64, Context};
use drill_parser::parse;
use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;

/// Absolute tolerance of the numeric tier.
pub const APPROX_TOLERANCE: f64 = 1e-4;

/// Outcome of classifying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Blank or whitespace-only input; no attempt should be consumed.
    Empty,
    /// Matches `1/a`; `exact` tells whether the exact tier decided.
    Correct { exact: bool },
    /// Anything else: wrong value, unparseable, or not a real number.
    Incorrect,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }
}

/// Classify a submission against the target `1/a`.
pub fn classify_answer(input: &str, a: i64) -> Verdict {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Verdict::Empty;
    }
    // Degenerate parameter from a hand-crafted token; nothing equals 1/0.
    if a == 0 {
        return Verdict::Incorrect;
    }

    let mut ctx = Context::new();
    let expr = match parse(trimmed, &mut ctx) {
        Ok(expr) => expr,
        Err(err) => {
            debug!(target: "drill::verify", input = trimmed, %err, "answer did not parse");
            return Verdict::Incorrect;
        }
    };

    let target = BigRational::new(BigInt::from(1), BigInt::from(a));
    if let Some(exact) = eval_exact(&ctx, expr) {
        if exact == target {
            debug!(target: "drill::verify", input = trimmed, a, "exact match");
            return Verdict::Correct { exact: true };
        }
    }

    let value = match eval_f64(&ctx, expr) {
        Some(value) => value,
        None => return Verdict::Incorrect,
    };
    let target_f = 1.0 / a as f64;
    if (value - target_f).abs() < APPROX_TOLERANCE {
        debug!(target: "drill::verify", input = trimmed, a, value, "approximate match");
        Verdict::Correct { exact: false }
    } else {
        Verdict::Incorrect
    }
}

/// Boolean view of [`classify_answer`], the shape the progress table
/// consumes for genuine attempts.
pub fn check_answer(input: &str, a: i64) -> bool {
    classify_answer(input, a).is_correct()
}
