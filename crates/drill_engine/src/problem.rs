//! The generated problem family.
//!
//! Every problem is the one-parameter limit
//!
//! ```text
//!   lim_{x -> -1} sqrt( (x + 1) / (x^2 + c*x + b) )
//! ```
//!
//! with `c = a^2 + 2` and `b = c - 1`, so the denominator factors as
//! `(x + 1)(x + c - 1)`, the fraction is 0/0 at `x = -1`, and after
//! cancelling the limit is exactly `1/a`.

use drill_ast::{Context, Expr, ExprId};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest parameter drawn by the generator.
pub const MIN_PARAM: i64 = 2;
/// Largest parameter drawn by the generator.
pub const MAX_PARAM: i64 = 12;

/// One limit problem. Immutable; a new problem replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// The answer parameter; the limit evaluates to `1/a`.
    pub a: i64,
    /// Constant term of the denominator, `c - 1`.
    pub b: i64,
    /// Linear coefficient of the denominator, `a^2 + 2`.
    pub c: i64,
}

impl Problem {
    /// Draw a fresh problem with `a` uniform in `[MIN_PARAM, MAX_PARAM]`.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let problem = Self::from_param(rng.gen_range(MIN_PARAM..=MAX_PARAM));
        debug!(
            target: "drill::problem",
            a = problem.a,
            c = problem.c,
            "generated problem"
        );
        problem
    }

    /// Rebuild the triple from a bare parameter, e.g. one decoded from a
    /// share token. Accepts any `a`; out-of-range values yield a
    /// degenerate but well-defined problem, the coefficients saturating
    /// at the integer limits instead of wrapping.
    pub fn from_param(a: i64) -> Self {
        let c = a.saturating_mul(a).saturating_add(2);
        Self { a, b: c - 1, c }
    }

    /// The root of the non-cancelling factor: `k` in `(x+1)(x+k)`.
    pub fn linear_root(&self) -> i64 {
        self.c - 1
    }

    /// Where the cancelled form `1/(x + c - 1)` blows up, `x = 1 - c`.
    /// For every generated parameter this lies left of the plot window.
    pub fn asymptote(&self) -> i64 {
        1 - self.c
    }

    /// The limit as an exact rational, `1/a`. The degenerate `a == 0`
    /// (reachable only through hand-crafted tokens) renders as zero so
    /// downstream display code stays total.
    pub fn limit_value(&self) -> BigRational {
        if self.a == 0 {
            return BigRational::zero();
        }
        BigRational::new(BigInt::from(1), BigInt::from(self.a))
    }

    /// Build the expression under the limit sign,
    /// `sqrt((x + 1)/(x^2 + c*x + b))`, in the given arena.
    pub fn statement_expr(&self, ctx: &mut Context) -> ExprId {
        let numerator = {
            let x = ctx.var("x");
            let one = ctx.num(1);
            ctx.add(Expr::Add(x, one))
        };
        let denominator = self.denominator_expr(ctx);
        let quotient = ctx.add(Expr::Div(numerator, denominator));
        ctx.call("sqrt", vec![quotient])
    }

    /// The expanded denominator `x^2 + c*x + b`.
    pub fn denominator_expr(&self, ctx: &mut Context) -> ExprId {
        let x = ctx.var("x");
        let two = ctx.num(2);
        let x_sq = ctx.add(Expr::Pow(x, two));
        let c = ctx.num(self.c);
        let x2 = ctx.var("x");
        let cx = ctx.add(Expr::Mul(c, x2));
        let partial = ctx.add(Expr::Add(x_sq, cx));
        let b = ctx.num(self.b);
        ctx.add(Expr::Add(partial, b))
    }

    /// The factored denominator `(x + 1)*(x + k)` with `k = c - 1`.
    pub fn factored_denominator_expr(&self, ctx: &mut Context) -> ExprId {
        let left = {
            let x = ctx.var("x");
            let one = ctx.num(1);
            ctx.add(Expr::Add(x, one))
        };
        let right = {
            let x = ctx.var("x");
            let k = ctx.num(self.linear_root());
            ctx.add(Expr::Add(x, k))
        };
        ctx.add(Expr::Mul(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn coefficients_follow_the_parameter() {
        for a in MIN_PARAM..=MAX_PARAM {
            let p = Problem::from_param(a);
            assert_eq!(p.c, a * a + 2);
            assert_eq!(p.b, p.c - 1);
            assert_eq!(p.linear_root(), p.c - 1);
        }
    }

    #[test]
    fn numerator_and_denominator_vanish_at_minus_one() {
        for a in MIN_PARAM..=MAX_PARAM {
            let p = Problem::from_param(a);
            // x = -1: numerator x + 1 = 0, denominator 1 - c + b = 0.
            assert_eq!(1 - p.c + p.b, 0);
            // After cancelling, the denominator at -1 is a^2.
            assert_eq!(-1 + p.linear_root(), a * a);
            // The surviving singularity sits left of the sampling window.
            assert!(p.asymptote() <= -5);
        }
    }

    #[test]
    fn limit_value_is_the_unit_fraction() {
        let p = Problem::from_param(7);
        let v = p.limit_value();
        assert_eq!(v.numer().to_i64(), Some(1));
        assert_eq!(v.denom().to_i64(), Some(7));
    }

    #[test]
    fn degenerate_zero_parameter_stays_total() {
        let p = Problem::from_param(0);
        assert!(p.limit_value().is_zero());
    }

    #[test]
    fn extreme_parameters_saturate_instead_of_wrapping() {
        // 3_037_000_500 is the smallest positive a whose square overflows.
        for a in [i64::MAX, i64::MIN, 3_037_000_500, -3_037_000_500] {
            let p = Problem::from_param(a);
            assert_eq!(p.c, i64::MAX, "a = {a}");
            assert_eq!(p.b, i64::MAX - 1);
            assert_eq!(p.a, a);
        }
    }

    #[test]
    fn generation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let p = Problem::generate(&mut rng);
            assert!((MIN_PARAM..=MAX_PARAM).contains(&p.a));
        }
    }

    #[test]
    fn statement_renders_expanded_denominator() {
        let p = Problem::from_param(4);
        let mut ctx = Context::new();
        let e = p.statement_expr(&mut ctx);
        assert_eq!(
            format!("{}", ctx.display(e)),
            "sqrt((x + 1)/(x^2 + 18*x + 17))"
        );
    }
}
