//! Exact rational and floating-point evaluation of closed expressions.
//!
//! `eval_exact` succeeds only when the value is representable as a
//! `BigRational` without approximation, so equality on its results is
//! trustworthy. `eval_f64` is the fallback for irrational values and
//! filters non-finite results so callers never compare against NaN.

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::context::{Constant, Context, Expr, ExprId};

/// Largest exponent magnitude evaluated exactly. Anything bigger is
/// almost certainly a typo in an answer and would only burn memory.
pub const MAX_ABS_POW: i64 = 1000;

/// Largest root index accepted by the two-argument `sqrt` form.
const MAX_ROOT_INDEX: u32 = 32;

/// Evaluate to an exact rational, or `None` when the value is
/// undefined, irrational, or depends on a free variable.
pub fn eval_exact(ctx: &Context, id: ExprId) -> Option<BigRational> {
    match ctx.get(id) {
        Expr::Number(n) => Some(n.clone()),
        Expr::Constant(_) => None,
        Expr::Variable(_) => None,
        Expr::Add(l, r) => Some(eval_exact(ctx, *l)? + eval_exact(ctx, *r)?),
        Expr::Sub(l, r) => Some(eval_exact(ctx, *l)? - eval_exact(ctx, *r)?),
        Expr::Mul(l, r) => Some(eval_exact(ctx, *l)? * eval_exact(ctx, *r)?),
        Expr::Div(l, r) => {
            let denom = eval_exact(ctx, *r)?;
            if denom.is_zero() {
                return None;
            }
            Some(eval_exact(ctx, *l)? / denom)
        }
        Expr::Pow(b, e) => {
            let base = eval_exact(ctx, *b)?;
            let exp = eval_exact(ctx, *e)?;
            if !exp.is_integer() {
                return root_of_power(&base, &exp);
            }
            pow_exact(&base, &exp.to_integer())
        }
        Expr::Neg(inner) => Some(-eval_exact(ctx, *inner)?),
        Expr::Function(name, args) => match (name.as_str(), args.as_slice()) {
            ("sqrt", [x]) => sqrt_exact(&eval_exact(ctx, *x)?),
            ("sqrt", [x, n]) => {
                let index = eval_exact(ctx, *n)?;
                if !index.is_integer() {
                    return None;
                }
                let index = index.to_integer().to_u32()?;
                nth_root_exact(&eval_exact(ctx, *x)?, index)
            }
            ("abs", [x]) => Some(eval_exact(ctx, *x)?.abs()),
            _ => None,
        },
    }
}

/// Evaluate numerically. Returns `None` for free variables and for any
/// computation whose result is not finite.
pub fn eval_f64(ctx: &Context, id: ExprId) -> Option<f64> {
    let value = eval_f64_inner(ctx, id)?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn eval_f64_inner(ctx: &Context, id: ExprId) -> Option<f64> {
    match ctx.get(id) {
        Expr::Number(n) => n.to_f64(),
        Expr::Constant(Constant::Pi) => Some(std::f64::consts::PI),
        Expr::Constant(Constant::E) => Some(std::f64::consts::E),
        Expr::Variable(_) => None,
        Expr::Add(l, r) => Some(eval_f64_inner(ctx, *l)? + eval_f64_inner(ctx, *r)?),
        Expr::Sub(l, r) => Some(eval_f64_inner(ctx, *l)? - eval_f64_inner(ctx, *r)?),
        Expr::Mul(l, r) => Some(eval_f64_inner(ctx, *l)? * eval_f64_inner(ctx, *r)?),
        Expr::Div(l, r) => Some(eval_f64_inner(ctx, *l)? / eval_f64_inner(ctx, *r)?),
        Expr::Pow(b, e) => Some(eval_f64_inner(ctx, *b)?.powf(eval_f64_inner(ctx, *e)?)),
        Expr::Neg(inner) => Some(-eval_f64_inner(ctx, *inner)?),
        Expr::Function(name, args) => match (name.as_str(), args.as_slice()) {
            ("sqrt", [x]) => Some(eval_f64_inner(ctx, *x)?.sqrt()),
            ("sqrt", [x, n]) => {
                let index = eval_f64_inner(ctx, *n)?;
                if index.fract() != 0.0 || index < 1.0 {
                    return None;
                }
                Some(nth_root_f64(eval_f64_inner(ctx, *x)?, index as u32))
            }
            ("abs", [x]) => Some(eval_f64_inner(ctx, *x)?.abs()),
            _ => None,
        },
    }
}

/// Integer power by squaring, with the `MAX_ABS_POW` guard.
fn pow_exact(base: &BigRational, exp: &BigInt) -> Option<BigRational> {
    if exp.is_zero() {
        // 0^0 is left undefined rather than fixed at 1.
        if base.is_zero() {
            return None;
        }
        return Some(BigRational::one());
    }
    let exp_i64 = exp.to_i64()?;
    if exp_i64.abs() > MAX_ABS_POW {
        return None;
    }
    if exp_i64 < 0 && base.is_zero() {
        return None;
    }
    let mut result = BigRational::one();
    let mut square = base.clone();
    let mut remaining = exp_i64.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= &square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = &square * &square;
        }
    }
    if exp_i64 < 0 {
        result = result.recip();
    }
    Some(result)
}

/// Exact `base^(p/q)` via an integer power followed by a `q`-th root.
fn root_of_power(base: &BigRational, exp: &BigRational) -> Option<BigRational> {
    let index = exp.denom().to_u32()?;
    if index > MAX_ROOT_INDEX {
        return None;
    }
    let powered = pow_exact(base, exp.numer())?;
    nth_root_exact(&powered, index)
}

/// Exact square root, defined only for perfect squares.
fn sqrt_exact(q: &BigRational) -> Option<BigRational> {
    nth_root_exact(q, 2)
}

/// Exact `n`-th root, defined only when numerator and denominator are
/// both perfect `n`-th powers. Odd indexes accept negative radicands.
fn nth_root_exact(q: &BigRational, index: u32) -> Option<BigRational> {
    if index == 0 || index > MAX_ROOT_INDEX {
        return None;
    }
    if index == 1 {
        return Some(q.clone());
    }
    if q.is_negative() {
        if index % 2 == 0 {
            return None;
        }
        return nth_root_exact(&-q.clone(), index).map(|r| -r);
    }
    let root_numer = q.numer().nth_root(index);
    let root_denom = q.denom().nth_root(index);
    if num_traits::pow(root_numer.clone(), index as usize) == *q.numer()
        && num_traits::pow(root_denom.clone(), index as usize) == *q.denom()
    {
        Some(BigRational::new(root_numer, root_denom))
    } else {
        None
    }
}

fn nth_root_f64(x: f64, index: u32) -> f64 {
    if index == 0 {
        return f64::NAN;
    }
    if x < 0.0 {
        if index % 2 == 1 {
            -(-x).powf(1.0 / f64::from(index))
        } else {
            f64::NAN
        }
    } else {
        x.powf(1.0 / f64::from(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn exact_arithmetic_combines_rationals() {
        let mut ctx = Context::new();
        let half = ctx.rat(rational(1, 2));
        let third = ctx.rat(rational(1, 3));
        let sum = ctx.add(Expr::Add(half, third));
        assert_eq!(eval_exact(&ctx, sum), Some(rational(5, 6)));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let mut ctx = Context::new();
        let one = ctx.num(1);
        let zero = ctx.num(0);
        let q = ctx.add(Expr::Div(one, zero));
        assert_eq!(eval_exact(&ctx, q), None);
        assert_eq!(eval_f64(&ctx, q), None);
    }

    #[test]
    fn integer_powers_are_exact() {
        let mut ctx = Context::new();
        let two = ctx.num(2);
        let ten = ctx.num(10);
        let p = ctx.add(Expr::Pow(two, ten));
        assert_eq!(eval_exact(&ctx, p), Some(rational(1024, 1)));
    }

    #[test]
    fn negative_exponent_inverts() {
        let mut ctx = Context::new();
        let two = ctx.num(2);
        let neg_two = ctx.num(-2);
        let p = ctx.add(Expr::Pow(two, neg_two));
        assert_eq!(eval_exact(&ctx, p), Some(rational(1, 4)));
    }

    #[test]
    fn zero_to_the_zero_is_undefined() {
        let mut ctx = Context::new();
        let zero_a = ctx.num(0);
        let zero_b = ctx.num(0);
        let p = ctx.add(Expr::Pow(zero_a, zero_b));
        assert_eq!(eval_exact(&ctx, p), None);
    }

    #[test]
    fn huge_exponents_are_rejected() {
        let mut ctx = Context::new();
        let two = ctx.num(2);
        let big = ctx.num(MAX_ABS_POW + 1);
        let p = ctx.add(Expr::Pow(two, big));
        assert_eq!(eval_exact(&ctx, p), None);
    }

    #[test]
    fn perfect_square_roots_are_exact() {
        let mut ctx = Context::new();
        let q = ctx.rat(rational(4, 9));
        let s = ctx.call("sqrt", vec![q]);
        assert_eq!(eval_exact(&ctx, s), Some(rational(2, 3)));
    }

    #[test]
    fn irrational_square_root_falls_back_to_float() {
        let mut ctx = Context::new();
        let three = ctx.num(3);
        let s = ctx.call("sqrt", vec![three]);
        assert_eq!(eval_exact(&ctx, s), None);
        let value = eval_f64(&ctx, s).unwrap();
        assert!((value - 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn negative_radicand_is_undefined_both_ways() {
        let mut ctx = Context::new();
        let neg_one = ctx.num(-1);
        let s = ctx.call("sqrt", vec![neg_one]);
        assert_eq!(eval_exact(&ctx, s), None);
        assert_eq!(eval_f64(&ctx, s), None);
    }

    #[test]
    fn cube_root_of_negative_is_exact() {
        let mut ctx = Context::new();
        let neg_eight = ctx.num(-8);
        let three = ctx.num(3);
        let s = ctx.call("sqrt", vec![neg_eight, three]);
        assert_eq!(eval_exact(&ctx, s), Some(rational(-2, 1)));
    }

    #[test]
    fn fractional_exponent_of_perfect_power_is_exact() {
        let mut ctx = Context::new();
        let nine = ctx.num(9);
        let half = ctx.rat(rational(1, 2));
        let p = ctx.add(Expr::Pow(nine, half));
        assert_eq!(eval_exact(&ctx, p), Some(rational(3, 1)));
    }

    #[test]
    fn free_variable_has_no_value() {
        let mut ctx = Context::new();
        let x = ctx.var("x");
        assert_eq!(eval_exact(&ctx, x), None);
        assert_eq!(eval_f64(&ctx, x), None);
    }

    #[test]
    fn pi_is_only_numeric() {
        let mut ctx = Context::new();
        let pi = ctx.add(Expr::Constant(Constant::Pi));
        assert_eq!(eval_exact(&ctx, pi), None);
        let value = eval_f64(&ctx, pi).unwrap();
        assert!((value - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn abs_folds_sign() {
        let mut ctx = Context::new();
        let q = ctx.rat(rational(-3, 2));
        let a = ctx.call("abs", vec![q]);
        assert_eq!(eval_exact(&ctx, a), Some(rational(3, 2)));
    }
}
