//! Plain-text rendering with minimal parentheses.

use std::fmt;

use num_traits::Signed;

use crate::context::{Constant, Context, Expr, ExprId};

/// Binding strength used to decide where parentheses are required.
/// Sums bind loosest, then negation, then products, then powers;
/// atoms never need parentheses. A negative literal renders like a
/// negation and a non-integer literal renders like a division, so
/// both borrow the corresponding precedence.
fn precedence(ctx: &Context, id: ExprId) -> u8 {
    match ctx.get(id) {
        Expr::Number(n) => {
            if n.is_negative() {
                2
            } else if n.is_integer() {
                5
            } else {
                3
            }
        }
        Expr::Constant(_) | Expr::Variable(_) | Expr::Function(..) => 5,
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Neg(_) => 2,
        Expr::Mul(..) | Expr::Div(..) => 3,
        Expr::Pow(..) => 4,
    }
}

/// Adapter tying an [`ExprId`] to its [`Context`] for `Display`.
pub struct DisplayExpr<'a> {
    pub ctx: &'a Context,
    pub id: ExprId,
}

impl Context {
    /// Render `id` as plain text, e.g. `1/sqrt(3)`.
    pub fn display(&self, id: ExprId) -> DisplayExpr<'_> {
        DisplayExpr { ctx: self, id }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.ctx, self.id, 0)
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, ctx: &Context, id: ExprId, min_prec: u8) -> fmt::Result {
    let prec = precedence(ctx, id);
    if prec < min_prec {
        write!(f, "(")?;
        write_expr(f, ctx, id, 0)?;
        return write!(f, ")");
    }
    match ctx.get(id) {
        Expr::Number(n) => write!(f, "{}", n),
        Expr::Constant(Constant::Pi) => write!(f, "pi"),
        Expr::Constant(Constant::E) => write!(f, "e"),
        Expr::Variable(name) => write!(f, "{}", name),
        Expr::Add(l, r) => {
            write_expr(f, ctx, *l, 1)?;
            write!(f, " + ")?;
            write_expr(f, ctx, *r, 1)
        }
        Expr::Sub(l, r) => {
            write_expr(f, ctx, *l, 1)?;
            write!(f, " - ")?;
            write_expr(f, ctx, *r, 3)
        }
        Expr::Mul(l, r) => {
            write_expr(f, ctx, *l, 3)?;
            write!(f, "*")?;
            write_expr(f, ctx, *r, 3)
        }
        Expr::Div(l, r) => {
            write_expr(f, ctx, *l, 3)?;
            write!(f, "/")?;
            write_expr(f, ctx, *r, 4)
        }
        Expr::Pow(b, e) => {
            write_expr(f, ctx, *b, 5)?;
            write!(f, "^")?;
            write_expr(f, ctx, *e, 4)
        }
        Expr::Neg(inner) => {
            write!(f, "-")?;
            write_expr(f, ctx, *inner, 3)
        }
        Expr::Function(name, args) => {
            write!(f, "{}(", name)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_expr(f, ctx, *arg, 0)?;
            }
            write!(f, ")")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_inside_product_is_parenthesized() {
        let mut ctx = Context::new();
        let x = ctx.var("x");
        let one = ctx.num(1);
        let sum = ctx.add(Expr::Add(x, one));
        let two = ctx.num(2);
        let prod = ctx.add(Expr::Mul(two, sum));
        assert_eq!(format!("{}", ctx.display(prod)), "2*(x + 1)");
    }

    #[test]
    fn division_chain_keeps_left_flat() {
        let mut ctx = Context::new();
        let a = ctx.num(1);
        let b = ctx.num(2);
        let c = ctx.num(3);
        let ab = ctx.add(Expr::Div(a, b));
        let abc = ctx.add(Expr::Div(ab, c));
        assert_eq!(format!("{}", ctx.display(abc)), "1/2/3");
    }

    #[test]
    fn denominator_product_is_parenthesized() {
        let mut ctx = Context::new();
        let one = ctx.num(1);
        let x = ctx.var("x");
        let y = ctx.var("y");
        let xy = ctx.add(Expr::Mul(x, y));
        let q = ctx.add(Expr::Div(one, xy));
        assert_eq!(format!("{}", ctx.display(q)), "1/(x*y)");
    }

    #[test]
    fn rational_base_of_power_is_parenthesized() {
        let mut ctx = Context::new();
        let two_thirds = {
            let q = num_rational::BigRational::new(2.into(), 3.into());
            ctx.rat(q)
        };
        let two = ctx.num(2);
        let p = ctx.add(Expr::Pow(two_thirds, two));
        assert_eq!(format!("{}", ctx.display(p)), "(2/3)^2");
    }

    #[test]
    fn function_call_renders_with_args() {
        let mut ctx = Context::new();
        let one = ctx.num(1);
        let three = ctx.num(3);
        let q = ctx.add(Expr::Div(one, three));
        let s = ctx.call("sqrt", vec![q]);
        assert_eq!(format!("{}", ctx.display(s)), "sqrt(1/3)");
    }

    #[test]
    fn negation_of_sum_is_parenthesized() {
        let mut ctx = Context::new();
        let x = ctx.var("x");
        let one = ctx.num(1);
        let sum = ctx.add(Expr::Add(x, one));
        let neg = ctx.add(Expr::Neg(sum));
        assert_eq!(format!("{}", ctx.display(neg)), "-(x + 1)");
    }
}
