//! LaTeX rendering, used by the REPL's `latex` toggle and the wire layer.

use std::fmt;

use num_traits::Signed;

use crate::context::{Constant, Context, Expr, ExprId};

/// Adapter rendering an [`ExprId`] as LaTeX source.
pub struct LaTeXExpr<'a> {
    pub ctx: &'a Context,
    pub id: ExprId,
}

impl Context {
    /// Render `id` as LaTeX, e.g. `\frac{1}{\sqrt{3}}`.
    pub fn latex(&self, id: ExprId) -> LaTeXExpr<'_> {
        LaTeXExpr { ctx: self, id }
    }
}

impl fmt::Display for LaTeXExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_latex(f, self.ctx, self.id, 0)
    }
}

/// Same binding-strength scheme as the plain renderer, except that
/// `\frac` and roots carry their own grouping, so fractions count as
/// atoms here.
fn precedence(ctx: &Context, id: ExprId) -> u8 {
    match ctx.get(id) {
        Expr::Number(n) => {
            if n.is_negative() {
                2
            } else {
                5
            }
        }
        Expr::Constant(_) | Expr::Variable(_) | Expr::Function(..) | Expr::Div(..) => 5,
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Neg(_) => 2,
        Expr::Mul(..) => 3,
        Expr::Pow(..) => 4,
    }
}

fn write_latex(f: &mut fmt::Formatter<'_>, ctx: &Context, id: ExprId, min_prec: u8) -> fmt::Result {
    let prec = precedence(ctx, id);
    if prec < min_prec {
        write!(f, "\\left(")?;
        write_latex(f, ctx, id, 0)?;
        return write!(f, "\\right)");
    }
    match ctx.get(id) {
        Expr::Number(n) => {
            if n.is_integer() {
                write!(f, "{}", n)
            } else if n.is_negative() {
                write!(f, "-\\frac{{{}}}{{{}}}", n.numer().magnitude(), n.denom())
            } else {
                write!(f, "\\frac{{{}}}{{{}}}", n.numer(), n.denom())
            }
        }
        Expr::Constant(Constant::Pi) => write!(f, "\\pi"),
        Expr::Constant(Constant::E) => write!(f, "e"),
        Expr::Variable(name) => write!(f, "{}", name),
        Expr::Add(l, r) => {
            write_latex(f, ctx, *l, 1)?;
            write!(f, " + ")?;
            write_latex(f, ctx, *r, 1)
        }
        Expr::Sub(l, r) => {
            write_latex(f, ctx, *l, 1)?;
            write!(f, " - ")?;
            write_latex(f, ctx, *r, 3)
        }
        Expr::Mul(l, r) => {
            write_latex(f, ctx, *l, 3)?;
            write!(f, " \\cdot ")?;
            write_latex(f, ctx, *r, 3)
        }
        Expr::Div(l, r) => {
            write!(f, "\\frac{{")?;
            write_latex(f, ctx, *l, 0)?;
            write!(f, "}}{{")?;
            write_latex(f, ctx, *r, 0)?;
            write!(f, "}}")
        }
        Expr::Pow(b, e) => {
            write_latex(f, ctx, *b, 5)?;
            write!(f, "^{{")?;
            write_latex(f, ctx, *e, 0)?;
            write!(f, "}}")
        }
        Expr::Neg(inner) => {
            write!(f, "-")?;
            write_latex(f, ctx, *inner, 3)
        }
        Expr::Function(name, args) => match (name.as_str(), args.as_slice()) {
            ("sqrt", [x]) => {
                write!(f, "\\sqrt{{")?;
                write_latex(f, ctx, *x, 0)?;
                write!(f, "}}")
            }
            ("sqrt", [x, n]) => {
                write!(f, "\\sqrt[")?;
                write_latex(f, ctx, *n, 0)?;
                write!(f, "]{{")?;
                write_latex(f, ctx, *x, 0)?;
                write!(f, "}}")
            }
            ("abs", [x]) => {
                write!(f, "\\left|")?;
                write_latex(f, ctx, *x, 0)?;
                write!(f, "\\right|")
            }
            _ => {
                write!(f, "\\mathrm{{{}}}\\left(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_latex(f, ctx, *arg, 0)?;
                }
                write!(f, "\\right)")
            }
        },
    }
}
