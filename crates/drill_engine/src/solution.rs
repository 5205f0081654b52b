//! The four-step derivation shown once a problem is resolved.
//!
//! Each step is rendered from real expression trees through the shared
//! display and LaTeX code, so the narrative can never drift from the
//! coefficients of the problem it explains.

use drill_ast::{Context, Expr, ExprId};
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// One step of the derivation, pre-rendered in both output styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub title: String,
    pub text: String,
    pub latex: String,
}

/// Plain-text statement of the problem.
pub fn statement_text(problem: &Problem) -> String {
    let mut ctx = Context::new();
    let body = problem.statement_expr(&mut ctx);
    format!("lim[x -> -1] {}", ctx.display(body))
}

/// LaTeX statement of the problem.
pub fn statement_latex(problem: &Problem) -> String {
    let mut ctx = Context::new();
    let body = problem.statement_expr(&mut ctx);
    format!("\\lim_{{x \\to -1}} {}", ctx.latex(body))
}

/// The full derivation: factor, cancel, substitute, take the root.
pub fn solution_steps(problem: &Problem) -> Vec<DerivationStep> {
    vec![
        factor_step(problem),
        cancel_step(problem),
        substitute_step(problem),
        root_step(problem),
    ]
}

fn x_plus(ctx: &mut Context, n: i64) -> ExprId {
    let x = ctx.var("x");
    let n = ctx.num(n);
    ctx.add(Expr::Add(x, n))
}

fn equation(ctx: &Context, lhs: ExprId, rhs: ExprId) -> (String, String) {
    (
        format!("{} = {}", ctx.display(lhs), ctx.display(rhs)),
        format!("{} = {}", ctx.latex(lhs), ctx.latex(rhs)),
    )
}

/// `x^2 + cx + b = (x+1)(x+k)`.
fn factor_step(problem: &Problem) -> DerivationStep {
    let mut ctx = Context::new();
    let lhs = problem.denominator_expr(&mut ctx);
    let rhs = problem.factored_denominator_expr(&mut ctx);
    let (text, latex) = equation(&ctx, lhs, rhs);
    DerivationStep {
        title: "Factor the denominator".to_string(),
        text,
        latex,
    }
}

/// `(x+1)/((x+1)(x+k)) = 1/(x+k)`.
fn cancel_step(problem: &Problem) -> DerivationStep {
    let mut ctx = Context::new();
    let lhs = {
        let numerator = x_plus(&mut ctx, 1);
        let denominator = problem.factored_denominator_expr(&mut ctx);
        ctx.add(Expr::Div(numerator, denominator))
    };
    let rhs = {
        let one = ctx.num(1);
        let tail = x_plus(&mut ctx, problem.linear_root());
        ctx.add(Expr::Div(one, tail))
    };
    let (text, latex) = equation(&ctx, lhs, rhs);
    DerivationStep {
        title: "Simplify the fraction".to_string(),
        text,
        latex,
    }
}

/// `lim 1/(x+k) = 1/(-1+k) = 1/(c-2)`.
fn substitute_step(problem: &Problem) -> DerivationStep {
    let mut ctx = Context::new();
    let k = problem.linear_root();
    let operand = {
        let one = ctx.num(1);
        let tail = x_plus(&mut ctx, k);
        ctx.add(Expr::Div(one, tail))
    };
    let substituted = {
        let one = ctx.num(1);
        let minus_one = ctx.num(-1);
        let k = ctx.num(k);
        let sum = ctx.add(Expr::Add(minus_one, k));
        ctx.add(Expr::Div(one, sum))
    };
    let value = evaluated_fraction(&mut ctx, problem);
    DerivationStep {
        title: "Evaluate the limit as x -> -1".to_string(),
        text: format!(
            "lim[x -> -1] {} = {} = {}",
            ctx.display(operand),
            ctx.display(substituted),
            ctx.display(value)
        ),
        latex: format!(
            "\\lim_{{x \\to -1}} {} = {} = {}",
            ctx.latex(operand),
            ctx.latex(substituted),
            ctx.latex(value)
        ),
    }
}

/// `sqrt(1/a^2) = 1/a`, noting that `c - 2` is `a^2`.
fn root_step(problem: &Problem) -> DerivationStep {
    let mut ctx = Context::new();
    let lhs = {
        let one = ctx.num(1);
        let a = ctx.num(problem.a);
        let two = ctx.num(2);
        let a_sq = ctx.add(Expr::Pow(a, two));
        let q = ctx.add(Expr::Div(one, a_sq));
        ctx.call("sqrt", vec![q])
    };
    let rhs = ctx.rat(problem.limit_value());
    let (text, latex) = equation(&ctx, lhs, rhs);
    DerivationStep {
        title: format!(
            "Apply the square root (note: {} = {}^2)",
            problem.c - 2,
            problem.a
        ),
        text,
        latex,
    }
}

/// `1/(c-2)` as an exact literal; the degenerate `c == 2` case (only
/// reachable through hand-crafted tokens) renders as 0 to stay total.
fn evaluated_fraction(ctx: &mut Context, problem: &Problem) -> ExprId {
    let denom = problem.c - 2;
    if denom == 0 {
        return ctx.num(0);
    }
    ctx.rat(BigRational::new(1.into(), denom.into()))
}
