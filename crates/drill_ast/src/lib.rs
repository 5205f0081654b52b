pub mod context;
pub mod display;
pub mod eval;
pub mod latex;

pub use context::{Constant, Context, Expr, ExprId};
pub use display::DisplayExpr;
pub use eval::{eval_exact, eval_f64, MAX_ABS_POW};
pub use latex::LaTeXExpr;
