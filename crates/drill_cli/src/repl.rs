//! Interactive session loop.
//!
//! One problem is live at a time. Plain input lines are treated as answers;
//! commands switch problems, reveal solutions and toggle output modes. All
//! handlers return a `WireReply` so the same logic feeds both the text view
//! and the JSON line output.

use drill_engine::{PlotCache, Problem, SessionProgress, WireKind, WireMsg, WireReply};

use crate::config::DrillConfig;

mod dispatch;
mod help;
mod init;
mod render;

/// Build a reply holding a single notice message.
pub(crate) fn reply_notice(text: impl Into<String>) -> WireReply {
    WireReply::new(vec![WireMsg::new(WireKind::Notice, text)])
}

pub struct Repl {
    config: DrillConfig,
    /// The problem currently on the table.
    problem: Problem,
    /// Attempt and streak state for the session.
    progress: SessionProgress,
    /// Sample grids already computed this session, keyed per problem.
    plots: PlotCache,
    latex_mode: bool,
    json_mode: bool,
    /// Printed once before the first problem card (token load outcome).
    startup_notice: Option<String>,
}
