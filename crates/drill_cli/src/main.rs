mod chart;
mod completer;
mod config;
mod repl;

use anyhow::Result;
use clap::Parser;
use drill_engine::{Problem, ShareToken};
use rand::thread_rng;

use crate::repl::Repl;

#[derive(Parser)]
#[command(
    name = "drill_cli",
    version,
    about = "Practice limits with removable discontinuities at the terminal"
)]
struct Cli {
    /// Share token selecting the starting problem
    token: Option<String>,

    /// Emit replies as JSON lines instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let (problem, notice) = match cli.token.as_deref() {
        Some(token) => match ShareToken::decode(token) {
            Some(a) => (
                Problem::from_param(a),
                Some("🔗 Challenge problem loaded.".to_string()),
            ),
            None => (
                Problem::generate(&mut thread_rng()),
                Some("Could not read that token; starting with a fresh problem.".to_string()),
            ),
        },
        None => (Problem::generate(&mut thread_rng()), None),
    };

    let mut repl = Repl::new(problem, notice);
    if cli.json {
        repl.set_json_mode(true);
    }
    repl.run()?;
    Ok(())
}
