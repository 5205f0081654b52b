use drill_engine::{
    PlotCache, Problem, SessionProgress, WireKind, WireMsg, WireReply, MAX_ATTEMPTS,
};
use rustyline::error::ReadlineError;

use super::Repl;
use crate::completer::DrillHelper;
use crate::config::DrillConfig;

impl Repl {
    pub fn new(problem: Problem, startup_notice: Option<String>) -> Self {
        let config = DrillConfig::load();
        let latex_mode = config.latex;
        let json_mode = config.json;
        Self {
            config,
            problem,
            progress: SessionProgress::new(),
            plots: PlotCache::new(),
            latex_mode,
            json_mode,
            startup_notice,
        }
    }

    pub fn set_json_mode(&mut self, enabled: bool) {
        self.json_mode = enabled;
    }

    /// Print a reply to stdout/stderr.
    /// This is the single point where session output becomes visible.
    pub fn print_reply(&self, reply: &WireReply) {
        if self.json_mode {
            match serde_json::to_string(reply) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("✖ JSON serialization error: {e}"),
            }
            return;
        }
        for msg in &reply.messages {
            match msg.kind {
                WireKind::Error => eprintln!("✖ {}", msg.text),
                _ => println!("{}", msg.text),
            }
        }
    }

    /// Build the prompt with mode indicators.
    /// Only shows indicators for non-default modes to keep the prompt clean.
    fn build_prompt(&self) -> String {
        let mut indicators = Vec::new();
        if self.latex_mode {
            indicators.push("[latex]");
        }
        if self.json_mode {
            indicators.push("[json]");
        }

        if indicators.is_empty() {
            "> ".to_string()
        } else {
            format!("{} > ", indicators.join(""))
        }
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        if !self.json_mode {
            println!("Limit Drill");
            println!(
                "Evaluate the limit shown below; you have {} attempts per problem.",
                MAX_ATTEMPTS
            );
            println!("Type an answer like 1/7 or 0.25, or 'help' for commands.");
            println!();
        }
        if let Some(notice) = self.startup_notice.take() {
            let reply = WireReply::new(vec![WireMsg::new(WireKind::Notice, notice)]);
            self.print_reply(&reply);
        }
        let card = self.problem_reply();
        self.print_reply(&card);

        let helper = DrillHelper::new();
        let config = rustyline::Config::builder()
            .max_history_size(self.config.history_size)?
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut rl =
            rustyline::Editor::<DrillHelper, rustyline::history::DefaultHistory>::with_config(
                config,
            )?;
        rl.set_helper(Some(helper));

        // History file path: ~/.drill_history
        let history_path = dirs::home_dir()
            .map(|p| p.join(".drill_history"))
            .unwrap_or_else(|| std::path::PathBuf::from(".drill_history"));

        // Load history if file exists (errors are silently ignored)
        let _ = rl.load_history(&history_path);

        loop {
            let prompt = self.build_prompt();
            let readline = rl.readline(&prompt);
            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line)?;

                    if line == "quit" || line == "exit" {
                        if !self.json_mode {
                            println!("Goodbye!");
                        }
                        break;
                    }

                    let reply = self.handle_command_core(line);
                    self.print_reply(&reply);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history on exit (errors are silently ignored)
        let _ = rl.save_history(&history_path);

        Ok(())
    }
}
