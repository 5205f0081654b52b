use drill_engine::{classify_answer, Problem, ShareToken, WireKind, WireMsg, WireReply};
use rand::thread_rng;

use super::{reply_notice, Repl};
use crate::config::DrillConfig;

impl Repl {
    /// Core command dispatch. Returns structured messages, no I/O.
    pub(crate) fn handle_command_core(&mut self, line: &str) -> WireReply {
        // "help" - command overview
        if line == "help" || line.starts_with("help ") {
            return self.help_reply();
        }

        // "new" - replace the current problem with a fresh one
        if line == "new" {
            return self.cmd_new();
        }

        // "share" - print the token for the current problem
        if line == "share" {
            return self.cmd_share();
        }

        // "load <token>" - switch to a shared problem
        if let Some(rest) = line.strip_prefix("load ") {
            return self.cmd_load(rest.trim());
        }
        if line == "load" {
            return reply_notice("Usage: load <token>");
        }

        // "solution" - reveal the derivation once the problem is settled
        if line == "solution" {
            return self.cmd_solution();
        }

        // "stats" - session counters
        if line == "stats" {
            return self.cmd_stats();
        }

        // "latex on|off" - statement rendering toggle
        if line == "latex" || line.starts_with("latex ") {
            return self.cmd_latex(line);
        }

        // "json on|off" - machine-readable output toggle
        if line == "json" || line.starts_with("json ") {
            return self.cmd_json(line);
        }

        // "config <list|save|restore>"
        if line == "config" || line.starts_with("config ") {
            return self.cmd_config(line);
        }

        // "answer <expr>" - explicit submission
        if line == "answer" {
            return self.submit_answer("");
        }
        if let Some(rest) = line.strip_prefix("answer ") {
            return self.submit_answer(rest);
        }

        // Anything else is treated as an answer attempt
        self.submit_answer(line)
    }

    /// Run one submission through the verifier and the progress table.
    fn submit_answer(&mut self, text: &str) -> WireReply {
        let verdict = classify_answer(text, self.problem.a);
        let (next, feedback) = self.progress.submit(verdict);
        self.progress = next;
        self.feedback_reply(feedback)
    }

    fn cmd_new(&mut self) -> WireReply {
        self.problem = Problem::generate(&mut thread_rng());
        self.progress = self.progress.reset_for_new_problem();
        self.problem_reply()
    }

    fn cmd_share(&self) -> WireReply {
        let token = ShareToken::encode(self.problem.a);
        let text = format!(
            "Share this problem with the token: {token}\n\
             Load it with 'load {token}' or 'drill_cli {token}'."
        );
        WireReply::new(vec![WireMsg::with_data(
            WireKind::Notice,
            text,
            serde_json::json!({ "token": token.as_str() }),
        )])
    }

    fn cmd_load(&mut self, token: &str) -> WireReply {
        let mut messages = Vec::new();
        match ShareToken::decode(token) {
            Some(a) => {
                self.problem = Problem::from_param(a);
                messages.push(WireMsg::new(
                    WireKind::Notice,
                    "🔗 Challenge problem loaded.",
                ));
            }
            None => {
                // Malformed tokens never kill the session
                self.problem = Problem::generate(&mut thread_rng());
                messages.push(WireMsg::new(
                    WireKind::Notice,
                    "Could not read that token; generated a fresh problem instead.",
                ));
            }
        }
        self.progress = self.progress.reset_for_new_problem();
        messages.push(self.problem_msg());
        WireReply::new(messages)
    }

    fn cmd_solution(&mut self) -> WireReply {
        if !self.progress.show_solution {
            return reply_notice(
                "The solution unlocks after you solve the problem or run out of attempts.",
            );
        }
        WireReply::new(self.solution_messages())
    }

    fn cmd_stats(&self) -> WireReply {
        WireReply::new(vec![self.stats_msg()])
    }

    fn cmd_latex(&mut self, line: &str) -> WireReply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            let state = if self.latex_mode { "on" } else { "off" };
            return reply_notice(format!("latex: {state}"));
        }
        match parts[1] {
            "on" => {
                self.latex_mode = true;
                self.config.latex = true;
                reply_notice("LaTeX rendering: on")
            }
            "off" => {
                self.latex_mode = false;
                self.config.latex = false;
                reply_notice("LaTeX rendering: off")
            }
            _ => reply_notice("Usage: latex <on|off>"),
        }
    }

    fn cmd_json(&mut self, line: &str) -> WireReply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            let state = if self.json_mode { "on" } else { "off" };
            return reply_notice(format!("json: {state}"));
        }
        match parts[1] {
            "on" => {
                // The confirmation itself already arrives as a JSON line
                self.json_mode = true;
                self.config.json = true;
                reply_notice("JSON output: on")
            }
            "off" => {
                self.json_mode = false;
                self.config.json = false;
                reply_notice("JSON output: off")
            }
            _ => reply_notice("Usage: json <on|off>"),
        }
    }

    fn cmd_config(&mut self, line: &str) -> WireReply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return reply_notice("Usage: config <list|save|restore>");
        }

        match parts[1] {
            "list" => reply_notice(format!(
                "Current Configuration:\n\
                 latex: {}\n\
                 json: {}\n\
                 history_size: {}",
                self.config.latex, self.config.json, self.config.history_size
            )),
            "save" => match self.config.save() {
                Ok(_) => reply_notice("Configuration saved to drill_config.toml"),
                Err(e) => WireReply::new(vec![WireMsg::new(
                    WireKind::Error,
                    format!("Error saving configuration: {}", e),
                )]),
            },
            "restore" => {
                self.config = DrillConfig::restore();
                self.latex_mode = self.config.latex;
                self.json_mode = self.config.json;
                reply_notice("Configuration restored to defaults.")
            }
            _ => reply_notice(format!("Unknown config command: {}", parts[1])),
        }
    }
}
