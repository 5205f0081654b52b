use drill_engine::{
    solution_steps, statement_latex, statement_text, Feedback, Hint, WireKind, WireMsg, WireReply,
};

use super::Repl;
use crate::chart;

impl Repl {
    pub(crate) fn problem_reply(&self) -> WireReply {
        WireReply::new(vec![self.problem_msg()])
    }

    /// The problem card in the active rendering mode.
    pub(crate) fn problem_msg(&self) -> WireMsg {
        if self.json_mode {
            return WireMsg::problem_card(&self.problem);
        }
        let statement = if self.latex_mode {
            statement_latex(&self.problem)
        } else {
            statement_text(&self.problem)
        };
        WireMsg::new(
            WireKind::Problem,
            format!("Evaluate the limit:\n  {statement}"),
        )
    }

    /// Turn a progress-table verdict into displayable messages.
    pub(crate) fn feedback_reply(&mut self, feedback: Feedback) -> WireReply {
        let a = self.problem.a;
        let mut messages = Vec::new();
        match feedback {
            Feedback::EnterAnswer => {
                messages.push(WireMsg::new(
                    WireKind::Notice,
                    "Enter an answer before submitting.",
                ));
            }
            Feedback::Solved { first_time } => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    format!("Correct! The limit is 1/{a}."),
                ));
                if first_time {
                    messages.extend(self.solution_messages());
                    messages.push(self.stats_msg());
                }
            }
            Feedback::AlreadySolved => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    format!("Correct! The limit is 1/{a}. (You solved this earlier)"),
                ));
            }
            Feedback::CorrectTooLate => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    "That matches the answer, but you have already used all attempts.",
                ));
            }
            Feedback::AnswerShown => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    format!("Answer: 1/{a}."),
                ));
            }
            Feedback::TryAgain { remaining, hint } => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    format!("Not quite. {remaining} attempts left."),
                ));
                if let Some(hint) = hint {
                    messages.push(self.hint_msg(hint));
                }
            }
            Feedback::Exhausted => {
                messages.push(WireMsg::new(
                    WireKind::Feedback,
                    format!("Answer: 1/{a}."),
                ));
                messages.extend(self.solution_messages());
            }
        }
        WireReply::new(messages)
    }

    fn hint_msg(&self, hint: Hint) -> WireMsg {
        let text = match hint {
            Hint::Strategy => "Hint 1 (Strategy): Direct substitution gives 0/0. \
                 This indicates a removable discontinuity. Try factoring."
                .to_string(),
            Hint::Algebra => format!(
                "Hint 2 (Algebra): Since the numerator is (x+1), \
                 look for an (x+1) factor in x^2 + {}x + {}.",
                self.problem.c, self.problem.b
            ),
        };
        WireMsg::with_data(WireKind::Hint, text, serde_json::json!({ "hint": hint }))
    }

    /// Derivation steps plus the chart, in the active rendering mode.
    pub(crate) fn solution_messages(&mut self) -> Vec<WireMsg> {
        let plot = self.plots.get_or_build(&self.problem);
        if self.json_mode {
            return vec![WireMsg::solution(&self.problem, &plot)];
        }

        let steps = solution_steps(&self.problem);
        let mut text = String::from("Solution breakdown:");
        for (i, step) in steps.iter().enumerate() {
            let body = if self.latex_mode {
                &step.latex
            } else {
                &step.text
            };
            text.push_str(&format!("\n  {}. {}\n     {}", i + 1, step.title, body));
        }
        let mut messages = vec![WireMsg::new(WireKind::Solution, text)];

        let lines = chart::render(&plot);
        if !lines.is_empty() {
            let mut chart_text = format!(
                "Visual proof (o marks the hole at x = -1, y = {:.4}):",
                plot.hole.y
            );
            for line in &lines {
                chart_text.push('\n');
                chart_text.push_str(line);
            }
            messages.push(WireMsg::new(WireKind::Solution, chart_text));
        }
        messages
    }

    pub(crate) fn stats_msg(&self) -> WireMsg {
        if self.json_mode {
            return WireMsg::stats(&self.progress);
        }
        WireMsg::new(
            WireKind::Stats,
            format!(
                "Streak 🔥 {}   Solved ✅ {}",
                self.progress.streak, self.progress.total_correct
            ),
        )
    }
}
