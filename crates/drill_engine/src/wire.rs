//! Serializable reply format.
//!
//! One stable schema for every consumer of the trainer's output (the
//! CLI's JSON mode today, any non-Rust frontend tomorrow): a reply is a
//! list of kind-tagged messages, each with human-readable text and an
//! optional structured payload.

use serde::{Deserialize, Serialize};

use crate::plot::PlotData;
use crate::problem::Problem;
use crate::progress::SessionProgress;
use crate::solution::{solution_steps, statement_latex, statement_text};
use crate::ShareToken;

/// Current schema version for the wire format.
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level reply container.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WireReply {
    /// Schema version for forwards/backwards compatibility.
    pub schema_version: u32,
    /// Messages in order of emission.
    pub messages: Vec<WireMsg>,
}

impl WireReply {
    pub fn new(messages: Vec<WireMsg>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            messages,
        }
    }
}

/// Message kind for the wire format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WireKind {
    /// A problem card (statement, token).
    Problem,
    /// Verdict feedback for a submission.
    Feedback,
    /// A hint accompanying a miss.
    Hint,
    /// The derivation and plot payload.
    Solution,
    /// Session counters.
    Stats,
    /// Informational notice (token fallback, toggles).
    Notice,
    /// Something the user asked for could not be done.
    Error,
}

/// Individual message in the wire format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WireMsg {
    pub kind: WireKind,
    /// Human-readable text, always present.
    pub text: String,
    /// Structured payload for frontends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl WireMsg {
    pub fn new(kind: WireKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            data: None,
        }
    }

    pub fn with_data(kind: WireKind, text: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind,
            text: text.into(),
            data: Some(data),
        }
    }

    /// Problem card: statement in both renderings plus the share token.
    pub fn problem_card(problem: &Problem) -> Self {
        let text = statement_text(problem);
        let data = serde_json::json!({
            "statement_latex": statement_latex(problem),
            "token": ShareToken::encode(problem.a).as_str(),
        });
        Self::with_data(WireKind::Problem, text, data)
    }

    /// Solution payload: the four steps plus the plot data.
    pub fn solution(problem: &Problem, plot: &PlotData) -> Self {
        let steps = solution_steps(problem);
        let data = serde_json::json!({
            "steps": steps,
            "plot": plot,
            "bounds": plot.bounds(),
        });
        Self::with_data(WireKind::Solution, "Solution breakdown", data)
    }

    /// Counter snapshot.
    pub fn stats(progress: &SessionProgress) -> Self {
        let text = format!(
            "streak {}, solved {}",
            progress.streak, progress.total_correct
        );
        Self::with_data(
            WireKind::Stats,
            text,
            serde_json::to_value(progress).unwrap_or(serde_json::Value::Null),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_round_trip_through_json() {
        let problem = Problem::from_param(4);
        let plot = PlotData::build(&problem);
        let reply = WireReply::new(vec![
            WireMsg::problem_card(&problem),
            WireMsg::solution(&problem, &plot),
            WireMsg::stats(&SessionProgress::new()),
        ]);
        let json = serde_json::to_string(&reply).unwrap();
        let back: WireReply = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reply);
        assert_eq!(back.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn kinds_serialize_snake_case() {
        let msg = WireMsg::new(WireKind::Feedback, "Correct!");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"kind":"feedback","text":"Correct!"}"#);
    }

    #[test]
    fn problem_card_carries_the_token() {
        let msg = WireMsg::problem_card(&Problem::from_param(7));
        let data = msg.data.unwrap();
        assert_eq!(data["token"], ShareToken::encode(7).as_str());
        assert!(data["statement_latex"]
            .as_str()
            .unwrap()
            .starts_with("\\lim"));
    }
}
