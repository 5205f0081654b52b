//! Core engine for the limit trainer: problem generation, share tokens,
//! answer verification, plot data, progress tracking and the derivation
//! shown after a problem is resolved.

pub mod codec;
pub mod plot;
pub mod problem;
pub mod progress;
pub mod solution;
pub mod verify;
pub mod wire;

pub use codec::ShareToken;
pub use plot::{PlotBounds, PlotCache, PlotData, PlotSample};
pub use problem::{Problem, MAX_PARAM, MIN_PARAM};
pub use progress::{Feedback, Hint, SessionProgress, MAX_ATTEMPTS};
pub use solution::{solution_steps, statement_latex, statement_text, DerivationStep};
pub use verify::{check_answer, classify_answer, Verdict, APPROX_TOLERANCE};
pub use wire::{WireKind, WireMsg, WireReply, SCHEMA_VERSION};
