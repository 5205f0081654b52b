//! Session progress as pure transitions.
//!
//! All mutation of the tracker goes through value-in, value-out
//! functions returning the next state plus the feedback the interface
//! should render, which makes the whole table directly testable.
//!
//! Per problem: up to 3 genuine attempts; a miss resets the streak, the
//! third miss locks the problem (`failed`) and reveals the solution.
//! `streak` and `total_correct` live for the whole session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::verify::Verdict;

/// Genuine attempts allowed per problem.
pub const MAX_ATTEMPTS: u32 = 3;

/// Session counters and per-problem flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionProgress {
    /// Consecutive first-pass solves; zeroed by any genuine miss.
    pub streak: u32,
    /// Problems solved this session.
    pub total_correct: u32,
    /// Genuine attempts spent on the current problem.
    pub attempts: u32,
    /// The current problem is finished (solved or given up).
    pub problem_solved: bool,
    /// All attempts were spent without a correct answer.
    pub failed: bool,
    /// Whether the derivation and chart may be shown.
    pub show_solution: bool,
}

/// Which hint accompanies a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// Fired at exactly 2 attempts remaining: substitution gives 0/0,
    /// so factor.
    Strategy,
    /// Fired at exactly 1 attempt remaining: point at the `(x+1)` factor
    /// hiding in the denominator.
    Algebra,
}

/// What the interface should tell the user after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Blank submission; nothing changes, no attempt consumed.
    EnterAnswer,
    /// Correct on an open problem. `first_time` is false when the user
    /// re-submits a correct answer to a problem already solved.
    Solved { first_time: bool },
    /// Correct, but every attempt was already spent; the failure stands.
    CorrectTooLate,
    /// Incorrect on a problem that was already solved earlier.
    AlreadySolved,
    /// Incorrect after the problem was already failed; show the answer.
    AnswerShown,
    /// A genuine miss with attempts to spare.
    TryAgain { remaining: u32, hint: Option<Hint> },
    /// The final attempt missed; reveal the answer and the solution.
    Exhausted,
}

impl SessionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one verdict through the transition table.
    pub fn submit(self, verdict: Verdict) -> (Self, Feedback) {
        let (next, feedback) = match verdict {
            Verdict::Empty => (self, Feedback::EnterAnswer),
            Verdict::Correct { .. } => self.submit_correct(),
            Verdict::Incorrect => self.submit_incorrect(),
        };
        debug!(
            target: "drill::progress",
            ?verdict,
            streak = next.streak,
            attempts = next.attempts,
            feedback = ?feedback,
            "submission processed"
        );
        (next, feedback)
    }

    fn submit_correct(self) -> (Self, Feedback) {
        if self.failed {
            // Accuracy acknowledged, but the failure already stands.
            return (self, Feedback::CorrectTooLate);
        }
        if self.problem_solved {
            let next = Self {
                show_solution: true,
                ..self
            };
            return (next, Feedback::Solved { first_time: false });
        }
        let next = Self {
            streak: self.streak + 1,
            total_correct: self.total_correct + 1,
            problem_solved: true,
            show_solution: true,
            ..self
        };
        (next, Feedback::Solved { first_time: true })
    }

    fn submit_incorrect(self) -> (Self, Feedback) {
        if self.failed {
            return (self, Feedback::AnswerShown);
        }
        if self.problem_solved {
            return (self, Feedback::AlreadySolved);
        }

        let attempts = self.attempts + 1;
        let remaining = MAX_ATTEMPTS.saturating_sub(attempts);
        if remaining > 0 {
            let hint = match remaining {
                2 => Some(Hint::Strategy),
                1 => Some(Hint::Algebra),
                _ => None,
            };
            let next = Self {
                streak: 0,
                attempts,
                ..self
            };
            (next, Feedback::TryAgain { remaining, hint })
        } else {
            let next = Self {
                streak: 0,
                attempts,
                problem_solved: true,
                failed: true,
                show_solution: true,
                ..self
            };
            (next, Feedback::Exhausted)
        }
    }

    /// Start a fresh problem: per-problem flags clear, session counters
    /// survive.
    pub fn reset_for_new_problem(self) -> Self {
        Self {
            streak: self.streak,
            total_correct: self.total_correct,
            attempts: 0,
            problem_solved: false,
            failed: false,
            show_solution: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRECT: Verdict = Verdict::Correct { exact: true };

    #[test]
    fn first_try_solve_bumps_both_counters() {
        let (s, f) = SessionProgress::new().submit(CORRECT);
        assert_eq!(f, Feedback::Solved { first_time: true });
        assert_eq!(s.streak, 1);
        assert_eq!(s.total_correct, 1);
        assert_eq!(s.attempts, 0);
        assert!(s.problem_solved && s.show_solution && !s.failed);
    }

    #[test]
    fn three_misses_lock_the_problem() {
        let s0 = SessionProgress {
            streak: 4,
            ..Default::default()
        };
        let (s1, f1) = s0.submit(Verdict::Incorrect);
        assert_eq!(
            f1,
            Feedback::TryAgain {
                remaining: 2,
                hint: Some(Hint::Strategy)
            }
        );
        assert_eq!(s1.streak, 0, "a genuine miss resets the streak");

        let (s2, f2) = s1.submit(Verdict::Incorrect);
        assert_eq!(
            f2,
            Feedback::TryAgain {
                remaining: 1,
                hint: Some(Hint::Algebra)
            }
        );

        let (s3, f3) = s2.submit(Verdict::Incorrect);
        assert_eq!(f3, Feedback::Exhausted);
        assert!(s3.failed && s3.problem_solved && s3.show_solution);
        assert_eq!(s3.attempts, 3);
    }

    #[test]
    fn correct_after_failure_does_not_rescue() {
        let failed = SessionProgress {
            attempts: 3,
            problem_solved: true,
            failed: true,
            show_solution: true,
            ..Default::default()
        };
        let (s, f) = failed.submit(CORRECT);
        assert_eq!(f, Feedback::CorrectTooLate);
        assert_eq!(s, failed, "state is unchanged");
        assert_eq!(s.total_correct, 0);
    }

    #[test]
    fn incorrect_after_failure_just_shows_the_answer() {
        let failed = SessionProgress {
            attempts: 3,
            problem_solved: true,
            failed: true,
            show_solution: true,
            ..Default::default()
        };
        let (s, f) = failed.submit(Verdict::Incorrect);
        assert_eq!(f, Feedback::AnswerShown);
        assert_eq!(s, failed);
    }

    #[test]
    fn resubmitting_after_solving_is_idempotent() {
        let (s1, _) = SessionProgress::new().submit(CORRECT);
        let (s2, f2) = s1.submit(CORRECT);
        assert_eq!(f2, Feedback::Solved { first_time: false });
        assert_eq!(s2.total_correct, 1, "counters are not double-bumped");
        assert_eq!(s2.streak, 1);

        let (s3, f3) = s2.submit(Verdict::Incorrect);
        assert_eq!(f3, Feedback::AlreadySolved);
        assert_eq!(s3.streak, 1, "a late wrong guess cannot break the streak");
    }

    #[test]
    fn empty_submission_consumes_nothing() {
        let (s, f) = SessionProgress::new().submit(Verdict::Empty);
        assert_eq!(f, Feedback::EnterAnswer);
        assert_eq!(s, SessionProgress::new());
    }

    #[test]
    fn new_problem_keeps_session_counters() {
        let mut state = SessionProgress::new();
        for _ in 0..3 {
            let (s, _) = state.submit(CORRECT);
            state = s.reset_for_new_problem();
        }
        assert_eq!(state.streak, 3);
        assert_eq!(state.total_correct, 3);
        assert_eq!(state.attempts, 0);
        assert!(!state.problem_solved && !state.failed && !state.show_solution);
    }

    #[test]
    fn solve_after_misses_keeps_streak_reset() {
        let (s1, _) = SessionProgress::new().submit(Verdict::Incorrect);
        let (s2, f2) = s1.submit(CORRECT);
        assert_eq!(f2, Feedback::Solved { first_time: true });
        assert_eq!(s2.streak, 1, "streak restarts at 1 after the earlier miss");
        assert_eq!(s2.total_correct, 1);
        assert_eq!(s2.attempts, 1, "spent attempts stay recorded");
    }
}
