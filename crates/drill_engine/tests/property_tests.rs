//! Property tests for the generator, codec, verifier, plot and progress
//! contracts, over the whole parameter range and over hostile input.

use drill_engine::{
    check_answer, classify_answer, plot, PlotData, Problem, SessionProgress, ShareToken, Verdict,
    MAX_ATTEMPTS,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn coefficients_give_zero_over_zero(a in 2i64..=12) {
        let p = Problem::from_param(a);
        prop_assert_eq!(p.c, a * a + 2);
        prop_assert_eq!(p.b, p.c - 1);
        // Numerator and denominator both vanish at x = -1...
        prop_assert_eq!(1 - p.c + p.b, 0);
        // ...and the cancelled denominator there is a^2.
        prop_assert_eq!(p.linear_root() - 1, a * a);
    }

    #[test]
    fn tokens_round_trip(a in 2i64..=12) {
        let token = ShareToken::encode(a);
        prop_assert_eq!(ShareToken::decode(token.as_str()), Some(a));
    }

    #[test]
    fn token_decode_is_total(token in ".*") {
        // Never panics; malformed input is simply None.
        let _ = ShareToken::decode(&token);
    }

    #[test]
    fn verifier_is_total_on_arbitrary_input(input in ".{0,200}", a in 2i64..=12) {
        let _ = check_answer(&input, a);
    }

    #[test]
    fn unit_fraction_is_exactly_correct(a in 2i64..=12) {
        let answer = format!("1/{}", a);
        prop_assert_eq!(classify_answer(&answer, a), Verdict::Correct { exact: true });
    }

    #[test]
    fn rounded_decimal_is_approximately_correct(a in 2i64..=12) {
        let answer = format!("{:.6}", 1.0 / a as f64);
        prop_assert!(check_answer(&answer, a));
    }

    #[test]
    fn neighboring_unit_fraction_is_rejected(a in 2i64..=12) {
        let wrong = format!("1/{}", a + 1);
        prop_assert!(!check_answer(&wrong, a));
    }

    #[test]
    fn plot_invariants_hold(a in 2i64..=12) {
        let p = Problem::from_param(a);
        prop_assert!((p.asymptote() as f64) < plot::WINDOW_MIN);
        let data = PlotData::build(&p);
        prop_assert_eq!(data.samples.len(), 190);
        for s in &data.samples {
            prop_assert!((s.x + 1.0).abs() > plot::EXCLUSION_BAND);
            prop_assert!(s.y.is_finite());
            prop_assert!(s.y > 0.0);
        }
        prop_assert_eq!(data.hole.x, -1.0);
        prop_assert_eq!(data.hole.y, 1.0 / a as f64);

        let bounds = data.bounds().unwrap();
        for s in &data.samples {
            prop_assert!(s.x >= bounds.x_min && s.x <= bounds.x_max);
            prop_assert!(s.y > bounds.y_min && s.y < bounds.y_max);
        }
    }

    #[test]
    fn progress_respects_the_attempt_cap(flips in proptest::collection::vec(any::<bool>(), 0..20)) {
        let mut state = SessionProgress::new();
        for correct in flips {
            let verdict = if correct {
                Verdict::Correct { exact: true }
            } else {
                Verdict::Incorrect
            };
            let (next, _) = state.submit(verdict);
            prop_assert!(next.attempts <= MAX_ATTEMPTS);
            prop_assert!(next.total_correct >= state.total_correct);
            prop_assert!(next.total_correct <= state.total_correct + 1);
            // Solved and failed never coexist with an open problem.
            if next.failed {
                prop_assert!(next.problem_solved);
            }
            state = next;
        }
    }
}
