//! Plot data for the removable-discontinuity chart.
//!
//! Fixed-window policy: 200 raw positions evenly spaced on `[-2, 0]`,
//! positions inside the band `|x + 1| <= 0.05` dropped so the gap around
//! the hole is visible and no sample sits on top of the discontinuity.
//! The hole itself is placed at `(-1, 1/a)` from the known limit, never
//! by evaluating the function there.

use std::sync::Arc;

use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::problem::Problem;

/// Left edge of the sampling window.
pub const WINDOW_MIN: f64 = -2.0;
/// Right edge of the sampling window.
pub const WINDOW_MAX: f64 = 0.0;
/// Raw sample positions before the exclusion band is applied.
pub const RAW_SAMPLES: usize = 200;
/// Half-width of the exclusion band around `x = -1`.
pub const EXCLUSION_BAND: f64 = 0.05;
/// Padding applied to the y-range by [`PlotData::bounds`].
pub const Y_PADDING: f64 = 0.01;

/// One point of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSample {
    pub x: f64,
    pub y: f64,
}

/// Axis ranges enveloping the sampled curve, y padded on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Sampled curve plus the hole marking the removable discontinuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    /// Curve samples in ascending x order.
    pub samples: Vec<PlotSample>,
    /// The point the function tends to but never reaches.
    pub hole: PlotSample,
}

impl PlotData {
    /// Sample `f(x) = sqrt(1/(x + c - 1))` over the window.
    ///
    /// For every generated parameter the asymptote `x = 1 - c` lies left
    /// of the window and each retained sample is finite; samples that
    /// are not (possible only with degenerate token-built problems) are
    /// skipped rather than emitted as NaN.
    pub fn build(problem: &Problem) -> Self {
        let shift = (problem.c - 1) as f64;
        let step = (WINDOW_MAX - WINDOW_MIN) / (RAW_SAMPLES - 1) as f64;
        let mut samples = Vec::with_capacity(RAW_SAMPLES);
        for i in 0..RAW_SAMPLES {
            let x = WINDOW_MIN + step * i as f64;
            if (x + 1.0).abs() <= EXCLUSION_BAND {
                continue;
            }
            let y = (1.0 / (x + shift)).sqrt();
            if !y.is_finite() {
                continue;
            }
            samples.push(PlotSample { x, y });
        }
        debug!(
            target: "drill::plot",
            c = problem.c,
            kept = samples.len(),
            "built plot samples"
        );

        let hole = PlotSample {
            x: -1.0,
            y: problem.limit_value().to_f64().unwrap_or_default(),
        };
        PlotData { samples, hole }
    }

    /// Axis bounds over the curve samples, `None` when nothing was
    /// sampled. The hole always lies inside the y-range for generated
    /// problems since `f` is monotone across the window.
    pub fn bounds(&self) -> Option<PlotBounds> {
        let first = self.samples.first()?;
        let mut bounds = PlotBounds {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for sample in &self.samples {
            bounds.x_min = bounds.x_min.min(sample.x);
            bounds.x_max = bounds.x_max.max(sample.x);
            bounds.y_min = bounds.y_min.min(sample.y);
            bounds.y_max = bounds.y_max.max(sample.y);
        }
        bounds.y_min -= Y_PADDING;
        bounds.y_max += Y_PADDING;
        Some(bounds)
    }
}

/// Memoizes built sample sets per problem parameter. Pure optimization;
/// behavior with a cold cache is identical.
#[derive(Debug, Default)]
pub struct PlotCache {
    entries: FxHashMap<i64, Arc<PlotData>>,
}

impl PlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the plot data for `problem`, building it on first use.
    pub fn get_or_build(&mut self, problem: &Problem) -> Arc<PlotData> {
        if let Some(hit) = self.entries.get(&problem.a) {
            debug!(target: "drill::plot", a = problem.a, "plot cache hit");
            return Arc::clone(hit);
        }
        let built = Arc::new(PlotData::build(problem));
        self.entries.insert(problem.a, Arc::clone(&built));
        built
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_exclusion_keeps_190_of_200() {
        let data = PlotData::build(&Problem::from_param(4));
        assert_eq!(data.samples.len(), RAW_SAMPLES - 10);
        for s in &data.samples {
            assert!((s.x + 1.0).abs() > EXCLUSION_BAND);
        }
    }

    #[test]
    fn samples_are_finite_positive_and_ordered() {
        for a in crate::MIN_PARAM..=crate::MAX_PARAM {
            let data = PlotData::build(&Problem::from_param(a));
            let mut prev = f64::NEG_INFINITY;
            for s in &data.samples {
                assert!(s.x > prev);
                assert!(s.y.is_finite() && s.y > 0.0);
                prev = s.x;
            }
        }
    }

    #[test]
    fn hole_is_the_exact_limit_point() {
        let data = PlotData::build(&Problem::from_param(5));
        assert_eq!(data.hole.x, -1.0);
        assert_eq!(data.hole.y, 1.0 / 5.0);
    }

    #[test]
    fn bounds_envelope_all_samples_with_padding() {
        let data = PlotData::build(&Problem::from_param(3));
        let bounds = data.bounds().unwrap();
        for s in &data.samples {
            assert!(s.x >= bounds.x_min && s.x <= bounds.x_max);
            assert!(s.y > bounds.y_min && s.y < bounds.y_max);
        }
        // The hole sits strictly inside the padded y-range.
        assert!(data.hole.y > bounds.y_min && data.hole.y < bounds.y_max);
    }

    #[test]
    fn cache_returns_the_same_arc() {
        let mut cache = PlotCache::new();
        let p = Problem::from_param(6);
        let first = cache.get_or_build(&p);
        let second = cache.get_or_build(&p);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.get_or_build(&Problem::from_param(7));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn degenerate_problem_builds_without_panicking() {
        // a = 0 puts the asymptote inside the window; the NaN region is
        // skipped instead of emitted.
        let data = PlotData::build(&Problem::from_param(0));
        for s in &data.samples {
            assert!(s.y.is_finite());
        }
    }
}
