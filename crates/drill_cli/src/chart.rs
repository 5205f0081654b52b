//! ASCII chart of the plot data.
//!
//! Renders the sampled curve into a fixed-size character grid:
//!
//! ```text
//!   0.2682 |****
//!          |    *****
//!          |         ******       o      ******
//!   0.2325 |                                   *********
//!          +-------------------------------------------------
//!          -2.00                -1.00                    0.00
//! ```
//!
//! Samples map to `*`; the hole is drawn last as `o` so the gap marker
//! survives overlap with neighbouring samples.

use drill_engine::{PlotBounds, PlotData};

/// Grid width in character cells.
pub const CHART_WIDTH: usize = 61;
/// Grid height in character cells.
pub const CHART_HEIGHT: usize = 14;

/// Render the chart as printable lines, top row first.
///
/// Returns no lines when the data holds no samples (there is nothing to
/// scale against).
pub fn render(data: &PlotData) -> Vec<String> {
    let Some(bounds) = data.bounds() else {
        return Vec::new();
    };

    let mut grid = vec![[' '; CHART_WIDTH]; CHART_HEIGHT];
    for sample in &data.samples {
        let (row, col) = cell(&bounds, sample.x, sample.y);
        grid[row][col] = '*';
    }
    let (hole_row, hole_col) = cell(&bounds, data.hole.x, data.hole.y);
    grid[hole_row][hole_col] = 'o';

    let mut lines = Vec::with_capacity(CHART_HEIGHT + 2);
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{:>8.4}", bounds.y_max)
        } else if row == CHART_HEIGHT - 1 {
            format!("{:>8.4}", bounds.y_min)
        } else {
            " ".repeat(8)
        };
        let body: String = cells.iter().collect();
        lines.push(format!("{} |{}", label, body.trim_end()));
    }
    lines.push(format!("{} +{}", " ".repeat(8), "-".repeat(CHART_WIDTH)));
    lines.push(x_axis_labels(&bounds, data.hole.x, hole_col));
    lines
}

/// Map a data point to a `(row, col)` grid cell, clamped to the grid.
fn cell(bounds: &PlotBounds, x: f64, y: f64) -> (usize, usize) {
    let x_span = bounds.x_max - bounds.x_min;
    let y_span = bounds.y_max - bounds.y_min;
    let col = if x_span > 0.0 {
        ((x - bounds.x_min) / x_span * (CHART_WIDTH - 1) as f64).round()
    } else {
        0.0
    };
    let row = if y_span > 0.0 {
        ((bounds.y_max - y) / y_span * (CHART_HEIGHT - 1) as f64).round()
    } else {
        0.0
    };
    (
        (row as isize).clamp(0, CHART_HEIGHT as isize - 1) as usize,
        (col as isize).clamp(0, CHART_WIDTH as isize - 1) as usize,
    )
}

/// One row of x labels: window edges at the ends, the hole x centred
/// under its column.
fn x_axis_labels(bounds: &PlotBounds, hole_x: f64, hole_col: usize) -> String {
    let mut row = vec![' '; CHART_WIDTH];
    overlay(&mut row, 0, &format!("{:.2}", bounds.x_min));
    let centre = format!("{:.2}", hole_x);
    overlay(&mut row, hole_col.saturating_sub(centre.len() / 2), &centre);
    let right = format!("{:.2}", bounds.x_max);
    overlay(&mut row, CHART_WIDTH.saturating_sub(right.len()), &right);
    let text: String = row.into_iter().collect();
    format!("{}{}", " ".repeat(10), text.trim_end())
}

/// Write `text` into the row starting at `start`, clipped to the row end.
fn overlay(row: &mut [char], start: usize, text: &str) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(slot) = row.get_mut(start + i) {
            *slot = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_engine::{PlotSample, Problem};

    #[test]
    fn renders_full_frame_with_one_hole_marker() {
        let data = PlotData::build(&Problem::from_param(4));
        let lines = render(&data);
        assert_eq!(lines.len(), CHART_HEIGHT + 2);
        let holes: usize = lines.iter().map(|l| l.matches('o').count()).sum();
        assert_eq!(holes, 1);
        assert!(lines.iter().any(|l| l.contains('*')));
    }

    #[test]
    fn hole_sits_in_the_middle_column() {
        // x = -1 is the centre of the [-2, 0] window, so the marker
        // lands on grid column 30, which is byte 40 after the gutter.
        let data = PlotData::build(&Problem::from_param(4));
        let lines = render(&data);
        let hole_line = lines.iter().find(|l| l.contains('o')).unwrap();
        assert_eq!(hole_line.find('o'), Some(40));
    }

    #[test]
    fn axis_and_labels_frame_the_grid() {
        let data = PlotData::build(&Problem::from_param(4));
        let lines = render(&data);
        assert!(lines[0].starts_with("  0."));
        assert!(lines[0].contains('|'));
        assert!(lines[CHART_HEIGHT].contains(&"-".repeat(CHART_WIDTH)));
        let labels = &lines[CHART_HEIGHT + 1];
        assert!(labels.contains("-2.00"));
        assert!(labels.contains("-1.00"));
        assert!(labels.contains("0.00"));
    }

    #[test]
    fn empty_data_renders_nothing() {
        let data = PlotData {
            samples: Vec::new(),
            hole: PlotSample { x: -1.0, y: 0.25 },
        };
        assert!(render(&data).is_empty());
    }
}
