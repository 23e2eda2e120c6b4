//! Shape-fidelity metrics for a downsampled series.
//!
//! Quantifies how faithfully a selected index subset preserves the
//! original signal: endpoint retention, index and x-ordering, and how
//! many of the strongest peaks and valleys survive within a
//! half-bucket index distance. This is permanent instrumentation in
//! the same spirit as the timing diagnostics; the bench harness prints
//! a report per run and regression tests assert on the ratios.
//!
//! Extremum retention is an empirical measure, not a guarantee: the
//! sampler keeps whatever wins the triangle-area contest in each
//! bucket, and a peak can lose to a steeper neighbor.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::lttb;
use crate::series::Series;

/// Options for extrema tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremaOptions {
    /// How many of the strongest maxima and minima to track.
    pub track_count: usize,
}

impl Default for ExtremaOptions {
    fn default() -> Self {
        Self { track_count: 50 }
    }
}

/// Retention counts for one extremum polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionStats {
    /// Number of extrema tracked (at most `track_count`).
    pub tracked: usize,
    /// Tracked extrema with a selected index within tolerance.
    pub retained: usize,
}

impl RetentionStats {
    /// Fraction of tracked extrema retained; 1.0 when the signal had
    /// no extrema to track.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.tracked == 0 {
            1.0
        } else {
            self.retained as f64 / self.tracked as f64
        }
    }
}

/// Fidelity assessment of one downsampling call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityReport {
    /// Points in the original series.
    pub input_points: usize,
    /// Points in the selection.
    pub output_points: usize,
    /// First and last input points both survive. Vacuously true for
    /// selections shorter than two points.
    pub endpoints_preserved: bool,
    /// Selected indices strictly increase.
    pub strictly_increasing: bool,
    /// Input x values are non-decreasing.
    pub input_x_monotonic: bool,
    /// X values of the selected points are non-decreasing.
    pub output_x_monotonic: bool,
    /// Index distance within which an extremum counts as retained:
    /// half the bucket width, or 0 when no bucket math ran.
    pub tolerance: usize,
    /// Retention of the strongest maxima.
    pub maxima: RetentionStats,
    /// Retention of the strongest minima.
    pub minima: RetentionStats,
}

/// Assess `selected` against `input` with the default extrema options.
#[must_use]
pub fn assess<S: Series + ?Sized>(
    input: &S,
    selected: &[usize],
    budget: usize,
) -> FidelityReport {
    assess_with_options(input, selected, budget, ExtremaOptions::default())
}

/// Assess `selected` against `input`, tracking the strongest
/// `options.track_count` maxima and minima.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn assess_with_options<S: Series + ?Sized>(
    input: &S,
    selected: &[usize],
    budget: usize,
    options: ExtremaOptions,
) -> FidelityReport {
    let n = input.point_count();

    let tolerance = if budget >= 3 && n > budget {
        (lttb::bucket_size(n, budget) / 2.0) as usize
    } else {
        0
    };

    let endpoints_preserved = if selected.len() >= 2 && n >= 2 {
        selected.first() == Some(&0) && selected.last() == Some(&(n - 1))
    } else {
        true
    };

    let maxima_at = strongest_extrema(input, options.track_count, Polarity::Maximum);
    let minima_at = strongest_extrema(input, options.track_count, Polarity::Minimum);

    FidelityReport {
        input_points: n,
        output_points: selected.len(),
        endpoints_preserved,
        strictly_increasing: selected.windows(2).all(|w| w[0] < w[1]),
        input_x_monotonic: (1..n).all(|i| input.x(i) >= input.x(i - 1)),
        output_x_monotonic: selected
            .windows(2)
            .all(|w| input.x(w[1]) >= input.x(w[0])),
        tolerance,
        maxima: retention(&maxima_at, selected, tolerance),
        minima: retention(&minima_at, selected, tolerance),
    }
}

/// Which extremum polarity to look for.
#[derive(Clone, Copy)]
enum Polarity {
    Maximum,
    Minimum,
}

/// Interior indices that are strict local extrema, strongest first,
/// truncated to `track_count`.
///
/// Comparisons against NaN neighbors are false, so a NaN is never an
/// extremum and never ranks.
fn strongest_extrema<S: Series + ?Sized>(
    input: &S,
    track_count: usize,
    polarity: Polarity,
) -> Vec<usize> {
    let n = input.point_count();
    if n < 3 {
        return Vec::new();
    }

    let mut at: Vec<usize> = (1..n - 1)
        .filter(|&i| {
            let y = input.y(i);
            match polarity {
                Polarity::Maximum => y > input.y(i - 1) && y > input.y(i + 1),
                Polarity::Minimum => y < input.y(i - 1) && y < input.y(i + 1),
            }
        })
        .collect();

    at.sort_by(|&a, &b| {
        let ya = input.y(a);
        let yb = input.y(b);
        let ordering = match polarity {
            Polarity::Maximum => yb.partial_cmp(&ya),
            Polarity::Minimum => ya.partial_cmp(&yb),
        };
        ordering.unwrap_or(Ordering::Equal)
    });
    at.truncate(track_count);
    at
}

/// Count tracked extrema with a selected index within `tolerance`.
fn retention(extrema: &[usize], selected: &[usize], tolerance: usize) -> RetentionStats {
    let retained = extrema
        .iter()
        .filter(|&&e| selected.iter().any(|&s| s.abs_diff(e) <= tolerance))
        .count();
    RetentionStats {
        tracked: extrema.len(),
        retained,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[allow(clippy::cast_precision_loss)]
    fn series_from_ys(ys: &[f64]) -> Vec<Point> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| Point::new(i as f64, y))
            .collect()
    }

    // --- Extremum detection ---

    #[test]
    fn finds_strict_local_extrema() {
        let data = series_from_ys(&[0.0, 5.0, 0.0, -3.0, 0.0, 8.0, 0.0]);
        let maxima = strongest_extrema(data.as_slice(), 50, Polarity::Maximum);
        let minima = strongest_extrema(data.as_slice(), 50, Polarity::Minimum);
        // Strongest first.
        assert_eq!(maxima, vec![5, 1]);
        assert_eq!(minima, vec![3]);
    }

    #[test]
    fn plateau_is_not_a_strict_extremum() {
        let data = series_from_ys(&[0.0, 5.0, 5.0, 0.0]);
        let maxima = strongest_extrema(data.as_slice(), 50, Polarity::Maximum);
        assert!(maxima.is_empty());
    }

    #[test]
    fn track_count_truncates_to_strongest() {
        let data = series_from_ys(&[0.0, 3.0, 0.0, 9.0, 0.0, 6.0, 0.0]);
        let maxima = strongest_extrema(data.as_slice(), 2, Polarity::Maximum);
        assert_eq!(maxima, vec![3, 5]);
    }

    #[test]
    fn nan_is_never_an_extremum() {
        let data = series_from_ys(&[0.0, f64::NAN, 0.0, 4.0, 0.0]);
        let maxima = strongest_extrema(data.as_slice(), 50, Polarity::Maximum);
        assert_eq!(maxima, vec![3]);
    }

    // --- Retention counting ---

    #[test]
    fn retention_exact_and_within_tolerance() {
        let stats = retention(&[10, 20, 30], &[0, 10, 22, 99], 2);
        assert_eq!(stats.tracked, 3);
        assert_eq!(stats.retained, 2); // 10 exactly, 20 via 22.
        assert!((stats.ratio() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_tracking_ratio_is_one() {
        let stats = RetentionStats {
            tracked: 0,
            retained: 0,
        };
        assert!((stats.ratio() - 1.0).abs() < f64::EPSILON);
    }

    // --- Full reports ---

    #[test]
    fn report_on_passthrough_selection() {
        let data = series_from_ys(&[0.0, 2.0, 1.0, 3.0]);
        let selected: Vec<usize> = (0..4).collect();
        let report = assess(data.as_slice(), &selected, 10);

        assert_eq!(report.input_points, 4);
        assert_eq!(report.output_points, 4);
        assert!(report.endpoints_preserved);
        assert!(report.strictly_increasing);
        assert!(report.input_x_monotonic);
        assert!(report.output_x_monotonic);
        assert_eq!(report.tolerance, 0);
        assert!((report.maxima.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tolerance_is_half_bucket_width() {
        let data = series_from_ys(&(0..102).map(f64::from).collect::<Vec<_>>());
        let selected = crate::select_indices(data.as_slice(), 12);
        let report = assess(data.as_slice(), &selected, 12);
        // bucket width = 100 / 10 = 10.
        assert_eq!(report.tolerance, 5);
    }

    #[test]
    fn dropped_endpoint_is_reported() {
        let data = series_from_ys(&[0.0, 1.0, 2.0, 3.0]);
        let report = assess(data.as_slice(), &[0, 2], 10);
        assert!(!report.endpoints_preserved);
    }

    #[test]
    fn unordered_x_is_reported() {
        let data = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(9.0, 3.0),
        ];
        let report = assess(data.as_slice(), &[0, 1, 2, 3], 10);
        assert!(!report.input_x_monotonic);
        assert!(!report.output_x_monotonic);
    }

    #[test]
    fn report_serde_round_trip() {
        let data = series_from_ys(&[0.0, 5.0, 0.0, -3.0, 0.0]);
        let report = assess(data.as_slice(), &[0, 1, 4], 3);
        let json = serde_json::to_string(&report).unwrap();
        let deserialized: FidelityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
