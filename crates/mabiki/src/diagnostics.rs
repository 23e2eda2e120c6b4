//! Sampling diagnostics: timing, counts, and fidelity for each call.
//!
//! These diagnostics are permanent instrumentation intended for budget
//! tuning and performance experimentation. The bench harness wraps
//! every run in [`sample_with_diagnostics`] and prints the report or
//! its JSON form.
//!
//! Duration measurements use [`std::time::Duration`]; timestamps come
//! from a caller-supplied [`Clock`] so the core stays free of a
//! wall-clock dependency and tests can use a fixed source.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::borrow::Cow;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fidelity::{self, FidelityReport};
use crate::series::Series;
use crate::{is_passthrough, lttb, select_indices};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Time source abstraction for duration measurements.
///
/// Harnesses supply a monotonic clock (`std::time::Instant` on
/// native); tests can supply a fixed one to make reports
/// deterministic.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Duration elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single downsampling call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDiagnostics {
    /// Points in the input series.
    pub input_points: usize,
    /// Points in the output series.
    pub output_points: usize,
    /// Requested point budget.
    pub budget: usize,
    /// Real-valued bucket width, or `None` when a degenerate size
    /// resolved the call before bucket math.
    pub bucket_size: Option<f64>,
    /// The input was returned unchanged, without allocation.
    pub passthrough: bool,
    /// Reduction ratio: `1.0 - (output / input)`, 0 for empty input.
    pub reduction_ratio: f64,
    /// Wall-clock duration of index selection (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Shape-fidelity assessment of the selection.
    pub fidelity: FidelityReport,
}

impl SampleDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Sample Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Points: {} -> {} (budget {}, {:.1}% reduction)",
            self.input_points,
            self.output_points,
            self.budget,
            self.reduction_ratio * 100.0,
        ));
        lines.push(format!(
            "Selection: {:.3}ms{}",
            duration_ms(self.duration),
            if self.passthrough {
                "  [passthrough]"
            } else {
                ""
            },
        ));
        if let Some(width) = self.bucket_size {
            lines.push(format!("Bucket width: {width:.2} points"));
        }

        let fid = &self.fidelity;
        lines.push(format!(
            "Structure: endpoints {}  indices {}  x-order in {} / out {}",
            ok(fid.endpoints_preserved),
            ok(fid.strictly_increasing),
            ok(fid.input_x_monotonic),
            ok(fid.output_x_monotonic),
        ));
        lines.push(format!(
            "Extrema retention (tol {}): maxima {}/{} ({:.1}%)  minima {}/{} ({:.1}%)",
            fid.tolerance,
            fid.maxima.retained,
            fid.maxima.tracked,
            fid.maxima.ratio() * 100.0,
            fid.minima.retained,
            fid.minima.tracked,
            fid.minima.ratio() * 100.0,
        ));

        lines.join("\n")
    }
}

/// Downsample `input` to `budget` points, collecting diagnostics
/// alongside the result.
///
/// The output matches [`sample`](crate::sample) exactly; the timing
/// covers index selection only, so passthrough and degenerate calls
/// report near-zero durations.
pub fn sample_with_diagnostics<'a, S, C>(
    input: &'a S,
    budget: usize,
    clock: &C,
) -> (Cow<'a, S>, SampleDiagnostics)
where
    S: Series + ?Sized,
    C: Clock,
{
    let n = input.point_count();

    let start = clock.now();
    let indices = select_indices(input, budget);
    let duration = clock.elapsed(&start);

    let fidelity = fidelity::assess(input, &indices, budget);
    let passthrough = is_passthrough(n, budget);
    let bucket_size = (budget >= 3 && n > budget).then(|| lttb::bucket_size(n, budget));
    #[allow(clippy::cast_precision_loss)]
    let reduction_ratio = if n == 0 {
        0.0
    } else {
        1.0 - indices.len() as f64 / n as f64
    };

    let diagnostics = SampleDiagnostics {
        input_points: n,
        output_points: indices.len(),
        budget,
        bucket_size,
        passthrough,
        reduction_ratio,
        duration,
        fidelity,
    };

    let output = if passthrough {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.select(&indices))
    };

    (output, diagnostics)
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Compact ok/DROP marker for report lines.
const fn ok(flag: bool) -> &'static str {
    if flag { "ok" } else { "VIOLATED" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    /// Clock returning a fixed elapsed duration.
    struct FixedClock;

    impl Clock for FixedClock {
        type Instant = ();

        fn now(&self) {}

        fn elapsed(&self, _: &()) -> Duration {
            Duration::from_millis(5)
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn ramp(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new(i as f64, ((i * 13) % 7) as f64))
            .collect()
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        let ms = duration_ms(d);
        assert!((ms - 1234.0).abs() < 0.01);
    }

    #[test]
    fn reduction_run_collects_counts() {
        let data = ramp(100);
        let (out, diag) = sample_with_diagnostics(data.as_slice(), 10, &FixedClock);

        assert_eq!(out.len(), 10);
        assert_eq!(diag.input_points, 100);
        assert_eq!(diag.output_points, 10);
        assert_eq!(diag.budget, 10);
        assert!(!diag.passthrough);
        assert!((diag.reduction_ratio - 0.9).abs() < 1e-12);
        let width = diag.bucket_size.unwrap();
        assert!((width - 98.0 / 8.0).abs() < 1e-12);
        assert_eq!(diag.duration, Duration::from_millis(5));
        assert!(diag.fidelity.endpoints_preserved);
    }

    #[test]
    fn passthrough_run_is_flagged() {
        let data = ramp(8);
        let (out, diag) = sample_with_diagnostics(data.as_slice(), 10, &FixedClock);

        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(diag.passthrough);
        assert!(diag.bucket_size.is_none());
        assert!((diag.reduction_ratio - 0.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_reports_zero_reduction() {
        let data: Vec<Point> = Vec::new();
        let (out, diag) = sample_with_diagnostics(data.as_slice(), 10, &FixedClock);
        assert!(out.is_empty());
        assert_eq!(diag.output_points, 0);
        assert!((diag.reduction_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn diagnostics_serde_round_trip() {
        let data = ramp(100);
        let (_, diag) = sample_with_diagnostics(data.as_slice(), 10, &FixedClock);
        let json = serde_json::to_string(&diag).unwrap();
        let deserialized: SampleDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, deserialized);
    }

    #[test]
    fn report_produces_expected_sections() {
        let data = ramp(100);
        let (_, diag) = sample_with_diagnostics(data.as_slice(), 10, &FixedClock);
        let report = diag.report();
        assert!(report.contains("Sample Diagnostics Report"));
        assert!(report.contains("100 -> 10"));
        assert!(report.contains("Bucket width"));
        assert!(report.contains("Extrema retention"));
    }
}
