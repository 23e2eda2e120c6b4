//! mabiki: visual-shape-preserving downsampling for large point series (sans-IO).
//!
//! Reduces an ordered (x, y) sequence to a bounded-size subset with the
//! Largest-Triangle-Three-Buckets heuristic, so renderers that redraw
//! every frame never receive more points than they can afford. The
//! output is always a subset of the input: peaks, valleys, and trend
//! survive, and no point is ever synthesized or interpolated.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! slices and returns structured data. File output lives in
//! `mabiki-export`; signal generation and timing harnesses live in
//! `mabiki-bench`.
//!
//! Three input layouts are supported through the [`Series`] trait (flat
//! interleaved buffer, positional pairs, named-field records), and the
//! output mirrors whichever layout went in.

pub mod diagnostics;
pub mod fidelity;
pub mod lttb;
pub mod series;
pub mod types;

use std::borrow::Cow;

pub use series::Series;
pub use types::Point;

/// Default point budget for interactive rendering.
///
/// A few thousand points keeps per-frame path rebuilds cheap on common
/// hardware while staying visually indistinguishable from the raw
/// series at typical plot widths.
pub const DEFAULT_POINT_BUDGET: usize = 4000;

/// `true` when `sample` may return the input unchanged.
pub(crate) const fn is_passthrough(point_count: usize, budget: usize) -> bool {
    budget >= 3 && point_count <= budget && point_count != 0
}

/// Select the indices that survive downsampling `input` to `budget`
/// points.
///
/// The result is strictly increasing, holds `min(budget, point_count)`
/// indices (with the 0/1/2-budget special cases below), and always
/// includes the first and last input index when it holds at least two.
/// Degenerate sizes resolve declaratively before any bucket math:
///
/// - budget 0 or an empty input selects nothing;
/// - budget 1 selects the first point;
/// - budget 2 selects the two endpoints;
/// - an input already within budget selects every index unchanged.
///
/// Indices are plain owned values into the caller's sequence; use
/// [`sample`] to materialize them in the input's own representation.
#[must_use]
pub fn select_indices<S: Series + ?Sized>(input: &S, budget: usize) -> Vec<usize> {
    let n = input.point_count();

    if budget == 0 || n == 0 {
        return Vec::new();
    }
    if budget == 1 {
        return vec![0];
    }
    if budget == 2 {
        return if n >= 2 { vec![0, n - 1] } else { vec![0] };
    }
    if n <= budget {
        return (0..n).collect();
    }

    lttb::select_by_area(input, budget)
}

/// Downsample `input` to at most `budget` points, preserving the
/// visual shape of the series.
///
/// The output representation mirrors the input representation: an
/// interleaved buffer comes back as an interleaved buffer, a record
/// array as a record array. When the input is already within budget it
/// is passed through as [`Cow::Borrowed`] with no allocation.
///
/// The operation is pure and total: every size combination resolves to
/// a well-defined output and non-finite coordinates flow through
/// unmodified (they lose area comparisons, so they are skipped unless
/// a bucket holds nothing else).
///
/// # Examples
///
/// ```
/// use mabiki::{Point, sample};
///
/// let raw: Vec<Point> = (0..1000)
///     .map(|i| Point::new(f64::from(i), f64::from((i * 31) % 97)))
///     .collect();
/// let reduced = sample(raw.as_slice(), 100);
/// assert_eq!(reduced.len(), 100);
/// assert_eq!(reduced[0], raw[0]);
/// assert_eq!(reduced[99], raw[999]);
/// ```
#[must_use]
pub fn sample<'a, S>(input: &'a S, budget: usize) -> Cow<'a, S>
where
    S: Series + ?Sized,
{
    let n = input.point_count();
    if is_passthrough(n, budget) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.select(&select_indices(input, budget)))
}
