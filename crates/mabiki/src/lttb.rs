//! Largest-Triangle-Three-Buckets index selection.
//!
//! Partitions the interior of the input into `budget - 2` buckets of
//! real-valued width and keeps, per bucket, the point forming the
//! largest triangle with the previously kept point and the average of
//! the next bucket. The first and last input points are always kept.
//!
//! Callers reach this through [`select_indices`](crate::select_indices),
//! which resolves the degenerate sizes (empty input, budgets of 0/1/2,
//! input already within budget) before any bucket arithmetic runs. The
//! loop here assumes `budget >= 3` and `point_count > budget`.

use crate::series::Series;

/// Real-valued bucket width over the interior index range `[1, n - 2]`.
///
/// Only meaningful when `budget >= 3` and `n > budget`; the width is
/// then strictly greater than 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bucket_size(point_count: usize, budget: usize) -> f64 {
    (point_count - 2) as f64 / (budget - 2) as f64
}

/// Interior offset of a bucket boundary: `⌊size · bucket⌋ + 1`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn floor_offset(size: f64, bucket: usize) -> usize {
    (size * bucket as f64) as usize + 1
}

/// Half-open candidate range for `bucket`, never including the last
/// index.
///
/// A computed range can come out empty for extreme `n`/`budget`
/// ratios; it is then clamped to a single interior candidate so every
/// bucket selects exactly one point. Golden-output tests pin the exact
/// clamping arithmetic.
fn candidate_range(size: f64, bucket: usize, n: usize) -> (usize, usize) {
    let mut start = floor_offset(size, bucket);
    let end = floor_offset(size, bucket + 1).min(n - 1);
    if start >= end {
        start = start.min(n - 2);
        return (start, (start + 1).min(n - 1));
    }
    (start, end)
}

/// Mean (x, y) over the bucket following `bucket`.
///
/// The final input point stands in when that range is empty, which is
/// the lookahead policy for the last bucket.
#[allow(clippy::cast_precision_loss)]
fn lookahead_average<S: Series + ?Sized>(
    series: &S,
    size: f64,
    bucket: usize,
    n: usize,
) -> (f64, f64) {
    let start = floor_offset(size, bucket + 1);
    let end = floor_offset(size, bucket + 2).min(n - 1);
    if start >= end {
        return (series.x(n - 1), series.y(n - 1));
    }

    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    for i in start..end {
        sum_x += series.x(i);
        sum_y += series.y(i);
    }
    let count = (end - start) as f64;
    (sum_x / count, sum_y / count)
}

/// Single forward pass selecting exactly `budget` strictly increasing
/// indices: 0, one winner per bucket, then `n - 1`.
///
/// Requires `budget >= 3` and `series.point_count() > budget`.
pub(crate) fn select_by_area<S: Series + ?Sized>(series: &S, budget: usize) -> Vec<usize> {
    let n = series.point_count();
    let size = bucket_size(n, budget);

    let mut selected = Vec::with_capacity(budget);
    selected.push(0);

    let mut anchor = 0_usize;
    for bucket in 0..budget - 2 {
        let (start, end) = candidate_range(size, bucket, n);
        let (avg_x, avg_y) = lookahead_average(series, size, bucket, n);

        let ax = series.x(anchor);
        let ay = series.y(anchor);

        // Doubled triangle area against the anchor and the lookahead
        // average. The comparison is strict so the first-seen maximum
        // wins ties; a NaN area never displaces the running winner.
        let mut max_area = -1.0_f64;
        let mut winner = start;
        for i in start..end {
            let area = (ax - avg_x)
                .mul_add(series.y(i) - ay, -((ax - series.x(i)) * (avg_y - ay)))
                .abs();
            if area > max_area {
                max_area = area;
                winner = i;
            }
        }

        selected.push(winner);
        anchor = winner;
    }

    selected.push(n - 1);
    selected
}
