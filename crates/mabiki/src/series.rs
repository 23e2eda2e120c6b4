//! Uniform read access to point sequences in their physical encodings.
//!
//! Callers hand the sampler one of three layouts: a flat interleaved
//! x/y buffer, an array of two-element positional pairs, or an array of
//! named-field [`Point`] records. The [`Series`] trait abstracts the
//! per-index reads so the selection loop is written once; the concrete
//! layout is fixed at the call site through monomorphization rather
//! than branched per element.
//!
//! The trait also carries the materialization step: [`Series::select`]
//! maps a chosen index set back into a freshly allocated sequence of
//! the same layout, so a caller that feeds an interleaved buffer gets
//! an interleaved buffer back.

use crate::types::Point;

/// Read access to an ordered (x, y) sequence, plus materialization of
/// a selected subset in the same representation.
///
/// `x` and `y` are O(1) and allocation-free. Indices are trusted; the
/// sampler only ever asks for `index < point_count()`.
pub trait Series: ToOwned {
    /// Number of points in the sequence.
    fn point_count(&self) -> usize;

    /// X coordinate of the point at `index`.
    fn x(&self, index: usize) -> f64;

    /// Y coordinate of the point at `index`.
    fn y(&self, index: usize) -> f64;

    /// Copy the points at `indices`, preserving order, into a freshly
    /// allocated sequence of the same representation.
    fn select(&self, indices: &[usize]) -> Self::Owned;
}

/// Flat interleaved buffer: point `i` occupies slots `[2i, 2i + 1]`.
///
/// An odd trailing element is ignored; debug builds assert evenness.
impl Series for [f64] {
    fn point_count(&self) -> usize {
        debug_assert!(
            self.len() % 2 == 0,
            "interleaved buffer has odd length {}",
            self.len(),
        );
        self.len() / 2
    }

    fn x(&self, index: usize) -> f64 {
        self[2 * index]
    }

    fn y(&self, index: usize) -> f64 {
        self[2 * index + 1]
    }

    fn select(&self, indices: &[usize]) -> Vec<f64> {
        let mut out = Vec::with_capacity(indices.len() * 2);
        for &i in indices {
            out.push(self[2 * i]);
            out.push(self[2 * i + 1]);
        }
        out
    }
}

/// Positional pairs: `point[0]` is x, `point[1]` is y.
impl Series for [[f64; 2]] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn x(&self, index: usize) -> f64 {
        self[index][0]
    }

    fn y(&self, index: usize) -> f64 {
        self[index][1]
    }

    fn select(&self, indices: &[usize]) -> Vec<[f64; 2]> {
        indices.iter().map(|&i| self[i]).collect()
    }
}

/// Named-field records.
impl Series for [Point] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn x(&self, index: usize) -> f64 {
        self[index].x
    }

    fn y(&self, index: usize) -> f64 {
        self[index].y
    }

    fn select(&self, indices: &[usize]) -> Vec<Point> {
        indices.iter().map(|&i| self[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Interleaved buffer ---

    #[test]
    fn interleaved_reads() {
        let buf = [0.0, 10.0, 1.0, 20.0, 2.0, 30.0];
        let series: &[f64] = &buf;
        assert_eq!(series.point_count(), 3);
        assert!((series.x(1) - 1.0).abs() < f64::EPSILON);
        assert!((series.y(2) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn interleaved_select_preserves_pairs_and_order() {
        let buf = [0.0, 10.0, 1.0, 20.0, 2.0, 30.0, 3.0, 40.0];
        let series: &[f64] = &buf;
        let out = series.select(&[0, 2, 3]);
        assert_eq!(out, vec![0.0, 10.0, 2.0, 30.0, 3.0, 40.0]);
    }

    #[test]
    fn interleaved_empty() {
        let series: &[f64] = &[];
        assert_eq!(series.point_count(), 0);
        assert!(series.select(&[]).is_empty());
    }

    // --- Positional pairs ---

    #[test]
    fn pairs_reads() {
        let data = [[0.0, 10.0], [1.0, 20.0]];
        let series: &[[f64; 2]] = &data;
        assert_eq!(series.point_count(), 2);
        assert!((series.x(0) - 0.0).abs() < f64::EPSILON);
        assert!((series.y(1) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pairs_select() {
        let data = [[0.0, 10.0], [1.0, 20.0], [2.0, 30.0]];
        let series: &[[f64; 2]] = &data;
        assert_eq!(series.select(&[2, 0]), vec![[2.0, 30.0], [0.0, 10.0]]);
    }

    // --- Named-field records ---

    #[test]
    fn records_reads() {
        let data = [Point::new(0.0, 10.0), Point::new(1.0, 20.0)];
        let series: &[Point] = &data;
        assert_eq!(series.point_count(), 2);
        assert!((series.x(1) - 1.0).abs() < f64::EPSILON);
        assert!((series.y(0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn records_select() {
        let data = [
            Point::new(0.0, 10.0),
            Point::new(1.0, 20.0),
            Point::new(2.0, 30.0),
        ];
        let series: &[Point] = &data;
        let out = series.select(&[0, 2]);
        assert_eq!(out, vec![Point::new(0.0, 10.0), Point::new(2.0, 30.0)]);
    }

    // --- Cross-representation agreement ---

    #[test]
    fn representations_read_identically() {
        let records = [
            Point::new(0.0, 5.0),
            Point::new(1.5, -2.0),
            Point::new(3.0, 7.5),
        ];
        let pairs: Vec<[f64; 2]> = records.iter().map(|p| [p.x, p.y]).collect();
        let flat: Vec<f64> = records.iter().flat_map(|p| [p.x, p.y]).collect();

        let r: &[Point] = &records;
        let p: &[[f64; 2]] = &pairs;
        let f: &[f64] = &flat;

        assert_eq!(r.point_count(), p.point_count());
        assert_eq!(p.point_count(), f.point_count());
        for i in 0..r.point_count() {
            assert!((r.x(i) - p.x(i)).abs() < f64::EPSILON);
            assert!((p.x(i) - f.x(i)).abs() < f64::EPSILON);
            assert!((r.y(i) - p.y(i)).abs() < f64::EPSILON);
            assert!((p.y(i) - f.y(i)).abs() < f64::EPSILON);
        }
    }
}
