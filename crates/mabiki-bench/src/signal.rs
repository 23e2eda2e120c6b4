//! Synthetic signal generation for downsampling experiments.
//!
//! Every generator is deterministic: noise comes from hashing the seed
//! and the point index with SipHash-1-3, so repeated runs and
//! cross-machine comparisons see identical inputs without carrying a
//! random-number dependency.

use std::hash::Hasher;

use clap::ValueEnum;
use siphasher::sip::SipHasher13;

use mabiki::Point;

/// Interval between injected spikes in [`SignalKind::Spikes`].
const SPIKE_INTERVAL: usize = 101;
/// Magnitude of injected spikes relative to the unit carrier.
const SPIKE_MAGNITUDE: f64 = 25.0;
/// Period of the [`SignalKind::Sawtooth`] ramp, in points.
const SAWTOOTH_PERIOD: usize = 500;

/// Signal shapes available to the bench harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignalKind {
    /// Smooth sine carrier with mild noise.
    Sine,
    /// Seeded random walk.
    RandomWalk,
    /// Unit sine carrier with strong alternating spikes; exercises
    /// extrema retention.
    Spikes,
    /// Rising sawtooth with mild noise; exercises trend retention
    /// across discontinuities.
    Sawtooth,
}

/// Generate `points` samples of `kind` with x = index.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate(kind: SignalKind, points: usize, seed: u64) -> Vec<Point> {
    match kind {
        SignalKind::Sine => (0..points)
            .map(|i| {
                let x = i as f64;
                let y = (x * 0.02).sin().mul_add(10.0, noise(seed, i) * 0.5);
                Point::new(x, y)
            })
            .collect(),
        SignalKind::RandomWalk => {
            let mut y = 0.0_f64;
            (0..points)
                .map(|i| {
                    y += noise(seed, i);
                    Point::new(i as f64, y)
                })
                .collect()
        }
        SignalKind::Spikes => (0..points)
            .map(|i| {
                let x = i as f64;
                let mut y = (x * 0.05).sin();
                if i > 0 && i < points - 1 && i % SPIKE_INTERVAL == 0 {
                    let sign = if (i / SPIKE_INTERVAL) % 2 == 0 {
                        1.0
                    } else {
                        -1.0
                    };
                    y = sign * (SPIKE_MAGNITUDE + noise(seed, i).abs());
                }
                Point::new(x, y)
            })
            .collect(),
        SignalKind::Sawtooth => (0..points)
            .map(|i| {
                let x = i as f64;
                let ramp = (i % SAWTOOTH_PERIOD) as f64 * 0.05;
                Point::new(x, noise(seed, i).mul_add(0.2, ramp))
            })
            .collect(),
    }
}

/// Deterministic noise in `[-1, 1)` from `(seed, index)`.
#[allow(clippy::cast_precision_loss)]
fn noise(seed: u64, index: usize) -> f64 {
    let mut hasher = SipHasher13::new_with_keys(seed, 0x6d61_6269_6b69);
    hasher.write_usize(index);
    let bits = hasher.finish();
    // Spread the top 53 bits over [0, 2), then center on zero.
    (bits >> 11) as f64 / (1_u64 << 52) as f64 - 1.0
}
