//! Cumulative arc-length table for reparameterising a curve by distance.

use glam::DVec3;

/// Chord-length approximation of a curve's arc length, sampled at
/// `divisions + 1` evenly spaced raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    /// `lengths[i]` is the distance travelled up to raw parameter `i / divisions`.
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Measure a curve given by `sample(u)` for u in [0, 1].
    pub fn measure(divisions: usize, mut sample: impl FnMut(f64) -> DVec3) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);

        let mut last = sample(0.0);
        let mut sum = 0.0;
        for i in 1..=divisions {
            let current = sample(i as f64 / divisions as f64);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        Self { lengths }
    }

    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Total measured length.
    pub fn total(&self) -> f64 {
        self.lengths[self.lengths.len() - 1]
    }

    /// Raw curve parameter at normalised arc length `t` (clamped to [0, 1]).
    /// Non-finite `t` maps to the start of the curve.
    pub fn u_for(&self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let total = self.total();
        if total <= 0.0 {
            return t;
        }

        let target = t * total;
        let divisions = self.divisions();
        // lengths[0] == 0 <= target, so the partition point is at least 1.
        let i = self.lengths.partition_point(|&l| l <= target) - 1;
        if i >= divisions {
            return 1.0;
        }

        let before = self.lengths[i];
        let span = self.lengths[i + 1] - before;
        let fraction = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };
        (i as f64 + fraction) / divisions as f64
    }
}
