//! Centripetal Catmull-Rom spline through an ordered list of control points.
//!
//! Each segment between points `i` and `i + 1` is a cubic built from the four
//! points around it. At the two open ends a synthetic neighbour is
//! extrapolated by mirroring the adjacent point. The curve is never closed,
//! even when the first and last control points coincide: the seam is C0 only.
//!
//! Two parameterisations are exposed. `point(u)`/`derivative(u)` use the raw
//! spline parameter, where every segment spans an equal share of [0, 1].
//! `position_at(t)`/`tangent_at(t)` use normalised arc length, so a constant
//! rate of `t` moves at constant speed along the path.

use glam::DVec3;

use railshot_core::constants::ARC_LENGTH_DIVISIONS;
use railshot_core::error::PathError;
use railshot_core::types::ControlPoint;

use crate::arc_length::ArcLengthTable;

/// Spacings below this are treated as coincident points.
const MIN_KNOT_SPACING: f64 = 1e-4;

/// Immutable curve derived once from its control points.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurve {
    points: Vec<ControlPoint>,
    arc: ArcLengthTable,
}

/// Cubic coefficients of one segment: p(w) = c0 + c1 w + c2 w² + c3 w³.
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: DVec3,
    c1: DVec3,
    c2: DVec3,
    c3: DVec3,
}

impl Cubic {
    /// Hermite form of the non-uniform Catmull-Rom segment from `p1` to `p2`.
    fn centripetal(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        if dt1 < MIN_KNOT_SPACING {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_SPACING {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_SPACING {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    fn position(&self, w: f64) -> DVec3 {
        self.c0 + w * (self.c1 + w * (self.c2 + w * self.c3))
    }

    /// dp/dw.
    fn derivative(&self, w: f64) -> DVec3 {
        self.c1 + w * (2.0 * self.c2 + 3.0 * w * self.c3)
    }
}

impl SplineCurve {
    /// Build a curve with the default arc-length resolution.
    pub fn build(points: &[ControlPoint]) -> Result<Self, PathError> {
        Self::build_with_divisions(points, ARC_LENGTH_DIVISIONS)
    }

    /// Build a curve, sampling `divisions` chords for the arc-length table.
    pub fn build_with_divisions(
        points: &[ControlPoint],
        divisions: usize,
    ) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewControlPoints {
                supplied: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFiniteControlPoint { index });
        }

        let points = points.to_vec();
        let arc = ArcLengthTable::measure(divisions, |u| raw_point(&points, u));
        Ok(Self { points, arc })
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Approximate total length of the curve.
    pub fn length(&self) -> f64 {
        self.arc.total()
    }

    /// Position at normalised arc length `t` in [0, 1).
    pub fn position_at(&self, t: f64) -> DVec3 {
        self.point(self.arc.u_for(t))
    }

    /// Unit direction of travel at normalised arc length `t` in [0, 1).
    pub fn tangent_at(&self, t: f64) -> DVec3 {
        self.unit_tangent(self.arc.u_for(t))
    }

    /// Position at raw spline parameter `u` (clamped to [0, 1]).
    pub fn point(&self, u: f64) -> DVec3 {
        raw_point(&self.points, u)
    }

    /// Derivative dp/du at raw spline parameter `u` (clamped to [0, 1]).
    pub fn derivative(&self, u: f64) -> DVec3 {
        let (index, weight) = locate(&self.points, u);
        let segments = (self.points.len() - 1) as f64;
        segment(&self.points, index).derivative(weight) * segments
    }

    /// `segments + 1` points evenly spaced by arc length, both ends included.
    pub fn sample_points(&self, segments: usize) -> Vec<DVec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.position_at(i as f64 / segments as f64))
            .collect()
    }

    fn unit_tangent(&self, u: f64) -> DVec3 {
        if let Some(tangent) = self.derivative(u).try_normalize() {
            return tangent;
        }
        // Stationary point: fall back to the chord of the current segment.
        let (index, _) = locate(&self.points, u);
        (self.points[index + 1] - self.points[index])
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z)
    }
}

fn raw_point(points: &[ControlPoint], u: f64) -> DVec3 {
    let (index, weight) = locate(points, u);
    segment(points, index).position(weight)
}

/// Segment index and local weight for raw parameter `u`.
fn locate(points: &[ControlPoint], u: f64) -> (usize, f64) {
    let last = points.len() - 1;
    let scaled = u.clamp(0.0, 1.0) * last as f64;
    let index = scaled.floor() as usize;
    if index >= last {
        return (last - 1, 1.0);
    }
    (index, scaled - index as f64)
}

fn segment(points: &[ControlPoint], index: usize) -> Cubic {
    let p1 = points[index];
    let p2 = points[index + 1];
    let p0 = if index > 0 {
        points[index - 1]
    } else {
        2.0 * p1 - p2
    };
    let p3 = if index + 2 < points.len() {
        points[index + 2]
    } else {
        2.0 * p2 - p1
    };
    Cubic::centripetal(p0, p1, p2, p3)
}
