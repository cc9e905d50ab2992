//! Collision and boundary tests. Pure per-tick decisions, no side effects.

use glam::DVec3;

/// Index of the first target strictly within `radius` of `position`.
///
/// Targets are tested in slice order, so callers control the tie-break.
pub fn first_hit(position: DVec3, targets: &[DVec3], radius: f64) -> Option<usize> {
    targets
        .iter()
        .position(|target| target.distance(position) < radius)
}

/// Whether a projectile has reached the far boundary: `far_boundary` units
/// down the -Z axis from the world origin.
///
/// The boundary is world-absolute, not relative to the camera. Much of the
/// default path already lies beyond z = -500, and shots fired from there
/// expire on their first frame. Raise `projectiles.far_boundary` to keep
/// shots alive along the whole loop.
pub fn crossed_far_boundary(position: DVec3, far_boundary: f64) -> bool {
    -position.z >= far_boundary
}
