//! Path following for RAILSHOT.
//!
//! Builds a centripetal Catmull-Rom curve through authored control points and
//! carries a camera rig along it. No ECS dependency; operates on plain data.

pub mod arc_length;
pub mod rig;
pub mod spline;

pub use railshot_core as core;
pub use rig::{CameraRig, PathState, RigSample};
pub use spline::SplineCurve;
