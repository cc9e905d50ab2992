//! Systems that operate on the simulation context.
//!
//! Systems are free functions that take `&mut SimContext` (or `&SimContext` for
//! read-only). They do not own state; it all lives in the context.

pub mod cleanup;
pub mod collision;
pub mod enemy_motion;
pub mod enemy_spawner;
pub mod projectiles;
pub mod snapshot;
