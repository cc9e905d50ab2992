//! Enemy bobbing.
//!
//! Advances each enemy's oscillation phase and moves it vertically by the
//! change in `amplitude · sin(phase)`, so the bob stays centred on wherever
//! the enemy was placed.

use std::f64::consts::TAU;

use railshot_core::components::Enemy;

use crate::context::SimContext;

pub fn run(ctx: &mut SimContext, dt: f64) {
    let amplitude = ctx.spawner.bob_amplitude;
    let rate = ctx.spawner.bob_rate;
    if rate == 0.0 || dt <= 0.0 {
        return;
    }

    for (_entity, enemy) in ctx.world.query_mut::<&mut Enemy>() {
        let next = (enemy.phase + rate * dt).rem_euclid(TAU);
        enemy.position.y += amplitude * (next.sin() - enemy.phase.sin());
        enemy.phase = next;
    }
}
