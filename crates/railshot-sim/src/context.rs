//! Simulation context: every piece of mutable game state in one place.
//!
//! Owned by the `FrameScheduler` and handed by `&mut` to each system.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use railshot_core::components::{Enemy, Projectile, RenderHandle};
use railshot_core::config::{ProjectileConfig, RailConfig, SpawnerConfig};
use railshot_core::events::SimEvent;
use railshot_core::state::ScoreView;
use railshot_core::types::SimTime;
use railshot_path::CameraRig;

pub struct SimContext {
    pub(crate) world: World,
    pub(crate) rig: CameraRig,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) spawner: SpawnerConfig,
    pub(crate) projectiles: ProjectileConfig,
    pub(crate) time: SimTime,
    pub(crate) next_serial: u64,
    pub(crate) events: Vec<SimEvent>,
    pub(crate) score: ScoreView,
    pub(crate) despawn_buffer: Vec<hecs::Entity>,
    /// Scene objects owned by the context itself (path preview, tracked marker).
    pub(crate) fixtures: Vec<RenderHandle>,
}

impl SimContext {
    /// Fresh context around an idle rig, seeded from `config.seed`.
    pub fn new(rig: CameraRig, config: &RailConfig) -> Self {
        Self {
            world: World::new(),
            rig,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawner: config.spawner,
            projectiles: config.projectiles,
            time: SimTime::default(),
            next_serial: 0,
            events: Vec::new(),
            score: ScoreView::default(),
            despawn_buffer: Vec::new(),
            fixtures: Vec::new(),
        }
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> ScoreView {
        self.score
    }

    pub fn spawner_config(&self) -> &SpawnerConfig {
        &self.spawner
    }

    pub fn projectile_config(&self) -> &ProjectileConfig {
        &self.projectiles
    }

    /// Number of live enemies.
    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    /// Number of live projectiles.
    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    /// Events recorded since the last snapshot.
    pub fn pending_events(&self) -> &[SimEvent] {
        &self.events
    }
}
