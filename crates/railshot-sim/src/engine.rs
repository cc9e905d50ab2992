//! Frame scheduler: owns the game state and the two entry points that drive it.
//!
//! `FrameScheduler` owns the `SimContext`, processes player commands, runs all
//! systems once per display refresh, and produces `FrameSnapshot`s. The spawn
//! timer is a second, independent entry point (`on_spawn_timer`); the caller
//! may interleave the two in any order. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;
use std::time::Duration;

use glam::DVec3;
use hecs::Entity;
use tracing::info;

use railshot_core::commands::PlayerCommand;
use railshot_core::config::RailConfig;
use railshot_core::constants::PATH_PREVIEW_SEGMENTS;
use railshot_core::enums::Transport;
use railshot_core::error::SetupError;
use railshot_core::events::SimEvent;
use railshot_core::stage::{AudioDeck, Renderable, SceneGraph, Stage};
use railshot_core::state::FrameSnapshot;
use railshot_path::{CameraRig, SplineCurve};

use crate::context::SimContext;
use crate::systems;
use crate::timing::FrameClock;
use crate::world_setup;

/// Drives the simulation from the two event sources.
pub struct FrameScheduler {
    ctx: SimContext,
    command_queue: VecDeque<PlayerCommand>,
    clock: FrameClock,
    audio_track: String,
    /// Whether the soundtrack has been loaded on the stage yet.
    audio_loaded: bool,
}

impl FrameScheduler {
    /// Build the path, attach the path preview and tracked marker, and leave
    /// the rig idle. Fails before anything is attached if the config or path
    /// is invalid.
    pub fn new<S: Stage>(config: &RailConfig, stage: &mut S) -> Result<Self, SetupError> {
        config.validate()?;
        let curve = SplineCurve::build_with_divisions(
            &config.path.effective_points(),
            config.path.arc_length_divisions,
        )?;
        info!(
            control_points = curve.control_points().len(),
            length = curve.length(),
            "path built"
        );

        let preview = stage.add(Renderable::PathLine {
            points: curve.sample_points(PATH_PREVIEW_SEGMENTS),
        });
        let rig = CameraRig::new(curve, &config.rig);
        let marker = stage.add(Renderable::TrackedMarker {
            position: rig.tracked_position(),
        });

        let mut ctx = SimContext::new(rig, config);
        ctx.fixtures.extend([preview, marker]);

        Ok(Self {
            ctx,
            command_queue: VecDeque::new(),
            clock: FrameClock::new(),
            audio_track: config.audio_track.clone(),
            audio_loaded: false,
        })
    }

    /// Queue a player command for processing at the next cycle boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process all queued commands. Called at the start of every frame cycle;
    /// drivers also call it while the rig is idle so transport commands can
    /// resume frames.
    pub fn process_commands<S: Stage>(&mut self, stage: &mut S) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, stage);
        }
    }

    /// Display-refresh entry point. Returns `None` without touching any state
    /// (beyond draining commands) while the rig is idle.
    pub fn on_frame<S: Stage>(&mut self, now: Duration, stage: &mut S) -> Option<FrameSnapshot> {
        self.process_commands(stage);
        if !self.ctx.rig.is_running() {
            return None;
        }

        let dt = self.clock.delta(now);
        self.run_systems(dt, stage);
        self.ctx.time.advance(dt);
        Some(self.snapshot())
    }

    /// Spawn-timer entry point. Runs regardless of the rig state.
    pub fn on_spawn_timer(&mut self, scene: &mut impl SceneGraph) -> Option<Entity> {
        systems::enemy_spawner::try_spawn(&mut self.ctx, scene)
    }

    /// Fire a projectile along a world-space ray.
    pub fn fire(
        &mut self,
        origin: DVec3,
        direction: DVec3,
        scene: &mut impl SceneGraph,
    ) -> Option<Entity> {
        systems::projectiles::fire(&mut self.ctx, origin, direction, scene)
    }

    /// Whether the driver should keep issuing frame cycles.
    pub fn frame_requested(&self) -> bool {
        self.ctx.rig.is_running()
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, events)
    }

    /// Get a read-only reference to the simulation context.
    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Detach every scene object this scheduler created, each exactly once.
    pub fn teardown(mut self, scene: &mut impl SceneGraph) {
        let mut buffer: Vec<Entity> = world_setup::live_projectiles(&self.ctx.world)
            .into_iter()
            .map(|(_, entity)| entity)
            .collect();
        buffer.extend(
            world_setup::ordered_enemies(&self.ctx.world)
                .into_iter()
                .map(|(_, entity, _)| entity),
        );
        systems::cleanup::retire_all(&mut self.ctx.world, &mut buffer, scene);
        for handle in self.ctx.fixtures.drain(..) {
            scene.remove(handle);
        }
        info!("scheduler torn down");
    }

    /// Handle a single player command.
    fn handle_command<S: Stage>(&mut self, command: PlayerCommand, stage: &mut S) {
        match command {
            PlayerCommand::Start => {
                if self.ctx.rig.start() {
                    self.clock.reset();
                    self.play_soundtrack(stage);
                    self.record_transport(Transport::Start);
                }
            }
            PlayerCommand::Pause => {
                if self.ctx.rig.pause() {
                    self.clock.reset();
                    stage.pause();
                    self.record_transport(Transport::Pause);
                }
            }
            PlayerCommand::Restart => {
                self.ctx.rig.restart();
                self.clock.reset();
                if self.audio_loaded {
                    stage.restart();
                } else {
                    self.play_soundtrack(stage);
                }
                self.record_transport(Transport::Restart);
            }
            PlayerCommand::Fire { screen_x, screen_y } => {
                let camera = self.ctx.rig.camera_pose();
                let ray = stage.cast_ray(screen_x, screen_y, &camera);
                systems::projectiles::fire(&mut self.ctx, ray.origin, ray.direction, stage);
            }
        }
    }

    fn play_soundtrack(&mut self, audio: &mut impl AudioDeck) {
        audio.load_and_play(&self.audio_track);
        self.audio_loaded = true;
    }

    fn record_transport(&mut self, transport: Transport) {
        self.ctx
            .events
            .push(SimEvent::TransportChanged { transport });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64, scene: &mut impl SceneGraph) {
        // 1. Camera rig
        self.ctx.rig.tick(dt);
        // 2. Enemy bobbing
        systems::enemy_motion::run(&mut self.ctx, dt);
        // 3. Projectile integration, hits, far boundary, retirement
        systems::projectiles::run(&mut self.ctx, dt, scene);
    }
}
