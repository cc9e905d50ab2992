//! Game loop thread: drives both event sources in real time.
//!
//! The scheduler and stage are moved into the thread. Commands arrive via an
//! `mpsc` channel. Each pass drains commands, fires any due spawn-timer
//! ticks, runs one frame cycle if the rig is running (or publishes an idle
//! snapshot if anything changed), stores the snapshot for polling, then
//! sleeps until the next display refresh.

use std::io;
use std::sync::{mpsc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use railshot_core::state::FrameSnapshot;
use railshot_sim::timing::IntervalTimer;
use railshot_sim::FrameScheduler;

use crate::stage::HeadlessStage;
use crate::state::{GameLoopCommand, SharedSnapshot};

/// Pacing for the two event sources.
#[derive(Debug, Clone, Copy)]
pub struct LoopTiming {
    /// Duration of one display refresh.
    pub refresh: Duration,
    /// Spawn timer period.
    pub spawn_interval: Duration,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    scheduler: FrameScheduler,
    stage: HeadlessStage,
    latest_snapshot: SharedSnapshot,
    timing: LoopTiming,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("railshot-game-loop".into())
        .spawn(move || {
            run_game_loop(scheduler, stage, cmd_rx, &latest_snapshot, timing);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect, then
/// detaches everything the scheduler put on stage.
fn run_game_loop(
    mut scheduler: FrameScheduler,
    mut stage: HeadlessStage,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    timing: LoopTiming,
) {
    let origin = Instant::now();
    let mut spawn_timer = IntervalTimer::new(timing.spawn_interval);
    let mut next_frame_time = origin;
    info!(?timing, "game loop running");

    'outer: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    debug!(?cmd, "command received");
                    scheduler.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => break 'outer,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'outer,
            }
        }
        scheduler.process_commands(&mut stage);

        let now = origin.elapsed();

        // 2. Spawn timer, independent of the rig state
        for _ in 0..spawn_timer.poll(now) {
            scheduler.on_spawn_timer(&mut stage);
        }

        // 3. Frame cycle while frames are requested. When idle, still publish
        // transport changes and paused spawns so pollers see the current state.
        let snapshot = if scheduler.frame_requested() {
            scheduler.on_frame(now, &mut stage)
        } else if !scheduler.context().pending_events().is_empty() {
            Some(scheduler.snapshot())
        } else {
            None
        };
        if let Some(snapshot) = snapshot {
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        // 4. Sleep until the next refresh
        next_frame_time += timing.refresh;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > timing.refresh * 2 {
            // Too far behind; resync instead of bursting frames
            next_frame_time = now;
        }
    }

    scheduler.teardown(&mut stage);
    info!(attached = stage.live_count(), "game loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use railshot_core::commands::PlayerCommand;
    use railshot_core::config::RailConfig;
    use railshot_core::enums::{RigState, Transport};
    use railshot_core::events::SimEvent;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::Start))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::Start)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_refresh_interval_at_60hz() {
        let refresh = RailConfig::default().display.refresh_interval();
        assert_eq!(refresh.as_nanos(), 1_000_000_000u128 / 60);
    }

    fn spawn_default_loop(
        spawn_interval: Duration,
    ) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>, SharedSnapshot) {
        let config = RailConfig::default();
        let mut stage = HeadlessStage::new(config.display);
        let scheduler = FrameScheduler::new(&config, &mut stage).unwrap();
        let latest: SharedSnapshot = Arc::new(Mutex::new(None));

        let timing = LoopTiming {
            refresh: Duration::from_millis(2),
            spawn_interval,
        };
        let (tx, handle) = spawn_game_loop(scheduler, stage, latest.clone(), timing).unwrap();
        (tx, handle, latest)
    }

    #[test]
    fn test_loop_runs_frames_after_start_and_shuts_down() {
        let (tx, handle, latest) = spawn_default_loop(Duration::from_millis(5));

        // Idle: no frames run, but spawns are still published.
        std::thread::sleep(Duration::from_millis(40));
        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.rig_state, RigState::Idle);
        assert_eq!(snapshot.time.frame, 0);
        assert!(!snapshot.enemies.is_empty());

        tx.send(GameLoopCommand::Player(PlayerCommand::Start))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));

        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.rig_state, RigState::Running);
        assert!(snapshot.time.frame > 0);
        assert!(!snapshot.enemies.is_empty());
        assert!(snapshot.enemies.len() <= RailConfig::default().spawner.capacity);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_pause_publishes_idle_snapshot() {
        let (tx, handle, latest) = spawn_default_loop(Duration::from_secs(3600));

        tx.send(GameLoopCommand::Player(PlayerCommand::Start))
            .unwrap();
        std::thread::sleep(Duration::from_millis(60));
        tx.send(GameLoopCommand::Player(PlayerCommand::Pause))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));

        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.rig_state, RigState::Idle);
        assert!(snapshot.events.contains(&SimEvent::TransportChanged {
            transport: Transport::Pause
        }));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
