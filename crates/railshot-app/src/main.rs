use std::io::{self, BufRead};
use std::process::ExitCode;

use tracing::{error, info, warn};

use railshot_app::console::{self, ConsoleCommand};
use railshot_app::control;
use railshot_app::stage::HeadlessStage;
use railshot_app::state::AppState;
use railshot_core::config::RailConfig;
use railshot_core::error::ConfigError;
use railshot_sim::FrameScheduler;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "RAILSHOT_CONFIG";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_config() -> Result<RailConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "loading config");
            RailConfig::load(path)
        }
        None => Ok(RailConfig::default()),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut stage = HeadlessStage::new(config.display);
    let scheduler = match FrameScheduler::new(&config, &mut stage) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!(error = %e, "setup failed");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new();
    if let Err(e) = control::start_simulation(&state, scheduler, stage, &config) {
        error!(error = %e, "failed to start");
        return ExitCode::FAILURE;
    }
    info!("commands: start, pause, restart, fire <x> <y>, status, quit");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };

        match console::parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(ConsoleCommand::Status)) => match control::get_snapshot(&state) {
                Ok(Some(snapshot)) => match serde_json::to_string(&snapshot) {
                    Ok(json) => println!("{json}"),
                    Err(e) => warn!(error = %e, "snapshot not serializable"),
                },
                Ok(None) => println!("no frames yet"),
                Err(e) => warn!(error = %e, "snapshot unavailable"),
            },
            Ok(Some(ConsoleCommand::Player(command))) => {
                if let Err(e) = control::send_command(&state, command) {
                    error!(error = %e, "command not delivered");
                    break;
                }
            }
            Err(e) => warn!(error = %e, input = %line, "ignoring console input"),
        }
    }

    match control::stop_simulation(&state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "shutdown failed");
            ExitCode::FAILURE
        }
    }
}
