//! Headless sandbox host
//!
//! Runs the falling-shapes simulation without a window, logging frame rate and
//! visibility counts the way an on-screen overlay would show them.
//!
//! ```text
//! sandbox_headless [--config <FILE>] [--frames <N>] [--realtime]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sandbox_engine::foundation::logging;
use sandbox_engine::prelude::*;
use thiserror::Error;

/// Delta fed to the simulation when not pacing against the wall clock
const FIXED_DELTA: f32 = 1.0 / 60.0;

/// Frames between two statistics lines
const REPORT_INTERVAL: u64 = 60;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}

/// Runs the falling-shapes sandbox without a window
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "sandbox_headless", version)]
struct Cli {
    /// Configuration file (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frames to run before shutting down
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Pace frames against the wall clock instead of a fixed delta
    #[arg(long)]
    realtime: bool,
}

fn run(options: &Cli) -> Result<(), AppError> {
    let config = match &options.config {
        Some(path) => SandboxConfig::load_from_file(path)?,
        None => SandboxConfig::default(),
    };
    logging::init(&config.log_level);
    log::info!("Starting headless sandbox for {} frames", options.frames);

    let mut sandbox = Sandbox::init(config)?;
    let mut clock = FrameClock::new();

    for frame in 0..options.frames {
        let delta = if options.realtime {
            std::thread::sleep(Duration::from_secs_f32(FIXED_DELTA));
            clock.tick()
        } else {
            clock.tick();
            FIXED_DELTA
        };

        let output = sandbox.frame(delta)?;
        if frame % REPORT_INTERVAL == 0 {
            log::info!(
                "FPS: {:.0} Visible: {} / {}",
                clock.current_fps(),
                output.stats.visible_count,
                output.stats.instance_count
            );
        }
    }

    let report = sandbox.shutdown();
    log::info!(
        "Done: {} frames, average {:.0} FPS, {} instances released",
        report.frames,
        clock.average_fps(),
        report.instances
    );
    Ok(())
}

fn main() {
    let options = Cli::parse();
    if let Err(e) = run(&options) {
        eprintln!("sandbox_headless: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults_without_arguments() {
        let cli = Cli::try_parse_from(["sandbox_headless"]).unwrap();
        assert_eq!(
            cli,
            Cli {
                config: None,
                frames: 600,
                realtime: false,
            }
        );
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "sandbox_headless",
            "--config",
            "sandbox.toml",
            "--frames",
            "42",
            "--realtime",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("sandbox.toml")));
        assert_eq!(cli.frames, 42);
        assert!(cli.realtime);
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        let bad_count = Cli::try_parse_from(["sandbox_headless", "--frames", "many"]).unwrap_err();
        assert_eq!(bad_count.kind(), ErrorKind::ValueValidation);

        assert!(Cli::try_parse_from(["sandbox_headless", "--config"]).is_err());

        let unknown = Cli::try_parse_from(["sandbox_headless", "--fast"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    }
}
