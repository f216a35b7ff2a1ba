//! # esline Main Entry Point
//!
//! Resolves configuration, installs logging and runs the command loop over
//! the process's standard streams.

use anyhow::{Context, Result};
use esline::cmd_args::CommandLineArgs;
use esline::config::{self, Profile, ReplConfig};
use esline::{HttpService, ReplController};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `debug` or `esline=trace`
const LOG_LEVEL_ENV_VAR: &str = "ESLINE_LOG_LEVEL";

fn init_tracing(verbose: bool) {
    let filter = std::env::var(LOG_LEVEL_ENV_VAR)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "off" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());

    let profile_path = config::get_profile_path();
    let profile = Profile::load(&profile_path, args.profile())
        .with_context(|| format!("Failed to load profile '{}'", args.profile()))?;
    let config = ReplConfig::resolve(&args, profile.as_ref());
    tracing::info!("Using {}:{} in {:?} mode", config.host, config.port, config.body_mode);

    let transport = HttpService::new(config.timeout)?;

    let stdin = std::io::stdin();
    let mut controller = ReplController::with_io_streams(
        stdin.lock(),
        std::io::stdout(),
        std::io::stderr(),
        config,
        transport,
    );

    controller.run().context("Command loop stopped")?;
    Ok(())
}
