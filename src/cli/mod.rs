//! Command-line entry points
//!
//! - Argument parsing structures
//! - Logging setup
//! - The launch routine the binary calls

pub mod args;

pub use args::Cli;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::console::{Console, TerminalConsole};
use crate::error::LauncherError;
use crate::preflight::Launcher;
use crate::subprocess::SubprocessManager;

/// Map the `-v` count to a tracing filter directive
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(get_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// Run the launcher for parsed arguments and return the process exit code
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    let app_dir = match resolve_app_dir(cli.dir.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            let err = LauncherError::from(e)
                .with_context("could not determine the application directory");
            return Ok(report_startup_error(&TerminalConsole::new(!cli.no_pause), &err));
        }
    };
    tracing::debug!("Application directory: {}", app_dir.display());

    let loaded = ConfigLoader::new(&app_dir)
        .with_explicit(cli.config.clone())
        .load()
        .await;

    let (mut config, source) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            // Nothing is known about the pause preference yet beyond the flag.
            return Ok(report_startup_error(&TerminalConsole::new(!cli.no_pause), &e));
        }
    };
    tracing::debug!("Configuration source: {:?}", source);

    if cli.no_pause {
        config.console.pause = false;
    }

    let console: Arc<dyn Console> = Arc::new(TerminalConsole::new(config.console.pause));
    let launcher = Launcher::new(config, &app_dir, &SubprocessManager::production(), console)
        .with_passthrough_args(cli.app_args);

    let report = if cli.check {
        launcher.preflight().await
    } else {
        launcher.launch().await
    };

    tracing::info!(
        "Launch finished after {} step(s) with exit code {}",
        report.completed.len(),
        report.exit_code()
    );
    Ok(report.exit_code())
}

/// Print a failure that happens before any check runs, pause, and return its exit code
pub fn report_startup_error(console: &dyn Console, err: &LauncherError) -> i32 {
    console.error(&format!("ERROR: {err}"));
    console.pause();
    err.exit_code()
}

/// The application directory is the launcher's working directory unless given
pub fn resolve_app_dir(dir: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir(),
    }
}
