//! CLI argument structures
//!
//! With no arguments the launcher runs every check and then the application.

use clap::Parser;
use std::path::PathBuf;

/// Check the environment, then start the SVG to PDF Merger
#[derive(Parser, Debug)]
#[command(name = "svgpdf-launcher")]
#[command(about = "Preflight launcher for the SVG to PDF Merger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a launcher.toml configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the application files (defaults to current directory)
    #[arg(short = 'd', long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Do not wait for a key press before exiting
    #[arg(long)]
    pub no_pause: bool,

    /// Run the checks only, without starting the application
    #[arg(long)]
    pub check: bool,

    /// Arguments forwarded to the application entry point
    #[arg(last = true, value_name = "ARGS")]
    pub app_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_a_full_launch() {
        let cli = Cli::try_parse_from(["svgpdf-launcher"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.dir.is_none());
        assert!(!cli.no_pause);
        assert!(!cli.check);
        assert!(cli.app_args.is_empty());
    }

    #[test]
    fn test_passthrough_args_after_separator() {
        let cli = Cli::try_parse_from([
            "svgpdf-launcher",
            "-vv",
            "--no-pause",
            "--",
            "--debug",
            "drawing.svg",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_pause);
        assert_eq!(cli.app_args, vec!["--debug", "drawing.svg"]);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["svgpdf-launcher", "--debug"]).is_err());
    }
}
