//! # svgpdf-launcher
//!
//! Preflight launcher for the SVG to PDF Merger desktop application.
//!
//! ## Usage
//!
//! ```bash
//! svgpdf-launcher [--check] [--no-pause] [-d DIR] [-c CONFIG] [-- APP_ARGS...]
//! ```
//!
//! ## Modules
//!
//! - `cli` - Argument parsing, logging setup and the launch entry point
//! - `config` - `launcher.toml` loading and validation
//! - `console` - Operator-facing output and the end-of-run pause
//! - `error` - Launcher error type and error code registry
//! - `preflight` - The ordered runtime, dependency, file and application steps
//! - `subprocess` - Process execution abstraction with a mock for testing
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod preflight;
pub mod subprocess;

pub use error::{LauncherError, Result};
pub use preflight::{LaunchOutcome, LaunchReport, Launcher};
