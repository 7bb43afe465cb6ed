//! Preflight launcher
//!
//! Runs a fixed, ordered list of checks before starting the application:
//!
//! 1. the runtime answers its version query
//! 2. each configured package imports, installing it once if it does not
//! 3. every required application file exists
//! 4. the entry point runs and exits cleanly
//!
//! The first failing step ends the run. Whatever the outcome, the console is
//! paused once at the end so the operator can read the messages.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LauncherConfig;
use crate::console::Console;
use crate::error::Result;
use crate::subprocess::{RuntimeRunner, SubprocessManager};

mod application;
mod dependency;
mod files;
mod runtime;

#[cfg(test)]
mod tests;

const RULE: &str = "========================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightStep {
    Runtime,
    Dependency(String),
    Files,
    Application,
}

impl fmt::Display for PreflightStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightStep::Runtime => write!(f, "runtime"),
            PreflightStep::Dependency(name) => write!(f, "dependency {name}"),
            PreflightStep::Files => write!(f, "required files"),
            PreflightStep::Application => write!(f, "application"),
        }
    }
}

/// Ordered steps for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    steps: Vec<PreflightStep>,
}

impl LaunchPlan {
    /// Runtime, then each package in order, then files, then optionally the app
    pub fn from_config(config: &LauncherConfig, include_application: bool) -> Self {
        let mut steps = vec![PreflightStep::Runtime];
        steps.extend(
            config
                .dependencies
                .packages
                .iter()
                .cloned()
                .map(PreflightStep::Dependency),
        );
        steps.push(PreflightStep::Files);
        if include_application {
            steps.push(PreflightStep::Application);
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[PreflightStep] {
        &self.steps
    }

    pub fn runs_application(&self) -> bool {
        self.steps.contains(&PreflightStep::Application)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// All checks passed; the application was not started
    Ready,
    /// The application ran and exited with status 0
    Completed,
}

#[derive(Debug)]
pub struct LaunchReport {
    pub completed: Vec<PreflightStep>,
    pub result: Result<LaunchOutcome>,
}

impl LaunchReport {
    pub fn exit_code(&self) -> i32 {
        match &self.result {
            Ok(_) => 0,
            Err(e) => e.exit_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Launcher {
    config: LauncherConfig,
    app_dir: PathBuf,
    passthrough_args: Vec<String>,
    runtime: Arc<dyn RuntimeRunner>,
    console: Arc<dyn Console>,
}

impl Launcher {
    pub fn new(
        config: LauncherConfig,
        app_dir: &Path,
        subprocess: &SubprocessManager,
        console: Arc<dyn Console>,
    ) -> Self {
        let runtime = Arc::new(subprocess.runtime(&config));
        Self {
            config,
            app_dir: app_dir.to_path_buf(),
            passthrough_args: Vec::new(),
            runtime,
            console,
        }
    }

    /// Arguments appended to the entry point invocation
    pub fn with_passthrough_args(mut self, args: Vec<String>) -> Self {
        self.passthrough_args = args;
        self
    }

    /// Run every check, then the application
    pub async fn launch(&self) -> LaunchReport {
        self.run_plan(&LaunchPlan::from_config(&self.config, true))
            .await
    }

    /// Run every check without starting the application
    pub async fn preflight(&self) -> LaunchReport {
        self.run_plan(&LaunchPlan::from_config(&self.config, false))
            .await
    }

    pub async fn run_plan(&self, plan: &LaunchPlan) -> LaunchReport {
        self.print_banner();

        let mut completed = Vec::with_capacity(plan.steps().len());
        let mut result = Ok(if plan.runs_application() {
            LaunchOutcome::Completed
        } else {
            LaunchOutcome::Ready
        });

        for step in plan.steps() {
            tracing::info!("Running preflight step: {}", step);
            match self.execute(step).await {
                Ok(()) => completed.push(step.clone()),
                Err(e) => {
                    tracing::info!("Step '{}' failed: {}", step, e.developer_message());
                    result = Err(e);
                    break;
                }
            }
        }

        self.finish(&result);
        LaunchReport { completed, result }
    }

    pub async fn execute(&self, step: &PreflightStep) -> Result<()> {
        match step {
            PreflightStep::Runtime => self.check_runtime().await,
            PreflightStep::Dependency(name) => self.check_dependency(name).await,
            PreflightStep::Files => {
                self.check_files(&self.config.application.required_files)
                    .await
            }
            PreflightStep::Application => self.run_application().await,
        }
    }

    fn print_banner(&self) {
        self.console.line(RULE);
        self.console
            .line(&format!("  {}", self.config.application.title));
        self.console.line(RULE);
        self.console.line("");
    }

    fn finish(&self, result: &Result<LaunchOutcome>) {
        match result {
            Ok(LaunchOutcome::Ready) => {
                self.console.line("");
                self.console.line(&format!(
                    "All checks passed. {} is ready to run.",
                    self.config.application.title
                ));
            }
            Ok(LaunchOutcome::Completed) => {}
            // Preflight failures print their own guidance as they happen.
            Err(e) if e.is_preflight_failure() => {}
            Err(e) => {
                self.console.error("");
                self.console.error(&format!("ERROR: {e}"));
            }
        }

        self.console.line("");
        self.console.pause();
    }

    fn report_error(&self, message: &str) {
        self.console.line("");
        self.console.error(message);
    }
}
