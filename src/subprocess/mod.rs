pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;
pub mod runtime;


pub use builder::ProcessCommandBuilder;
pub use error::ProcessError;
pub use mock::{MockCommandConfig, MockProcessRunner};
pub use runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use runtime::{RuntimeRunner, RuntimeRunnerImpl};

use std::sync::Arc;

use crate::config::LauncherConfig;

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(runner::TokioProcessRunner))
    }

    pub fn mock() -> (Self, MockProcessRunner) {
        let mock = MockProcessRunner::new();
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        (Self::new(runner), mock)
    }

    pub fn runtime(&self, config: &LauncherConfig) -> RuntimeRunnerImpl {
        RuntimeRunnerImpl::new(
            Arc::clone(&self.runner),
            config.runtime.clone(),
            config.dependencies.clone(),
        )
    }
}
