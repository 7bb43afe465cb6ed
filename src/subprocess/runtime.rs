use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::builder::ProcessCommandBuilder;
use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessOutput, ProcessRunner};
use crate::config::{DependencyConfig, RuntimeConfig};

/// Placeholder substituted with the package name in probe/install arguments
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Typed operations against the language runtime that hosts the application
#[async_trait]
pub trait RuntimeRunner: Send + Sync {
    /// Human readable runtime name, e.g. "Python"
    fn name(&self) -> &str;
    async fn version(&self) -> Result<ProcessOutput, ProcessError>;
    async fn probe_module(&self, name: &str) -> Result<ProcessOutput, ProcessError>;
    /// Installer output goes straight to the console so progress is visible.
    async fn install_package(&self, name: &str) -> Result<ProcessOutput, ProcessError>;
    /// Run `script` with the console attached. No timeout is applied.
    async fn run_script(
        &self,
        script: &str,
        args: &[String],
        dir: &Path,
    ) -> Result<ExitStatus, ProcessError>;
    /// The install command as an operator would type it
    fn install_hint(&self, name: &str) -> String;
}

pub struct RuntimeRunnerImpl {
    runner: Arc<dyn ProcessRunner>,
    runtime: RuntimeConfig,
    dependencies: DependencyConfig,
}

impl RuntimeRunnerImpl {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        runtime: RuntimeConfig,
        dependencies: DependencyConfig,
    ) -> Self {
        Self {
            runner,
            runtime,
            dependencies,
        }
    }

    fn command(&self) -> ProcessCommandBuilder {
        ProcessCommandBuilder::new(&self.runtime.program).args(&self.runtime.args)
    }
}

/// Expand `{name}` in each template argument
pub fn substitute_name(templates: &[String], name: &str) -> Vec<String> {
    templates
        .iter()
        .map(|arg| arg.replace(NAME_PLACEHOLDER, name))
        .collect()
}

#[async_trait]
impl RuntimeRunner for RuntimeRunnerImpl {
    fn name(&self) -> &str {
        &self.runtime.name
    }

    async fn version(&self) -> Result<ProcessOutput, ProcessError> {
        self.runner
            .run(self.command().args(&self.runtime.version_args).build())
            .await
    }

    async fn probe_module(&self, name: &str) -> Result<ProcessOutput, ProcessError> {
        let args = substitute_name(&self.dependencies.probe_args, name);
        self.runner.run(self.command().args(args).build()).await
    }

    async fn install_package(&self, name: &str) -> Result<ProcessOutput, ProcessError> {
        let args = substitute_name(&self.dependencies.install_args, name);
        self.runner
            .run(self.command().args(args).inherit_stdio().build())
            .await
    }

    async fn run_script(
        &self,
        script: &str,
        args: &[String],
        dir: &Path,
    ) -> Result<ExitStatus, ProcessError> {
        let command = self
            .command()
            .arg(script)
            .args(args)
            .current_dir(dir)
            .inherit_stdio()
            .build();

        Ok(self.runner.run(command).await?.status)
    }

    fn install_hint(&self, name: &str) -> String {
        let mut words = vec![self.runtime.program.clone()];
        words.extend(self.runtime.args.iter().cloned());
        words.extend(substitute_name(&self.dependencies.install_args, name));
        shell_words::join(words)
    }
}
