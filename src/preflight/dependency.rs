use super::Launcher;
use crate::error::{LauncherError, Result};

impl Launcher {
    /// Make sure `name` imports, installing it once if it does not.
    pub async fn check_dependency(&self, name: &str) -> Result<()> {
        self.console.line(&format!("Checking for {name}..."));

        match self.runtime.probe_module(name).await {
            Ok(output) if output.status.success() => {
                self.console.line(&format!("{name} is already installed"));
                return Ok(());
            }
            Ok(output) => {
                tracing::debug!("Import probe for {} failed: {}", name, output.stderr.trim());
            }
            Err(e) => {
                tracing::warn!("Import probe for {} could not run: {}", name, e);
            }
        }

        self.console
            .line(&format!("{name} not found. Installing {name}..."));

        let hint = self.runtime.install_hint(name);
        let failure = match self.runtime.install_package(name).await {
            Ok(output) if output.status.success() => {
                self.console.line(&format!("{name} installed successfully"));
                return Ok(());
            }
            Ok(output) => {
                tracing::debug!("Installer exited with {:?}", output.status);
                None
            }
            Err(e) => {
                tracing::debug!("Installer could not run: {}", e);
                Some(e)
            }
        };

        self.report_error(&format!("ERROR: Failed to install {name}"));
        self.console
            .error(&format!("Please install it manually by running: {hint}"));

        let err = LauncherError::dependency_missing(name, hint);
        Err(match failure {
            Some(source) => err.with_source(source),
            None => err,
        })
    }
}
