use super::Launcher;
use crate::error::{LauncherError, Result};

impl Launcher {
    /// Confirm the runtime answers its version query.
    ///
    /// A non-zero exit and a program that cannot be spawned are treated the
    /// same way: the runtime is missing.
    pub async fn check_runtime(&self) -> Result<()> {
        let runtime = &self.config.runtime;
        self.console
            .line(&format!("Checking {} installation...", runtime.name));

        let failure = match self.runtime.version().await {
            Ok(output) if output.status.success() => {
                let banner = output.first_line().unwrap_or(runtime.name.as_str());
                tracing::debug!("Runtime reported: {}", banner);
                self.console.line(&format!("{banner} found"));
                return Ok(());
            }
            Ok(output) => {
                tracing::debug!(
                    "Version query exited with {:?}: {}",
                    output.status,
                    output.stderr.trim()
                );
                None
            }
            Err(e) => {
                tracing::debug!("Version query could not run: {}", e);
                Some(e)
            }
        };

        self.report_error(&format!(
            "ERROR: {} is not installed or not in PATH",
            runtime.name
        ));
        self.console.error(&format!(
            "Please install {} from {}",
            runtime.name, runtime.download_url
        ));
        self.console.error(&format!(
            "Make sure to select \"Add {} to PATH\" during installation.",
            runtime.name
        ));

        let err = LauncherError::runtime_missing(&runtime.name, &runtime.download_url);
        Err(match failure {
            Some(source) => err.with_source(source),
            None => err,
        })
    }
}
