use tokio::fs;

use super::Launcher;
use crate::error::{LauncherError, Result};

impl Launcher {
    /// Check each file in order; the first missing one fails the step.
    pub async fn check_files(&self, names: &[String]) -> Result<()> {
        self.console.line("Checking application files...");

        for name in names {
            let path = self.app_dir.join(name);
            if fs::try_exists(&path).await? {
                tracing::debug!("Found {}", path.display());
                continue;
            }

            self.report_error(&format!("ERROR: {name} not found!"));
            self.console.error(&format!(
                "Make sure all required files are in {}:",
                self.app_dir.display()
            ));
            for required in names {
                self.console.error(&format!("  - {required}"));
            }

            return Err(LauncherError::file_missing(name, names));
        }

        self.console.line("All required files found");
        Ok(())
    }
}
