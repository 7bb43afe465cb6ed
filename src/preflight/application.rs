use super::Launcher;
use crate::error::{LauncherError, Result};

impl Launcher {
    /// Start the entry point with the console attached and wait for it.
    ///
    /// No timeout: the application is a GUI the operator closes when done.
    pub async fn run_application(&self) -> Result<()> {
        let app = &self.config.application;
        let mut args = self.passthrough_args.clone();
        args.extend(app.args.iter().cloned());

        self.console.line("");
        self.console.line(&format!("Starting {}...", app.title));
        self.console.line("");

        let status = self
            .runtime
            .run_script(&app.entry_point, &args, &self.app_dir)
            .await?;

        if status.success() {
            tracing::info!("{} exited cleanly", app.entry_point);
            self.console.line("");
            self.console.line(&format!("{} closed.", app.title));
            return Ok(());
        }

        let exit_code = status.code();
        let described = match exit_code {
            Some(code) => format!("code {code}"),
            None => format!("{status:?}"),
        };

        self.report_error(&format!(
            "ERROR: {} exited with an error ({described}).",
            app.title
        ));
        self.console.error("Possible causes:");
        self.console.error(&format!(
            "  1. A required package is missing (try: {})",
            self.dependency_hint()
        ));
        self.console
            .error("  2. One or more application files are missing or corrupted");
        self.console.error(&format!(
            "  3. {} is not installed or not in the expected location",
            app.external_tool
        ));

        Err(LauncherError::application_failed(exit_code))
    }

    fn dependency_hint(&self) -> String {
        let packages = &self.config.dependencies.packages;
        if packages.is_empty() {
            return "reinstalling the application's packages".to_string();
        }
        packages
            .iter()
            .map(|name| self.runtime.install_hint(name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
