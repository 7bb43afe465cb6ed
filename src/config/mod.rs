//! Launcher configuration.
//!
//! Every field has a built-in default matching the stock application layout,
//! so a `launcher.toml` only needs the keys it wants to change.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ErrorCode, LauncherError, Result};
use crate::subprocess::runtime::NAME_PLACEHOLDER;

pub mod loader;

pub use loader::ConfigLoader;

/// File name looked up in the application directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Replaces the runtime command line, e.g. `SVGPDF_LAUNCHER_RUNTIME="py -3"`
pub const RUNTIME_ENV_VAR: &str = "SVGPDF_LAUNCHER_RUNTIME";

/// Required application files, in the order they are checked
pub const DEFAULT_REQUIRED_FILES: [&str; 5] = [
    "main.py",
    "gui.py",
    "pdf_merger.py",
    "svg_processor.py",
    "utils.py",
];

/// Per-user configuration directory
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "svgpdf", "svgpdf-launcher").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    pub runtime: RuntimeConfig,
    pub dependencies: DependencyConfig,
    pub application: ApplicationConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub name: String,
    pub program: String,
    /// Prepended to every runtime invocation
    pub args: Vec<String>,
    pub version_args: Vec<String>,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DependencyConfig {
    pub packages: Vec<String>,
    pub probe_args: Vec<String>,
    pub install_args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Shown in the launcher banner and status messages
    pub title: String,
    pub entry_point: String,
    pub required_files: Vec<String>,
    /// Forwarded to the entry point after any command-line passthrough args
    pub args: Vec<String>,
    /// External program the application shells out to, named in failure hints
    pub external_tool: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub pause: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "Python".to_string(),
            program: "python".to_string(),
            args: Vec::new(),
            version_args: vec!["--version".to_string()],
            download_url: "https://www.python.org/downloads/".to_string(),
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            packages: vec!["pypdf".to_string()],
            probe_args: vec!["-c".to_string(), "import {name}".to_string()],
            install_args: ["-m", "pip", "install", "{name}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            title: "SVG to PDF Merger".to_string(),
            entry_point: "main.py".to_string(),
            required_files: DEFAULT_REQUIRED_FILES.iter().map(|s| s.to_string()).collect(),
            args: Vec::new(),
            external_tool: "Inkscape".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { pause: true }
    }
}

impl LauncherConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            LauncherError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, e.to_string())
        })
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(RUNTIME_ENV_VAR) {
            tracing::debug!("Runtime overridden by {}: {}", RUNTIME_ENV_VAR, value);
            self.apply_runtime_override(&value)?;
        }
        Ok(())
    }

    /// Replace runtime program and prefix args from a shell-style command line
    pub fn apply_runtime_override(&mut self, command_line: &str) -> Result<()> {
        let mut words = shell_words::split(command_line)
            .map_err(|e| {
                LauncherError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{RUNTIME_ENV_VAR} is not a valid command line: {e}"),
                )
            })?
            .into_iter();

        let program = words.next().ok_or_else(|| {
            LauncherError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("{RUNTIME_ENV_VAR} is empty"),
            )
        })?;

        self.runtime.program = program;
        self.runtime.args = words.collect();
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.runtime.program.trim().is_empty() {
            return Err(invalid("runtime.program must not be empty"));
        }

        if self.application.entry_point.trim().is_empty() {
            return Err(invalid("application.entry_point must not be empty"));
        }

        if !self
            .application
            .required_files
            .iter()
            .any(|f| f == &self.application.entry_point)
        {
            return Err(invalid(format!(
                "application.entry_point '{}' must be listed in application.required_files",
                self.application.entry_point
            )));
        }

        if self.dependencies.packages.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("dependencies.packages must not contain empty names"));
        }

        if self.dependencies.packages.is_empty() {
            return Ok(());
        }

        for (field, args) in [
            ("dependencies.probe_args", &self.dependencies.probe_args),
            ("dependencies.install_args", &self.dependencies.install_args),
        ] {
            if !args.iter().any(|a| a.contains(NAME_PLACEHOLDER)) {
                return Err(invalid(format!(
                    "{field} must reference the package with {NAME_PLACEHOLDER}"
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> LauncherError {
    LauncherError::config_with_code(ErrorCode::CONFIG_VALIDATION_FAILED, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_layout() {
        let config = LauncherConfig::default();
        assert_eq!(config.runtime.program, "python");
        assert_eq!(config.runtime.version_args, vec!["--version"]);
        assert_eq!(config.dependencies.packages, vec!["pypdf"]);
        assert_eq!(
            config.application.required_files,
            vec!["main.py", "gui.py", "pdf_merger.py", "svg_processor.py", "utils.py"]
        );
        assert!(config.console.pause);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LauncherConfig::from_toml(
            r#"
[runtime]
program = "python3"

[console]
pause = false
"#,
        )
        .unwrap();

        assert_eq!(config.runtime.program, "python3");
        assert_eq!(config.runtime.name, "Python");
        assert!(!config.console.pause);
        assert_eq!(config.application, ApplicationConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = LauncherConfig::from_toml("[runtime\nprogram = ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_runtime_override_splits_words() {
        let mut config = LauncherConfig::default();
        config.apply_runtime_override("py -3").unwrap();
        assert_eq!(config.runtime.program, "py");
        assert_eq!(config.runtime.args, vec!["-3"]);

        config
            .apply_runtime_override(r#""C:\Program Files\Python312\python.exe""#)
            .unwrap();
        assert_eq!(config.runtime.program, r"C:\Program Files\Python312\python.exe");
        assert!(config.runtime.args.is_empty());
    }

    #[test]
    fn test_runtime_override_rejects_empty() {
        let mut config = LauncherConfig::default();
        assert!(config.apply_runtime_override("   ").is_err());
        assert!(config.apply_runtime_override("\"unterminated").is_err());
    }

    #[test]
    fn test_validate_entry_point_must_be_required() {
        let mut config = LauncherConfig::default();
        config.application.entry_point = "app.py".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("app.py"));
    }

    #[test]
    fn test_validate_requires_name_placeholder() {
        let mut config = LauncherConfig::default();
        config.dependencies.install_args = vec!["-m".into(), "pip".into(), "install".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("install_args"));
    }

    #[test]
    fn test_validate_skips_placeholder_without_packages() {
        let config = LauncherConfig::from_toml(
            r#"
[dependencies]
packages = []
probe_args = []
install_args = []
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
    }
}
