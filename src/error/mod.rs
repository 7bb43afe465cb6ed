use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::subprocess::ProcessError;

/// Every way a launch can end other than success.
///
/// The four preflight classes all exit with status 1. Configuration problems
/// are detected before any check runs and exit with status 2.
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("[E{code:04}] {runtime} is not installed or not in PATH")]
    RuntimeMissing {
        code: u16,
        runtime: String,
        download_url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Failed to install required package '{package}'")]
    DependencyMissing {
        code: u16,
        package: String,
        install_hint: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Required file '{file}' not found")]
    FileMissing {
        code: u16,
        file: String,
        required: Vec<String>,
    },

    #[error("[E{code:04}] Application exited with {}", describe_exit(.exit_code))]
    ApplicationFailed { code: u16, exit_code: Option<i32> },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Execution error: {message}")]
    Execution {
        code: u16,
        message: String,
        command: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by a signal)".to_string(),
    }
}

impl LauncherError {
    pub fn runtime_missing(runtime: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self::RuntimeMissing {
            code: ErrorCode::PREFLIGHT_RUNTIME_MISSING,
            runtime: runtime.into(),
            download_url: download_url.into(),
            source: None,
        }
    }

    pub fn dependency_missing(package: impl Into<String>, install_hint: impl Into<String>) -> Self {
        Self::DependencyMissing {
            code: ErrorCode::PREFLIGHT_DEPENDENCY_MISSING,
            package: package.into(),
            install_hint: install_hint.into(),
            source: None,
        }
    }

    pub fn file_missing(file: impl Into<String>, required: &[String]) -> Self {
        Self::FileMissing {
            code: ErrorCode::PREFLIGHT_FILE_MISSING,
            file: file.into(),
            required: required.to_vec(),
        }
    }

    pub fn application_failed(exit_code: Option<i32>) -> Self {
        Self::ApplicationFailed {
            code: ErrorCode::EXEC_APPLICATION_FAILED,
            exit_code,
        }
    }

    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn execution_with_code(
        code: u16,
        message: impl Into<String>,
        command: Option<String>,
    ) -> Self {
        Self::Execution {
            code,
            message: message.into(),
            command,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::RuntimeMissing { source: src, .. }
            | Self::DependencyMissing { source: src, .. }
            | Self::Config { source: src, .. }
            | Self::Execution { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::FileMissing { .. } | Self::ApplicationFailed { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Execution { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
            _ => {}
        }
        self
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            _ => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::RuntimeMissing { code, .. }
            | Self::DependencyMissing { code, .. }
            | Self::FileMissing { code, .. }
            | Self::ApplicationFailed { code, .. }
            | Self::Config { code, .. }
            | Self::Execution { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// True for the four classes a preflight run reports to the operator
    pub fn is_preflight_failure(&self) -> bool {
        matches!(
            self,
            Self::RuntimeMissing { .. }
                | Self::DependencyMissing { .. }
                | Self::FileMissing { .. }
                | Self::ApplicationFailed { .. }
        )
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(&format!("\n  caused by: {err}"));
            source = err.source();
        }
        message
    }
}

impl From<ProcessError> for LauncherError {
    fn from(err: ProcessError) -> Self {
        let (code, command) = match &err {
            ProcessError::CommandNotFound(cmd) => {
                (ErrorCode::EXEC_COMMAND_NOT_FOUND, Some(cmd.clone()))
            }
            ProcessError::Timeout(_) => (ErrorCode::EXEC_TIMEOUT, None),
            ProcessError::Io(_) => (ErrorCode::EXEC_SPAWN_FAILED, None),
            ProcessError::MockExpectationNotMet(_) => (ErrorCode::EXEC_GENERIC, None),
        };

        LauncherError::execution_with_code(code, err.to_string(), command).with_source(err)
    }
}

impl From<std::io::Error> for LauncherError {
    fn from(err: std::io::Error) -> Self {
        LauncherError::Other {
            code: ErrorCode::OTHER_IO,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
