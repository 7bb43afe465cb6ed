use std::path::{Path, PathBuf};
use tokio::fs;

use super::{user_config_dir, LauncherConfig, CONFIG_FILE_NAME};
use crate::error::{ErrorCode, LauncherError, Result};

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    AppDir(PathBuf),
    User(PathBuf),
    Defaults,
}

/// Resolves and reads the launcher configuration.
///
/// The first file found wins: an explicit path, then `launcher.toml` in the
/// application directory, then the per-user config directory. Missing keys
/// fall back to defaults, then `SVGPDF_LAUNCHER_RUNTIME` is applied.
pub struct ConfigLoader {
    app_dir: PathBuf,
    explicit: Option<PathBuf>,
    user_dir: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            app_dir: app_dir.to_path_buf(),
            explicit: None,
            user_dir: user_config_dir(),
        }
    }

    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn with_user_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_dir = dir;
        self
    }

    pub async fn resolve(&self) -> Result<ConfigSource> {
        if let Some(path) = &self.explicit {
            if !fs::try_exists(path).await? {
                return Err(LauncherError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    format!("config file {} does not exist", path.display()),
                ));
            }
            return Ok(ConfigSource::Explicit(path.clone()));
        }

        let local = self.app_dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&local).await? {
            return Ok(ConfigSource::AppDir(local));
        }

        if let Some(dir) = &self.user_dir {
            let user = dir.join(CONFIG_FILE_NAME);
            if fs::try_exists(&user).await? {
                return Ok(ConfigSource::User(user));
            }
        }

        Ok(ConfigSource::Defaults)
    }

    pub async fn load(&self) -> Result<(LauncherConfig, ConfigSource)> {
        let source = self.resolve().await?;

        let mut config = match &source {
            ConfigSource::Explicit(path) | ConfigSource::AppDir(path) | ConfigSource::User(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let content = fs::read_to_string(path).await?;
                LauncherConfig::from_toml(&content)
                    .map_err(|e| e.with_context(path.display()))?
            }
            ConfigSource::Defaults => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                LauncherConfig::default()
            }
        };

        config.merge_env_vars()?;
        config.validate()?;

        Ok((config, source))
    }
}
