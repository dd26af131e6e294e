//! Structured config sources the monitoring settings are decoded from.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};

use crate::ConfigError;

/// Environment prefix used when none is given.
pub const DEFAULT_ENV_PREFIX: &str = "AGENTMON_";

/// Trait for loading monitoring configuration from different sources.
pub trait ConfigProvider {
    /// Loads the configuration and returns a Figment instance.
    fn load(&self) -> Result<Figment, ConfigError>;
}

impl ConfigProvider for Figment {
    fn load(&self) -> Result<Figment, ConfigError> {
        Ok(self.clone())
    }
}

/// A YAML file overlaid with prefixed environment variables.
///
/// Nested keys are addressed with `__`, e.g. `AGENTMON_HTTP__ENABLED=false`.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    env_prefix: String,
}

impl FileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            env_prefix: DEFAULT_ENV_PREFIX.into(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }
}

impl ConfigProvider for FileProvider {
    fn load(&self) -> Result<Figment, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::FileNotFound(self.path.clone()));
        }

        Ok(Figment::new()
            .merge(Yaml::file(&self.path))
            .merge(Env::prefixed(&self.env_prefix).split("__")))
    }
}

/// Prefixed environment variables only.
#[derive(Debug, Clone)]
pub struct EnvProvider {
    prefix: String,
}

impl EnvProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}

impl ConfigProvider for EnvProvider {
    fn load(&self) -> Result<Figment, ConfigError> {
        Ok(Figment::from(Env::prefixed(&self.prefix).split("__")))
    }
}
