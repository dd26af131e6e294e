//! HTTP endpoint the agent publishes for other processes to scrape its metrics.
//!
//! The `enabled` flag is decoded as a tri-state: absent, explicitly `true`, or
//! explicitly `false`. Only a boolean plus the provenance flag
//! [`HttpEndpointConfig::enabled_is_set`] leave this module, so callers can
//! tell an operator's explicit `false` apart from an inherited default.

use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ConfigError;

/// Host used when the input host is missing, empty or whitespace only.
pub const DEFAULT_HOST: &str = "localhost";

pub(crate) const DEFAULT_PORT: u16 = 6791;

const PORT_RANGE_MESSAGE: &str = "port must be within 0..=65535";

/// Metrics HTTP endpoint settings. Processes are only exposed when enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpEndpointConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<BufferConfig>,

    /// True when `enabled` came from the decoded input rather than from the
    /// merge base. Never serialized.
    #[serde(skip)]
    pub enabled_is_set: bool,
}

impl Default for HttpEndpointConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            buffer: None,
            enabled_is_set: false,
        }
    }
}

/// Metrics buffer endpoint toggle.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// The `http` record as it appears in the input. Every field is optional so
/// that absence can be told apart from a zero value.
#[derive(Default, Debug, Deserialize, Validate)]
pub(crate) struct RawHttpConfig {
    enabled: Option<bool>,
    host: Option<String>,
    #[validate(range(min = 0, max = 65535, message = "port must be within 0..=65535"))]
    port: Option<i64>,
    buffer: Option<BufferConfig>,
}

impl RawHttpConfig {
    /// Extracts the record stored under `key`, or an empty record when the
    /// section is missing or null.
    pub(crate) fn from_section(source: &Figment, key: &str) -> Result<Self, ConfigError> {
        if source.contains(key) {
            let raw: Option<Self> = source.extract_inner(key)?;
            Ok(raw.unwrap_or_default())
        } else {
            Ok(Self::default())
        }
    }
}

fn port_range_error(port: i64) -> ConfigError {
    let mut error = ValidationError::new("range");
    error.message = Some(PORT_RANGE_MESSAGE.into());
    error.add_param("value".into(), &port);

    let mut errors = ValidationErrors::new();
    errors.add("port", error);
    ConfigError::Validation(errors)
}

impl HttpEndpointConfig {
    /// Decodes an `http` record from `source` using `self` as the merge base.
    ///
    /// On error `self` is left untouched.
    pub fn unpack(&mut self, source: &Figment) -> Result<(), ConfigError> {
        let raw: RawHttpConfig = source.extract()?;
        *self = self.merge(raw)?;
        Ok(())
    }

    pub(crate) fn merge(&self, raw: RawHttpConfig) -> Result<Self, ConfigError> {
        raw.validate()?;

        let mut host = raw.host.unwrap_or_else(|| self.host.clone());
        if host.trim().is_empty() {
            host = DEFAULT_HOST.into();
        }

        let port = match raw.port {
            Some(port) => u16::try_from(port).map_err(|_| port_range_error(port))?,
            None => self.port,
        };

        let (enabled, enabled_is_set) = match raw.enabled {
            None => (self.enabled, false),
            Some(enabled) => (enabled, true),
        };

        Ok(Self {
            enabled,
            host,
            port,
            buffer: raw.buffer.or_else(|| self.buffer.clone()),
            enabled_is_set,
        })
    }
}
