//! # Agent Monitoring Configuration
//!
//! Layered monitoring settings for the agent: which telemetry is collected,
//! the metrics HTTP endpoint, APM export and diagnostics upload behavior.
//!
//! ## Features
//! - **Default table**: [`default_config`] spells out every non-zero default
//! - **Layered decoding**: defaults, then a YAML file, then `AGENTMON_*` env vars
//! - **Provenance**: `http.enabled` records whether it was set explicitly
//! - **Fail-atomic reloads**: a failed decode never replaces the current value

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{providers::Serialized, value::Value, Figment};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

mod apm;
mod diagnostics;
mod duration;
mod error;
mod holder;
mod http;
mod provider;

pub use apm::ApmConfig;
pub use apm::ApmTls;
pub use diagnostics::DiagnosticsConfig;
pub use diagnostics::LimitConfig;
pub use diagnostics::UploaderConfig;
pub use error::ConfigError;
pub use holder::SettingsHolder;
pub use http::BufferConfig;
pub use http::HttpEndpointConfig;
pub use http::DEFAULT_HOST;
pub use provider::ConfigProvider;
pub use provider::EnvProvider;
pub use provider::FileProvider;
pub use provider::DEFAULT_ENV_PREFIX;

use http::RawHttpConfig;

/// Supervise monitored components as plain processes.
pub const PROCESS_RUNTIME_MANAGER: &str = "process";
/// Supervise monitored components through the OpenTelemetry collector.
pub const OTEL_RUNTIME_MANAGER: &str = "otel";
pub const DEFAULT_RUNTIME_MANAGER: &str = PROCESS_RUNTIME_MANAGER;

const DEFAULT_NAMESPACE: &str = "default";

/// Top-level monitoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,

    #[serde(rename = "logs")]
    pub monitor_logs: bool,

    #[serde(rename = "metrics")]
    pub monitor_metrics: bool,

    pub metrics_period: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,

    /// Not read from input; carried over from the merge base.
    #[serde(skip)]
    pub log_metrics: bool,

    /// Decoded separately so `enabled` keeps its provenance.
    #[serde(skip_deserializing)]
    pub http: HttpEndpointConfig,

    pub namespace: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pprof: Option<PprofConfig>,

    #[serde(rename = "traces")]
    pub monitor_traces: bool,

    #[validate(nested)]
    #[serde(
        skip_serializing_if = "ApmConfig::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub apm: ApmConfig,

    #[serde(deserialize_with = "null_as_default")]
    pub diagnostics: DiagnosticsConfig,

    /// Any value passes through; see [`PROCESS_RUNTIME_MANAGER`] and
    /// [`OTEL_RUNTIME_MANAGER`].
    #[serde(rename = "_runtime_experimental")]
    pub runtime_manager: String,
}

/// A section written as `key:` with nothing under it decodes like an empty one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_null_section(source: &Figment, key: &str) -> bool {
    matches!(source.find_value(key), Ok(Value::Empty(..)))
}

/// Profiling endpoint toggle. Absent unless the input provides it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PprofConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Builds the settings used before any input has been decoded.
pub fn default_config() -> MonitoringConfig {
    MonitoringConfig {
        enabled: true,
        monitor_logs: true,
        monitor_metrics: true,
        metrics_period: String::new(),
        failure_threshold: None,
        log_metrics: true,
        http: HttpEndpointConfig::default(),
        namespace: DEFAULT_NAMESPACE.into(),
        pprof: None,
        monitor_traces: false,
        apm: ApmConfig::default(),
        diagnostics: DiagnosticsConfig::default(),
        runtime_manager: DEFAULT_RUNTIME_MANAGER.into(),
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        default_config()
    }
}

impl MonitoringConfig {
    /// Load settings from a YAML file overlaid with `AGENTMON_*` environment
    /// variables, starting from [`default_config`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        default_config().decode(&FileProvider::new(path))
    }

    /// Decodes `provider` on top of `self` and returns the result.
    ///
    /// `self` is the merge base: fields missing from the input keep their
    /// current values, including the whole `http` section.
    pub fn decode<P: ConfigProvider + ?Sized>(&self, provider: &P) -> Result<Self, ConfigError> {
        let source = provider.load()?;

        let mut decoded: Self = Figment::from(Serialized::defaults(self))
            .merge(source.clone())
            .extract()?;

        let raw_http = RawHttpConfig::from_section(&source, "http")?;
        decoded.http = self.http.merge(raw_http)?;
        decoded.log_metrics = self.log_metrics;

        // A null section replaced the base section during the merge above.
        if is_null_section(&source, "apm") {
            decoded.apm = self.apm.clone();
        }
        if is_null_section(&source, "diagnostics") {
            decoded.diagnostics = self.diagnostics.clone();
        }

        decoded.validate()?;

        tracing::debug!(
            http_enabled = decoded.http.enabled,
            http_enabled_is_set = decoded.http.enabled_is_set,
            runtime_manager = %decoded.runtime_manager,
            "Decoded monitoring config"
        );
        Ok(decoded)
    }

    /// Like [`MonitoringConfig::decode`] but replaces `self` in place. On
    /// error `self` is unchanged.
    pub fn decode_into<P: ConfigProvider + ?Sized>(&mut self, provider: &P) -> Result<(), ConfigError> {
        *self = self.decode(provider)?;
        Ok(())
    }
}
