//! APM tracing export settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

const REDACTED: &str = "[redacted]";

/// Configures APM tracing export. Everything defaults to empty.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApmConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub environment: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret_token: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub global_labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "ApmTls::is_empty")]
    pub tls: ApmTls,

    /// Fraction of transactions sampled.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f32>,
}

impl ApmConfig {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy of the settings safe to print: credentials are masked.
    pub fn redacted(&self) -> Self {
        let mask = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                REDACTED.to_string()
            }
        };

        Self {
            api_key: mask(&self.api_key),
            secret_token: mask(&self.secret_token),
            ..self.clone()
        }
    }
}

/// TLS options for the APM exporter.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApmTls {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_verify: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_ca: String,
}

impl ApmTls {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
