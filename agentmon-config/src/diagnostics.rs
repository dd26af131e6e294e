//! Diagnostics handler settings: bundle upload retries and request rate limit.
//!
//! These are data only. The uploader and the limiter that consume them live
//! elsewhere in the agent.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::{deserialize_duration, serialize_duration};

/// Retry policy for uploading a diagnostics bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    pub max_retries: u32,

    #[serde(
        rename = "init_duration",
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub init_dur: Duration,

    #[serde(
        rename = "max_duration",
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub max_dur: Duration,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            init_dur: Duration::from_secs(1),
            max_dur: Duration::from_secs(10 * 60),
        }
    }
}

/// Token-bucket limit for diagnostics requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    #[serde(
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub interval: Duration,
    pub burst: u32,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            burst: 1,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub uploader: UploaderConfig,
    pub limit: LimitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Serialized, Yaml};
    use figment::Figment;

    #[test]
    fn defaults() {
        let diagnostics = DiagnosticsConfig::default();
        assert_eq!(diagnostics.uploader.max_retries, 10);
        assert_eq!(diagnostics.uploader.init_dur, Duration::from_secs(1));
        assert_eq!(diagnostics.uploader.max_dur, Duration::from_secs(600));
        assert_eq!(diagnostics.limit.interval, Duration::from_secs(60));
        assert_eq!(diagnostics.limit.burst, 1);
    }

    #[test]
    fn partial_input_merges_over_defaults() {
        let diagnostics: DiagnosticsConfig =
            Figment::from(Serialized::defaults(DiagnosticsConfig::default()))
                .merge(Yaml::string("uploader:\n  init_duration: 5s\nlimit:\n  burst: 4"))
                .extract()
                .unwrap();

        assert_eq!(diagnostics.uploader.init_dur, Duration::from_secs(5));
        assert_eq!(diagnostics.uploader.max_retries, 10);
        assert_eq!(diagnostics.uploader.max_dur, Duration::from_secs(600));
        assert_eq!(diagnostics.limit.burst, 4);
        assert_eq!(diagnostics.limit.interval, Duration::from_secs(60));
    }

    #[test]
    fn serialized_durations_decode_to_same_values() {
        let original = DiagnosticsConfig {
            uploader: UploaderConfig {
                max_retries: 3,
                init_dur: Duration::from_millis(250),
                max_dur: Duration::from_secs(90),
            },
            limit: LimitConfig {
                interval: Duration::from_secs(3600),
                burst: 2,
            },
        };

        let yaml = serde_yaml::to_string(&original).unwrap();
        assert!(yaml.contains("init_duration: 250ms"));
        assert!(yaml.contains("interval: 1h"));

        let decoded: DiagnosticsConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(decoded, original);
    }
}
