//! Shared, swappable handle to the settings currently in effect.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{ConfigError, ConfigProvider, MonitoringConfig};

/// Holds the current [`MonitoringConfig`]. Readers get a cheap `Arc` snapshot;
/// a reload decodes against the current value and swaps only on success.
#[derive(Debug)]
pub struct SettingsHolder {
    current: RwLock<Arc<MonitoringConfig>>,
}

impl SettingsHolder {
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn current(&self) -> Arc<MonitoringConfig> {
        Arc::clone(&self.current.read())
    }

    /// Re-runs the decode with the current settings as merge base.
    pub fn reload<P: ConfigProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<Arc<MonitoringConfig>, ConfigError> {
        let base = self.current();
        let next = match base.decode(provider) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload monitoring config, keeping current settings");
                return Err(e);
            }
        };

        *self.current.write() = Arc::clone(&next);
        tracing::info!(
            http_enabled = next.http.enabled,
            http_enabled_is_set = next.http.enabled_is_set,
            "Monitoring config reloaded"
        );
        Ok(next)
    }
}

impl Default for SettingsHolder {
    fn default() -> Self {
        Self::new(MonitoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Yaml};
    use figment::Figment;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn reload_swaps_on_success() {
        let holder = SettingsHolder::default();
        let before = holder.current();

        holder
            .reload(&Figment::from(Yaml::string("http:\n  enabled: true\n  port: 7001")))
            .unwrap();

        let after = holder.current();
        assert!(after.http.enabled);
        assert!(after.http.enabled_is_set);
        assert_eq!(after.http.port, 7001);
        assert!(!before.http.enabled, "earlier snapshots stay unchanged");
        assert!(logs_contain("Monitoring config reloaded"));
    }

    #[traced_test]
    #[test]
    fn failed_reload_keeps_previous_settings() {
        let holder = SettingsHolder::default();
        holder
            .reload(&Figment::from(Yaml::string("http:\n  enabled: true")))
            .unwrap();
        let before = holder.current();

        let result = holder.reload(&Figment::from(Yaml::string("http:\n  port: 70000")));

        assert!(result.is_err());
        assert_eq!(*holder.current(), *before);
        assert!(logs_contain("keeping current settings"));
    }

    #[test]
    fn reload_without_enabled_inherits_running_value() {
        let holder = SettingsHolder::default();
        holder
            .reload(&Figment::from(Yaml::string("http:\n  enabled: true")))
            .unwrap();

        let next = holder
            .reload(&Figment::from(Yaml::string("namespace: prod")))
            .unwrap();

        assert!(next.http.enabled);
        assert!(!next.http.enabled_is_set);
        assert_eq!(next.namespace, "prod");
    }
}
