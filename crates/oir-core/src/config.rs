//! Registry service configuration

use oir_model::UploadPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timings and limits for the registry services
///
/// Durations are kept in milliseconds so the struct reads naturally from
/// TOML; use the accessor methods to get [`Duration`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Quiet period before a typed query is searched
    pub debounce_ms: u64,
    /// Simulated latency of a global search
    pub search_latency_ms: u64,
    /// Simulated latency of a batch submission
    pub submit_latency_ms: u64,
    /// How long a successful submission stays on screen before the batch clears
    pub success_display_ms: u64,
    /// Upload limits
    pub upload: UploadPolicy,
}

impl RegistryConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_debounce(mut self, interval: Duration) -> Self {
        self.debounce_ms = millis(interval);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_search_latency(mut self, latency: Duration) -> Self {
        self.search_latency_ms = millis(latency);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency_ms = millis(latency);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_success_display(mut self, delay: Duration) -> Self {
        self.success_display_ms = millis(delay);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload = policy;
        self
    }

    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[inline]
    #[must_use]
    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    #[inline]
    #[must_use]
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    #[inline]
    #[must_use]
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            search_latency_ms: 300,
            submit_latency_ms: 1000,
            success_display_ms: 2000,
            upload: UploadPolicy::default(),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_timings() {
        let config = RegistryConfig::new();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.submit_latency(), Duration::from_secs(1));
        assert_eq!(config.success_display(), Duration::from_secs(2));
        assert_eq!(config.upload.max_mb(), 10);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: RegistryConfig = serde_json::from_str(r#"{"debounce_ms": 50}"#).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.search_latency_ms, 300);
    }
}
