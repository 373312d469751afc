//! Registry configuration

/// Registry configuration options
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum live observers per topic (0 = unlimited)
    pub max_observers_per_topic: usize,

    /// Emit debug-level logs when observers are added or removed
    pub log_registrations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_observers_per_topic: 0, // Unlimited
            log_registrations: true,
        }
    }
}

impl RegistryConfig {
    /// Set the maximum number of live observers per topic
    pub fn max_observers_per_topic(mut self, max: usize) -> Self {
        self.max_observers_per_topic = max;
        self
    }

    /// Disable registration lifecycle logs
    pub fn disable_registration_logs(mut self) -> Self {
        self.log_registrations = false;
        self
    }

    /// Check whether a topic holding `live` observers can accept another one
    pub(super) fn admits(&self, live: usize) -> bool {
        self.max_observers_per_topic == 0 || live < self.max_observers_per_topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_observers_per_topic, 0);
        assert!(config.log_registrations);
        assert!(config.admits(usize::MAX - 1));
    }

    #[test]
    fn test_limit_admits_below_max() {
        let config = RegistryConfig::default()
            .max_observers_per_topic(2)
            .disable_registration_logs();

        assert!(config.admits(0));
        assert!(config.admits(1));
        assert!(!config.admits(2));
        assert!(!config.log_registrations);
    }
}
