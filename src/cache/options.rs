//! Cache Options Module
//!
//! Construction-time configuration applied as an ordered list of options.

use std::fmt;
use std::time::Duration;

// == Cache Config ==
/// Configuration assembled from options before a cache starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Period of the whole-store clear, None = no background eviction
    pub eviction_period: Option<Duration>,
}

// == Cache Option ==
/// A single configuration step applied to a [`CacheConfig`].
///
/// Options run in the order they are given, so a later option overrides what
/// an earlier one set.
pub struct CacheOption(Box<dyn FnOnce(&mut CacheConfig) + Send>);

impl CacheOption {
    /// Wraps an arbitrary configuration step.
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut CacheConfig) + Send + 'static,
    {
        Self(Box::new(apply))
    }

    /// Applies this option to `config`.
    pub fn apply(self, config: &mut CacheConfig) {
        (self.0)(config)
    }
}

impl fmt::Debug for CacheOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheOption")
    }
}

// == With Periodic Eviction ==
/// Clears the whole cache every `period`, replacing any earlier period.
pub fn with_periodic_eviction(period: Duration) -> CacheOption {
    CacheOption::new(move |config| config.eviction_period = Some(period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_eviction() {
        assert_eq!(CacheConfig::default().eviction_period, None);
    }

    #[test]
    fn test_with_periodic_eviction_sets_period() {
        let mut config = CacheConfig::default();
        with_periodic_eviction(Duration::from_secs(5)).apply(&mut config);
        assert_eq!(config.eviction_period, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_later_option_wins() {
        let mut config = CacheConfig::default();
        for option in [
            with_periodic_eviction(Duration::from_secs(5)),
            with_periodic_eviction(Duration::from_millis(20)),
        ] {
            option.apply(&mut config);
        }
        assert_eq!(config.eviction_period, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_custom_option() {
        let mut config = CacheConfig {
            eviction_period: Some(Duration::from_secs(1)),
        };
        CacheOption::new(|config| config.eviction_period = None).apply(&mut config);
        assert_eq!(config.eviction_period, None);
    }
}
