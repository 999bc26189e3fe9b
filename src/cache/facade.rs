//! Cache Facade Module
//!
//! Public cache type combining a concurrent store with optional periodic
//! whole-store eviction.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheConfig, CacheOption, ConcurrentStore};
use crate::tasks::{EvictionScheduler, SchedulerState};

// == Cache ==
/// Concurrent in-memory cache from string keys to values of type `T`.
///
/// Every instance owns its own store; nothing is shared between caches. Share
/// one cache between tasks or threads through an `Arc<Cache<T>>`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use toolshed::cache::{with_periodic_eviction, Cache};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = Cache::new([with_periodic_eviction(Duration::from_secs(60))]);
/// cache.store("user:1", 42u32);
/// assert_eq!(cache.load("user:1"), Some(42));
/// cache.stop();
/// # }
/// ```
#[derive(Debug)]
pub struct Cache<T> {
    /// Shared key-value storage
    store: Arc<ConcurrentStore<T>>,
    /// Background eviction, None = not configured
    scheduler: Option<EvictionScheduler>,
}

impl<T> Cache<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache, applying `options` in order.
    ///
    /// Periodic eviction, when configured, starts before this returns. A zero
    /// period is ignored.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = CacheOption>,
    {
        let mut config = CacheConfig::default();
        for option in options {
            option.apply(&mut config);
        }

        let store = Arc::new(ConcurrentStore::new());

        let scheduler = match config.eviction_period {
            Some(period) if period.is_zero() => {
                warn!("Ignoring periodic eviction with a zero period");
                None
            }
            Some(period) => Some(EvictionScheduler::spawn(store.clone(), period)),
            None => None,
        };

        Self { store, scheduler }
    }

    // == Load ==
    /// Returns the value stored under `key`, or None if absent.
    pub fn load(&self, key: &str) -> Option<T> {
        self.store.load(key)
    }

    /// Returns the value stored under `key` and whether it was present,
    /// falling back to `T::default()` when absent.
    pub fn load_or_default(&self, key: &str) -> (T, bool)
    where
        T: Default,
    {
        match self.store.load(key) {
            Some(value) => (value, true),
            None => (T::default(), false),
        }
    }

    // == Store ==
    /// Inserts or overwrites the value stored under `key`.
    pub fn store(&self, key: impl Into<String>, value: T) {
        self.store.store(key.into(), value);
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        let removed = self.store.clear();
        debug!("Cache cleared: removed {} entries", removed);
    }

    // == Size ==
    /// Returns a point-in-time count of stored entries.
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // == Stop ==
    /// Ends periodic eviction. The cache stays usable afterwards.
    ///
    /// A no-op when eviction was never configured or is already stopped.
    pub fn stop(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.stop();
        }
    }

    // == Scheduler State ==
    /// Returns the lifecycle state of periodic eviction.
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
            .as_ref()
            .map_or(SchedulerState::Unconfigured, EvictionScheduler::state)
    }

    /// Returns true while periodic eviction is running.
    pub fn is_evicting(&self) -> bool {
        self.scheduler_state() == SchedulerState::Running
    }

    /// Returns the configured eviction period, kept after stop.
    pub fn eviction_period(&self) -> Option<Duration> {
        self.scheduler.as_ref().map(EvictionScheduler::period)
    }
}

impl<T> Default for Cache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::with_periodic_eviction;

    #[test]
    fn test_cache_store_and_load() {
        let cache = Cache::default();
        cache.store("key1", "value1".to_string());

        assert_eq!(cache.load("key1").as_deref(), Some("value1"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_load_or_default_missing() {
        let cache: Cache<u64> = Cache::default();
        assert_eq!(cache.load_or_default("missing"), (0, false));

        cache.store("present", 7);
        assert_eq!(cache.load_or_default("present"), (7, true));
    }

    #[test]
    fn test_load_after_clear() {
        let cache = Cache::default();
        cache.store("key1", 1u8);
        cache.clear();

        assert!(cache.load("key1").is_none());
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_size_counts_distinct_keys() {
        let cache = Cache::default();
        for i in 0..25 {
            cache.store(format!("key{}", i), i);
        }
        cache.store("key0", 100);

        assert_eq!(cache.size(), 25);
    }

    #[test]
    fn test_unconfigured_stop_is_noop() {
        let cache: Cache<String> = Cache::default();
        assert_eq!(cache.scheduler_state(), SchedulerState::Unconfigured);

        cache.stop();
        cache.stop();

        assert_eq!(cache.scheduler_state(), SchedulerState::Unconfigured);
        cache.store("still", "usable".to_string());
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_zero_period_is_ignored() {
        let cache: Cache<String> = Cache::new([with_periodic_eviction(Duration::ZERO)]);
        assert_eq!(cache.scheduler_state(), SchedulerState::Unconfigured);
        assert_eq!(cache.eviction_period(), None);
    }

    #[test]
    fn test_evicting_ends_with_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let cache: Cache<u8> =
            rt.block_on(async { Cache::new([with_periodic_eviction(Duration::from_millis(30))]) });
        assert!(cache.is_evicting());

        drop(rt);
        cache.store("k", 1);
        std::thread::sleep(Duration::from_millis(150));

        assert_eq!(cache.size(), 1, "No sweep runs once the runtime is gone");
        assert!(!cache.is_evicting());
        assert_eq!(cache.scheduler_state(), SchedulerState::Stopped);
        assert_eq!(cache.eviction_period(), Some(Duration::from_millis(30)));
    }

    #[tokio::test]
    async fn test_periodic_eviction_clears_cache() {
        let cache = Cache::new([with_periodic_eviction(Duration::from_millis(50))]);
        assert!(cache.is_evicting());

        cache.store("key", "value".to_string());
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.size(), 0);
        cache.stop();
    }

    #[tokio::test]
    async fn test_stop_keeps_entries() {
        let cache = Cache::new([with_periodic_eviction(Duration::from_millis(50))]);
        cache.stop();

        cache.store("key", "value".to_string());
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.load("key").as_deref(), Some("value"));
        assert_eq!(cache.scheduler_state(), SchedulerState::Stopped);
    }

    #[tokio::test]
    async fn test_stop_twice() {
        let cache: Cache<u32> = Cache::new([with_periodic_eviction(Duration::from_millis(50))]);
        cache.stop();
        cache.stop();
        assert!(!cache.is_evicting());
    }

    #[tokio::test]
    async fn test_later_period_replaces_earlier() {
        let cache = Cache::new([
            with_periodic_eviction(Duration::from_millis(50)),
            with_periodic_eviction(Duration::from_secs(3600)),
        ]);

        assert_eq!(cache.eviction_period(), Some(Duration::from_secs(3600)));

        cache.store("key", 1u32);
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.load("key"), Some(1));
        cache.stop();
    }
}
