//! Cache Module
//!
//! Generic concurrent in-memory cache with optional periodic whole-store
//! eviction. There is no per-key expiry and no capacity-based eviction.

mod facade;
mod options;
mod store;


// Re-export public types
pub use facade::Cache;
pub use options::{with_periodic_eviction, CacheConfig, CacheOption};
pub use store::ConcurrentStore;
pub use crate::tasks::SchedulerState;
