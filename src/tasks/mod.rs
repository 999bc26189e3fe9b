//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a cache.
//!
//! # Tasks
//! - Periodic eviction: clears a whole store on a fixed interval

mod eviction;

pub use eviction::{EvictionScheduler, SchedulerState};
