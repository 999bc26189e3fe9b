//! Toolshed - small building blocks for services
//!
//! - [`cache`]: generic concurrent in-memory cache with optional periodic
//!   whole-cache eviction
//! - [`codec`]: named marshal/unmarshal codecs
//! - [`ext`]: axum response rendering and request extractors
//! - [`server`]: HTTP server start/stop orchestration
//! - [`progress`]: console progress bar

pub mod api;
pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod ext;
pub mod models;
pub mod progress;
pub mod server;
pub mod tasks;

pub use api::AppState;
pub use cache::{with_periodic_eviction, Cache};
pub use config::Config;
pub use server::HttpServer;
