//! API Handlers
//!
//! HTTP request handlers for each demo cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::debug;

use crate::cache::{with_periodic_eviction, Cache};
use crate::config::Config;
use crate::error::ApiError;
use crate::ext::{JsonBody, RequestId, Responder};
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, SetRequest, SetResponse, SizeResponse,
};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Shared string cache
    pub cache: Arc<Cache<String>>,
    /// Renders bodies and errors
    pub responder: Responder,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache<String>) -> Self {
        Self {
            cache: Arc::new(cache),
            responder: Responder::json(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts periodic eviction when the config enables it.
    pub fn from_config(config: &Config) -> Self {
        let cache = Cache::new(config.eviction_period().map(with_periodic_eviction));
        Self {
            cache: Arc::new(cache),
            responder: Responder::json().with_msg_short_code(config.msg_short_code),
        }
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache.
pub async fn set_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(req): JsonBody<SetRequest>,
) -> Response {
    if let Some(error_msg) = req.validate() {
        return state.responder.error(ApiError::InvalidRequest(error_msg));
    }

    debug!("[{}] set key '{}'", request_id, req.key);
    state.cache.store(req.key.clone(), req.value);

    state.responder.success(&SetResponse::new(req.key))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    match state.cache.load(&key) {
        Some(value) => state.responder.success(&GetResponse::new(key, value)),
        None => state
            .responder
            .error(ApiError::NotFound(format!("Key not found: {}", key))),
    }
}

/// Handler for POST /clear
///
/// Removes every entry from the cache.
pub async fn clear_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Response {
    debug!("[{}] clear cache", request_id);
    state.cache.clear();
    state.responder.success(&ClearResponse::cleared())
}

/// Handler for GET /size
///
/// Returns the current number of entries and the eviction status.
pub async fn size_handler(State(state): State<AppState>) -> Response {
    state.responder.success(&SizeResponse {
        size: state.cache.size(),
        evicting: state.cache.is_evicting(),
        eviction_period_ms: state
            .cache
            .eviction_period()
            .map(|period| period.as_millis() as u64),
    })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    state.responder.success(&HealthResponse::healthy())
}
