//! Error types for the HTTP helpers and codecs
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; a missing key is reported as `None`, not as an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Codec Error Enum ==
/// Failures raised while registering or running a codec.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A codec reported an empty name at registration
    #[error("cannot register a codec with an empty name")]
    EmptyName,

    /// No codec is registered under the requested name
    #[error("codec not registered: {0}")]
    NotRegistered(String),

    /// Serializing a value failed
    #[error("marshal failed: {0}")]
    Marshal(String),

    /// Deserializing bytes failed
    #[error("unmarshal failed: {0}")]
    Unmarshal(String),
}

// == Api Error Enum ==
/// Error type surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Encoding or decoding a body failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status sent with this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Codec(CodecError::Unmarshal(_)) => StatusCode::BAD_REQUEST,
            ApiError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable reason code placed in the `code` field.
    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::Codec(_) => "CODEC_ERROR",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.reason(),
            "msg": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
