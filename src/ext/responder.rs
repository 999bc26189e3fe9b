//! Response rendering through the codec registry.

use std::fmt;
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::codec::{encode, Codec, CodecRegistry, JsonCodec, JSON_CODEC_NAME};
use crate::error::ApiError;

/// Content type of every rendered body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Reason code, e.g. `NOT_FOUND`
    pub code: String,
    /// Human readable message
    pub msg: String,
}

// == Responder ==
/// Renders handler results with a fixed codec.
#[derive(Clone)]
pub struct Responder {
    codec: Arc<dyn Codec>,
    msg_short_code: bool,
}

impl Responder {
    /// Creates a responder using `codec`.
    pub fn new(codec: Arc<dyn Codec>) -> Self {
        Self {
            codec,
            msg_short_code: false,
        }
    }

    /// Creates a responder using the globally registered JSON codec.
    pub fn json() -> Self {
        let codec = CodecRegistry::global()
            .get(JSON_CODEC_NAME)
            .unwrap_or_else(|| Arc::new(JsonCodec));
        Self::new(codec)
    }

    /// Appends a short time-derived code to every error message, so a
    /// message seen by a user can be matched against server logs.
    pub fn with_msg_short_code(mut self, enabled: bool) -> Self {
        self.msg_short_code = enabled;
        self
    }

    // == Success ==
    /// Renders `data` with status 200.
    pub fn success<T>(&self, data: &T) -> Response
    where
        T: Serialize + ?Sized,
    {
        match encode(self.codec.as_ref(), data) {
            Ok(bytes) => {
                (StatusCode::OK, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response()
            }
            Err(err) => {
                error!("Failed to render response body: {}", err);
                self.error(ApiError::from(err))
            }
        }
    }

    // == Error ==
    /// Renders `err` with its HTTP status and reason code.
    pub fn error(&self, err: ApiError) -> Response {
        let body = ErrorBody {
            code: err.reason().to_string(),
            msg: self.message(&err),
        };

        match encode(self.codec.as_ref(), &body) {
            Ok(bytes) => (err.status(), [(CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
            Err(encode_err) => {
                error!("Failed to render error body: {}", encode_err);
                err.into_response()
            }
        }
    }

    fn message(&self, err: &ApiError) -> String {
        if self.msg_short_code {
            format!("{}[{}]", err, chrono::Utc::now().timestamp_millis() % 100_000)
        } else {
            err.to_string()
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::json()
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("codec", &self.codec.name())
            .field("msg_short_code", &self.msg_short_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_renders_data() {
        let response = Responder::json().success(&json!({"key": "a", "value": 1}));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        let json = body_json(response).await;
        assert_eq!(json, json!({"key": "a", "value": 1}));
    }

    #[tokio::test]
    async fn test_error_renders_code_and_msg() {
        let response = Responder::json().error(ApiError::NotFound("Key not found: a".into()));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["msg"], "Key not found: a");
    }

    #[tokio::test]
    async fn test_error_with_short_code() {
        let responder = Responder::json().with_msg_short_code(true);
        let response = responder.error(ApiError::InvalidRequest("bad".into()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        let msg = json["msg"].as_str().unwrap();
        assert!(msg.starts_with("bad["), "unexpected message: {}", msg);
        assert!(msg.ends_with(']'));
        let code: u64 = msg[4..msg.len() - 1].parse().unwrap();
        assert!(code < 100_000);
    }

    #[test]
    fn test_debug_shows_codec_name() {
        let debug = format!("{:?}", Responder::default());
        assert!(debug.contains("json"));
    }
}
