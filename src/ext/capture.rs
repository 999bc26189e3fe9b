//! Request and response body capture.
//!
//! [`capture_bodies`] buffers both bodies so they can be logged and read
//! again after the handler has consumed them.

use std::time::Instant;

use axum::{
    body::{self, Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};

use crate::error::ApiError;

/// Largest request body the capture middleware will buffer.
pub const MAX_CAPTURED_BODY: usize = 2 * 1024 * 1024;

/// Instant the request entered the capture middleware.
#[derive(Debug, Clone, Copy)]
pub struct StartTime(pub Instant);

/// Buffered copy of the request body, stored in the request extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBody(pub Bytes);

/// Buffered copy of the rendered body, stored in the response extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody(pub Bytes);

// == Capture Middleware ==
/// Buffers the request and response bodies and logs the exchange.
///
/// Handlers can extract [`StartTime`] and [`RequestBody`] with
/// `Extension`, and still read the body itself as usual. The response keeps
/// its body and carries a [`ResponseBody`] copy in its extensions.
///
/// Request bodies over [`MAX_CAPTURED_BODY`] are rejected with
/// [`ApiError::InvalidRequest`].
pub async fn capture_bodies(req: Request, next: Next) -> Result<Response, ApiError> {
    let start = Instant::now();

    let (mut parts, body) = req.into_parts();
    let request_body = body::to_bytes(body, MAX_CAPTURED_BODY).await.map_err(|err| {
        ApiError::InvalidRequest(format!("Failed to read request body: {}", err))
    })?;

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    parts.extensions.insert(StartTime(start));
    parts.extensions.insert(RequestBody(request_body.clone()));

    let req = Request::from_parts(parts, Body::from(request_body.clone()));
    let (mut parts, body) = next.run(req).await.into_parts();

    let response_body = body::to_bytes(body, usize::MAX).await.map_err(|err| {
        error!("Failed to buffer response body: {}", err);
        ApiError::Internal(err.to_string())
    })?;

    debug!(
        "{} {} -> {} in {} ms, request: {}, response: {}",
        method,
        uri,
        parts.status,
        start.elapsed().as_millis(),
        String::from_utf8_lossy(&request_body),
        String::from_utf8_lossy(&response_body)
    );

    parts.extensions.insert(ResponseBody(response_body.clone()));
    Ok(Response::from_parts(parts, Body::from(response_body)))
}
