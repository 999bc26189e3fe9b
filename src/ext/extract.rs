//! Request extractors.

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderValue},
    Form,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::codec::{decode, CodecRegistry, JSON_CODEC_NAME};
use crate::error::ApiError;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "request-id";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// == Json Body ==
/// Request body decoded with the registered JSON codec.
///
/// Url-encoded form bodies are accepted as well and decoded field by field.
/// All failures are reported as [`ApiError`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
        if bytes.is_empty() {
            return Err(ApiError::InvalidRequest("Request body is empty".to_string()));
        }

        let codec = CodecRegistry::global().require(JSON_CODEC_NAME)?;
        Ok(Self(decode(codec.as_ref(), &bytes)?))
    }
}

// == Request Id ==
/// Id of the current request, taken from the `Request-ID` header or
/// generated. A generated id is written back into the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty());
        if let Some(id) = existing {
            return Ok(Self(id.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            parts.headers.insert(REQUEST_ID_HEADER, value);
        }
        Ok(Self(id))
    }
}
