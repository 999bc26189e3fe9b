//! HTTP Helpers Module
//!
//! Response rendering and request extractors shared by axum handlers.
//!
//! - [`Responder`] renders success bodies through a registered codec and
//!   errors as `{"code": ..., "msg": ...}`
//! - [`JsonBody`] decodes JSON or url-encoded form bodies
//! - [`RequestId`] reads or assigns a per-request id
//! - [`capture_bodies`] buffers request and response bodies for logging

mod capture;
mod extract;
mod responder;

pub use capture::{capture_bodies, RequestBody, ResponseBody, StartTime, MAX_CAPTURED_BODY};

pub use extract::{JsonBody, RequestId, REQUEST_ID_HEADER};
pub use responder::{ErrorBody, Responder, JSON_CONTENT_TYPE};
