//! Codec Module
//!
//! Pluggable marshal/unmarshal codecs looked up by name.

mod json;
mod registry;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::CodecError;

pub use json::{JsonCodec, JSON_CODEC_NAME};
pub use registry::CodecRegistry;

// == Codec Trait ==
/// Converts between bytes and a self-describing value tree.
///
/// Codecs work on [`serde_json::Value`] so they can be stored as trait
/// objects; use [`encode`] and [`decode`] for typed access.
pub trait Codec: Send + Sync {
    /// Name the codec is registered under.
    fn name(&self) -> &str;

    /// Serializes `value` to bytes.
    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Parses `data` into a value tree.
    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError>;
}

/// Serializes any `Serialize` value with `codec`.
pub fn encode<T>(codec: &dyn Codec, value: &T) -> Result<Vec<u8>, CodecError>
where
    T: Serialize + ?Sized,
{
    let tree = serde_json::to_value(value).map_err(|e| CodecError::Marshal(e.to_string()))?;
    codec.marshal(&tree)
}

/// Deserializes `data` into `T` with `codec`.
pub fn decode<T>(codec: &dyn Codec, data: &[u8]) -> Result<T, CodecError>
where
    T: DeserializeOwned,
{
    let tree = codec.unmarshal(data)?;
    serde_json::from_value(tree).map_err(|e| CodecError::Unmarshal(e.to_string()))
}
