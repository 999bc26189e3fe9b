//! JSON codec backed by serde_json.

use serde_json::Value;

use super::Codec;
use crate::error::CodecError;

/// Registry name of the JSON codec.
pub const JSON_CODEC_NAME: &str = "json";

// == Json Codec ==
/// Compact JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        JSON_CODEC_NAME
    }

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Marshal(e.to_string()))
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::Unmarshal(e.to_string()))
    }
}
