// Decoding of untrusted assistant replies into typed shapes
use serde::de::DeserializeOwned;

use super::provider::GatewayError;

/// Decode a reply that must be exactly one JSON object of shape `T`
///
/// Reply types use `deny_unknown_fields` and `String` fields, so missing
/// keys, extra keys and non-string values are all rejected. Anything around
/// the object (prose, code fences) is rejected too.
pub fn decode_reply<T: DeserializeOwned>(raw: &str) -> Result<T, GatewayError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return Err(GatewayError::ResponseInvalid(format!(
            "expected a bare JSON object, got {} bytes of text",
            trimmed.len()
        )));
    }

    serde_json::from_str(trimmed).map_err(|e| GatewayError::ResponseInvalid(e.to_string()))
}
