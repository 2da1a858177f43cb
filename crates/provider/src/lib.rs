pub mod openai;

use serde_json::Value;

/// Decode an upstream body as JSON, falling back to `{}`.
///
/// Upstream bodies that are empty, truncated, or not JSON at all (HTML error
/// pages from intermediaries) must not abort the request.
pub fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Upstream body is not JSON ({e}), treating as empty object");
        Value::Object(Default::default())
    })
}
