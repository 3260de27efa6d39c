//! Response decoding helpers.
//!
//! Payloads are encoded with exact wire names, but decoded tolerantly: object
//! keys are folded to lowercase first, so `Bank` and `bank` land on the same
//! field. All model wire names are lowercase.

use serde::de;
use serde_json::{Map, Value};

use crate::jsonrpc::RpcResponse;

/// Maximum number of characters of a raw body quoted in an error.
pub const EXCERPT_LEN: usize = 200;

/// Recursively lowercase every object key.
#[must_use]
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), fold_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Parse a raw body into a response envelope.
///
/// Only the envelope keys are folded here; `result` is folded later by the
/// typed decode and `error.data` is kept verbatim.
///
/// # Errors
///
/// Returns the parse error if the body is not a JSON object with the
/// envelope's shape.
pub fn parse_envelope(body: &str) -> Result<RpcResponse, serde_json::Error> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => serde_json::from_value(Value::Object(fold_top_level(map))),
        _ => Err(de::Error::custom("expected a JSON-RPC response object")),
    }
}

fn fold_top_level(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(k, v)| {
            let k = k.to_lowercase();
            let v = if k == "error" { fold_error(v) } else { v };
            (k, v)
        })
        .collect()
}

fn fold_error(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        ),
        other => other,
    }
}

/// Bounded, char-boundary safe prefix of `body`.
#[must_use]
pub fn excerpt(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
