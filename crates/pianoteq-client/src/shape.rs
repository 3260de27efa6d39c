//! Per-endpoint result shapes.
//!
//! The server is inconsistent about how it wraps results, so every operation
//! states up front which shape it expects instead of sniffing the payload.

use serde::de::{self, DeserializeOwned};
use serde_json::Value;

use crate::codec::{EXCERPT_LEN, excerpt, fold_keys};
use crate::error::{ClientError, Result};

/// Result contract of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// One object wrapped in a one-element list; empty list means default.
    Singleton,
    /// A true list, order preserved.
    List,
    /// A bare object, never unwrapped.
    Object,
    /// Command methods; the result is ignored.
    Discard,
}

/// First element of a singleton list, or the default instance if empty.
#[must_use]
pub fn first_or_default<T: Default>(items: Vec<T>) -> T {
    items.into_iter().next().unwrap_or_default()
}

/// Decode `result` into `T` with tolerant key matching.
///
/// # Errors
///
/// [`ClientError::MissingResult`] for an absent or null result, and
/// [`ClientError::Decode`] when the payload does not fit `T`.
pub fn decode<T: DeserializeOwned>(method: &str, result: Option<Value>) -> Result<T> {
    let value = match result {
        None | Some(Value::Null) => {
            return Err(ClientError::MissingResult {
                method: method.to_string(),
            });
        }
        Some(value) => fold_keys(value),
    };
    let body = value.to_string();
    serde_json::from_value(value).map_err(|source| decode_error(method, &body, source))
}

/// Decode a result that must be a bare JSON object.
///
/// # Errors
///
/// See [`decode`]; any non-object result is a [`ClientError::Decode`].
pub fn decode_object<T: DeserializeOwned>(method: &str, result: Option<Value>) -> Result<T> {
    match result {
        Some(value) if !value.is_object() && !value.is_null() => Err(decode_error(
            method,
            &value.to_string(),
            de::Error::custom("expected a JSON object"),
        )),
        result => decode(method, result),
    }
}

fn decode_error(method: &str, body: &str, source: serde_json::Error) -> ClientError {
    ClientError::Decode {
        method: method.to_string(),
        excerpt: excerpt(body, EXCERPT_LEN).to_string(),
        source,
    }
}

/// Decode a singleton-wrapped result.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_singleton<T: DeserializeOwned + Default>(
    method: &str,
    result: Option<Value>,
) -> Result<T> {
    decode::<Vec<T>>(method, result).map(first_or_default)
}
