//! JSON-RPC 2.0 envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol version tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    /// JSON-RPC version.
    pub jsonrpc: &'static str,
    /// Method name.
    pub method: String,
    /// Request parameters. Always present on the wire.
    pub params: Value,
    /// Request ID.
    pub id: u64,
}

impl RpcRequest {
    /// Create a request, substituting `[]` when no params are given.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params: params.unwrap_or_else(|| Value::Array(Vec::new())),
            id,
        }
    }
}

/// JSON-RPC response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcResponse {
    /// JSON-RPC version.
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Result (if success).
    #[serde(default)]
    pub result: Option<Value>,
    /// Error (if failure).
    #[serde(default)]
    pub error: Option<RpcError>,
    /// Request ID echoed by the server.
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Whether the echoed id belongs to the request with `id`.
    ///
    /// A null or absent id cannot be checked and is treated as matching.
    #[must_use]
    pub fn matches(&self, id: u64) -> bool {
        match &self.id {
            None | Some(Value::Null) => true,
            Some(Value::Number(n)) => n.as_u64() == Some(id),
            Some(Value::String(s)) => s.parse::<u64>().ok() == Some(id),
            Some(_) => false,
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Additional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Meaning of a standard JSON-RPC code, `None` for server-specific codes.
    #[must_use]
    pub const fn standard_meaning(&self) -> Option<&'static str> {
        match self.code {
            PARSE_ERROR => Some("the server could not parse the request"),
            INVALID_REQUEST => Some("the request was not a valid JSON-RPC call"),
            METHOD_NOT_FOUND => Some("this Pianoteq version does not support the method"),
            INVALID_PARAMS => Some("the method rejected its parameters"),
            INTERNAL_ERROR => Some("Pianoteq failed internally"),
            _ => None,
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for RpcError {}

// Standard JSON-RPC error codes
/// Parse error.
pub const PARSE_ERROR: i64 = -32700;
/// Invalid request.
pub const INVALID_REQUEST: i64 = -32600;
/// Method not found.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid params.
pub const INVALID_PARAMS: i64 = -32602;
/// Internal error.
pub const INTERNAL_ERROR: i64 = -32603;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_defaults_params_to_empty_array() {
        let request = RpcRequest::new("getInfo", None, 7);
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            json!({"jsonrpc": "2.0", "method": "getInfo", "params": [], "id": 7})
        );
    }

    #[test]
    fn test_request_keeps_keyed_params() {
        let request = RpcRequest::new("setMetronome", Some(json!({"bpm": 90})), 1);
        assert_eq!(request.params, json!({"bpm": 90}));
    }

    #[test]
    fn test_response_with_error() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":3}"#,
        )
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found");
        assert!(error.data.is_none());
    }

    #[test]
    fn test_id_matching() {
        let mut response = RpcResponse {
            id: Some(json!(4)),
            ..Default::default()
        };
        assert!(response.matches(4));
        assert!(!response.matches(5));

        response.id = Some(json!("4"));
        assert!(response.matches(4));

        response.id = Some(Value::Null);
        assert!(response.matches(99));

        response.id = None;
        assert!(response.matches(99));
    }

    #[test]
    fn test_error_display() {
        let error = RpcError {
            code: INVALID_PARAMS,
            message: "Invalid params".to_string(),
            data: None,
        };
        assert_eq!(error.to_string(), "Invalid params (code -32602)");
    }

    #[test]
    fn test_standard_meaning() {
        let error = |code| RpcError {
            code,
            message: String::new(),
            data: None,
        };
        for code in [
            PARSE_ERROR,
            INVALID_REQUEST,
            METHOD_NOT_FOUND,
            INVALID_PARAMS,
            INTERNAL_ERROR,
        ] {
            assert!(error(code).standard_meaning().is_some(), "{code}");
        }
        assert_eq!(
            error(METHOD_NOT_FOUND).standard_meaning(),
            Some("this Pianoteq version does not support the method")
        );
        assert_eq!(error(-1).standard_meaning(), None);
    }
}
