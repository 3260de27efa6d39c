//! Client errors.

use thiserror::Error;

use crate::jsonrpc::RpcError;

/// Which channel a failure came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP layer rejected or could not complete the request.
    Transport,
    /// HTTP succeeded but the body broke the JSON-RPC contract.
    Protocol,
    /// The server answered with a well-formed error envelope.
    Remote,
    /// The caller cancelled the call.
    Cancelled,
}

/// Errors returned by [`PianoteqClient`](crate::PianoteqClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP succeeded with an empty or whitespace-only body.
    #[error("Server returned an empty response")]
    EmptyResponse,

    /// The body is not a JSON-RPC response envelope.
    #[error("Failed to parse server response as JSON. Response was: {excerpt}")]
    MalformedResponse {
        /// First characters of the raw body.
        excerpt: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The result did not have the shape the endpoint promises.
    #[error("Unexpected result shape for '{method}': {source}. Response was: {excerpt}")]
    Decode {
        /// Method that produced the result.
        method: String,
        /// First characters of the offending result.
        excerpt: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A data-returning endpoint answered without a result.
    #[error("Server returned no result for '{method}'")]
    MissingResult {
        /// Method that produced the response.
        method: String,
    },

    /// The response belongs to a different request.
    #[error("Response id {actual} does not match request id {expected}")]
    IdMismatch {
        /// Id sent with the request.
        expected: u64,
        /// Id echoed by the server.
        actual: serde_json::Value,
    },

    /// Remote error envelope, carried verbatim.
    #[error("Pianoteq error: {0}")]
    Remote(#[from] RpcError),

    /// The call was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Failure channel of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::EmptyResponse
            | Self::MalformedResponse { .. }
            | Self::Decode { .. }
            | Self::MissingResult { .. }
            | Self::IdMismatch { .. } => ErrorKind::Protocol,
            Self::Remote(_) => ErrorKind::Remote,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP or connection failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Contract violation in an otherwise successful HTTP exchange.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self.kind(), ErrorKind::Protocol)
    }

    /// Error envelope from the server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self.kind(), ErrorKind::Remote)
    }

    /// Cancelled by the caller.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Remote error code, if this is a remote failure.
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Remote(e) => Some(e.code),
            _ => None,
        }
    }

    /// Remote error payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Remote(e) => e.data.as_ref(),
            _ => None,
        }
    }

    /// HTTP status behind a transport failure, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result alias for client operations.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_error_exposes_code_and_data() {
        let err = ClientError::from(RpcError {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(json!({"method": "bogus"})),
        });
        assert!(err.is_remote());
        assert_eq!(err.code(), Some(-32601));
        assert_eq!(err.data(), Some(&json!({"method": "bogus"})));
        assert!(err.to_string().contains("Method not found"));
    }

    #[test]
    fn test_protocol_kinds() {
        assert!(ClientError::EmptyResponse.is_protocol());
        assert!(
            ClientError::MissingResult {
                method: "getInfo".to_string()
            }
            .is_protocol()
        );
        assert_eq!(ClientError::EmptyResponse.code(), None);
    }

    #[test]
    fn test_cancelled_is_its_own_kind() {
        let err = ClientError::Cancelled;
        assert!(err.is_cancelled());
        assert!(!err.is_protocol());
        assert!(!err.is_transport());
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_malformed_message_carries_excerpt() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ClientError::MalformedResponse {
            excerpt: "{oops".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse server response as JSON. Response was: {oops"
        );
    }
}
