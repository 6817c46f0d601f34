//! Error types for fidsboard.
//!
//! This module defines all error types used throughout the fidsboard crate,
//! covering the two outbound TDX calls, configuration, and the local server.

use std::net::SocketAddr;

use thiserror::Error;

/// The main error type for fidsboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Upstream Errors ===
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("{endpoint} request failed ({status}): {message}")]
    Api {
        /// Which endpoint answered (`token` or `flights`).
        endpoint: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The token endpoint answered without an access token.
    #[error("token response did not contain an access_token")]
    MissingAccessToken,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No client credentials were configured for the token exchange.
    #[error("missing TDX credentials: set auth.client_id and auth.client_secret")]
    MissingCredentials,

    // === Server Errors ===
    /// The local page server could not bind its listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fidsboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an upstream status error.
    #[must_use]
    pub fn api(endpoint: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            endpoint,
            status,
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::api("token", 401, "invalid_client");
        assert_eq!(
            err.to_string(),
            "token request failed (401): invalid_client"
        );
    }

    #[test]
    fn test_missing_access_token_display() {
        assert_eq!(
            Error::MissingAccessToken.to_string(),
            "token response did not contain an access_token"
        );
    }

    #[test]
    fn test_missing_credentials_mentions_keys() {
        let msg = Error::MissingCredentials.to_string();
        assert!(msg.contains("auth.client_id"));
        assert!(msg.contains("auth.client_secret"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("api.top must be between 1 and 100");
        assert!(err.to_string().contains("api.top"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_bind_error_display() {
        let err = Error::Bind {
            addr: "127.0.0.1:8080".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:8080"));
        assert!(msg.contains("in use"));
    }
}
