//! Error types for the operadoras API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers asking for one
//! operadora's despesas routinely distinguish "unknown CNPJ" from "the server
//! misbehaved". Every other non-2xx response lands in `HttpError` with the
//! raw status and body. Transport failures are carried through as-is; this
//! layer never retries.

use thiserror::Error;

/// A network-level failure reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by `OperadoraClient` parse methods and `OperadoraService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A `ClientConfig` value was rejected.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
