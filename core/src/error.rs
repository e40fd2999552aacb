//! Error types for the Onbo client.
//!
//! # Design
//! Every public method resolves to a `Result`; nothing panics across the
//! API boundary. `Api` is the uniform remote-rejection case — HTTP status
//! >= 400 or a non-empty `message` in the decoded payload — and carries
//! the server's message when one was given. `Transport` means no payload
//! was obtained at all (connection failure or an undecodable body), which
//! callers must treat as failure just like a 4xx.

use thiserror::Error;

/// Errors returned by the resource APIs.
#[derive(Debug, Error)]
pub enum OnboError {
    /// The remote API rejected the call.
    #[error("onbo: {}", message.as_deref().unwrap_or("request rejected"))]
    Api { message: Option<String> },

    /// The HTTP round-trip failed or the response body was not JSON; no
    /// payload was obtained.
    #[error("transport failure: no payload obtained")]
    Transport,

    /// The request could not be built from the provided inputs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response payload did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(String),
}

impl OnboError {
    /// The server's error message, when the failure came with one.
    pub fn message(&self) -> Option<&str> {
        match self {
            OnboError::Api { message } => message.as_deref(),
            _ => None,
        }
    }
}
