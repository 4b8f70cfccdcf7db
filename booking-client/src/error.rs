//! Error types for the booking API client.
//!
//! # Design
//! Every operation fails the same way from the caller's point of view: an
//! [`ApiError`] whose message names the operation that failed. The underlying
//! cause is preserved in [`ErrorKind`] so callers that care can distinguish
//! "the server said 404" from "the connection dropped", but nothing forces
//! them to.

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by every [`BookingClient`](crate::BookingClient) operation.
///
/// The `Display` form is the operation-specific failure message, e.g.
/// `failed to fetch businesses: server returned 500 Internal Server Error`.
#[derive(Debug, Error)]
#[error("failed to {operation}: {source}")]
pub struct ApiError {
    operation: &'static str,
    source: ErrorKind,
}

impl ApiError {
    pub(crate) fn new(operation: &'static str, source: ErrorKind) -> Self {
        Self { operation, source }
    }

    /// The operation that failed, e.g. `"fetch businesses"`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The underlying cause.
    pub fn kind(&self) -> &ErrorKind {
        &self.source
    }

    /// The HTTP status code, when one was observed before the failure.
    ///
    /// `None` for faults that happened before a response arrived (connection
    /// refused, DNS failure) and for payload serialization errors.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.source {
            ErrorKind::Status { status, .. } => Some(*status),
            ErrorKind::Transport(err) => err.status(),
            ErrorKind::Payload(_) | ErrorKind::Decode(_) => None,
        }
    }
}

/// What actually went wrong underneath an [`ApiError`].
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The request never completed: connection, DNS, or timeout fault.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The caller-supplied payload could not be serialized to JSON.
    #[error("payload serialization failed: {0}")]
    Payload(serde_json::Error),

    /// The response body was not valid JSON.
    #[error("response body was not valid JSON: {0}")]
    Decode(serde_json::Error),
}
