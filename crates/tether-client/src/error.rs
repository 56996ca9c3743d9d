//! Error types for Tether Client

use tether_codec::{DecodeError, EncodeError};
use tether_core::TemplateError;
use tether_resolve::ResolveError;
use thiserror::Error;

/// Errors that can occur at the transport layer
///
/// Only wire-level failures appear here; a response with any status code,
/// 2xx or not, is a successful transport outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No connection could be established within the connect timeout
    #[error("Failed to connect: {0}")]
    Connect(String),

    /// No complete response arrived within the read timeout
    #[error("Timed out waiting for response: {0}")]
    Timeout(String),

    /// The connection failed mid-flight (reset, protocol error)
    #[error("Connection failure: {0}")]
    Connection(String),
}

/// The final failure a retry loop observed before giving up
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FailureCause {
    #[error("transport failure: {0}")]
    Transport(TransportError),

    #[error("retryable status {0}")]
    Status(u16),
}

/// Errors surfaced to the caller of [`ClientProxy::invoke`](crate::ClientProxy::invoke)
#[derive(Debug, Error)]
pub enum CallError {
    /// The logical name could not be resolved; never retried
    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// The path template could not be rendered; fails before any network call
    #[error("Path template error: {0}")]
    Template(#[from] TemplateError),

    /// The request body could not be encoded
    #[error("Request body encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// A 2xx response carried a body that does not decode; never retried
    #[error("Response body decoding failed: {0}")]
    Decode(#[from] DecodeError),

    /// The service answered with a terminal non-2xx status
    #[error("Service answered with status {status}")]
    Application { status: u16, body: Vec<u8> },

    /// Every attempt failed with a retryable outcome
    #[error("Gave up after {attempts} attempts; last failure: {last}")]
    Exhausted { attempts: u32, last: FailureCause },

    /// The caller cancelled the invocation
    #[error("Call cancelled")]
    Cancelled,
}
