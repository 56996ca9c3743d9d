//! Error types for Tether Resolve

use thiserror::Error;

/// Errors that can occur while resolving a logical service name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The static table has no entry for the name and no discovery
    /// fallback exists
    #[error("Unknown service '{0}': no configured address")]
    UnknownService(String),

    /// The discovery registry could not be reached
    #[error("Discovery registry unreachable while resolving '{name}': {reason}")]
    RegistryUnreachable { name: String, reason: String },

    /// The registry answered but does not know the name
    #[error("Service '{0}' not found in the discovery registry")]
    NameNotFound(String),

    /// The registry returned an address that is not a valid URL
    #[error("Registry returned an invalid address for '{name}': {address}")]
    InvalidAddress { name: String, address: String },
}
