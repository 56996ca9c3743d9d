//! Resolver trait definition

use crate::error::ResolveError;
use async_trait::async_trait;
use url::Url;

/// Trait for mapping a logical service name to a base address
///
/// This is the only capability the client proxy requires, so the static
/// table and the discovery lookup are interchangeable behind
/// `dyn Resolver`:
/// - [`StaticResolver`](crate::StaticResolver) for fixed deployments
/// - [`DiscoveryResolver`](crate::DiscoveryResolver) for registry-backed
///   deployments
///
/// # Object Safety
///
/// This trait is object-safe and is consumed as `Arc<dyn Resolver>`.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a logical name to a concrete base address
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the name is unknown, the registry
    /// is unreachable, or the registry hands back a malformed address.
    async fn resolve(&self, logical_name: &str) -> Result<Url, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify trait is object-safe
    fn _assert_object_safe(_: &dyn Resolver) {}
}
