//! Static table resolution

use crate::error::ResolveError;
use crate::resolver::Resolver;
use async_trait::async_trait;
use std::collections::HashMap;
use tether_core::ClientConfig;
use url::Url;

/// Resolver backed by a fixed name-to-address table
///
/// Built once at startup, immutable thereafter. Unknown names fail with
/// [`ResolveError::UnknownService`].
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: HashMap<String, Url>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style entry registration
    pub fn with_service(mut self, logical_name: impl Into<String>, address: Url) -> Self {
        self.table.insert(logical_name.into(), address);
        self
    }

    /// Seed the table from every configured entry with a pinned address
    pub fn from_config(config: &ClientConfig) -> Self {
        let table = config
            .static_addresses()
            .map(|(name, url)| (name.to_string(), url.clone()))
            .collect();
        Self { table }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, logical_name: &str) -> Result<Url, ResolveError> {
        self.table
            .get(logical_name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownService(logical_name.to_string()))
    }
}
