//! Registry-backed discovery resolution

use crate::error::ResolveError;
use crate::resolver::Resolver;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use url::Url;

/// Default time-to-live for cached registry answers
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Wire shape of one registry answer: `{"address": "http://host:port"}`
#[derive(Debug, Deserialize)]
struct RegistryRecord {
    address: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    address: Url,
    expires_at: Instant,
}

/// Resolver that queries an external discovery registry
///
/// Lookups go to `GET {registry}/services/{name}`. Successful answers are
/// cached per name for a bounded TTL so repeated invocations do not hammer
/// the registry; expired entries are refreshed synchronously on the next
/// resolve call. Failures are never cached.
pub struct DiscoveryResolver {
    registry: Url,
    http: reqwest::Client,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl DiscoveryResolver {
    /// Create a resolver against the given registry base URL
    pub fn new(registry: Url) -> Self {
        Self::with_ttl(registry, DEFAULT_CACHE_TTL)
    }

    /// Create a resolver with a custom cache TTL
    ///
    /// A zero TTL disables caching: every resolve consults the registry.
    pub fn with_ttl(registry: Url, ttl: Duration) -> Self {
        Self {
            registry,
            http: reqwest::Client::new(),
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the underlying HTTP client (custom timeouts, proxies)
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn cached(&self, logical_name: &str) -> Option<Url> {
        let cache = self.cache.read().expect("discovery cache lock poisoned");
        cache
            .get(logical_name)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.address.clone())
    }

    fn store(&self, logical_name: &str, address: Url) {
        let mut cache = self.cache.write().expect("discovery cache lock poisoned");
        cache.insert(
            logical_name.to_string(),
            CacheEntry {
                address,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    async fn lookup(&self, logical_name: &str) -> Result<Url, ResolveError> {
        // Logical names are caller input; encode them so a name with
        // reserved characters cannot alter the registry path.
        let url = format!(
            "{}/services/{}",
            self.registry.as_str().trim_end_matches('/'),
            urlencoding::encode(logical_name)
        );

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::debug!(service = logical_name, error = %e, "registry request failed");
            ResolveError::RegistryUnreachable {
                name: logical_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        if response.status().as_u16() == 404 {
            return Err(ResolveError::NameNotFound(logical_name.to_string()));
        }
        if !response.status().is_success() {
            return Err(ResolveError::RegistryUnreachable {
                name: logical_name.to_string(),
                reason: format!("registry answered with status {}", response.status()),
            });
        }

        let record: RegistryRecord =
            response
                .json()
                .await
                .map_err(|e| ResolveError::RegistryUnreachable {
                    name: logical_name.to_string(),
                    reason: format!("malformed registry answer: {e}"),
                })?;

        Url::parse(&record.address).map_err(|_| ResolveError::InvalidAddress {
            name: logical_name.to_string(),
            address: record.address,
        })
    }
}

#[async_trait]
impl Resolver for DiscoveryResolver {
    async fn resolve(&self, logical_name: &str) -> Result<Url, ResolveError> {
        // Concurrent misses may race to the registry; last write wins and
        // both observe a valid answer.
        if let Some(address) = self.cached(logical_name) {
            return Ok(address);
        }

        let address = self.lookup(logical_name).await?;
        self.store(logical_name, address.clone());
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ttl_entries_expire_immediately() {
        let resolver = DiscoveryResolver::with_ttl(
            Url::parse("http://registry:7000").unwrap(),
            Duration::ZERO,
        );
        resolver.store("billing-service", Url::parse("http://billing:8080").unwrap());
        assert!(resolver.cached("billing-service").is_none());
    }

    #[test]
    fn test_cached_entry_within_ttl() {
        let resolver = DiscoveryResolver::new(Url::parse("http://registry:7000").unwrap());
        resolver.store("billing-service", Url::parse("http://billing:8080").unwrap());

        let hit = resolver.cached("billing-service").unwrap();
        assert_eq!(hit.as_str(), "http://billing:8080/");
        assert!(resolver.cached("user-service").is_none());
    }
}
