//! Process-wide policy registry
//!
//! Reads return an `Arc` snapshot, so a concurrent `set` never tears an
//! in-flight call: the call keeps the policy it fetched, and the next call
//! sees the replacement. No lock is held across an await point.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tether_core::{ClientConfig, Policy};

/// Registry of per-logical-service policies with a documented default
#[derive(Debug)]
pub struct PolicyRegistry {
    policies: RwLock<HashMap<String, Arc<Policy>>>,
    default_policy: Arc<Policy>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRegistry {
    /// Registry whose fallback is [`Policy::default`]
    pub fn new() -> Self {
        Self::with_default(Policy::default())
    }

    /// Registry with a custom fallback policy
    pub fn with_default(default_policy: Policy) -> Self {
        Self {
            policies: RwLock::new(HashMap::new()),
            default_policy: Arc::new(default_policy),
        }
    }

    /// Registry pre-seeded with every configured service's policy
    pub fn from_config(config: &ClientConfig) -> Self {
        let registry = Self::new();
        for (name, policy) in config.policies() {
            registry.set(name, policy.clone());
        }
        registry
    }

    /// Fetch the policy snapshot for a service
    ///
    /// Returns the default policy when the name has no registered entry.
    pub fn get(&self, logical_name: &str) -> Arc<Policy> {
        let policies = self.policies.read().expect("policy registry lock poisoned");
        policies
            .get(logical_name)
            .cloned()
            .unwrap_or_else(|| self.default_policy.clone())
    }

    /// Register or replace a service's policy atomically
    pub fn set(&self, logical_name: impl Into<String>, policy: Policy) {
        let mut policies = self.policies.write().expect("policy registry lock poisoned");
        policies.insert(logical_name.into(), Arc::new(policy));
    }

    /// Remove a service's policy, falling back to the default afterwards
    pub fn remove(&self, logical_name: &str) -> Option<Arc<Policy>> {
        let mut policies = self.policies.write().expect("policy registry lock poisoned");
        policies.remove(logical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_name_gets_default() {
        let registry = PolicyRegistry::new();
        let policy = registry.get("billing-service");
        assert_eq!(*policy, Policy::default());
    }

    #[test]
    fn test_set_then_get() {
        let registry = PolicyRegistry::new();
        registry.set(
            "billing-service",
            Policy {
                max_retries: 7,
                ..Policy::default()
            },
        );
        assert_eq!(registry.get("billing-service").max_retries, 7);
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let registry = PolicyRegistry::new();
        registry.set(
            "billing-service",
            Policy {
                max_retries: 1,
                ..Policy::default()
            },
        );

        let snapshot = registry.get("billing-service");
        registry.set(
            "billing-service",
            Policy {
                max_retries: 9,
                ..Policy::default()
            },
        );

        // The in-flight snapshot is unaffected by the replacement
        assert_eq!(snapshot.max_retries, 1);
        assert_eq!(registry.get("billing-service").max_retries, 9);
    }

    #[test]
    fn test_remove_falls_back_to_default() {
        let registry = PolicyRegistry::new();
        registry.set(
            "billing-service",
            Policy {
                max_retries: 2,
                ..Policy::default()
            },
        );

        let removed = registry.remove("billing-service").unwrap();
        assert_eq!(removed.max_retries, 2);
        assert_eq!(*registry.get("billing-service"), Policy::default());
    }

    #[test]
    fn test_from_config_seeds_policies() {
        let config = ClientConfig::from_json_str(
            r#"{
                "services": {
                    "billing-service": {
                        "base_address": "http://billing:8080",
                        "max_retries": 2
                    }
                }
            }"#,
        )
        .unwrap();

        let registry = PolicyRegistry::from_config(&config);
        assert_eq!(registry.get("billing-service").max_retries, 2);
        assert_eq!(registry.get("other").max_retries, Policy::default().max_retries);
    }
}
