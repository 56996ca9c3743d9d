//! Configuration surface consumed by a host process
//!
//! The shape is deliberately format-agnostic: `ClientConfig` derives serde
//! so a host can embed it in whatever configuration file it already reads.
//! Only a JSON string loader is provided here.

use crate::error::ConfigError;
use crate::policy::Policy;
use crate::types::ServiceDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Per-service configuration entry
///
/// An entry must carry a `base_address` (static resolution) or a
/// `discovery_name` (registry lookup); validation rejects entries with
/// neither. Policy fields are flattened so a JSON entry reads as one
/// object:
///
/// ```json
/// {
///   "base_address": "http://billing.internal:8080",
///   "max_retries": 2,
///   "retryable_status_codes": [503]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<Url>,

    /// Name to look up in the discovery registry when no address is pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_name: Option<String>,

    #[serde(flatten)]
    pub policy: Policy,
}

/// Configuration for every logical service a host talks to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub services: HashMap<String, ServiceEntry>,
}

impl ClientConfig {
    /// Parse and validate a configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed JSON and
    /// `ConfigError::MissingAddress` for an entry with neither a base
    /// address nor a discovery name.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every service entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, entry) in &self.services {
            if name.is_empty() {
                return Err(ConfigError::EmptyServiceName);
            }
            if entry.base_address.is_none() && entry.discovery_name.is_none() {
                return Err(ConfigError::MissingAddress(name.clone()));
            }
        }
        Ok(())
    }

    /// Build the descriptor for a configured service, if present
    pub fn service_descriptor(&self, name: &str) -> Option<ServiceDescriptor> {
        self.services.get(name).map(|entry| ServiceDescriptor {
            logical_name: name.to_string(),
            base_address: entry.base_address.clone(),
        })
    }

    /// Iterate over `(logical name, pinned address)` pairs
    ///
    /// Seeds a static resolver table; entries relying on discovery are
    /// skipped.
    pub fn static_addresses(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.services.iter().filter_map(|(name, entry)| {
            entry.base_address.as_ref().map(|url| (name.as_str(), url))
        })
    }

    /// Iterate over `(logical name, policy)` pairs for registry seeding
    pub fn policies(&self) -> impl Iterator<Item = (&str, &Policy)> {
        self.services
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.policy))
    }
}
