//! Per-service retry and timeout policies
//!
//! A `Policy` is looked up once per invocation as an immutable snapshot;
//! reconfiguring a service mid-flight never tears an in-progress call.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Retry and timeout settings for one logical service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Budget for establishing a connection
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Budget for receiving the complete response after send
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Retries after the initial attempt; total attempts = `max_retries + 1`
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Status codes treated as transient and worth retrying
    #[serde(default = "default_retryable_status_codes")]
    pub retryable_status_codes: HashSet<u16>,

    /// Delay schedule between retry attempts
    #[serde(default)]
    pub backoff: Backoff,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            max_retries: default_max_retries(),
            retryable_status_codes: default_retryable_status_codes(),
            backoff: Backoff::default(),
        }
    }
}

impl Policy {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Whether a status code is in this policy's retryable set
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }
}

fn default_connect_timeout_ms() -> u64 {
    1_000
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    3
}

// 500 is deliberately absent: a plain internal error usually signals a
// deterministic bug rather than a transient condition.
fn default_retryable_status_codes() -> HashSet<u16> {
    [408, 429, 502, 503, 504].into_iter().collect()
}

/// Exponential backoff schedule: doubling delay with a cap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Backoff {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Backoff {
    /// Delay before retry number `retry_index` (zero-based)
    ///
    /// The first retry waits `initial_delay_ms`, each subsequent retry
    /// doubles the previous delay, capped at `max_delay_ms`.
    pub fn delay(&self, retry_index: u32) -> Duration {
        // Cap the shift so the multiplier cannot overflow u64
        let shift = retry_index.min(32);
        let millis = self
            .initial_delay_ms
            .saturating_mul(1u64 << shift)
            .min(self.max_delay_ms);
        Duration::from_millis(millis)
    }
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    10_000
}
