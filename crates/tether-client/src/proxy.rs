//! The declarative client proxy
//!
//! `invoke` composes policy lookup, resolution, template rendering,
//! encoding, transport execution, and retry classification into one
//! managed call. Invocations are independent; any number may run
//! concurrently, and retries within a single invocation are strictly
//! sequential.

use crate::error::{CallError, FailureCause};
use crate::registry::PolicyRegistry;
use crate::transport::{HttpTransport, Transport, TransportRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tether_core::{render_path, ClientConfig, RequestEnvelope};
use tether_resolve::{Resolver, StaticResolver};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Turns a [`RequestEnvelope`] into a managed HTTP call
///
/// Cloning is cheap; all components are shared behind `Arc`.
#[derive(Clone)]
pub struct ClientProxy {
    resolver: Arc<dyn Resolver>,
    transport: Arc<dyn Transport>,
    policies: Arc<PolicyRegistry>,
}

impl ClientProxy {
    pub fn new(
        resolver: Arc<dyn Resolver>,
        transport: Arc<dyn Transport>,
        policies: Arc<PolicyRegistry>,
    ) -> Self {
        Self {
            resolver,
            transport,
            policies,
        }
    }

    /// Proxy with the reqwest transport and an empty policy registry
    pub fn with_defaults(resolver: Arc<dyn Resolver>) -> Self {
        Self::new(
            resolver,
            Arc::new(HttpTransport::new()),
            Arc::new(PolicyRegistry::new()),
        )
    }

    /// Proxy built entirely from a parsed configuration: static resolver
    /// table and policy registry seeded from the config's entries
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(StaticResolver::from_config(config)),
            Arc::new(HttpTransport::new()),
            Arc::new(PolicyRegistry::from_config(config)),
        )
    }

    /// The shared policy registry, for runtime reconfiguration
    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }

    /// Invoke a declared operation and decode the response
    ///
    /// See [`invoke_with_cancel`](Self::invoke_with_cancel) for the full
    /// contract; this variant runs without an external cancellation signal.
    pub async fn invoke<B, T>(&self, envelope: RequestEnvelope<'_, B>) -> Result<T, CallError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.invoke_with_cancel(envelope, &CancellationToken::new())
            .await
    }

    /// Invoke a declared operation under an external cancellation signal
    ///
    /// The call suspends only while waiting on the transport or sleeping
    /// between retries; cancelling during either aborts promptly with
    /// [`CallError::Cancelled`] and releases any pooled connection.
    ///
    /// # Errors
    ///
    /// - [`CallError::Resolution`]: the logical name has no address;
    ///   surfaced immediately, never retried
    /// - [`CallError::Template`]: a placeholder is missing; fails before
    ///   any network activity
    /// - [`CallError::Application`]: terminal non-2xx status
    /// - [`CallError::Decode`]: a 2xx body did not decode; never retried
    /// - [`CallError::Exhausted`]: every attempt failed with a retryable
    ///   outcome
    pub async fn invoke_with_cancel<B, T>(
        &self,
        envelope: RequestEnvelope<'_, B>,
        cancel: &CancellationToken,
    ) -> Result<T, CallError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let service = envelope.target.logical_name.as_str();
        let policy = self.policies.get(service);

        // Resolved once per invocation; retries reuse the address so a
        // flapping backend cannot turn into a registry retry storm.
        let address: Url = match &envelope.target.base_address {
            Some(pinned) => pinned.clone(),
            None => self.resolver.resolve(service).await?,
        };

        let path = render_path(&envelope.call.path_template, &envelope.path_params)?;

        let body_bytes = if envelope.call.has_body {
            Some(tether_codec::encode(&envelope.body)?)
        } else {
            None
        };

        let mut headers: Vec<(String, String)> =
            vec![("accept".to_string(), tether_codec::CONTENT_TYPE.to_string())];
        if body_bytes.is_some() {
            headers.push((
                "content-type".to_string(),
                tether_codec::CONTENT_TYPE.to_string(),
            ));
        }

        let mut attempt: u32 = 0;
        loop {
            let request = TransportRequest {
                address: &address,
                method: envelope.call.method,
                path: &path,
                headers: &headers,
                body: body_bytes.as_deref(),
                connect_timeout: policy.connect_timeout(),
                read_timeout: policy.read_timeout(),
            };

            // Dropping the transport future on cancellation aborts the
            // request and returns its connection to the pool.
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(CallError::Cancelled),
                outcome = self.transport.execute(request) => outcome,
            };

            let cause = match outcome {
                Err(transport_err) => FailureCause::Transport(transport_err),
                Ok(response) if policy.is_retryable_status(response.status) => {
                    FailureCause::Status(response.status)
                }
                Ok(response) if response.is_success() => {
                    // An empty 2xx body decodes as JSON null, so `()` and
                    // `Option<T>` targets work for 204-style responses.
                    let body: &[u8] = if response.body.is_empty() {
                        b"null"
                    } else {
                        &response.body
                    };
                    return Ok(tether_codec::decode(body)?);
                }
                Ok(response) => {
                    return Err(CallError::Application {
                        status: response.status,
                        body: response.body,
                    });
                }
            };

            if attempt >= policy.max_retries {
                return Err(CallError::Exhausted {
                    attempts: attempt + 1,
                    last: cause,
                });
            }

            attempt += 1;
            let delay = policy.backoff.delay(attempt - 1);
            tracing::debug!(
                service,
                attempt,
                delay_ms = delay.as_millis() as u64,
                cause = %cause,
                "retrying after backoff"
            );

            tokio::select! {
                _ = cancel.cancelled() => return Err(CallError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
