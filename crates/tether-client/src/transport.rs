//! HTTP transport execution
//!
//! A transport performs exactly one request/response exchange. Retry,
//! resolution, and payload handling all live above this layer.

use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tether_core::{HttpMethod, ResponsePayload};
use url::Url;

/// One request, fully prepared: resolved address, rendered path, encoded
/// body, and the policy's timeout budgets
#[derive(Debug)]
pub struct TransportRequest<'a> {
    pub address: &'a Url,
    pub method: HttpMethod,
    pub path: &'a str,
    pub headers: &'a [(String, String)],
    pub body: Option<&'a [u8]>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

/// Trait for executing a single HTTP exchange
///
/// Implementations must return any received response as data, whatever its
/// status code; only wire-level failures are errors. Connection pooling is
/// an internal optimization and must not change observable behavior.
///
/// # Object Safety
///
/// This trait is object-safe and is consumed as `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and wait for the complete response
    ///
    /// # Errors
    ///
    /// - [`TransportError::Connect`] if no connection within the connect timeout
    /// - [`TransportError::Timeout`] if no complete response within the read timeout
    /// - [`TransportError::Connection`] for resets and other wire failures
    async fn execute(&self, request: TransportRequest<'_>) -> Result<ResponsePayload, TransportError>;
}

/// Reqwest-backed transport
///
/// reqwest fixes the connect timeout at client-build time, so one client is
/// kept per distinct connect budget; each client pools connections by
/// (scheme, host, port) internally. The read timeout is applied per
/// request.
#[derive(Debug, Default)]
pub struct HttpTransport {
    clients: RwLock<HashMap<u64, reqwest::Client>>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, connect_timeout: Duration) -> Result<reqwest::Client, TransportError> {
        let key = connect_timeout.as_millis() as u64;

        {
            let clients = self.clients.read().expect("transport client lock poisoned");
            if let Some(client) = clients.get(&key) {
                return Ok(client.clone());
            }
        }

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let mut clients = self.clients.write().expect("transport client lock poisoned");
        Ok(clients.entry(key).or_insert(client).clone())
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest<'_>) -> Result<ResponsePayload, TransportError> {
        let client = self.client_for(request.connect_timeout)?;

        let url = format!(
            "{}/{}",
            request.address.as_str().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );

        let mut builder = client
            .request(to_reqwest_method(request.method), url)
            .timeout(request.read_timeout);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(Self::classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(Self::classify)?
            .to_vec();

        Ok(ResponsePayload {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify trait is object-safe
    fn _assert_object_safe(_: &dyn Transport) {}

    #[test]
    fn test_method_conversion() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Head), reqwest::Method::HEAD);
    }

    #[test]
    fn test_clients_are_reused_per_connect_timeout() {
        let transport = HttpTransport::new();
        let _ = transport.client_for(Duration::from_millis(500)).unwrap();
        let _ = transport.client_for(Duration::from_millis(500)).unwrap();
        let _ = transport.client_for(Duration::from_millis(900)).unwrap();

        let clients = transport.clients.read().unwrap();
        assert_eq!(clients.len(), 2);
    }

    #[tokio::test]
    async fn test_connect_failure_classified() {
        let transport = HttpTransport::new();
        let address = Url::parse("http://127.0.0.1:1").unwrap();
        let request = TransportRequest {
            address: &address,
            method: HttpMethod::Get,
            path: "/anything",
            headers: &[],
            body: None,
            connect_timeout: Duration::from_millis(250),
            read_timeout: Duration::from_millis(250),
        };

        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connect(_) | TransportError::Timeout(_)
        ));
    }
}
