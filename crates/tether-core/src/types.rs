//! Tether Core Types
//!
//! Descriptors bind a call shape to a service at invocation time: a
//! `CallDescriptor` never references a `ServiceDescriptor` directly, so the
//! same declared operation can be pointed at any resolved address.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use url::Url;

/// HTTP verb for a declared operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    /// The canonical wire name of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical service and, optionally, a fixed network location
///
/// When `base_address` is absent the resolver must be able to look the
/// logical name up, otherwise calls against this descriptor fail with a
/// resolution error. Created at configuration time and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub logical_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_address: Option<Url>,
}

impl ServiceDescriptor {
    /// A descriptor whose address is supplied by the resolver
    pub fn named(logical_name: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            base_address: None,
        }
    }

    /// A descriptor pinned to a fixed base address
    pub fn with_address(logical_name: impl Into<String>, base_address: Url) -> Self {
        Self {
            logical_name: logical_name.into(),
            base_address: Some(base_address),
        }
    }
}

/// The shape of one declared operation: verb, path template, body flag
///
/// Constructed once per operation and reused across invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallDescriptor {
    pub method: HttpMethod,

    /// Path template with named `{placeholder}` segments
    pub path_template: String,

    /// Whether invocations carry an encoded request body
    pub has_body: bool,
}

impl CallDescriptor {
    pub fn new(method: HttpMethod, path_template: impl Into<String>, has_body: bool) -> Self {
        Self {
            method,
            path_template: path_template.into(),
            has_body,
        }
    }

    /// A bodyless GET operation
    pub fn get(path_template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path_template, false)
    }

    /// A POST operation carrying a body
    pub fn post(path_template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path_template, true)
    }

    /// A PUT operation carrying a body
    pub fn put(path_template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path_template, true)
    }

    /// A PATCH operation carrying a body
    pub fn patch(path_template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path_template, true)
    }

    /// A bodyless DELETE operation
    pub fn delete(path_template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path_template, false)
    }
}

/// Named values substituted into a path template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One invocation's worth of inputs, consumed by the client proxy
///
/// Borrows the descriptors so declared operations stay shared; the body is
/// any serializable value (use `()` via [`RequestEnvelope::new`] for
/// bodyless calls).
#[derive(Debug)]
pub struct RequestEnvelope<'a, B> {
    pub target: &'a ServiceDescriptor,
    pub call: &'a CallDescriptor,
    pub path_params: PathParams,
    pub body: Option<&'a B>,
}

impl<'a> RequestEnvelope<'a, ()> {
    /// Envelope for a bodyless invocation
    pub fn new(
        target: &'a ServiceDescriptor,
        call: &'a CallDescriptor,
        path_params: PathParams,
    ) -> Self {
        Self {
            target,
            call,
            path_params,
            body: None,
        }
    }
}

impl<'a, B> RequestEnvelope<'a, B> {
    /// Envelope carrying a typed body payload
    pub fn with_body(
        target: &'a ServiceDescriptor,
        call: &'a CallDescriptor,
        path_params: PathParams,
        body: &'a B,
    ) -> Self {
        Self {
            target,
            call,
            path_params,
            body: Some(body),
        }
    }
}

/// Raw response as produced by the transport
///
/// Statuses are carried as data at this layer; interpreting non-2xx codes
/// is the client proxy's job. Multi-valued headers are preserved as
/// repeated pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResponsePayload {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of a header, matched case-insensitively
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_wire_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(
            serde_json::to_string(&HttpMethod::Delete).unwrap(),
            "\"DELETE\""
        );
    }

    #[test]
    fn test_service_descriptor_serialization_roundtrip() {
        let descriptor = ServiceDescriptor::with_address(
            "billing-service",
            Url::parse("http://billing.internal:8080").unwrap(),
        );

        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: ServiceDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, parsed);
    }

    #[test]
    fn test_named_descriptor_omits_address() {
        let descriptor = ServiceDescriptor::named("billing-service");
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(!json.contains("base_address"));
    }

    #[test]
    fn test_call_descriptor_constructors() {
        let create = CallDescriptor::post("/shopping-carts");
        assert_eq!(create.method, HttpMethod::Post);
        assert!(create.has_body);

        let fetch = CallDescriptor::get("/shopping-carts/{id}");
        assert_eq!(fetch.method, HttpMethod::Get);
        assert!(!fetch.has_body);

        let remove = CallDescriptor::delete("/shopping-carts/{id}");
        assert!(!remove.has_body);
    }

    #[test]
    fn test_path_params_builder() {
        let params = PathParams::new().with("id", "42").with("owner", "alice");
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("owner"), Some("alice"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_response_payload_success_range() {
        let payload = ResponsePayload {
            status: 204,
            headers: vec![],
            body: vec![],
        };
        assert!(payload.is_success());

        let payload = ResponsePayload {
            status: 503,
            ..payload
        };
        assert!(!payload.is_success());
    }

    #[test]
    fn test_response_payload_multi_valued_headers() {
        let payload = ResponsePayload {
            status: 200,
            headers: vec![
                ("Set-Cookie".to_string(), "a=1".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
                ("set-cookie".to_string(), "b=2".to_string()),
            ],
            body: vec![],
        };

        assert_eq!(payload.header("Content-Type"), Some("application/json"));
        let cookies: Vec<&str> = payload.header_all("set-cookie").collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }
}
