//! # Tether Client
//!
//! The managed-call layer of the Tether RPC client: composes resolver,
//! codec, and transport into one `invoke`, applying per-service timeout
//! and retry policy.
//!
//! This crate provides:
//! - The [`Transport`] trait and the reqwest-backed [`HttpTransport`]
//! - The process-wide [`PolicyRegistry`]
//! - [`ClientProxy`], the declarative core turning a
//!   [`RequestEnvelope`](tether_core::RequestEnvelope) into a typed result
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tether_client::ClientProxy;
//! use tether_core::{CallDescriptor, PathParams, RequestEnvelope, ServiceDescriptor};
//! use tether_resolve::StaticResolver;
//!
//! let resolver = StaticResolver::new()
//!     .with_service("billing-service", "http://billing:8080".parse()?);
//! let proxy = ClientProxy::with_defaults(Arc::new(resolver));
//!
//! let billing = ServiceDescriptor::named("billing-service");
//! let create_cart = CallDescriptor::post("/shopping-carts");
//!
//! let envelope = RequestEnvelope::with_body(&billing, &create_cart, PathParams::new(), &cart);
//! let created: ShoppingCart = proxy.invoke(envelope).await?;
//! ```

mod error;
mod proxy;
mod registry;
mod transport;

pub use error::*;
pub use proxy::*;
pub use registry::*;
pub use transport::*;
