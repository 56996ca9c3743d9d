//! # Tether Resolve
//!
//! Maps a logical service name to a concrete base address.
//!
//! This crate provides:
//! - The [`Resolver`] trait, the single seam the client proxy depends on
//! - [`StaticResolver`], a fixed table populated from configuration
//! - [`DiscoveryResolver`], which looks names up against an external HTTP
//!   registry with a bounded-TTL cache of successful results
//!
//! ## Example
//!
//! ```rust,ignore
//! use tether_resolve::{Resolver, StaticResolver};
//! use url::Url;
//!
//! let resolver = StaticResolver::new()
//!     .with_service("billing-service", Url::parse("http://billing:8080")?);
//!
//! let address = resolver.resolve("billing-service").await?;
//! ```

mod discovery;
mod error;
mod resolver;
mod static_table;

pub use discovery::*;
pub use error::*;
pub use resolver::*;
pub use static_table::*;
