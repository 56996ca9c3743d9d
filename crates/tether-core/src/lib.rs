//! # Tether Core
//!
//! Core types for the Tether declarative HTTP RPC client.
//!
//! This crate provides:
//! - Descriptors for services and call shapes
//! - Path template rendering with named placeholders
//! - Per-service retry/timeout policies
//! - The configuration surface consumed by a host process
//!
//! ## Example
//!
//! ```rust,ignore
//! use tether_core::{CallDescriptor, PathParams, ServiceDescriptor, render_path};
//!
//! let billing = ServiceDescriptor::named("billing-service");
//! let get_cart = CallDescriptor::get("/shopping-carts/{id}");
//!
//! let params = PathParams::new().with("id", "42");
//! let path = render_path(&get_cart.path_template, &params)?;
//! assert_eq!(path, "/shopping-carts/42");
//! ```

pub mod config;
pub mod error;
pub mod policy;
pub mod template;
pub mod types;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use policy::*;
pub use template::*;
pub use types::*;
