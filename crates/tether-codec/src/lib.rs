//! # Tether Codec
//!
//! JSON payload (de)serialization for the Tether RPC client.
//!
//! This crate provides:
//! - `encode`, typed value to wire bytes
//! - `decode`, wire bytes to typed value
//!
//! ## Forward Compatibility
//!
//! Decoding tolerates unknown fields: a newer service may add fields to a
//! response without breaking older clients. Missing *required* fields
//! still fail with [`DecodeError`].
//!
//! ## Round-Trip Law
//!
//! For every representable value `v`, `decode(&encode(&v)?)? == v`.
//!
//! ## Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tether_codec::{decode, encode};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct CartItem {
//!     product_id: String,
//!     quantity: u32,
//! }
//!
//! let item = CartItem { product_id: "sku-1".into(), quantity: 2 };
//! let bytes = encode(&item).unwrap();
//! let back: CartItem = decode(&bytes).unwrap();
//! assert_eq!(item, back);
//! ```

mod error;
mod json;

pub use error::*;
pub use json::*;
