//! JSON encode/decode over serde

use crate::error::{DecodeError, EncodeError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// MIME type of payloads produced by [`encode`]
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize a typed payload to wire bytes
///
/// # Errors
///
/// Returns [`EncodeError::Unrepresentable`] for values JSON cannot carry,
/// such as maps with non-string keys or a failing custom `Serialize`
/// implementation.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize wire bytes into a typed value
///
/// Unknown fields present in the bytes but absent from `T` are dropped
/// silently, so adding response fields on the server side does not break
/// deployed clients.
///
/// # Errors
///
/// Returns [`DecodeError`] when the bytes are not valid JSON, are
/// truncated, or do not structurally match `T` (including a missing
/// required field).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct CartItem {
        product_id: String,
        quantity: u32,
        price: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct ShoppingCart {
        id: Option<i64>,
        items: Vec<CartItem>,
    }

    fn sample_cart() -> ShoppingCart {
        ShoppingCart {
            id: Some(7),
            items: vec![
                CartItem {
                    product_id: "sku-1".to_string(),
                    quantity: 2,
                    price: 1_299,
                },
                CartItem {
                    product_id: "sku-9".to_string(),
                    quantity: 1,
                    price: 450,
                },
            ],
        }
    }

    #[test]
    fn test_roundtrip_struct() {
        let cart = sample_cart();
        let bytes = encode(&cart).unwrap();
        let back: ShoppingCart = decode(&bytes).unwrap();
        assert_eq!(cart, back);
    }

    #[test]
    fn test_roundtrip_nullable_id() {
        let cart = ShoppingCart {
            id: None,
            items: vec![],
        };
        let bytes = encode(&cart).unwrap();
        let back: ShoppingCart = decode(&bytes).unwrap();
        assert_eq!(cart, back);
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let json = br#"{"id": 1, "items": [], "server_added_field": "ignored"}"#;
        let cart: ShoppingCart = decode(json).unwrap();
        assert_eq!(cart.id, Some(1));
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let json = br#"{"id": 1}"#;
        let err = decode::<ShoppingCart>(json).unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }

    #[test]
    fn test_wrong_field_type() {
        let json = br#"{"id": "not-a-number", "items": []}"#;
        assert!(matches!(
            decode::<ShoppingCart>(json),
            Err(DecodeError::Shape(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            decode::<ShoppingCart>(b"{nope"),
            Err(DecodeError::Syntax(_))
        ));
    }

    #[test]
    fn test_truncated_json() {
        assert!(matches!(
            decode::<ShoppingCart>(br#"{"id": 1, "items": ["#),
            Err(DecodeError::Truncated(_))
        ));
    }

    #[test]
    fn test_encode_rejects_non_string_map_keys() {
        use std::collections::HashMap;
        let map: HashMap<Vec<u8>, u32> = [(vec![1u8], 1u32)].into_iter().collect();
        assert!(matches!(
            encode(&map),
            Err(EncodeError::Unrepresentable(_))
        ));
    }

    #[test]
    fn test_encoded_content_is_json() {
        let bytes = encode(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["items"][0]["product_id"], "sku-1");
    }
}
