//! Billing service handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// One line item in a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    /// Price in the smallest currency unit
    pub price: i64,
}

/// A shopping cart; `id` is assigned by the billing service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingCart {
    pub id: Option<i64>,
    pub items: Vec<CartItem>,
}

/// Shared billing state: an id sequence plus a flakiness countdown
#[derive(Clone)]
pub struct BillingState {
    next_id: Arc<AtomicI64>,
    /// Number of requests to reject with 503 before behaving, to let the
    /// demo show the client's retry policy in action
    flaky_remaining: Arc<AtomicUsize>,
}

impl BillingState {
    pub fn new(flaky_requests: usize) -> Self {
        Self {
            next_id: Arc::new(AtomicI64::new(1)),
            flaky_remaining: Arc::new(AtomicUsize::new(flaky_requests)),
        }
    }
}

/// Health check endpoint
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

/// `POST /shopping-carts`: assign an id and echo the cart back
///
/// Malformed bodies are rejected with a 4xx by the `Json` extractor
/// before this handler runs.
pub async fn create_cart(
    State(state): State<BillingState>,
    Json(mut cart): Json<ShoppingCart>,
) -> impl IntoResponse {
    let remaining = state.flaky_remaining.load(Ordering::SeqCst);
    if remaining > 0 {
        state.flaky_remaining.store(remaining - 1, Ordering::SeqCst);
        tracing::warn!(remaining, "simulating transient failure");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    if cart.items.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }

    cart.id = Some(state.next_id.fetch_add(1, Ordering::SeqCst));
    tracing::info!(cart_id = ?cart.id, items = cart.items.len(), "cart created");

    (StatusCode::OK, Json(cart)).into_response()
}
