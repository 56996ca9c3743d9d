//! Billing demo
//!
//! Starts a small billing service implementing `POST /shopping-carts`,
//! then drives it through the Tether client proxy. The service rejects
//! the first two requests with 503, so the run demonstrates the retry
//! policy end to end.
//!
//! Usage:
//!   cargo run --package billing-server

mod handlers;

use axum::routing::{get, post};
use axum::Router;
use handlers::{BillingState, CartItem, ShoppingCart};
use std::net::SocketAddr;
use tether_client::ClientProxy;
use tether_core::{CallDescriptor, ClientConfig, PathParams, RequestEnvelope};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billing_server=debug,tether_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build the billing service router; reject the first two requests
    // with 503 so the client's retry policy is visible in the logs
    let app = Router::new()
        .route("/shopping-carts", post(handlers::create_cart))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(BillingState::new(2));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!("billing service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Client side: configure the billing service with a retry budget
    // large enough to ride out the simulated failures
    let config = ClientConfig::from_json_str(
        r#"{
            "services": {
                "billing-service": {
                    "base_address": "http://127.0.0.1:8080",
                    "max_retries": 3,
                    "retryable_status_codes": [503],
                    "backoff": {"initial_delay_ms": 100, "max_delay_ms": 1000}
                }
            }
        }"#,
    )
    .expect("demo config is valid");

    let proxy = ClientProxy::from_config(&config);
    let billing = config
        .service_descriptor("billing-service")
        .expect("billing-service is configured");
    let create_cart = CallDescriptor::post("/shopping-carts");

    let cart = ShoppingCart {
        id: None,
        items: vec![
            CartItem {
                product_id: "sku-keyboard".to_string(),
                quantity: 1,
                price: 4_999,
            },
            CartItem {
                product_id: "sku-mouse".to_string(),
                quantity: 2,
                price: 1_299,
            },
        ],
    };

    let envelope = RequestEnvelope::with_body(&billing, &create_cart, PathParams::new(), &cart);
    match proxy.invoke::<_, ShoppingCart>(envelope).await {
        Ok(created) => {
            tracing::info!(cart_id = ?created.id, "cart created through the proxy");
        }
        Err(err) => {
            tracing::error!(%err, "cart creation failed");
        }
    }
}
