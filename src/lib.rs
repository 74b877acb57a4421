pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    crate::domain::{checkout::RedirectUrls, gateway::CheckoutGateway},
    axum::{
        Json, Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub gateway: Arc<dyn CheckoutGateway>,
    pub stripe_webhook_secret: Arc<str>,
    pub redirects: Arc<RedirectUrls>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/health", get(health))
        .route("/api/checkout", post(adapters::checkout::create_checkout))
        .route(
            "/api/webhooks/stripe",
            post(adapters::stripe_webhook::webhook_handler),
        )
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB — Stripe events are typically <20 KB
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}
