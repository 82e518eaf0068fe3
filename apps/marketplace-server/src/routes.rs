use std::sync::Arc;

use access_gate::{CurrentIdentity, Gate, Problem, apply_middleware_stack};
use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use static_identity_plugin::StaticIdentityResolver;

use crate::config::AppConfig;

/// Build the gated application router from configuration.
///
/// # Errors
/// Returns an error if the gate configuration is invalid.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let gate = Gate::new(cfg.gate.clone())?;
    let resolver = Arc::new(StaticIdentityResolver::from_config(&cfg.identity));
    if resolver.is_empty() {
        tracing::warn!("No identity tokens configured: every caller will be anonymous");
    }

    let router = Router::new()
        .route("/health", get(health))
        .route("/api/session", get(session))
        .fallback(not_found);

    Ok(apply_middleware_stack(router, gate, resolver))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Current caller's identity, or `null` when anonymous.
async fn session(CurrentIdentity(identity): CurrentIdentity) -> Json<Value> {
    Json(json!({ "user": identity }))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    Problem::new(StatusCode::NOT_FOUND, "Not Found", "No handler for this path")
        .with_instance(uri.path())
}
