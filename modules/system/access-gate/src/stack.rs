//! Middleware stack assembly.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use axum::middleware::from_fn_with_state;
use identity_resolver_sdk::IdentityResolverClient;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::gate::{Gate, gate_middleware};
use crate::identity::{IdentityState, identity_middleware};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wrap `router` with the marketplace access layers.
///
/// `Router::layer` makes the last added layer the outermost one, so layers are
/// added innermost first. Request execution order:
/// `SetRequestId -> PropagateRequestId -> Trace -> Identity -> Gate -> Router`
#[must_use]
pub fn apply_middleware_stack(
    router: Router,
    gate: Gate,
    resolver: Arc<dyn IdentityResolverClient>,
) -> Router {
    let identity_state = IdentityState::new(resolver, &gate.config().session_cookie);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    tracing::info!(
        login_path = %gate.config().login_path,
        bypass_prefixes = gate.config().bypass_prefixes.len(),
        "Access gate installed"
    );

    router
        .layer(from_fn_with_state(gate, gate_middleware))
        .layer(from_fn_with_state(identity_state, identity_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |req: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a"),
                )
            },
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
