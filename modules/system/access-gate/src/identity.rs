//! Identity middleware: attaches the caller's `IdentityToken` to the request.
//!
//! This is the token source the gate relies on. It runs before the gate, asks
//! the configured [`IdentityResolverClient`] about the presented credential and
//! stores the result in request extensions. The gate never calls the resolver.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use identity_resolver_sdk::{IdentityResolverClient, IdentityResolverError};
use marketplace_security::IdentityToken;

use crate::problem::Problem;

/// Shared state for the identity middleware.
#[derive(Clone)]
pub struct IdentityState {
    pub resolver: Arc<dyn IdentityResolverClient>,
    pub session_cookie: Arc<str>,
}

impl IdentityState {
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolverClient>, session_cookie: &str) -> Self {
        Self {
            resolver,
            session_cookie: Arc::from(session_cookie),
        }
    }
}

/// Resolve the presented credential, if any, and insert the `IdentityToken`.
///
/// An unknown or expired credential leaves the request anonymous. Only resolver
/// outages end the request here (`503` / `500`).
pub async fn identity_middleware(
    axum::extract::State(state): axum::extract::State<IdentityState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let Some(credential) = extract_credential(req.headers(), &state.session_cookie) else {
        return next.run(req).await;
    };

    match state.resolver.resolve(&credential).await {
        Ok(token) => {
            req.extensions_mut().insert(token);
            next.run(req).await
        }
        Err(IdentityResolverError::Unauthorized(msg)) => {
            tracing::debug!("Credential not accepted, continuing anonymously: {msg}");
            next.run(req).await
        }
        Err(err) => resolver_error_to_response(&err),
    }
}

fn resolver_error_to_response(err: &IdentityResolverError) -> Response {
    log_resolver_error(err);
    let (status, title, detail) = match err {
        IdentityResolverError::ServiceUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
            "Identity service unavailable",
        ),
        IdentityResolverError::Unauthorized(_) | IdentityResolverError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal identity error",
        ),
    };
    Problem::new(status, title, detail).into_response()
}

#[allow(clippy::cognitive_complexity)]
fn log_resolver_error(err: &IdentityResolverError) {
    match err {
        IdentityResolverError::Unauthorized(msg) => tracing::debug!("Identity rejected: {msg}"),
        IdentityResolverError::ServiceUnavailable(msg) => {
            tracing::error!("Identity service unavailable: {msg}");
        }
        IdentityResolverError::Internal(msg) => tracing::error!("Identity internal error: {msg}"),
    }
}

/// Bearer header first, then the session cookie.
fn extract_credential(headers: &HeaderMap, session_cookie: &str) -> Option<String> {
    extract_bearer_token(headers)
        .or_else(|| extract_cookie(headers, session_cookie))
        .map(str::to_owned)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
        .filter(|s| !s.is_empty())
}

fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Extractor for the caller's identity; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<IdentityToken>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<IdentityToken>().cloned()))
    }
}
