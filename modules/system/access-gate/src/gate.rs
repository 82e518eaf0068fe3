use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use marketplace_security::IdentityToken;

use crate::classifier::{ProtectionLevel, RouteTable, matches_prefix, normalize_path};
use crate::config::{ConfigError, GateConfig};
use crate::policy::{AccessDenied, evaluate};
use crate::problem::Problem;

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Hand the request to its handler unchanged.
    Proceed,
    /// Send the caller to login; `location` already carries the return-to parameter.
    RedirectToLogin { location: String },
    /// Reject with `403`.
    Forbidden,
}

/// Classification + evaluation over an immutable route table.
///
/// Cheap to clone; shared as middleware state.
#[derive(Debug, Clone)]
pub struct Gate {
    table: RouteTable,
    config: Arc<GateConfig>,
}

impl Gate {
    /// Build a gate over the marketplace route table.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if `config` is inconsistent with the table.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        Self::with_table(RouteTable::marketplace(), config)
    }

    /// # Errors
    /// Returns [`ConfigError`] if `config` is inconsistent with `table`.
    pub fn with_table(table: RouteTable, config: GateConfig) -> Result<Self, ConfigError> {
        config.validate(&table)?;
        Ok(Self {
            table,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn classify(&self, path: &str) -> ProtectionLevel {
        self.table.classify(path)
    }

    /// `true` when the gate must not inspect `path` (static assets).
    #[must_use]
    pub fn is_bypassed(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.config
            .bypass_prefixes
            .iter()
            .any(|prefix| matches_prefix(&path, prefix))
    }

    /// Decide the action for a request target and the caller's token.
    #[must_use]
    pub fn decide(
        &self,
        path: &str,
        query: Option<&str>,
        token: Option<&IdentityToken>,
    ) -> GateAction {
        if self.is_bypassed(path) {
            return GateAction::Proceed;
        }

        let level = self.table.classify(path);
        match evaluate(level, token).into_result() {
            Ok(()) => GateAction::Proceed,
            Err(denied) => {
                log_denial(path, level, token, denied);
                match denied {
                    AccessDenied::Unauthenticated => GateAction::RedirectToLogin {
                        location: self.login_location(path, query),
                    },
                    AccessDenied::Forbidden => GateAction::Forbidden,
                }
            }
        }
    }

    /// `<login_path>?<return_to_param>=<encoded path[?query]>`
    ///
    /// The return-to carries the normalized path, the same one that was
    /// classified, so it can never start with `//`.
    #[must_use]
    pub fn login_location(&self, path: &str, query: Option<&str>) -> String {
        let path = normalize_path(path);
        let return_to = match query {
            Some(q) if !q.is_empty() => format!("{path}?{q}"),
            _ => path.into_owned(),
        };
        format!(
            "{}?{}={}",
            self.config.login_path,
            urlencoding::encode(&self.config.return_to_param),
            urlencoding::encode(&return_to)
        )
    }
}

fn log_denial(
    path: &str,
    level: ProtectionLevel,
    token: Option<&IdentityToken>,
    denied: AccessDenied,
) {
    match token {
        Some(token) => tracing::debug!(
            path,
            %level,
            role = %token.role(),
            subject_id = %token.subject_id(),
            "Access gate denied: {denied}"
        ),
        None => tracing::debug!(path, %level, "Access gate denied: {denied}"),
    }
}

/// Access gate middleware.
///
/// Every request, `OPTIONS` included, is classified and evaluated:
/// 1. Reads the `IdentityToken` attached by the identity middleware, if any
/// 2. Proceeds, redirects to login (`307`), or answers `403` per [`Gate::decide`]
pub async fn gate_middleware(
    axum::extract::State(gate): axum::extract::State<Gate>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let action = gate.decide(
        req.uri().path(),
        req.uri().query(),
        req.extensions().get::<IdentityToken>(),
    );

    match action {
        GateAction::Proceed => next.run(req).await,
        GateAction::RedirectToLogin { location } => Redirect::temporary(&location).into_response(),
        GateAction::Forbidden => Problem::new(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "Your role does not grant access to this resource",
        )
        .with_instance(req.uri().path())
        .into_response(),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use marketplace_security::Role;
    use uuid::Uuid;

    fn gate() -> Gate {
        Gate::new(GateConfig::default()).unwrap()
    }

    fn token(role: Role) -> IdentityToken {
        IdentityToken::new(Uuid::new_v4(), "caller@example.com", role)
    }

    #[test]
    fn anonymous_admin_request_redirects_with_return_to() {
        let action = gate().decide("/admin/categories", None, None);
        assert_eq!(
            action,
            GateAction::RedirectToLogin {
                location: "/login?callbackUrl=%2Fadmin%2Fcategories".to_owned()
            }
        );
    }

    #[test]
    fn vendor_on_admin_route_is_forbidden() {
        let action = gate().decide("/admin/categories", None, Some(&token(Role::Vendor)));
        assert_eq!(action, GateAction::Forbidden);
    }

    #[test]
    fn admin_on_vendor_route_proceeds() {
        let action = gate().decide("/vendor/tools", None, Some(&token(Role::Admin)));
        assert_eq!(action, GateAction::Proceed);
    }

    #[test]
    fn user_on_dashboard_proceeds() {
        let action = gate().decide("/dashboard/account", None, Some(&token(Role::User)));
        assert_eq!(action, GateAction::Proceed);
    }

    #[test]
    fn anonymous_browse_proceeds() {
        assert_eq!(gate().decide("/browse", None, None), GateAction::Proceed);
    }

    #[test]
    fn affiliate_on_vendor_api_is_forbidden() {
        let action = gate().decide("/api/vendor/tools", None, Some(&token(Role::Affiliate)));
        assert_eq!(action, GateAction::Forbidden);
    }

    #[test]
    fn return_to_keeps_query_string() {
        let action = gate().decide("/dashboard/orders", Some("page=2&sort=desc"), None);
        assert_eq!(
            action,
            GateAction::RedirectToLogin {
                location: "/login?callbackUrl=%2Fdashboard%2Forders%3Fpage%3D2%26sort%3Ddesc"
                    .to_owned()
            }
        );
    }

    #[test]
    fn custom_login_path_and_param() {
        let gate = Gate::new(GateConfig {
            login_path: "/auth/signin".to_owned(),
            return_to_param: "next".to_owned(),
            ..GateConfig::default()
        })
        .unwrap();

        assert_eq!(
            gate.login_location("/vendor", None),
            "/auth/signin?next=%2Fvendor"
        );
    }

    #[test]
    fn bypassed_paths_are_not_inspected() {
        let gate = gate();
        assert!(gate.is_bypassed("/static/app.css"));
        assert!(gate.is_bypassed("/favicon.ico"));
        assert!(!gate.is_bypassed("/staticfiles"));
        assert_eq!(gate.decide("/assets/logo.png", None, None), GateAction::Proceed);
    }

    #[test]
    fn invalid_config_refused() {
        let result = Gate::new(GateConfig {
            login_path: "/admin/login".to_owned(),
            ..GateConfig::default()
        });
        assert!(matches!(result, Err(ConfigError::ProtectedLoginPath { .. })));
    }

    #[test]
    fn same_input_same_action() {
        let gate = gate();
        let vendor = token(Role::Vendor);
        for path in ["/admin", "/vendor/x", "/dashboard", "/browse"] {
            assert_eq!(
                gate.decide(path, None, Some(&vendor)),
                gate.decide(path, None, Some(&vendor))
            );
            assert_eq!(gate.decide(path, None, None), gate.decide(path, None, None));
        }
    }

    #[test]
    fn return_to_uses_normalized_path() {
        let gate = gate();
        assert_eq!(
            gate.decide("//admin/x", None, None),
            GateAction::RedirectToLogin {
                location: "/login?callbackUrl=%2Fadmin%2Fx".to_owned()
            }
        );
        assert_eq!(
            gate.login_location("//dashboard//orders", Some("page=2")),
            "/login?callbackUrl=%2Fdashboard%2Forders%3Fpage%3D2"
        );
    }
}
