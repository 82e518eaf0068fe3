#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Access gate for the AI tools marketplace.
//!
//! Every request is classified by path into a [`ProtectionLevel`], evaluated
//! against the caller's [`IdentityToken`](marketplace_security::IdentityToken)
//! and then either passed through, redirected to login, or rejected with `403`.
//!
//! Layering, outermost first:
//! request id -> trace -> [`identity::identity_middleware`] -> [`gate::gate_middleware`] -> router

pub mod classifier;
pub mod config;
pub mod gate;
pub mod identity;
pub mod policy;
pub mod problem;
pub mod stack;

pub use classifier::{ProtectionLevel, RouteRule, RouteTable};
pub use config::{ConfigError, GateConfig};
pub use gate::{Gate, GateAction, gate_middleware};
pub use identity::{CurrentIdentity, IdentityState, identity_middleware};
pub use policy::{AccessDenied, Verdict, evaluate};
pub use problem::Problem;
pub use stack::apply_middleware_stack;
