#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Marketplace HTTP server: config, logging and the gated router.

pub mod config;
pub mod logging;
pub mod routes;

pub use config::AppConfig;
pub use routes::build_app;
