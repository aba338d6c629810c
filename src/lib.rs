pub mod client;
pub mod client_ip;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod registry;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rate_limit::SubmissionRateLimiter;
use crate::registry::SubmissionRegistry;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> (Router, SharedState) {
    let state: SharedState = Arc::new(AppState {
        submission_limiter: SubmissionRateLimiter::new(
            config.submit_rate_limit,
            config.submit_rate_window_secs,
        ),
        registry: SubmissionRegistry::new(),
        config,
    });

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size));

    let app = Router::new()
        .merge(routes::compliance_routes())
        .route("/health", axum::routing::get(health))
        .layer(middleware)
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
