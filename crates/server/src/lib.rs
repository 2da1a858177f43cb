pub mod handler;
pub mod middleware;

use arc_swap::ArcSwap;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::routing::{MethodRouter, get, post};
use axum::{Router, middleware as axum_mw};
use relay_core::config::Config;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Primary mount point of the gateway.
pub const ASSISTANT_PATH: &str = "/assistant";
/// Path used by clients written against the serverless deployment.
pub const LEGACY_ASSISTANT_PATH: &str = "/.netlify/functions/assistant";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
        }
    }
}

fn gateway() -> MethodRouter<AppState> {
    post(handler::assistant::assistant)
        .options(handler::assistant::preflight)
        .fallback(handler::assistant::method_not_allowed)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit_bytes = state.config.load().body_limit_mb * 1024 * 1024;

    let gateway_routes = Router::new()
        .route(ASSISTANT_PATH, gateway())
        .route(LEGACY_ASSISTANT_PATH, gateway())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes));

    // Every response, including 405 and preflight, carries the CORS headers
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    // Compose, then global middleware layers (outer → inner)
    Router::new()
        .route("/health", get(handler::health::health))
        .merge(gateway_routes)
        .layer(axum_mw::from_fn(
            middleware::request_logging::request_logging_middleware,
        ))
        .layer(axum_mw::from_fn(
            middleware::request_context::request_context_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
