// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use leadgate_config::model::ServerConfig;
use leadgate_core::error::LeadError;
use leadgate_intake::LeadIntake;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The pipeline every lead is submitted to.
    pub intake: Arc<LeadIntake>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(intake: Arc<LeadIntake>) -> Self {
        Self {
            intake,
            health: HealthState::new(),
        }
    }
}

/// CORS policy: any origin when `origins` is empty, otherwise only those listed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the gateway router:
/// - POST /api/lead
/// - GET /health
pub fn build_router(config: &ServerConfig, state: GatewayState) -> Router {
    Router::new()
        .route("/api/lead", post(handlers::post_lead))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until `shutdown` is
/// cancelled, then lets in-flight requests finish.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), LeadError> {
    let app = build_router(config, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LeadError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| LeadError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
