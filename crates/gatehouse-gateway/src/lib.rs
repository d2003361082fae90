// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP webhook gateway for the Gatehouse pipeline.
//!
//! Exposes the orchestrator as `POST /api/process-email` for email service
//! provider webhooks, plus an unauthenticated `GET /health` for process
//! supervisors. The response body of the webhook is the orchestrator's
//! result object, unmodified.

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use gatehouse_config::model::GatewayConfig;
use gatehouse_core::GatehouseError;
use gatehouse_pipeline::EmailProcessor;

use crate::auth::{auth_middleware, AuthConfig};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The orchestrator handling each posted email.
    pub processor: Arc<EmailProcessor>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

/// Build the gateway router.
///
/// `/health` is always public; `/api/process-email` sits behind the bearer
/// check when a token is configured.
pub fn build_router(state: GatewayState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/process-email", post(handlers::post_process_email))
        .layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    public_routes.merge(api_routes).layer(CorsLayer::permissive())
}

/// Bind and serve the gateway until the cancellation token is triggered.
pub async fn start_server(
    config: &GatewayConfig,
    processor: Arc<EmailProcessor>,
    cancel: CancellationToken,
) -> Result<(), GatehouseError> {
    let state = GatewayState {
        processor,
        start_time: Instant::now(),
    };
    let auth = AuthConfig {
        bearer_token: config.bearer_token.clone(),
    };
    let router = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GatehouseError::Config(format!("failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| GatehouseError::Internal(format!("gateway server error: {e}")))
}
