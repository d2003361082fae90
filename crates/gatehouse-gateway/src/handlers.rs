// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gatehouse_core::RawEmail;

use crate::GatewayState;

/// Request body for POST /api/process-email, as email service providers
/// deliver it. `text` is preferred over `html` when both are present.
#[derive(Debug, Deserialize)]
pub struct IncomingEmail {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: String,
}

/// Error response body for malformed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /api/process-email
///
/// Runs the orchestrator on the posted email and returns its result object
/// verbatim: 200 on success, 400 on a terminal failure. The body shape is
/// the compatibility contract with existing webhook callers.
pub async fn post_process_email(
    State(state): State<GatewayState>,
    Json(body): Json<IncomingEmail>,
) -> Response {
    let content = if body.text.is_empty() {
        body.html.clone()
    } else {
        body.text.clone()
    };

    if body.from.is_empty() || content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required fields: from, and email content".to_string(),
            }),
        )
            .into_response();
    }

    info!(from = %body.from, subject = %body.subject, "processing webhook email");

    let email = RawEmail {
        from: body.from,
        subject: body.subject,
        content,
    };
    let report = state.processor.process(&email).await;

    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(report)).into_response()
}

/// GET /health — unauthenticated liveness endpoint.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
