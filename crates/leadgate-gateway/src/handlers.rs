// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /api/lead and GET /health.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use leadgate_core::error::LeadError;
use leadgate_core::types::{CrmId, LeadSubmission};

use crate::server::GatewayState;

/// Body returned for a body that is not a JSON lead.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// Response body for a processed lead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub ok: bool,
    pub contact_id: CrmId,
    pub deal_id: CrmId,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
    pub notifications_enabled: bool,
    pub crm_configured: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Adapter mapping [`LeadError`] onto an HTTP response.
pub struct GatewayError(pub LeadError);

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, self.0.public_message())
    }
}

/// Fill `field` from a request header when the payload left it blank.
fn fill_from_header(field: &mut Option<String>, headers: &HeaderMap, name: header::HeaderName) {
    if field.as_deref().is_some_and(|v| !v.trim().is_empty()) {
        return;
    }
    if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
        *field = Some(value.to_string());
    }
}

/// POST /api/lead
///
/// Parses the body as a lead regardless of content type, fills `userAgent`
/// and `pageUrl` from the request headers when missing, and runs the intake
/// pipeline.
pub async fn post_lead(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "lead body rejected");
            let status = rejection.status();
            return if status == StatusCode::PAYLOAD_TOO_LARGE {
                error_response(status, "Request body too large")
            } else {
                error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE)
            };
        }
    };

    let mut submission: LeadSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "lead body is not valid JSON");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };
    fill_from_header(&mut submission.user_agent, &headers, header::USER_AGENT);
    fill_from_header(&mut submission.page_url, &headers, header::REFERER);

    match state.intake.submit(submission).await {
        Ok(receipt) => Json(LeadResponse {
            ok: true,
            contact_id: receipt.contact_id,
            deal_id: receipt.deal_id,
        })
        .into_response(),
        Err(e) => GatewayError(e).into_response(),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        notifications_enabled: state.intake.notifications_enabled(),
        crm_configured: state.intake.crm_configured(),
    })
}
