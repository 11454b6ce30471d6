// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete leadgate pipeline.
//!
//! Each test wires the real Telegram and Bitrix24 adapters to wiremock
//! servers and drives the HTTP router without a socket. Mock expectations are
//! verified when the servers drop.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use leadgate_config::model::LeadgateConfig;
use leadgate_gateway::{build_intake, build_router, GatewayState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456789:AAE-test_token_for_the_e2e_suite_000";
const HOOK: &str = "/rest/1/a1b2c3d4e5";

struct Upstreams {
    telegram: MockServer,
    bitrix: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            telegram: MockServer::start().await,
            bitrix: MockServer::start().await,
        }
    }

    fn config(&self) -> LeadgateConfig {
        let mut config = LeadgateConfig::default();
        config.telegram.bot_token = Some(TOKEN.into());
        config.telegram.chat_id = Some("-100200300".into());
        config.telegram.api_url = self.telegram.uri();
        config.bitrix.webhook_base = Some(format!("{}{HOOK}", self.bitrix.uri()));
        config
    }

    async fn telegram_replies(&self, status: u16, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"ok": status == 200})))
            .expect(expected_calls)
            .mount(&self.telegram)
            .await;
    }

    async fn bitrix_method(&self, name: &str, body: Value, reply: Value, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("{HOOK}/{name}.json")))
            .and(body_partial_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(expected_calls)
            .mount(&self.bitrix)
            .await;
    }
}

fn router(config: &LeadgateConfig) -> Router {
    let intake = Arc::new(build_intake(config).unwrap());
    build_router(&config.server, GatewayState::new(intake))
}

async fn post_lead(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/lead")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---- New phone lead ----

#[tokio::test]
async fn new_phone_lead_creates_contact_and_deal() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 1).await;
    up.bitrix_method(
        "crm.duplicate.findbycomm",
        json!({"type": "PHONE", "values": ["+37379021904"]}),
        json!({"result": []}),
        1,
    )
    .await;
    up.bitrix_method(
        "crm.contact.add",
        json!({"fields": {"NAME": "Website lead"}}),
        json!({"result": 101}),
        1,
    )
    .await;
    up.bitrix_method(
        "crm.deal.add",
        json!({
            "fields": {"TITLE": "Website request: +37379021904", "CONTACT_ID": 101},
            "params": {"REGISTER_SONET_EVENT": "Y"}
        }),
        json!({"result": 555}),
        1,
    )
    .await;

    let (status, body) = post_lead(
        router(&up.config()),
        json!({"message": "Need a contract review", "phone": "+37379021904"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "contactId": 101, "dealId": 555}));
}

// ---- Existing contact by email ----

#[tokio::test]
async fn email_match_reuses_contact() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 1).await;
    up.bitrix_method(
        "crm.duplicate.findbycomm",
        json!({"type": "EMAIL", "values": ["ion@example.md"]}),
        json!({"result": {"CONTACT": ["31"]}}),
        1,
    )
    .await;
    up.bitrix_method("crm.contact.add", json!({}), json!({"result": 1}), 0)
        .await;
    up.bitrix_method(
        "crm.deal.add",
        json!({"fields": {"TITLE": "Website request: Ion", "CONTACT_ID": 31}}),
        json!({"result": 556}),
        1,
    )
    .await;

    let (status, body) = post_lead(
        router(&up.config()),
        json!({
            "name": "Ion",
            "email": "ion@example.md",
            "phone": "+37379021904",
            "message": "Consultation"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contactId"], 31);
}

// ---- Validation ----

#[tokio::test]
async fn empty_message_makes_no_outbound_calls() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 0).await;
    up.bitrix_method("crm.duplicate.findbycomm", json!({}), json!({"result": []}), 0)
        .await;

    let (status, body) = post_lead(router(&up.config()), json!({"message": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Message required"}));
}

// ---- Notification is best-effort ----

#[tokio::test]
async fn lead_succeeds_without_telegram_config() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 0).await;
    up.bitrix_method("crm.duplicate.findbycomm", json!({}), json!({"result": []}), 1)
        .await;
    up.bitrix_method("crm.contact.add", json!({}), json!({"result": 7}), 1)
        .await;
    up.bitrix_method("crm.deal.add", json!({}), json!({"result": 8}), 1)
        .await;

    let mut config = up.config();
    config.telegram.bot_token = None;
    config.telegram.chat_id = None;

    let (status, body) = post_lead(
        router(&config),
        json!({"message": "hi", "email": "a@example.md"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "contactId": 7, "dealId": 8}));
}

#[tokio::test]
async fn telegram_failure_does_not_change_result() {
    let up = Upstreams::start().await;
    up.telegram_replies(500, 1).await;
    up.bitrix_method("crm.duplicate.findbycomm", json!({}), json!({"result": []}), 1)
        .await;
    up.bitrix_method("crm.contact.add", json!({}), json!({"result": 7}), 1)
        .await;
    up.bitrix_method("crm.deal.add", json!({}), json!({"result": 8}), 1)
        .await;

    let (status, _) = post_lead(
        router(&up.config()),
        json!({"message": "hi", "phone": "+37379021904"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ---- CRM failures ----

#[tokio::test]
async fn bitrix_error_body_becomes_500() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 1).await;
    up.bitrix_method(
        "crm.duplicate.findbycomm",
        json!({}),
        json!({"error": "ACCESS_DENIED", "error_description": "Access denied."}),
        1,
    )
    .await;

    let (status, body) = post_lead(
        router(&up.config()),
        json!({"message": "hi", "phone": "+37379021904"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Bitrix24 error: ACCESS_DENIED: Access denied."}));
}

#[tokio::test]
async fn missing_webhook_still_notifies_then_fails() {
    let up = Upstreams::start().await;
    up.telegram_replies(200, 1).await;

    let mut config = up.config();
    config.bitrix.webhook_base = None;

    let (status, body) = post_lead(
        router(&config),
        json!({"message": "hi", "phone": "+37379021904"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal error"}));
}
