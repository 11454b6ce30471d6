// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a Bitrix24 inbound webhook.
//!
//! Every method is a POST of a JSON body to `<webhook_base>/<method>.json`.
//! Responses are classified into a JSON value or an integration error whose
//! message carries the upstream status and a body prefix. No retries.

use std::time::Duration;

use leadgate_config::model::BitrixConfig;
use leadgate_core::error::LeadError;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// How much of an unexpected response body is quoted in errors.
const BODY_PREFIX_CHARS: usize = 200;

/// Low-level Bitrix24 webhook client.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    base_url: String,
}

impl WebhookClient {
    /// Creates a client for `config.webhook_base`.
    ///
    /// An unset or blank base is a configuration error.
    pub fn new(config: &BitrixConfig) -> Result<Self, LeadError> {
        let base = config
            .webhook_base
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| LeadError::Config("bitrix.webhook_base is not set".into()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LeadError::Config(format!("failed to build Bitrix24 HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a REST method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{method}.json", self.base_url)
    }

    /// Calls a REST method and returns the decoded JSON body.
    pub async fn call<B>(&self, method: &str, body: &B) -> Result<Value, LeadError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the webhook access key.
                let e = e.without_url();
                LeadError::Integration {
                    message: format!("Bitrix24 request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let raw = response.text().await.map_err(|e| {
            let e = e.without_url();
            LeadError::Integration {
                message: format!("Bitrix24 response read failed ({status}): {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        debug!(method, status = %status, bytes = raw.len(), "bitrix24 response received");
        classify_response(status, &content_type, &raw)
    }
}

/// Turn a raw webhook response into its JSON body or an integration error.
pub fn classify_response(
    status: StatusCode,
    content_type: &str,
    raw: &str,
) -> Result<Value, LeadError> {
    let reason = status.canonical_reason().unwrap_or_default();

    if !content_type.contains("application/json") {
        let snippet = body_prefix(raw);
        return Err(if status.is_success() {
            LeadError::integration(format!(
                "Bitrix24 non-JSON response ({}): {snippet}",
                status.as_u16()
            ))
        } else {
            let detail = if snippet.is_empty() { reason } else { snippet };
            LeadError::integration(format!("Bitrix24 HTTP {}: {detail}", status.as_u16()))
        });
    }

    let data: Value = if raw.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(raw).map_err(|e| LeadError::Integration {
            message: format!(
                "Bitrix24 parse error ({}): {}",
                status.as_u16(),
                body_prefix(raw)
            ),
            source: Some(Box::new(e)),
        })?
    };

    let upstream_error = data.get("error").filter(|e| !e.is_null());
    if !status.is_success() || upstream_error.is_some() {
        let code = match upstream_error {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => reason.to_string(),
        };
        let message = match data.get("error_description").and_then(Value::as_str) {
            Some(desc) if !desc.is_empty() => format!("Bitrix24 error: {code}: {desc}"),
            _ => format!("Bitrix24 error: {code}"),
        };
        return Err(LeadError::integration(message));
    }

    Ok(data)
}

fn body_prefix(raw: &str) -> &str {
    match raw.char_indices().nth(BODY_PREFIX_CHARS) {
        Some((cut, _)) => &raw[..cut],
        None => raw,
    }
}
