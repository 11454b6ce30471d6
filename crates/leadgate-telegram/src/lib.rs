// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram notification sink for leadgate.
//!
//! Implements [`NotificationSink`] by posting a plain-text lead summary to the
//! Bot API `sendMessage` method. Delivery is best-effort: the intake pipeline
//! logs failures and keeps going.

pub mod message;

use std::time::Duration;

use async_trait::async_trait;
use leadgate_config::model::TelegramConfig;
use leadgate_core::error::LeadError;
use leadgate_core::traits::NotificationSink;
use leadgate_core::types::Lead;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for `sendMessage`.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Error envelope returned by the Bot API.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notification sink implementing [`NotificationSink`].
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
    label: String,
}

impl TelegramNotifier {
    /// Creates a notifier. Requires both `bot_token` and `chat_id`.
    pub fn new(config: &TelegramConfig) -> Result<Self, LeadError> {
        let token = required(config.bot_token.as_deref(), "telegram.bot_token")?;
        let chat_id = required(config.chat_id.as_deref(), "telegram.chat_id")?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LeadError::Config(format!("failed to build Telegram HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{token}/sendMessage",
                config.api_url.trim().trim_end_matches('/')
            ),
            chat_id: chat_id.to_string(),
            label: config.label.clone(),
        })
    }

    /// Creates a notifier only when the token and chat id are both configured.
    pub fn from_config(config: &TelegramConfig) -> Result<Option<Self>, LeadError> {
        if !config.is_enabled() {
            return Ok(None);
        }
        Self::new(config).map(Some)
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, LeadError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LeadError::Config(format!("{key} is required for Telegram notifications")))
}

fn notification_error(message: String, source: Option<reqwest::Error>) -> LeadError {
    LeadError::Notification {
        message,
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, lead: &Lead) -> Result<(), LeadError> {
        let text = message::format_lead(lead, &self.label);
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // The endpoint embeds the bot token.
                let e = e.without_url();
                notification_error(format!("Telegram request failed: {e}"), Some(e))
            })?;

        let status = response.status();
        debug!(status = %status, "telegram sendMessage response received");
        if status.is_success() {
            return Ok(());
        }

        let raw = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiError>(&raw)
            .ok()
            .and_then(|e| e.description)
            .unwrap_or(raw);
        Err(notification_error(
            format!("Telegram API returned {status}: {detail}"),
            None,
        ))
    }
}
