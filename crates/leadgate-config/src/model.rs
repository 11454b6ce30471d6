// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for leadgate.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used when printing secrets.
pub const REDACTED: &str = "[redacted]";

/// Top-level leadgate configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadgateConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Telegram new-lead notifications.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Bitrix24 CRM webhook settings.
    #[serde(default)]
    pub bitrix: BitrixConfig,
}

impl LeadgateConfig {
    /// Returns a copy with every secret replaced, suitable for printing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.telegram.bot_token.is_some() {
            copy.telegram.bot_token = Some(REDACTED.to_string());
        }
        copy.bitrix.webhook_base = copy.bitrix.webhook_base.as_deref().map(redact_webhook);
        copy
    }

    /// Secret values that must never reach log output.
    pub fn secrets(&self) -> Vec<String> {
        let mut secrets = Vec::new();
        if let Some(token) = self.telegram.bot_token.as_deref().filter(|t| !t.is_empty()) {
            secrets.push(token.to_string());
        }
        if let Some(base) = self.bitrix.webhook_base.as_deref().filter(|b| !b.is_empty()) {
            secrets.push(base.trim_end_matches('/').to_string());
        }
        secrets
    }
}

/// Keep the portal and user segment of a webhook URL, hide the access key.
fn redact_webhook(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) if idx > trimmed.find("://").map(|i| i + 2).unwrap_or(0) => {
            format!("{}/{REDACTED}", &trimmed[..idx])
        }
        _ => REDACTED.to_string(),
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram notification configuration.
///
/// Notifications are enabled only when both `bot_token` and `chat_id` are set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Destination chat or channel id. Numeric ids may be given unquoted.
    #[serde(default, deserialize_with = "string_or_int")]
    pub chat_id: Option<String>,

    /// Bot API base URL.
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,

    /// Site label shown in the notification header.
    #[serde(default = "default_telegram_label")]
    pub label: String,

    /// Explicit request timeout. `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TelegramConfig {
    /// True when both the token and the chat id are present and non-empty.
    pub fn is_enabled(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.bot_token) && filled(&self.chat_id)
    }

    /// True when exactly one of the token and chat id is set.
    pub fn is_half_configured(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.bot_token) != filled(&self.chat_id)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_url: default_telegram_api_url(),
            label: default_telegram_label(),
            timeout_secs: None,
        }
    }
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_telegram_label() -> String {
    "website".to_string()
}

/// Bitrix24 CRM configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BitrixConfig {
    /// Inbound webhook base, e.g. `https://portal.bitrix24.ru/rest/1/<key>`.
    /// `None` fails every lead with a configuration error.
    #[serde(default)]
    pub webhook_base: Option<String>,

    /// Contact name used when the lead gave none.
    #[serde(default = "default_contact_placeholder_name")]
    pub contact_placeholder_name: String,

    /// Prefix of every deal title.
    #[serde(default = "default_deal_title_prefix")]
    pub deal_title_prefix: String,

    /// Pipeline stage for new deals. `None` leaves the CRM default.
    #[serde(default)]
    pub deal_stage_id: Option<String>,

    /// Pipeline (category) for new deals. `None` leaves the CRM default.
    #[serde(default)]
    pub deal_category_id: Option<u32>,

    /// Post new deals to the CRM activity stream.
    #[serde(default = "default_register_sonet_event")]
    pub register_sonet_event: bool,

    /// Explicit request timeout. `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BitrixConfig {
    fn default() -> Self {
        Self {
            webhook_base: None,
            contact_placeholder_name: default_contact_placeholder_name(),
            deal_title_prefix: default_deal_title_prefix(),
            deal_stage_id: None,
            deal_category_id: None,
            register_sonet_event: default_register_sonet_event(),
            timeout_secs: None,
        }
    }
}

fn default_contact_placeholder_name() -> String {
    "Website lead".to_string()
}

fn default_deal_title_prefix() -> String {
    "Website request: ".to_string()
}

fn default_register_sonet_event() -> bool {
    true
}

/// Accept `chat_id = -100123` as well as `chat_id = "-100123"`.
///
/// Environment values are parsed by figment, so a numeric `TG_CHAT_ID` arrives
/// as an integer.
fn string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
    }))
}
