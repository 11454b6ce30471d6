// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: bindable hosts, URL
//! schemes, positive limits, known log levels.

use crate::diagnostic::ConfigError;
use crate::model::LeadgateConfig;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LeadgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must not be 0".to_string());
    }

    if config.server.max_body_bytes == 0 {
        fail("server.max_body_bytes must be greater than 0".to_string());
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "log.level `{}` is not one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if !is_http_url(&config.telegram.api_url) {
        fail(format!(
            "telegram.api_url `{}` must start with http:// or https://",
            config.telegram.api_url
        ));
    }

    if let Some(base) = config.bitrix.webhook_base.as_deref() {
        // The value embeds the access key, so it is never echoed back.
        if !base.trim().is_empty() && !is_http_url(base) {
            fail("bitrix.webhook_base must start with http:// or https://".to_string());
        }
    }

    for (key, timeout) in [
        ("telegram.timeout_secs", config.telegram.timeout_secs),
        ("bitrix.timeout_secs", config.bitrix.timeout_secs),
    ] {
        if timeout == Some(0) {
            fail(format!("{key} must be greater than 0 when set"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("https://") || value.starts_with("http://")
}
