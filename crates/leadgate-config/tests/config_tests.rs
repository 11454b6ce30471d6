// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the leadgate configuration system.

use figment::{
    providers::{Format, Serialized, Toml},
    Figment, Jail,
};
use leadgate_config::diagnostic::ConfigError;
use leadgate_config::loader::{env_provider, legacy_env_provider};
use leadgate_config::model::LeadgateConfig;
use leadgate_config::{load_and_validate_str, load_config_from_str};

fn figment_with_env() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadgateConfig::default()))
        .merge(env_provider())
        .merge(legacy_env_provider())
}

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_leadgate_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
max_body_bytes = 16384
cors_allowed_origins = ["https://legal.example.md"]

[log]
level = "debug"
json = true

[telegram]
bot_token = "123:ABC"
chat_id = -1001234567890
label = "Legal site"
timeout_secs = 10

[bitrix]
webhook_base = "https://portal.bitrix24.ru/rest/1/abc123"
contact_placeholder_name = "Site visitor"
deal_title_prefix = "Request: "
deal_stage_id = "C2:NEW"
deal_category_id = 2
register_sonet_event = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 16384);
    assert_eq!(config.server.cors_allowed_origins, vec!["https://legal.example.md"]);
    assert_eq!(config.log.level, "debug");
    assert!(config.log.json);
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.telegram.chat_id.as_deref(), Some("-1001234567890"));
    assert_eq!(config.telegram.label, "Legal site");
    assert_eq!(config.telegram.timeout_secs, Some(10));
    assert_eq!(
        config.bitrix.webhook_base.as_deref(),
        Some("https://portal.bitrix24.ru/rest/1/abc123")
    );
    assert_eq!(config.bitrix.contact_placeholder_name, "Site visitor");
    assert_eq!(config.bitrix.deal_title_prefix, "Request: ");
    assert_eq!(config.bitrix.deal_stage_id.as_deref(), Some("C2:NEW"));
    assert_eq!(config.bitrix.deal_category_id, Some(2));
    assert!(!config.bitrix.register_sonet_event);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.max_body_bytes, 65536);
    assert!(config.server.cors_allowed_origins.is_empty());
    assert_eq!(config.log.level, "info");
    assert!(!config.log.json);
    assert!(config.telegram.bot_token.is_none());
    assert!(config.telegram.chat_id.is_none());
    assert_eq!(config.telegram.api_url, "https://api.telegram.org");
    assert_eq!(config.telegram.label, "website");
    assert!(config.bitrix.webhook_base.is_none());
    assert_eq!(config.bitrix.contact_placeholder_name, "Website lead");
    assert_eq!(config.bitrix.deal_title_prefix, "Website request: ");
    assert!(config.bitrix.register_sonet_event);
    assert!(config.bitrix.timeout_secs.is_none());
}

/// Unknown field in [bitrix] is rejected.
#[test]
fn unknown_field_in_bitrix_produces_error() {
    let toml = r#"
[bitrix]
webhok_base = "https://portal.bitrix24.ru/rest/1/abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("webhok_base"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[crm]
url = "https://example.com"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("crm"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// The original deployment variables are honoured.
#[test]
fn legacy_env_vars_map_to_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("TG_BOT_TOKEN", "123456:legacy-token");
        jail.set_env("TG_CHAT_ID", "-1009876");
        jail.set_env("B24_WEBHOOK_BASE", "https://portal.bitrix24.ru/rest/7/key");

        let config: LeadgateConfig = figment_with_env().extract()?;
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:legacy-token"));
        assert_eq!(config.telegram.chat_id.as_deref(), Some("-1009876"));
        assert_eq!(
            config.bitrix.webhook_base.as_deref(),
            Some("https://portal.bitrix24.ru/rest/7/key")
        );
        assert!(config.telegram.is_enabled());
        Ok(())
    });
}

/// `LEADGATE_BITRIX_WEBHOOK_BASE` maps to bitrix.webhook_base (not bitrix.webhook.base).
#[test]
fn prefixed_env_vars_keep_underscored_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("LEADGATE_BITRIX_WEBHOOK_BASE", "https://p.bitrix24.ru/rest/1/k");
        jail.set_env("LEADGATE_SERVER_PORT", "8081");
        jail.set_env("LEADGATE_LOG_LEVEL", "debug");
        jail.set_env("LEADGATE_TELEGRAM_CHAT_ID", "42");

        let config: LeadgateConfig = figment_with_env().extract()?;
        assert_eq!(
            config.bitrix.webhook_base.as_deref(),
            Some("https://p.bitrix24.ru/rest/1/k")
        );
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.telegram.chat_id.as_deref(), Some("42"));
        Ok(())
    });
}

/// Legacy variables win over prefixed ones and over TOML files.
#[test]
fn legacy_env_overrides_toml_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "leadgate.toml",
            "[bitrix]\nwebhook_base = \"https://from-file/rest/1/a\"\n",
        )?;
        jail.set_env("B24_WEBHOOK_BASE", "https://from-env/rest/1/b");

        let config: LeadgateConfig = Figment::new()
            .merge(Serialized::defaults(LeadgateConfig::default()))
            .merge(Toml::file("leadgate.toml"))
            .merge(env_provider())
            .merge(legacy_env_provider())
            .extract()?;
        assert_eq!(
            config.bitrix.webhook_base.as_deref(),
            Some("https://from-env/rest/1/b")
        );
        Ok(())
    });
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    let config: LeadgateConfig = Figment::new()
        .merge(Serialized::defaults(LeadgateConfig::default()))
        .merge(Toml::file("/nonexistent/path/leadgate.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.server.port, 3000);
}

/// Unknown key in [telegram] suggests the closest valid key.
#[test]
fn diagnostic_error_suggests_valid_key() {
    let toml = r#"
[telegram]
bot_tokn = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "bot_tokn"
                && suggestion.as_deref() == Some("bot_token")
                && valid_keys.contains("chat_id")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'bot_tokn' with suggestion, got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "expected InvalidType for server.port, got: {errors:?}"
    );
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "webhok_base".to_string(),
        suggestion: Some("webhook_base".to_string()),
        valid_keys: "webhook_base, deal_title_prefix".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `webhook_base`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("webhok_base"));
}

/// Validation runs after a successful parse.
#[test]
fn validation_catches_bad_log_level() {
    let toml = r#"
[log]
level = "loud"
"#;

    let errors = load_and_validate_str(toml).expect_err("bad level should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("log.level"))
    ));
}

#[test]
fn load_and_validate_valid_toml() {
    let config = load_and_validate_str("[server]\nport = 4000\n").expect("should validate");
    assert_eq!(config.server.port, 4000);
}
