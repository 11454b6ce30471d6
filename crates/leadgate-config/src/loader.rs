// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leadgate.toml` > `~/.config/leadgate/leadgate.toml`
//! > `/etc/leadgate/leadgate.toml`, with `LEADGATE_` environment overrides and
//! the deployment's historical `TG_*` / `B24_*` variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LeadgateConfig;

/// Environment variables recognized without the `LEADGATE_` prefix.
pub const LEGACY_ENV_VARS: [&str; 3] = ["TG_BOT_TOKEN", "TG_CHAT_ID", "B24_WEBHOOK_BASE"];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/leadgate/leadgate.toml";

/// Top-level sections addressable through `LEADGATE_<SECTION>_<KEY>`.
const SECTIONS: [&str; 4] = ["server", "log", "telegram", "bitrix"];

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "leadgate.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadgate/leadgate.toml`
/// 3. `~/.config/leadgate/leadgate.toml`
/// 4. `./leadgate.toml`
/// 5. `LEADGATE_*` environment variables
/// 6. `TG_BOT_TOKEN`, `TG_CHAT_ID`, `B24_WEBHOOK_BASE`
pub fn load_config() -> Result<LeadgateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LeadgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(legacy_env_provider())
        .extract()
}

/// Build the Figment used for the XDG lookup, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadgateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
        .merge(legacy_env_provider())
}

/// `~/.config/leadgate/leadgate.toml`, when a config dir exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("leadgate").join(LOCAL_CONFIG_FILE))
}

/// `LEADGATE_*` variables, mapped section-first.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `LEADGATE_BITRIX_WEBHOOK_BASE`
/// must become `bitrix.webhook_base`, not `bitrix.webhook.base`.
pub fn env_provider() -> Env {
    Env::prefixed("LEADGATE_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        match key.split_once('_') {
            Some((section, rest)) if SECTIONS.contains(&section) => {
                format!("{section}.{rest}").into()
            }
            _ => key.into(),
        }
    })
}

/// The unprefixed variable names the site was originally deployed with.
pub fn legacy_env_provider() -> Env {
    Env::raw().only(&LEGACY_ENV_VARS).map(|key| {
        let mapped = match key.as_str().to_ascii_lowercase().as_str() {
            "tg_bot_token" => "telegram.bot_token",
            "tg_chat_id" => "telegram.chat_id",
            "b24_webhook_base" => "bitrix.webhook_base",
            other => return other.to_string().into(),
        };
        mapped.into()
    })
}
