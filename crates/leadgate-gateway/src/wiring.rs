// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the intake pipeline from configuration.
//!
//! Missing integrations are not fatal here: an unset CRM webhook or an
//! incomplete Telegram pair is logged and the pipeline runs without it.

use std::sync::Arc;

use leadgate_bitrix::BitrixClient;
use leadgate_config::model::LeadgateConfig;
use leadgate_core::error::LeadError;
use leadgate_core::traits::{CrmDirectory, NotificationSink};
use leadgate_intake::{IntakeOptions, LeadIntake};
use leadgate_telegram::TelegramNotifier;
use tracing::{info, warn};

/// Construct a [`LeadIntake`] with the Bitrix24 and Telegram adapters the
/// configuration enables.
pub fn build_intake(config: &LeadgateConfig) -> Result<LeadIntake, LeadError> {
    let webhook_set = config
        .bitrix
        .webhook_base
        .as_deref()
        .is_some_and(|b| !b.trim().is_empty());
    let crm: Option<Arc<dyn CrmDirectory>> = if webhook_set {
        Some(Arc::new(BitrixClient::new(&config.bitrix)?))
    } else {
        warn!("bitrix.webhook_base is not set; every lead will fail until it is configured");
        None
    };

    if config.telegram.is_half_configured() {
        warn!("telegram needs both bot_token and chat_id; notifications disabled");
    }
    let notifier: Option<Arc<dyn NotificationSink>> = match TelegramNotifier::from_config(
        &config.telegram,
    )? {
        Some(notifier) => Some(Arc::new(notifier)),
        None => {
            info!("telegram notifications disabled");
            None
        }
    };

    Ok(LeadIntake::new(
        crm,
        notifier,
        IntakeOptions::from(&config.bitrix),
    ))
}
