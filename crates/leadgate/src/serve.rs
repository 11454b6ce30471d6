// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadgate serve` and shared process setup.

use std::sync::{Arc, RwLock};

use leadgate_config::model::{LeadgateConfig, LogConfig};
use leadgate_core::LeadError;
use leadgate_gateway::{build_intake, start_server, GatewayState};
use leadgate_security::{RedactingMakeWriter, SecretList};
use tracing::info;

use crate::shutdown;

/// Runs the `leadgate serve` command.
///
/// Builds the pipeline from `config` and serves HTTP until SIGINT or SIGTERM.
pub async fn run_serve(config: LeadgateConfig) -> Result<(), LeadError> {
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "starting leadgate serve"
    );

    let intake = Arc::new(build_intake(&config)?);
    let state = GatewayState::new(intake);
    let shutdown = shutdown::install_signal_handler();

    start_server(&config.server, state, shutdown).await?;

    info!("leadgate serve stopped");
    Ok(())
}

fn default_directives(log: &LogConfig) -> String {
    let level = log.level.trim().to_ascii_lowercase();
    format!("leadgate={level},tower_http={level},warn")
}

fn env_filter(log: &LogConfig) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(log)))
}

/// Installs the global subscriber. Output passes through the redacting
/// writer, seeded with the configured secrets.
pub fn init_tracing(config: &LeadgateConfig) {
    let secrets: SecretList = Arc::new(RwLock::new(config.secrets()));
    let writer = RedactingMakeWriter::new(secrets);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log))
        .with_target(true)
        .with_thread_names(false)
        .with_writer(writer);

    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
