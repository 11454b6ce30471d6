// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadgate submit`: push one lead through the pipeline from the shell.
//!
//! Useful for checking webhook and bot credentials without the website.

use clap::Args;
use leadgate_config::model::LeadgateConfig;
use leadgate_core::types::LeadSubmission;
use leadgate_core::LeadError;
use leadgate_gateway::build_intake;

use crate::serve::init_tracing;

/// Lead fields accepted on the command line.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Message text.
    #[arg(long)]
    pub message: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Form name recorded with the lead.
    #[arg(long, default_value = "cli")]
    pub source: String,
    #[arg(long)]
    pub page_url: Option<String>,
}

impl From<SubmitArgs> for LeadSubmission {
    fn from(args: SubmitArgs) -> Self {
        LeadSubmission {
            name: args.name,
            phone: args.phone,
            email: args.email,
            message: Some(args.message),
            page_url: args.page_url,
            user_agent: Some(concat!("leadgate-cli/", env!("CARGO_PKG_VERSION")).to_string()),
            source: Some(args.source),
        }
    }
}

/// Runs the `leadgate submit` command and prints the receipt as JSON.
pub async fn run_submit(config: LeadgateConfig, args: SubmitArgs) -> Result<(), LeadError> {
    init_tracing(&config);

    let intake = build_intake(&config)?;
    let receipt = intake.submit(args.into()).await?;

    let json = serde_json::to_string_pretty(&receipt)
        .map_err(|e| LeadError::Internal(format!("failed to render receipt: {e}")))?;
    println!("{json}");
    Ok(())
}
