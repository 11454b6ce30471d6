// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deal creation for a resolved contact.

use std::sync::Arc;

use leadgate_core::error::LeadError;
use leadgate_core::traits::CrmDirectory;
use leadgate_core::types::{or_blank, CrmId, Lead, NewDeal};

/// Used as the title subject when the lead carries no name, phone, or email.
pub const FALLBACK_SUBJECT: &str = "Lead";

/// Who the deal is about: name, else phone, else email.
pub fn deal_subject(lead: &Lead) -> &str {
    [&lead.name, &lead.phone, &lead.email]
        .into_iter()
        .find(|v| !v.is_empty())
        .map(String::as_str)
        .unwrap_or(FALLBACK_SUBJECT)
}

/// Comments attached to a new deal.
pub fn deal_comments(lead: &Lead) -> String {
    format!(
        "Form: {}\nPage: {}\n\nMessage:\n{}",
        or_blank(&lead.source),
        lead.page_url,
        lead.message
    )
}

/// Creates the CRM deal for a lead once its contact is known.
pub struct DealCreator {
    crm: Arc<dyn CrmDirectory>,
    title_prefix: String,
}

impl DealCreator {
    /// Creates a deal builder that prepends `title_prefix` to every title.
    pub fn new(crm: Arc<dyn CrmDirectory>, title_prefix: impl Into<String>) -> Self {
        Self {
            crm,
            title_prefix: title_prefix.into(),
        }
    }

    /// Build the deal for `lead` without sending it.
    pub fn build(&self, lead: &Lead, contact_id: CrmId) -> NewDeal {
        NewDeal {
            title: format!("{}{}", self.title_prefix, deal_subject(lead)),
            contact_id,
            comments: deal_comments(lead),
        }
    }

    /// Build and send the deal, returning the id the CRM assigned.
    pub async fn create(&self, lead: &Lead, contact_id: CrmId) -> Result<CrmId, LeadError> {
        self.crm.create_deal(&self.build(lead, contact_id)).await
    }
}
