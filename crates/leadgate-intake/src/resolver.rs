// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Find-or-create of the CRM contact behind a lead.
//!
//! Email is looked up before phone; the first duplicate wins. Only when both
//! lookups miss is a contact created. Errors propagate unchanged.

use std::sync::Arc;

use leadgate_core::error::LeadError;
use leadgate_core::traits::CrmDirectory;
use leadgate_core::types::{or_blank, ContactResolution, Lead, NewContact};
use tracing::debug;

/// Resolves a lead to a contact id.
pub struct ContactResolver {
    crm: Arc<dyn CrmDirectory>,
    placeholder_name: String,
}

impl ContactResolver {
    /// `placeholder_name` names contacts created for leads without a name.
    pub fn new(crm: Arc<dyn CrmDirectory>, placeholder_name: impl Into<String>) -> Self {
        Self {
            crm,
            placeholder_name: placeholder_name.into(),
        }
    }

    pub async fn resolve(&self, lead: &Lead) -> Result<ContactResolution, LeadError> {
        for (kind, value) in lead.lookup_order() {
            if let Some(contact_id) = self.crm.find_contact(kind, value).await? {
                debug!(%contact_id, matched_by = %kind, "existing contact matched");
                return Ok(ContactResolution {
                    contact_id,
                    matched_by: Some(kind),
                    created: false,
                });
            }
        }

        let contact = self.new_contact(lead);
        let contact_id = self.crm.create_contact(&contact).await?;
        debug!(%contact_id, "contact created");
        Ok(ContactResolution {
            contact_id,
            matched_by: None,
            created: true,
        })
    }

    fn new_contact(&self, lead: &Lead) -> NewContact {
        let name = if lead.name.is_empty() {
            self.placeholder_name.clone()
        } else {
            lead.name.clone()
        };
        let present = |v: &str| {
            if v.is_empty() {
                Vec::new()
            } else {
                vec![v.to_string()]
            }
        };
        NewContact {
            name,
            phones: present(&lead.phone),
            emails: present(&lead.email),
            comments: contact_comments(lead),
        }
    }
}

/// Comments attached to a newly created contact.
pub fn contact_comments(lead: &Lead) -> String {
    format!(
        "Source: website\nForm: {}\nPage: {}\nUA: {}\n\nMessage:\n{}",
        or_blank(&lead.source),
        lead.page_url,
        lead.user_agent,
        lead.message
    )
}
