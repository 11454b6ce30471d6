// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bitrix24 CRM adapter for leadgate.
//!
//! Implements [`CrmDirectory`] on top of a Bitrix24 inbound webhook using
//! three REST methods: `crm.duplicate.findbycomm`, `crm.contact.add`, and
//! `crm.deal.add`.

pub mod client;
pub mod types;

use async_trait::async_trait;
use leadgate_config::model::BitrixConfig;
use leadgate_core::error::LeadError;
use leadgate_core::traits::CrmDirectory;
use leadgate_core::types::{CommType, CrmId, NewContact, NewDeal};
use serde_json::Value;
use tracing::debug;

pub use client::WebhookClient;
use types::{AddRequest, ContactFields, DealFields, DealParams, FindByComm, Multifield};

/// Bitrix24 adapter implementing [`CrmDirectory`].
#[derive(Debug, Clone)]
pub struct BitrixClient {
    webhook: WebhookClient,
    register_sonet_event: bool,
    deal_stage_id: Option<String>,
    deal_category_id: Option<u32>,
}

impl BitrixClient {
    /// Creates the adapter. Fails with [`LeadError::Config`] when
    /// `webhook_base` is unset.
    pub fn new(config: &BitrixConfig) -> Result<Self, LeadError> {
        Ok(Self {
            webhook: WebhookClient::new(config)?,
            register_sonet_event: config.register_sonet_event,
            deal_stage_id: config
                .deal_stage_id
                .clone()
                .filter(|s| !s.trim().is_empty()),
            deal_category_id: config.deal_category_id,
        })
    }
}

/// Pull the id out of an `*.add` response.
fn created_id(data: &Value, missing: &str) -> Result<CrmId, LeadError> {
    data.get("result")
        .and_then(CrmId::from_json)
        .ok_or_else(|| LeadError::integration(missing))
}

#[async_trait]
impl CrmDirectory for BitrixClient {
    fn name(&self) -> &str {
        "bitrix24"
    }

    async fn find_contact(
        &self,
        kind: CommType,
        value: &str,
    ) -> Result<Option<CrmId>, LeadError> {
        let body = FindByComm {
            kind,
            values: [value],
        };
        let data = self.webhook.call(types::FIND_BY_COMM, &body).await?;

        // No duplicates comes back as `"result": []`.
        let found = data
            .get("result")
            .and_then(|r| r.get("CONTACT"))
            .and_then(Value::as_array)
            .and_then(|ids| ids.first())
            .and_then(CrmId::from_json);
        debug!(kind = %kind, found = ?found, "duplicate lookup finished");
        Ok(found)
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<CrmId, LeadError> {
        let body = AddRequest {
            fields: ContactFields {
                name: &contact.name,
                phone: Multifield::work(&contact.phones),
                email: Multifield::work(&contact.emails),
                comments: &contact.comments,
            },
            params: None,
        };
        let data = self.webhook.call(types::CONTACT_ADD, &body).await?;
        created_id(&data, "Bitrix contactId missing")
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<CrmId, LeadError> {
        let body = AddRequest {
            fields: DealFields {
                title: &deal.title,
                contact_id: deal.contact_id,
                comments: &deal.comments,
                stage_id: self.deal_stage_id.as_deref(),
                category_id: self.deal_category_id,
            },
            params: Some(DealParams::new(self.register_sonet_event)),
        };
        let data = self.webhook.call(types::DEAL_ADD, &body).await?;
        created_id(&data, "Bitrix dealId missing")
    }
}
