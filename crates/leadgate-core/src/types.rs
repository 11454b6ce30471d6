// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead, contact, and deal types shared across adapters and the pipeline.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// Placeholder rendered for blank optional fields in notifications and comments.
pub const BLANK: &str = "-";

/// Returns `value`, or [`BLANK`] when it is empty.
pub fn or_blank(value: &str) -> &str {
    if value.is_empty() { BLANK } else { value }
}

/// A contact-form submission exactly as the browser sent it.
///
/// Every field is optional on the wire; a missing `message` is reported by the
/// validator rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Name of the modal or form the lead came from.
    #[serde(default)]
    pub source: Option<String>,
}

/// A validated, trimmed lead.
///
/// Absent fields are empty strings. `message` is never empty and at least one
/// of `phone`/`email` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub page_url: String,
    pub user_agent: String,
    pub source: String,
}

impl Lead {
    /// The communication values to look up, in priority order.
    pub fn lookup_order(&self) -> Vec<(CommType, &str)> {
        let mut order = Vec::with_capacity(2);
        if !self.email.is_empty() {
            order.push((CommType::Email, self.email.as_str()));
        }
        if !self.phone.is_empty() {
            order.push((CommType::Phone, self.phone.as_str()));
        }
        order
    }
}

/// Communication channel used by the CRM duplicate-finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CommType {
    Email,
    Phone,
}

/// Identifier assigned by the CRM to a contact or deal.
///
/// Bitrix24 returns ids as numbers from `*.add` and as numbers or numeric
/// strings from other methods; both forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CrmId(pub u64);

impl CrmId {
    /// Parse an id from an arbitrary JSON value, if it holds one.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().map(CrmId),
            serde_json::Value::String(s) => s.trim().parse().ok().map(CrmId),
            _ => None,
        }
    }
}

impl fmt::Display for CrmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CrmId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        CrmId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid CRM id: {value}")))
    }
}

/// Fields for a contact to be created in the CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub comments: String,
}

/// Fields for a deal to be created in the CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeal {
    pub title: String,
    pub contact_id: CrmId,
    pub comments: String,
}

/// Outcome of the find-or-create contact step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactResolution {
    pub contact_id: CrmId,
    /// Channel that matched an existing contact, `None` when one was created.
    pub matched_by: Option<CommType>,
    pub created: bool,
}

/// Result of a successfully processed lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    pub contact_id: CrmId,
    pub deal_id: CrmId,
    pub contact_created: bool,
}

/// Stages a lead passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IntakeStage {
    Received,
    Validated,
    Notified,
    ContactResolved,
    DealCreated,
    Responded,
}
