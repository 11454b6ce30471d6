// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRM directory trait for contact lookup and contact/deal creation.

use async_trait::async_trait;

use crate::error::LeadError;
use crate::types::{CommType, CrmId, NewContact, NewDeal};

/// Adapter for the CRM system of record.
///
/// Implementations never update existing records; they only look contacts up
/// and create contacts and deals. Every failure is reported as
/// [`LeadError::Integration`].
#[async_trait]
pub trait CrmDirectory: Send + Sync + 'static {
    /// Returns the human-readable name of this CRM adapter.
    fn name(&self) -> &str;

    /// Looks up an existing contact by an exact communication value.
    ///
    /// When the CRM reports several duplicates, the first one wins.
    async fn find_contact(&self, kind: CommType, value: &str)
        -> Result<Option<CrmId>, LeadError>;

    /// Creates a contact and returns its id.
    async fn create_contact(&self, contact: &NewContact) -> Result<CrmId, LeadError>;

    /// Creates a deal linked to a contact and returns its id.
    async fn create_deal(&self, deal: &NewDeal) -> Result<CrmId, LeadError>;
}
