// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock CRM directory for deterministic testing.
//!
//! `MockCrm` implements `CrmDirectory` with scripted duplicate matches, ids
//! handed out from a counter, and every call captured for assertions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leadgate_core::error::LeadError;
use leadgate_core::traits::CrmDirectory;
use leadgate_core::types::{CommType, CrmId, NewContact, NewDeal};

/// One call made against the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrmCall {
    Find { kind: CommType, value: String },
    CreateContact(NewContact),
    CreateDeal(NewDeal),
}

#[derive(Debug, Default)]
struct State {
    existing: HashMap<(CommType, String), CrmId>,
    calls: Vec<CrmCall>,
    next_id: u64,
    fail_find: Option<String>,
    fail_contact: Option<String>,
    fail_deal: Option<String>,
}

/// An in-memory CRM for testing.
///
/// Created contacts are not added to the duplicate index; tests script
/// existing contacts explicitly with [`with_contact`](Self::with_contact).
#[derive(Clone)]
pub struct MockCrm {
    state: Arc<Mutex<State>>,
}

impl MockCrm {
    /// Create an empty directory. The first created id is 100.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_id: 100,
                ..State::default()
            })),
        }
    }

    /// Register an existing contact reachable through `kind`/`value`.
    pub async fn with_contact(self, kind: CommType, value: &str, id: u64) -> Self {
        self.state
            .lock()
            .await
            .existing
            .insert((kind, value.to_string()), CrmId(id));
        self
    }

    /// Make every `find_contact` call fail with `message`.
    pub async fn fail_find(self, message: &str) -> Self {
        self.state.lock().await.fail_find = Some(message.to_string());
        self
    }

    /// Make every `create_contact` call fail with `message`.
    pub async fn fail_contact(self, message: &str) -> Self {
        self.state.lock().await.fail_contact = Some(message.to_string());
        self
    }

    /// Make every `create_deal` call fail with `message`.
    pub async fn fail_deal(self, message: &str) -> Self {
        self.state.lock().await.fail_deal = Some(message.to_string());
        self
    }

    /// All calls made so far.
    pub async fn calls(&self) -> Vec<CrmCall> {
        self.state.lock().await.calls.clone()
    }

    /// Lookups made so far, as `(kind, value)` pairs.
    pub async fn lookups(&self) -> Vec<(CommType, String)> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                CrmCall::Find { kind, value } => Some((kind, value)),
                _ => None,
            })
            .collect()
    }

    /// Contacts created so far.
    pub async fn created_contacts(&self) -> Vec<NewContact> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                CrmCall::CreateContact(contact) => Some(contact),
                _ => None,
            })
            .collect()
    }

    /// Deals created so far.
    pub async fn created_deals(&self) -> Vec<NewDeal> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                CrmCall::CreateDeal(deal) => Some(deal),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockCrm {
    fn default() -> Self {
        Self::new()
    }
}

fn take_id(state: &mut State) -> CrmId {
    let id = CrmId(state.next_id);
    state.next_id += 1;
    id
}

#[async_trait]
impl CrmDirectory for MockCrm {
    fn name(&self) -> &str {
        "mock-crm"
    }

    async fn find_contact(
        &self,
        kind: CommType,
        value: &str,
    ) -> Result<Option<CrmId>, LeadError> {
        let mut state = self.state.lock().await;
        state.calls.push(CrmCall::Find {
            kind,
            value: value.to_string(),
        });
        if let Some(message) = &state.fail_find {
            return Err(LeadError::integration(message.clone()));
        }
        Ok(state.existing.get(&(kind, value.to_string())).copied())
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<CrmId, LeadError> {
        let mut state = self.state.lock().await;
        state.calls.push(CrmCall::CreateContact(contact.clone()));
        if let Some(message) = &state.fail_contact {
            return Err(LeadError::integration(message.clone()));
        }
        Ok(take_id(&mut state))
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<CrmId, LeadError> {
        let mut state = self.state.lock().await;
        state.calls.push(CrmCall::CreateDeal(deal.clone()));
        if let Some(message) = &state.fail_deal {
            return Err(LeadError::integration(message.clone()));
        }
        Ok(take_id(&mut state))
    }
}
