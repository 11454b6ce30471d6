// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification sink that captures leads.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leadgate_core::error::LeadError;
use leadgate_core::traits::NotificationSink;
use leadgate_core::types::Lead;

/// Records every lead passed to `notify()`, optionally failing each call.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Lead>>>,
    failure: Option<String>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call fails with `message` (after recording the lead).
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Leads passed to `notify()` so far.
    pub async fn sent(&self) -> Vec<Lead> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl NotificationSink for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
    }

    async fn notify(&self, lead: &Lead) -> Result<(), LeadError> {
        self.sent.lock().await.push(lead.clone());
        match &self.failure {
            Some(message) => Err(LeadError::Notification {
                message: message.clone(),
                source: None,
            }),
            None => Ok(()),
        }
    }
}
