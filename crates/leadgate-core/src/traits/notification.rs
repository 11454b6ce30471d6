// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification sink trait for pushing lead summaries to a messaging channel.

use async_trait::async_trait;

use crate::error::LeadError;
use crate::types::Lead;

/// Fire-and-forget destination for new-lead summaries.
///
/// Errors are returned as [`LeadError::Notification`]; callers log them and
/// carry on.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Returns the human-readable name of this sink.
    fn name(&self) -> &str;

    /// Sends a summary of `lead`.
    async fn notify(&self, lead: &Lead) -> Result<(), LeadError>;
}
