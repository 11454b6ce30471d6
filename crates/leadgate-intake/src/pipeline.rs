// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lead intake pipeline.
//!
//! A submission moves through the [`IntakeStage`]s in order: it is validated,
//! announced to the notification sink (best-effort), resolved to a CRM
//! contact, and attached to a new deal. Nothing is retried and nothing is
//! rolled back; a failure after notification leaves the notification sent.

use std::sync::Arc;

use leadgate_config::model::BitrixConfig;
use leadgate_core::error::LeadError;
use leadgate_core::traits::{CrmDirectory, NotificationSink};
use leadgate_core::types::{IntakeStage, Lead, LeadReceipt, LeadSubmission};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::deal::DealCreator;
use crate::resolver::ContactResolver;
use crate::validate;

/// Wording knobs for the records the pipeline creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOptions {
    pub contact_placeholder_name: String,
    pub deal_title_prefix: String,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self::from(&BitrixConfig::default())
    }
}

impl From<&BitrixConfig> for IntakeOptions {
    fn from(config: &BitrixConfig) -> Self {
        Self {
            contact_placeholder_name: config.contact_placeholder_name.clone(),
            deal_title_prefix: config.deal_title_prefix.clone(),
        }
    }
}

struct CrmSteps {
    name: String,
    resolver: ContactResolver,
    deals: DealCreator,
}

/// Runs submissions through validation, notification, and the CRM.
///
/// Holds only immutable, shared handles; one instance serves every request.
pub struct LeadIntake {
    crm: Option<CrmSteps>,
    notifier: Option<Arc<dyn NotificationSink>>,
}

impl LeadIntake {
    /// `crm` is `None` when no CRM is configured; every valid lead then fails
    /// with [`LeadError::Config`] after the notification step.
    pub fn new(
        crm: Option<Arc<dyn CrmDirectory>>,
        notifier: Option<Arc<dyn NotificationSink>>,
        options: IntakeOptions,
    ) -> Self {
        let crm = crm.map(|crm| CrmSteps {
            name: crm.name().to_string(),
            resolver: ContactResolver::new(Arc::clone(&crm), options.contact_placeholder_name),
            deals: DealCreator::new(crm, options.deal_title_prefix),
        });
        Self { crm, notifier }
    }

    pub fn crm_configured(&self) -> bool {
        self.crm.is_some()
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Process one submission end to end.
    ///
    /// Every log line emitted while processing carries a fresh `lead_id`.
    pub async fn submit(&self, submission: LeadSubmission) -> Result<LeadReceipt, LeadError> {
        let lead_id = Uuid::new_v4();
        self.run(submission)
            .instrument(info_span!("lead", %lead_id))
            .await
    }

    async fn run(&self, submission: LeadSubmission) -> Result<LeadReceipt, LeadError> {
        debug!(stage = %IntakeStage::Received, "lead received");

        let lead = match validate::normalize(submission) {
            Ok(lead) => lead,
            Err(e) => {
                info!(error = %e, "lead rejected");
                return Err(e.into());
            }
        };
        debug!(
            stage = %IntakeStage::Validated,
            has_phone = !lead.phone.is_empty(),
            has_email = !lead.email.is_empty(),
            source = %lead.source,
            "lead validated"
        );

        self.notify(&lead).await;

        let Some(crm) = &self.crm else {
            error!("CRM webhook is not configured, lead dropped");
            return Err(LeadError::Config("bitrix.webhook_base is not set".into()));
        };

        let contact = crm.resolver.resolve(&lead).await.inspect_err(|e| {
            error!(crm = %crm.name, error = %e, "contact resolution failed");
        })?;
        debug!(
            stage = %IntakeStage::ContactResolved,
            contact_id = %contact.contact_id,
            created = contact.created,
            "contact resolved"
        );

        let deal_id = crm
            .deals
            .create(&lead, contact.contact_id)
            .await
            .inspect_err(|e| {
                error!(crm = %crm.name, error = %e, "deal creation failed");
            })?;
        debug!(stage = %IntakeStage::DealCreated, %deal_id, "deal created");

        info!(
            stage = %IntakeStage::Responded,
            contact_id = %contact.contact_id,
            %deal_id,
            contact_created = contact.created,
            "lead accepted"
        );
        Ok(LeadReceipt {
            contact_id: contact.contact_id,
            deal_id,
            contact_created: contact.created,
        })
    }

    /// Best-effort: failures are logged and swallowed.
    async fn notify(&self, lead: &Lead) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        match notifier.notify(lead).await {
            Ok(()) => debug!(
                stage = %IntakeStage::Notified,
                sink = notifier.name(),
                "notification sent"
            ),
            Err(e) => warn!(sink = notifier.name(), error = %e, "notification failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgate_core::error::ValidationError;
    use leadgate_core::types::{CommType, CrmId};
    use leadgate_test_utils::{MockCrm, MockNotifier};

    fn submission(message: &str, phone: &str, email: &str) -> LeadSubmission {
        LeadSubmission {
            message: Some(message.into()),
            phone: Some(phone.into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    fn intake(crm: &MockCrm, notifier: &MockNotifier) -> LeadIntake {
        LeadIntake::new(
            Some(Arc::new(crm.clone())),
            Some(Arc::new(notifier.clone())),
            IntakeOptions::default(),
        )
    }

    #[tokio::test]
    async fn new_phone_lead_creates_contact_and_deal() {
        let crm = MockCrm::new();
        let notifier = MockNotifier::new();
        let receipt = intake(&crm, &notifier)
            .submit(submission("Need a contract review", "+37379021904", ""))
            .await
            .unwrap();

        assert_eq!(receipt.contact_id, CrmId(100));
        assert_eq!(receipt.deal_id, CrmId(101));
        assert!(receipt.contact_created);
        assert_eq!(
            crm.lookups().await,
            vec![(CommType::Phone, "+37379021904".to_string())]
        );
        assert_eq!(crm.created_deals().await[0].title, "Website request: +37379021904");
        assert_eq!(notifier.sent_count().await, 1);
    }

    #[tokio::test]
    async fn validation_failure_makes_no_calls() {
        let crm = MockCrm::new();
        let notifier = MockNotifier::new();
        let err = intake(&crm, &notifier)
            .submit(submission("", "+37379021904", ""))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LeadError::Validation(ValidationError::MessageRequired)
        ));
        assert!(crm.calls().await.is_empty());
        assert_eq!(notifier.sent_count().await, 0);
    }

    #[tokio::test]
    async fn notification_failure_does_not_abort() {
        let crm = MockCrm::new();
        let notifier = MockNotifier::failing("Telegram API returned 500");
        let receipt = intake(&crm, &notifier)
            .submit(submission("hello", "", "client@example.md"))
            .await;
        assert!(receipt.is_ok());
        assert_eq!(notifier.sent_count().await, 1);
    }

    #[tokio::test]
    async fn missing_crm_fails_after_notifying() {
        let notifier = MockNotifier::new();
        let intake = LeadIntake::new(
            None,
            Some(Arc::new(notifier.clone())),
            IntakeOptions::default(),
        );
        assert!(!intake.crm_configured());

        let err = intake
            .submit(submission("hello", "+37379021904", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::Config(_)));
        assert_eq!(err.public_message(), "Internal error");
        assert_eq!(notifier.sent_count().await, 1);
    }

    #[tokio::test]
    async fn deal_failure_surfaces_integration_message() {
        let crm = MockCrm::new().fail_deal("Bitrix24 error: ACCESS_DENIED").await;
        let intake = LeadIntake::new(Some(Arc::new(crm.clone())), None, IntakeOptions::default());
        assert!(!intake.notifications_enabled());

        let err = intake
            .submit(submission("hello", "+37379021904", ""))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.public_message(), "Bitrix24 error: ACCESS_DENIED");
        assert_eq!(crm.created_contacts().await.len(), 1);
    }

    #[test]
    fn options_follow_bitrix_config() {
        let config = BitrixConfig {
            contact_placeholder_name: "Site visitor".into(),
            deal_title_prefix: "Web: ".into(),
            ..Default::default()
        };
        let options = IntakeOptions::from(&config);
        assert_eq!(options.contact_placeholder_name, "Site visitor");
        assert_eq!(options.deal_title_prefix, "Web: ");
    }
}
