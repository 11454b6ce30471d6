// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for pipeline-level tests.
//!
//! `TestHarness` assembles a [`LeadIntake`] over mock adapters and exposes the
//! mocks for assertions.

use std::sync::Arc;

use leadgate_config::model::BitrixConfig;
use leadgate_core::error::LeadError;
use leadgate_core::traits::{CrmDirectory, NotificationSink};
use leadgate_core::types::{LeadReceipt, LeadSubmission};
use leadgate_intake::{IntakeOptions, LeadIntake};

use crate::mock_crm::MockCrm;
use crate::mock_notifier::MockNotifier;

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    crm: Option<MockCrm>,
    notifier: Option<MockNotifier>,
    options: IntakeOptions,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            crm: Some(MockCrm::new()),
            notifier: Some(MockNotifier::new()),
            options: IntakeOptions::default(),
        }
    }

    /// Use a pre-scripted CRM.
    pub fn with_crm(mut self, crm: MockCrm) -> Self {
        self.crm = Some(crm);
        self
    }

    /// Run as if the CRM webhook were not configured.
    pub fn without_crm(mut self) -> Self {
        self.crm = None;
        self
    }

    /// Use a specific notifier, e.g. [`MockNotifier::failing`].
    pub fn with_notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run with notifications disabled.
    pub fn without_notifier(mut self) -> Self {
        self.notifier = None;
        self
    }

    /// Take placeholder name and title prefix from a Bitrix config.
    pub fn with_bitrix_config(mut self, config: &BitrixConfig) -> Self {
        self.options = IntakeOptions::from(config);
        self
    }

    pub fn build(self) -> TestHarness {
        let crm_handle = self
            .crm
            .clone()
            .map(|c| Arc::new(c) as Arc<dyn CrmDirectory>);
        let notifier_handle = self
            .notifier
            .clone()
            .map(|n| Arc::new(n) as Arc<dyn NotificationSink>);

        TestHarness {
            intake: Arc::new(LeadIntake::new(crm_handle, notifier_handle, self.options)),
            crm: self.crm.unwrap_or_default(),
            notifier: self.notifier.unwrap_or_default(),
        }
    }
}

/// A [`LeadIntake`] wired to mocks.
///
/// When the CRM or notifier was disabled on the builder, the corresponding
/// mock is still present but never called.
pub struct TestHarness {
    pub intake: Arc<LeadIntake>,
    pub crm: MockCrm,
    pub notifier: MockNotifier,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Submit a lead through the pipeline.
    pub async fn submit(&self, submission: LeadSubmission) -> Result<LeadReceipt, LeadError> {
        self.intake.submit(submission).await
    }
}
