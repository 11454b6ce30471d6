// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for leadgate integration tests.
//!
//! Provides in-memory adapters and a harness so the intake pipeline can be
//! exercised without Telegram or Bitrix24.
//!
//! # Components
//!
//! - [`MockCrm`] - CRM directory with scripted duplicates and recorded calls
//! - [`MockNotifier`] - Notification sink that records every lead it sees
//! - [`TestHarness`] - Assembles a [`LeadIntake`](leadgate_intake::LeadIntake) from mocks

pub mod harness;
pub mod mock_crm;
pub mod mock_notifier;

pub use harness::TestHarness;
pub use mock_crm::{CrmCall, MockCrm};
pub use mock_notifier::MockNotifier;
