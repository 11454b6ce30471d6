// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for leadgate.
//!
//! This crate provides the lead types, error types, and adapter traits shared
//! by every other crate in the workspace. The CRM and notification adapters
//! implement traits defined here; the intake pipeline consumes them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{LeadError, ValidationError};
pub use types::{
    CommType, ContactResolution, CrmId, IntakeStage, Lead, LeadReceipt, LeadSubmission,
    NewContact, NewDeal,
};

pub use traits::{CrmDirectory, NotificationSink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_error_has_all_variants() {
        let _validation = LeadError::Validation(ValidationError::MessageRequired);
        let _integration = LeadError::Integration {
            message: "test".into(),
            source: None,
        };
        let _notification = LeadError::Notification {
            message: "test".into(),
            source: None,
        };
        let _config = LeadError::Config("test".into());
        let _internal = LeadError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_crm_directory<T: CrmDirectory>() {}
        fn _assert_notification_sink<T: NotificationSink>() {}
    }
}
