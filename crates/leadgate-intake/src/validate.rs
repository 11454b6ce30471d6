// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission validation and normalization.

use leadgate_core::error::ValidationError;
use leadgate_core::types::{Lead, LeadSubmission};

fn trimmed(value: Option<String>) -> String {
    match value {
        Some(s) => s.trim().to_string(),
        None => String::new(),
    }
}

/// Trim every field and enforce the two submission rules.
///
/// The message rule is checked before the contact rule, so a submission that
/// breaks both reports [`ValidationError::MessageRequired`].
pub fn normalize(submission: LeadSubmission) -> Result<Lead, ValidationError> {
    let lead = Lead {
        name: trimmed(submission.name),
        phone: trimmed(submission.phone),
        email: trimmed(submission.email),
        message: trimmed(submission.message),
        page_url: trimmed(submission.page_url),
        user_agent: trimmed(submission.user_agent),
        source: trimmed(submission.source),
    };

    if lead.message.is_empty() {
        return Err(ValidationError::MessageRequired);
    }
    if lead.phone.is_empty() && lead.email.is_empty() {
        return Err(ValidationError::ContactRequired);
    }
    Ok(lead)
}
