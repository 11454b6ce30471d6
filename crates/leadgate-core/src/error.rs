// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for leadgate.

use thiserror::Error;

/// Generic message returned to clients for failures that are not theirs to fix.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// A submission that cannot become a lead.
///
/// The display strings are returned to the browser verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `message` was missing or blank.
    #[error("Message required")]
    MessageRequired,

    /// Both `phone` and `email` were missing or blank.
    #[error("Phone or email required")]
    ContactRequired,
}

/// The primary error type used by the adapters and the intake pipeline.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Client-caused: the submission failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Upstream CRM failures (transport, HTTP status, error payloads, missing ids).
    #[error("{message}")]
    Integration {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Messaging channel failures. Never surfaced to clients.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Missing or unusable configuration (e.g. CRM webhook base unset).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeadError {
    /// Shorthand for an integration error without an underlying source.
    pub fn integration(message: impl Into<String>) -> Self {
        Self::Integration {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the caller, not an upstream system, caused the error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status code this error maps to at the gateway.
    pub fn http_status(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }

    /// The message safe to return in a response body.
    ///
    /// Validation and integration messages are passed through; configuration
    /// and internal failures collapse to [`INTERNAL_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Integration { message, .. } => message.clone(),
            Self::Notification { .. } | Self::Config(_) | Self::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}
