// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for leadgate.
//!
//! The Telegram bot token and the Bitrix24 webhook key both travel inside
//! URLs, so anything that formats a request or an HTTP error can leak them.
//! Everything written to the log passes through [`RedactingMakeWriter`].

pub mod redact;

pub use redact::{redact, RedactingMakeWriter, RedactingWriter, SecretList};
