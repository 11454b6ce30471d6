// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! The intake pipeline talks to the outside world only through these traits,
//! held as `Arc<dyn ...>`, so tests can swap in fakes.

pub mod crm;
pub mod notification;

pub use crm::CrmDirectory;
pub use notification::NotificationSink;
