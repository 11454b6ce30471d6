// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead intake for leadgate.
//!
//! Turns a raw form submission into a CRM contact and deal:
//! - [`validate`] trims the submission and enforces the required fields
//! - [`resolver`] finds an existing contact by email or phone, or creates one
//! - [`deal`] opens a deal for the contact
//! - [`pipeline`] strings the steps together with a best-effort notification

pub mod deal;
pub mod pipeline;
pub mod resolver;
pub mod validate;

pub use deal::{deal_subject, DealCreator};
pub use pipeline::{IntakeOptions, LeadIntake};
pub use resolver::ContactResolver;
pub use validate::normalize;
