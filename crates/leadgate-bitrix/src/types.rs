// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request bodies for the Bitrix24 REST methods leadgate calls.

use leadgate_core::types::{CommType, CrmId};
use serde::Serialize;

/// `crm.duplicate.findbycomm`
pub const FIND_BY_COMM: &str = "crm.duplicate.findbycomm";
/// `crm.contact.add`
pub const CONTACT_ADD: &str = "crm.contact.add";
/// `crm.deal.add`
pub const DEAL_ADD: &str = "crm.deal.add";

/// Value type attached to every phone and email multifield.
pub const WORK: &str = "WORK";

#[derive(Debug, Serialize)]
pub struct FindByComm<'a> {
    #[serde(rename = "type")]
    pub kind: CommType,
    pub values: [&'a str; 1],
}

/// Envelope for `*.add` methods.
#[derive(Debug, Serialize)]
pub struct AddRequest<F> {
    pub fields: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<DealParams>,
}

/// One entry of a PHONE or EMAIL multifield.
#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Multifield<'a> {
    pub value: &'a str,
    pub value_type: &'static str,
}

impl<'a> Multifield<'a> {
    pub fn work(values: &'a [String]) -> Vec<Self> {
        values
            .iter()
            .map(|value| Multifield {
                value,
                value_type: WORK,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ContactFields<'a> {
    pub name: &'a str,
    pub phone: Vec<Multifield<'a>>,
    pub email: Vec<Multifield<'a>>,
    pub comments: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DealFields<'a> {
    pub title: &'a str,
    pub contact_id: CrmId,
    pub comments: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DealParams {
    pub register_sonet_event: &'static str,
}

impl DealParams {
    pub fn new(register_sonet_event: bool) -> Self {
        Self {
            register_sonet_event: if register_sonet_event { "Y" } else { "N" },
        }
    }
}
