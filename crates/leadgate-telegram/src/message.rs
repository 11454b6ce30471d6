// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of a lead for the Telegram chat.

use leadgate_core::types::{or_blank, Lead};

/// Telegram's hard limit on message text, in UTF-16 code units.
pub const MAX_MESSAGE_UNITS: usize = 4096;

/// Render the fixed new-lead template.
///
/// Sent without a parse mode, so nothing needs escaping. Text beyond
/// [`MAX_MESSAGE_UNITS`] is cut on a character boundary.
pub fn format_lead(lead: &Lead, label: &str) -> String {
    let text = format!(
        "🆕 Lead ({label})\n\n\
         🪟 Form: {source}\n\
         👤 {name}\n\
         📞 {phone}\n\
         📧 {email}\n\
         🌐 {page}\n\n\
         💬 {message}",
        source = or_blank(&lead.source),
        name = or_blank(&lead.name),
        phone = or_blank(&lead.phone),
        email = or_blank(&lead.email),
        page = or_blank(&lead.page_url),
        message = lead.message,
    );
    truncate_utf16(text, MAX_MESSAGE_UNITS)
}

/// Cut `text` so its UTF-16 length is at most `max`, never splitting a char.
fn truncate_utf16(mut text: String, max: usize) -> String {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max {
            text.truncate(idx);
            break;
        }
    }
    text
}
