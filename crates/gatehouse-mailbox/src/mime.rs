// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Body extraction from Gmail message payloads.
//!
//! Gmail returns MIME structure as nested JSON parts with base64url-encoded
//! bodies. This module walks the part tree, preferring `text/plain` over
//! `text/html`, and decodes tolerantly (padding may be absent).

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};

use crate::gmail::MessagePayload;

/// base64url decoder that accepts both padded and unpadded input.
const URL_SAFE_FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Extract the text body from a message payload.
///
/// Walks nested multipart payloads collecting the first `text/plain` and
/// `text/html` bodies; returns plain text when present, HTML otherwise,
/// `None` when the message carries neither.
pub fn extract_text(payload: &MessagePayload) -> Option<String> {
    let mut plain = None;
    let mut html = None;
    walk(payload, &mut plain, &mut html);
    plain.or(html)
}

fn walk(part: &MessagePayload, plain: &mut Option<String>, html: &mut Option<String>) {
    let data = part.body.as_ref().and_then(|b| b.data.as_deref());

    match (part.mime_type.as_deref(), data) {
        (Some("text/plain"), Some(data)) if plain.is_none() => {
            *plain = decode_body(data);
        }
        (Some("text/html"), Some(data)) if html.is_none() => {
            *html = decode_body(data);
        }
        _ => {}
    }

    if let Some(parts) = &part.parts {
        for child in parts {
            if plain.is_some() {
                return;
            }
            walk(child, plain, html);
        }
    }
}

/// Decode a base64url body segment to text.
fn decode_body(data: &str) -> Option<String> {
    let bytes = URL_SAFE_FORGIVING.decode(data).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
