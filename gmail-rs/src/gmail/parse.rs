//! Field extraction from Gmail API messages

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use super::types::{labels, EmailSummary, GmailMessage, MessagePart};
use crate::error::{MailError, Result};

/// Gmail emits base64url both with and without padding
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Subject shown for messages without a Subject header
pub const NO_SUBJECT: &str = "No Subject";

/// Build the client-facing summary of a message.
///
/// For sent mail the recipient replaces the sender, so the sent view shows who
/// the message went to.
pub fn parse_email(message: &GmailMessage) -> Result<EmailSummary> {
    let payload = message
        .payload
        .as_ref()
        .ok_or_else(|| MailError::Parse(format!("message {} has no payload", message.id)))?;

    let mut from = header(payload, "From").unwrap_or_else(|| "Unknown".to_string());
    if message.has_label(labels::SENT) {
        if let Some(to) = header(payload, "To").filter(|to| !to.is_empty()) {
            from = to;
        }
    }

    Ok(EmailSummary {
        id: message.id.clone(),
        subject: header(payload, "Subject").unwrap_or_else(|| NO_SUBJECT.to_string()),
        from,
        date: header(payload, "Date").unwrap_or_default(),
        body: plain_text_body(payload)?,
        is_unread: message.has_label(labels::UNREAD),
        is_starred: message.has_label(labels::STARRED),
    })
}

/// Case-insensitive header lookup, first match wins
pub fn header(part: &MessagePart, name: &str) -> Option<String> {
    part.headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.clone())
}

/// First `text/plain` part of a multipart message, or the top-level body
fn plain_text_body(payload: &MessagePart) -> Result<String> {
    if !payload.parts.is_empty() {
        let plain = payload
            .parts
            .iter()
            .find(|p| p.mime_type.as_deref() == Some("text/plain"));

        return match plain.and_then(|p| p.body.as_ref()).and_then(|b| b.data.as_deref()) {
            Some(data) => decode_body(data),
            None => Ok(String::new()),
        };
    }

    match payload.body.as_ref().and_then(|b| b.data.as_deref()) {
        Some(data) => decode_body(data),
        None => Ok(String::new()),
    }
}

pub fn decode_body(data: &str) -> Result<String> {
    let bytes = URL_SAFE_LENIENT
        .decode(data.trim())
        .map_err(|e| MailError::Parse(format!("base64url body: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| MailError::Parse(format!("utf-8 body: {}", e)))
}
