//! In-memory mailbox shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use gmail_rs::error::{MailError, Result};
use gmail_rs::gmail::types::{MessageHeader, MessagePart, MessagePartBody};
use gmail_rs::gmail::{GmailMessage, MailProvider};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Messages are kept in arrival order; listings return newest first
#[derive(Default)]
pub struct MockProvider {
    messages: Mutex<Vec<GmailMessage>>,
    pub sent: Mutex<Vec<SentMail>>,
    /// Every call fails with a 503 when set
    pub offline: bool,
}

impl MockProvider {
    pub fn new(messages: Vec<GmailMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn labels_of(&self, id: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.label_ids.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.messages.lock().unwrap().iter().any(|m| m.id == id)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(MailError::Provider {
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(id: &str) -> MailError {
    MailError::Provider {
        status: 404,
        body: format!("Requested entity {} was not found", id),
    }
}

#[async_trait]
impl MailProvider for MockProvider {
    async fn list_messages(&self, label: Option<&str>, max_results: u32) -> Result<Vec<String>> {
        self.check_online()?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|m| label.map_or(true, |l| m.has_label(l)))
            .take(max_results as usize)
            .map(|m| m.id.clone())
            .collect())
    }

    async fn get_message(&self, id: &str) -> Result<GmailMessage> {
        self.check_online()?;
        self.messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        self.check_online()?;
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(format!("sent-{}", sent.len()))
    }

    async fn modify_labels(&self, id: &str, add: &[&str], remove: &[&str]) -> Result<()> {
        self.check_online()?;
        let mut messages = self.messages.lock().unwrap();
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;

        message.label_ids.retain(|l| !remove.contains(&l.as_str()));
        for label in add {
            if !message.has_label(label) {
                message.label_ids.push(label.to_string());
            }
        }
        Ok(())
    }

    async fn delete_message(&self, id: &str) -> Result<()> {
        self.check_online()?;
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Single-part plain-text message
pub fn message(id: &str, labels: &[&str], from: &str, subject: &str, body: &str) -> GmailMessage {
    let header = |name: &str, value: &str| MessageHeader {
        name: name.to_string(),
        value: value.to_string(),
    };

    GmailMessage {
        id: id.to_string(),
        thread_id: Some(format!("thread-{}", id)),
        label_ids: labels.iter().map(|l| l.to_string()).collect(),
        snippet: Some(body.chars().take(40).collect()),
        payload: Some(MessagePart {
            mime_type: Some("text/plain".to_string()),
            headers: vec![
                header("From", from),
                header("To", "me@example.com"),
                header("Subject", subject),
                header("Date", "Tue, 14 May 2024 09:30:00 +0000"),
            ],
            body: Some(MessagePartBody {
                size: body.len() as u64,
                data: Some(URL_SAFE_NO_PAD.encode(body)),
            }),
            parts: vec![],
        }),
    }
}

pub fn sent_message(id: &str, to: &str, subject: &str, body: &str) -> GmailMessage {
    let mut sent = message(id, &["SENT"], "me@example.com", subject, body);
    if let Some(payload) = sent.payload.as_mut() {
        for header in payload.headers.iter_mut().filter(|h| h.name == "To") {
            header.value = to.to_string();
        }
    }
    sent
}

/// Mailbox with three inbox messages (one spam-looking, one starred) and one sent
pub fn sample_mailbox() -> Vec<GmailMessage> {
    vec![
        message(
            "m1",
            &["INBOX", "CATEGORY_PERSONAL", "UNREAD"],
            "alice@example.com",
            "Lunch on Friday?",
            "Are you free for lunch on Friday at noon?",
        ),
        sent_message(
            "m2",
            "dave@example.com",
            "Quarterly report",
            "Attached is the quarterly report.",
        ),
        message(
            "m3",
            &["INBOX", "STARRED"],
            "bob@example.com",
            "Project kickoff",
            "Kickoff meeting notes are in the shared folder.",
        ),
        message(
            "m4",
            &["INBOX", "CATEGORY_PROMOTIONS", "UNREAD"],
            "promo@deals.example",
            "You have won a prize",
            "Claim now before the offer expires.",
        ),
    ]
}
