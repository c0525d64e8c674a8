//! Gmail API payloads and the message summary served to clients

use serde::{Deserialize, Serialize};

/// System labels used by the backend
pub mod labels {
    pub const INBOX: &str = "INBOX";
    pub const SENT: &str = "SENT";
    pub const SPAM: &str = "SPAM";
    pub const STARRED: &str = "STARRED";
    pub const UNREAD: &str = "UNREAD";

    /// Labels stripped when a message is moved to spam
    pub const INBOX_CATEGORIES: &[&str] = &[
        INBOX,
        "CATEGORY_PERSONAL",
        "CATEGORY_SOCIAL",
        "CATEGORY_PROMOTIONS",
        "CATEGORY_UPDATES",
        "CATEGORY_FORUMS",
    ];
}

/// Mailbox views exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Inbox,
    Sent,
    Spam,
    Starred,
    All,
}

impl Folder {
    /// Label filter for the listing, `None` lists everything
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Folder::Inbox => Some(labels::INBOX),
            Folder::Sent => Some(labels::SENT),
            Folder::Spam => Some(labels::SPAM),
            Folder::Starred => Some(labels::STARRED),
            Folder::All => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Spam => "spam",
            Folder::Starred => "starred",
            Folder::All => "all",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A message as returned by `users.messages.get?format=full`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GmailMessage {
    pub id: String,
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<String>,
    #[serde(rename = "labelIds", default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    pub payload: Option<MessagePart>,
}

impl GmailMessage {
    pub fn has_label(&self, label: &str) -> bool {
        self.label_ids.iter().any(|l| l == label)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    pub body: Option<MessagePartBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePartBody {
    #[serde(default)]
    pub size: u64,
    /// base64url encoded content
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendRequest {
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModifyRequest<'a> {
    #[serde(rename = "addLabelIds", skip_serializing_if = "<[_]>::is_empty")]
    pub add_label_ids: &'a [&'a str],
    #[serde(rename = "removeLabelIds", skip_serializing_if = "<[_]>::is_empty")]
    pub remove_label_ids: &'a [&'a str],
}

/// Message fields served to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub date: String,
    pub body: String,
    pub is_unread: bool,
    pub is_starred: bool,
}
