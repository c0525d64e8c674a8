//! Gmail provider access
//!
//! [`MailProvider`] is the capability set the rest of the backend relies on.
//! [`GmailClient`] implements it against the Gmail REST API.

use async_trait::async_trait;

use crate::error::Result;

pub mod client;
pub mod oauth;
pub mod parse;
pub mod types;

pub use client::GmailClient;
pub use oauth::{OAuthSession, TokenSource};
pub use types::{EmailSummary, Folder, GmailMessage};

/// Remote mailbox operations
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Message ids, newest first, optionally restricted to one label
    async fn list_messages(&self, label: Option<&str>, max_results: u32) -> Result<Vec<String>>;

    async fn get_message(&self, id: &str) -> Result<GmailMessage>;

    /// Send a plain-text message, returning the provider id
    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<String>;

    async fn modify_labels(&self, id: &str, add: &[&str], remove: &[&str]) -> Result<()>;

    /// Permanently delete, bypassing trash
    async fn delete_message(&self, id: &str) -> Result<()>;
}
