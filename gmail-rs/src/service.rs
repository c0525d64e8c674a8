//! Mailbox operations behind the REST API
//!
//! Combines the provider capability with the shared spam classifier.

use spam_rs::{sample_spam_fixture, SpamClassifier, SpamSample};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::gmail::parse::{self, parse_email};
use crate::gmail::types::labels;
use crate::gmail::{EmailSummary, Folder, GmailMessage, MailProvider};

pub struct EmailService {
    provider: Arc<dyn MailProvider>,
    classifier: Arc<RwLock<SpamClassifier>>,
    max_results: u32,
}

impl EmailService {
    pub fn new(provider: Arc<dyn MailProvider>, classifier: SpamClassifier, max_results: u32) -> Self {
        Self {
            provider,
            classifier: Arc::new(RwLock::new(classifier)),
            max_results,
        }
    }

    pub fn classifier(&self) -> &Arc<RwLock<SpamClassifier>> {
        &self.classifier
    }

    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        info!("Starting to send email to: {}", to);
        self.provider.send_message(to, subject, body).await
    }

    /// Fetch and summarize the newest messages of a folder.
    ///
    /// Messages that fail to fetch or parse are logged and left out.
    pub async fn list_folder(&self, folder: Folder) -> Result<Vec<EmailSummary>> {
        info!("Listing {} emails", folder.name());
        let ids = self
            .provider
            .list_messages(folder.label(), self.max_results)
            .await?;

        let mut emails = Vec::with_capacity(ids.len());
        for id in &ids {
            let summary = match self.provider.get_message(id).await {
                Ok(message) => parse_email(&message),
                Err(e) => Err(e),
            };
            match summary {
                Ok(email) => emails.push(email),
                Err(e) => error!("Error processing {} message {}: {}", folder.name(), id, e),
            }
        }

        info!(
            "Processed {} of {} {} emails",
            emails.len(),
            ids.len(),
            folder.name()
        );
        Ok(emails)
    }

    pub async fn toggle_star(&self, id: &str, starred: bool) -> Result<()> {
        info!(
            "Starting to {} star for email: {}",
            if starred { "add" } else { "remove" },
            id
        );
        if starred {
            self.provider.modify_labels(id, &[labels::STARRED], &[]).await
        } else {
            self.provider.modify_labels(id, &[], &[labels::STARRED]).await
        }
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<()> {
        self.provider.modify_labels(id, &[], &[labels::UNREAD]).await
    }

    /// Strip inbox and category labels and label the message as spam
    pub async fn move_to_spam(&self, id: &str) -> Result<()> {
        info!("Moving email {} to spam", id);
        self.provider
            .modify_labels(id, &[labels::SPAM], labels::INBOX_CATEGORIES)
            .await
    }

    pub async fn delete_email(&self, id: &str) -> Result<()> {
        info!("Starting to delete email: {}", id);
        self.provider.delete_message(id).await
    }

    pub async fn check_spam(&self, subject: &str, body: &str) -> bool {
        self.classifier.read().await.classify(subject, body)
    }

    /// Fetch a stored message and classify its subject and plain-text body
    pub async fn check_message(&self, id: &str) -> Result<bool> {
        let message = self.provider.get_message(id).await?;
        let (subject, body) = classifiable_text(&message);

        let is_spam = self.check_spam(&subject, &body).await;
        info!("Email {} spam check: {}", id, is_spam);
        Ok(is_spam)
    }

    pub async fn add_spam_keywords(&self, keywords: &[String]) {
        self.classifier.write().await.add_keywords(keywords);
    }

    pub async fn add_spam_patterns(&self, patterns: &[String]) -> Result<()> {
        self.classifier.write().await.add_patterns(patterns)?;
        Ok(())
    }

    pub fn sample_spam(&self) -> SpamSample {
        sample_spam_fixture()
    }
}

/// Subject and body as listed; the snippet stands in for a body that cannot
/// be decoded
fn classifiable_text(message: &GmailMessage) -> (String, String) {
    match parse_email(message) {
        Ok(email) => (email.subject, email.body),
        Err(e) => {
            warn!("Falling back to snippet for message {}: {}", message.id, e);
            let subject = message
                .payload
                .as_ref()
                .and_then(|payload| parse::header(payload, "Subject"))
                .unwrap_or_else(|| parse::NO_SUBJECT.to_string());
            (subject, message.snippet.clone().unwrap_or_default())
        }
    }
}
