//! Gmail REST API v1 client

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use mail_builder::MessageBuilder;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use super::oauth::TokenSource;
use super::types::{GmailMessage, MessageList, MessageRef, ModifyRequest, SendRequest};
use super::MailProvider;
use crate::error::{MailError, Result};

/// Gmail client bound to one authorized user
pub struct GmailClient {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl GmailClient {
    /// `base_url` is the user root, e.g. `https://gmail.googleapis.com/gmail/v1/users/me`
    pub fn new(base_url: &str, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MailError::Config(format!("Invalid Gmail API base '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MailError::Config(format!(
                "Gmail API base '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            tokens,
        })
    }

    /// Resource URL below the user root. Each segment is percent-encoded, so
    /// an id cannot add path segments or a query.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(MailError::Parse(format!("invalid message id '{}'", bad)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MailError::Config(format!("Gmail API base '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        let token = self.tokens.access_token().await?;
        debug!("Gmail API {} {}", method, url);
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Gmail API request failed with status {}: {}", status, body);
        Err(MailError::Provider {
            status: status.as_u16(),
            body,
        })
    }
}

/// Build the RFC 5322 message and encode it for `messages.send`
pub fn encode_message(to: &str, subject: &str, body: &str) -> Result<String> {
    let raw = MessageBuilder::new()
        .to(to)
        .subject(subject)
        .text_body(body)
        .write_to_vec()?;
    Ok(URL_SAFE.encode(raw))
}

#[async_trait]
impl MailProvider for GmailClient {
    async fn list_messages(&self, label: Option<&str>, max_results: u32) -> Result<Vec<String>> {
        let mut query: Vec<(&str, String)> = vec![("maxResults", max_results.to_string())];
        if let Some(label) = label {
            query.push(("labelIds", label.to_string()));
        }

        let request = self.request(Method::GET, &["messages"]).await?.query(&query);
        let list: MessageList = self.send(request).await?.json().await?;

        debug!("Listed {} messages for label {:?}", list.messages.len(), label);
        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    async fn get_message(&self, id: &str) -> Result<GmailMessage> {
        let request = self
            .request(Method::GET, &["messages", id])
            .await?
            .query(&[("format", "full")]);
        Ok(self.send(request).await?.json().await?)
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        info!("Sending email to {}", to);
        let raw = encode_message(to, subject, body)?;

        let request = self
            .request(Method::POST, &["messages", "send"])
            .await?
            .json(&SendRequest { raw });
        let sent: MessageRef = self.send(request).await?.json().await?;

        info!("Email sent: {}", sent.id);
        Ok(sent.id)
    }

    async fn modify_labels(&self, id: &str, add: &[&str], remove: &[&str]) -> Result<()> {
        let request = self
            .request(Method::POST, &["messages", id, "modify"])
            .await?
            .json(&ModifyRequest {
                add_label_ids: add,
                remove_label_ids: remove,
            });
        self.send(request).await?;
        Ok(())
    }

    async fn delete_message(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["messages", id]).await?;
        self.send(request).await?;
        Ok(())
    }
}
