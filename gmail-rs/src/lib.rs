//! gmail-rs: REST backend for a Gmail mailbox
//!
//! Exposes inbox, sent, spam, starred and all-mail listings, message
//! mutations (star, read, spam, delete), sending, and rule-based spam
//! classification over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use gmail_rs::api::ApiServer;
//! use gmail_rs::gmail::{GmailClient, OAuthSession};
//! use gmail_rs::service::EmailService;
//! use gmail_rs::Config;
//! use spam_rs::SpamClassifier;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!
//!     let session = Arc::new(OAuthSession::new(&config.gmail).await?);
//!     session.authenticate().await?;
//!
//!     let client = Arc::new(GmailClient::new(&config.gmail.api_base, session.clone())?);
//!     let service = EmailService::new(client, SpamClassifier::new(), config.gmail.max_results);
//!
//!     ApiServer::new(service, Some(session), config.server.listen_addr.clone())
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP routes and handlers
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`gmail`]: Gmail API client, OAuth and message parsing
//! - [`service`]: Mailbox operations combined with the spam classifier

pub mod api;
pub mod config;
pub mod error;
pub mod gmail;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{MailError, Result};
