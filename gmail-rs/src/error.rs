use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("OAuth error: {0}")]
    OAuth(#[from] yup_oauth2::Error),

    #[error("Gmail API error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Spam(#[from] spam_rs::SpamError),
}

pub type Result<T> = std::result::Result<T, MailError>;
