//! OAuth2 session for the Gmail API
//!
//! Client secrets come from a Google `credentials.json`. The installed-app
//! flow, token refresh and the on-disk token cache are handled by
//! `yup_oauth2`; the consent redirect lands on a local port.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::config::GmailConfig;
use crate::error::{MailError, Result};

/// Scopes requested during consent
pub const SCOPES: &[&str] = &[
    "https://mail.google.com/",
    "https://www.googleapis.com/auth/gmail.modify",
    "https://www.googleapis.com/auth/gmail.labels",
    "https://www.googleapis.com/auth/gmail.send",
];

/// Supplies bearer tokens for Gmail API calls
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Read an "installed" or "web" client secret file
pub async fn read_client_secret<P: AsRef<Path>>(path: P) -> Result<ApplicationSecret> {
    let path = path.as_ref();
    yup_oauth2::read_application_secret(path)
        .await
        .map_err(|e| MailError::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Gmail OAuth2 session shared by all API calls
pub struct OAuthSession {
    secret: ApplicationSecret,
    token_path: PathBuf,
    redirect_port: u16,
    interactive: bool,
    authenticator: RwLock<Option<DefaultAuthenticator>>,
}

impl OAuthSession {
    /// Load client secrets; no token is fetched yet
    pub async fn new(config: &GmailConfig) -> Result<Self> {
        let secret = read_client_secret(&config.credentials_path).await?;
        Ok(Self::with_secret(config, secret))
    }

    pub fn with_secret(config: &GmailConfig, secret: ApplicationSecret) -> Self {
        Self {
            secret,
            token_path: PathBuf::from(&config.token_path),
            redirect_port: config.redirect_port,
            interactive: config.interactive_auth,
            authenticator: RwLock::new(None),
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    pub async fn is_authenticated(&self) -> bool {
        self.authenticator.read().await.is_some()
    }

    fn return_method(&self) -> InstalledFlowReturnMethod {
        match self.redirect_port {
            0 => InstalledFlowReturnMethod::HTTPRedirect,
            port => InstalledFlowReturnMethod::HTTPPortRedirect(port),
        }
    }

    /// Build the authenticator and obtain a first token.
    ///
    /// A cached token is reused or refreshed; otherwise the consent URL is
    /// printed and the redirect is awaited, unless interactive auth is off.
    pub async fn authenticate(&self) -> Result<()> {
        info!("Starting authentication process");

        if !self.interactive && !self.token_path.exists() {
            return Err(MailError::Authentication(format!(
                "no cached token in {} and interactive auth is disabled",
                self.token_path.display()
            )));
        }

        let authenticator =
            InstalledFlowAuthenticator::builder(self.secret.clone(), self.return_method())
                .persist_tokens_to_disk(self.token_path.clone())
                .build()
                .await
                .map_err(|e| {
                    MailError::Authentication(format!("Failed to create authenticator: {}", e))
                })?;

        bearer(&authenticator).await?;
        *self.authenticator.write().await = Some(authenticator);

        info!("Authentication successful, token cached in {}", self.token_path.display());
        Ok(())
    }
}

async fn bearer(authenticator: &DefaultAuthenticator) -> Result<String> {
    let token = authenticator.token(SCOPES).await?;
    debug!("Access token expires at {:?}", token.expiration_time());
    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| MailError::Authentication("token response carried no access token".to_string()))
}

#[async_trait]
impl TokenSource for OAuthSession {
    /// A bearer token, refreshed by the authenticator when close to expiry
    async fn access_token(&self) -> Result<String> {
        let guard = self.authenticator.read().await;
        let authenticator = guard
            .as_ref()
            .ok_or_else(|| MailError::Authentication("session is not authenticated".to_string()))?;
        bearer(authenticator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(dir: &Path, interactive: bool) -> GmailConfig {
        GmailConfig {
            credentials_path: dir.join("credentials.json").display().to_string(),
            token_path: dir.join("token.json").display().to_string(),
            interactive_auth: interactive,
            ..GmailConfig::default()
        }
    }

    fn write_credentials(dir: &Path, kind: &str) {
        let mut file = std::fs::File::create(dir.join("credentials.json")).unwrap();
        write!(
            file,
            r#"{{"{}": {{
                "client_id": "client-123.apps.googleusercontent.com",
                "client_secret": "secret-456",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "redirect_uris": ["http://localhost"]
            }}}}"#,
            kind
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_installed_and_web_secrets_are_read() {
        for kind in ["installed", "web"] {
            let dir = tempfile::tempdir().unwrap();
            write_credentials(dir.path(), kind);

            let secret = read_client_secret(dir.path().join("credentials.json"))
                .await
                .unwrap();
            assert_eq!(secret.client_id, "client-123.apps.googleusercontent.com");
            assert_eq!(secret.token_uri, "https://oauth2.googleapis.com/token");
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = OAuthSession::new(&config(dir.path(), true)).await;
        assert!(matches!(result, Err(MailError::Config(_))));
    }

    #[tokio::test]
    async fn test_new_session_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "installed");

        let session = OAuthSession::new(&config(dir.path(), true)).await.unwrap();
        assert!(!session.is_authenticated().await);
        assert!(matches!(
            session.access_token().await,
            Err(MailError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_non_interactive_without_cached_token_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_credentials(dir.path(), "installed");

        let session = OAuthSession::new(&config(dir.path(), false)).await.unwrap();
        match session.authenticate().await {
            Err(MailError::Authentication(message)) => {
                assert!(message.contains("interactive auth is disabled"))
            }
            other => panic!("expected authentication error, got {:?}", other),
        }
        assert!(!session.is_authenticated().await);
    }

    #[test]
    fn test_redirect_port_selects_return_method() {
        let secret = ApplicationSecret::default();
        let mut gmail = GmailConfig::default();

        let session = OAuthSession::with_secret(&gmail, secret.clone());
        assert!(matches!(
            session.return_method(),
            InstalledFlowReturnMethod::HTTPPortRedirect(8080)
        ));

        gmail.redirect_port = 0;
        let session = OAuthSession::with_secret(&gmail, secret);
        assert!(matches!(
            session.return_method(),
            InstalledFlowReturnMethod::HTTPRedirect
        ));
    }
}
