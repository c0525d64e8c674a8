use crate::error::{MailError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment prefix for layered overrides, e.g. `GMAIL_RS__SERVER__LISTEN_ADDR`
const ENV_PREFIX: &str = "GMAIL_RS";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gmail: GmailConfig,
    pub spam: SpamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GmailConfig {
    /// OAuth client secrets downloaded from the Google console
    pub credentials_path: String,
    /// Where the authorized-user token is cached
    pub token_path: String,
    pub api_base: String,
    /// Local port receiving the consent redirect, 0 picks a free one
    pub redirect_port: u16,
    /// Messages fetched per folder listing
    pub max_results: u32,
    /// Run the browser consent flow when no usable token exists
    pub interactive_auth: bool,
}

/// Rule additions applied on top of the built-in spam tables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpamConfig {
    pub extra_keywords: Vec<String>,
    pub extra_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            credentials_path: "credentials.json".to_string(),
            token_path: "token.json".to_string(),
            api_base: "https://gmail.googleapis.com/gmail/v1/users/me".to_string(),
            redirect_port: 8080,
            max_results: 5,
            interactive_auth: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MailError::Config(e.to_string()))?;

        toml::from_str(&content).map_err(|e| MailError::Config(e.to_string()))
    }

    /// Defaults, then the TOML file if present, then `GMAIL_RS__*` variables,
    /// then `PORT`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_layered(path, None, std::env::var("PORT").ok())
    }

    /// Layered load with an explicit variable map in place of the process
    /// environment when `env` is set
    pub fn load_layered<P: AsRef<Path>>(
        path: P,
        env: Option<HashMap<String, String>>,
        port: Option<String>,
    ) -> Result<Self> {
        let path = path.as_ref();

        let mut config: Config = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| MailError::Config(e.to_string()))?;

        if let Some(port) = port {
            config.apply_port(&port)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the port of the listen address
    pub fn apply_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| MailError::Config(format!("Invalid PORT value '{}'", port)))?;

        let host = self
            .server
            .listen_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.server.listen_addr = format!("{}:{}", host, port);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.gmail.max_results == 0 {
            return Err(MailError::Config("gmail.max_results must be positive".to_string()));
        }

        let api_base = url::Url::parse(&self.gmail.api_base).map_err(|e| {
            MailError::Config(format!("Invalid gmail.api_base '{}': {}", self.gmail.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(MailError::Config(format!(
                "gmail.api_base '{}' cannot carry a path",
                self.gmail.api_base
            )));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(MailError::Config(format!("Unknown logging format '{}'", other))),
        }
    }
}
