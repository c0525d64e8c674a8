use anyhow::Context;
use clap::{Parser, Subcommand};
use gmail_rs::api::ApiServer;
use gmail_rs::config::{Config, LoggingConfig};
use gmail_rs::gmail::{GmailClient, OAuthSession};
use gmail_rs::service::EmailService;
use spam_rs::SpamClassifier;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "gmail-rs")]
#[command(about = "Gmail REST backend with spam classification", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and serve the REST API (default)
    Serve,
    /// Obtain a token, running the consent flow when none is cached
    Auth,
    /// Classify a message locally
    Classify {
        #[arg(short, long, default_value = "")]
        subject: String,
        #[arg(short, long, default_value = "")]
        body: String,
    },
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn build_classifier(config: &Config) -> anyhow::Result<SpamClassifier> {
    let mut classifier = SpamClassifier::new();
    classifier.add_keywords(&config.spam.extra_keywords);
    classifier
        .add_patterns(&config.spam.extra_patterns)
        .context("Invalid pattern in spam.extra_patterns")?;
    Ok(classifier)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Starting gmail-rs");
    info!("  API listening on: {}", config.server.listen_addr);
    info!("  Gmail API base: {}", config.gmail.api_base);

    let classifier = build_classifier(&config)?;

    let session = Arc::new(
        OAuthSession::new(&config.gmail)
            .await
            .context("Failed to load Gmail client secrets")?,
    );
    session
        .authenticate()
        .await
        .context("Gmail authentication failed")?;

    let client = Arc::new(GmailClient::new(&config.gmail.api_base, session.clone())?);
    let service = EmailService::new(client, classifier, config.gmail.max_results);

    let server = ApiServer::new(service, Some(session), config.server.listen_addr.clone());
    server.run().await.context("API server failed")?;
    Ok(())
}

async fn authorize(mut config: Config) -> anyhow::Result<()> {
    config.gmail.interactive_auth = true;
    let session = OAuthSession::new(&config.gmail)
        .await
        .context("Failed to load Gmail client secrets")?;
    session
        .authenticate()
        .await
        .context("Gmail authentication failed")?;
    println!("Token stored in {}", session.token_path().display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    init_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Auth => authorize(config).await,
        Commands::Classify { subject, body } => {
            let classifier = build_classifier(&config)?;
            let verdict = if classifier.classify(&subject, &body) {
                "spam"
            } else {
                "not spam"
            };
            println!("{}", verdict);
            Ok(())
        }
    }
}
