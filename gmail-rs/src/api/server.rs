//! API Server - HTTP server for the mailbox REST API

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::gmail::OAuthSession;
use crate::service::EmailService;

pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    pub fn new(service: EmailService, session: Option<Arc<OAuthSession>>, addr: String) -> Self {
        let state = Arc::new(AppState { service, session });
        Self { state, addr }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Routes under `/api`, with permissive CORS for the browser frontend
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let email_routes = Router::new()
        .route("/inbox", get(handlers::inbox))
        .route("/sent", get(handlers::sent))
        .route("/spam", get(handlers::spam))
        .route("/starred", get(handlers::starred))
        .route("/all", get(handlers::all))
        .route("/:id", delete(handlers::delete_email))
        .route("/:id/star", post(handlers::toggle_star))
        .route("/:id/read", post(handlers::mark_as_read))
        .route("/:id/spam", post(handlers::move_to_spam))
        .route("/:id/spam-check", get(handlers::check_message));

    let spam_routes = Router::new()
        .route("/sample", get(handlers::sample_spam))
        .route("/keywords", post(handlers::add_keywords))
        .route("/patterns", post(handlers::add_patterns));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/send-email", post(handlers::send_email))
        .route("/test-spam", post(handlers::test_spam))
        .nest("/emails", email_routes)
        .nest("/spam", spam_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
