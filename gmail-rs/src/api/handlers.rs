//! API request handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::MailError;
use crate::gmail::{EmailSummary, Folder, OAuthSession};
use crate::service::EmailService;

/// Shared application state
pub struct AppState {
    pub service: EmailService,
    /// Absent when the provider does not need OAuth (tests, local mocks)
    pub session: Option<Arc<OAuthSession>>,
}

/// Outcome of a mailbox mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailListResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub emails: Vec<EmailSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpamCheckResponse {
    pub success: bool,
    pub is_spam: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct StarRequest {
    #[serde(default = "default_starred")]
    pub starred: bool,
}

fn default_starred() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct TestEmail {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct TestSpamRequest {
    pub email: TestEmail,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatternsRequest {
    pub patterns: Vec<String>,
}

fn failure(context: &str, e: &MailError) -> Response {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusResponse::failed(format!("{}: {}", context, e))),
    )
        .into_response()
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let authenticated = match &state.session {
        Some(session) => session.is_authenticated().await,
        None => true,
    };

    Json(serde_json::json!({
        "status": if authenticated { "healthy" } else { "unauthenticated" },
        "service": "gmail-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": authenticated,
    }))
}

/// POST /api/send-email
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendEmailRequest>,
) -> impl IntoResponse {
    info!("Received send email request to {}", req.to);

    match state.service.send_email(&req.to, &req.subject, &req.body).await {
        Ok(id) => {
            info!("Email sent successfully: {}", id);
            (StatusCode::OK, Json(StatusResponse::ok("Email sent successfully"))).into_response()
        }
        Err(e) => failure("Failed to send email", &e),
    }
}

async fn list_folder(state: &AppState, folder: Folder) -> Response {
    match state.service.list_folder(folder).await {
        Ok(emails) => (
            StatusCode::OK,
            Json(EmailListResponse {
                success: true,
                message: None,
                emails,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error getting {} emails: {}", folder.name(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EmailListResponse {
                    success: false,
                    message: Some(format!("Failed to get {} emails: {}", folder.name(), e)),
                    emails: Vec::new(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/emails/inbox
pub async fn inbox(State(state): State<Arc<AppState>>) -> Response {
    list_folder(&state, Folder::Inbox).await
}

/// GET /api/emails/sent
pub async fn sent(State(state): State<Arc<AppState>>) -> Response {
    list_folder(&state, Folder::Sent).await
}

/// GET /api/emails/spam
pub async fn spam(State(state): State<Arc<AppState>>) -> Response {
    list_folder(&state, Folder::Spam).await
}

/// GET /api/emails/starred
pub async fn starred(State(state): State<Arc<AppState>>) -> Response {
    list_folder(&state, Folder::Starred).await
}

/// GET /api/emails/all
pub async fn all(State(state): State<Arc<AppState>>) -> Response {
    list_folder(&state, Folder::All).await
}

/// DELETE /api/emails/:id
pub async fn delete_email(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.delete_email(&id).await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::ok("Email deleted successfully"))).into_response(),
        Err(e) => failure("Failed to delete email", &e),
    }
}

/// POST /api/emails/:id/star - body `{"starred": bool}`; an empty body stars
pub async fn toggle_star(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let starred = if body.iter().all(u8::is_ascii_whitespace) {
        true
    } else {
        match serde_json::from_slice::<StarRequest>(&body) {
            Ok(req) => req.starred,
            Err(e) => {
                warn!("Rejected star request for {}: {}", id, e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(StatusResponse::failed(format!("Invalid star request: {}", e))),
                )
                    .into_response();
            }
        }
    };

    match state.service.toggle_star(&id, starred).await {
        Ok(()) => {
            let message = if starred {
                "Star added successfully"
            } else {
                "Star removed successfully"
            };
            (StatusCode::OK, Json(StatusResponse::ok(message))).into_response()
        }
        Err(e) => failure("Failed to toggle star", &e),
    }
}

/// POST /api/emails/:id/read
pub async fn mark_as_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.mark_as_read(&id).await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::ok("Email marked as read"))).into_response(),
        Err(e) => failure("Failed to mark email as read", &e),
    }
}

/// POST /api/emails/:id/spam
pub async fn move_to_spam(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.move_to_spam(&id).await {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::ok("Email moved to spam"))).into_response(),
        Err(e) => failure("Failed to move email to spam", &e),
    }
}

/// GET /api/emails/:id/spam-check
pub async fn check_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.check_message(&id).await {
        Ok(is_spam) => (
            StatusCode::OK,
            Json(SpamCheckResponse {
                success: true,
                is_spam,
            }),
        )
            .into_response(),
        Err(e) => failure("Failed to check email", &e),
    }
}

/// POST /api/test-spam
pub async fn test_spam(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TestSpamRequest>,
) -> impl IntoResponse {
    let is_spam = state
        .service
        .check_spam(&req.email.subject, &req.email.body)
        .await;
    info!("Test spam result: {}", is_spam);

    Json(SpamCheckResponse {
        success: true,
        is_spam,
    })
}

/// GET /api/spam/sample
pub async fn sample_spam(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.sample_spam())
}

/// POST /api/spam/keywords
pub async fn add_keywords(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeywordsRequest>,
) -> impl IntoResponse {
    state.service.add_spam_keywords(&req.keywords).await;
    Json(StatusResponse::ok(format!("Added {} keywords", req.keywords.len())))
}

/// POST /api/spam/patterns - 400 when a pattern does not compile
pub async fn add_patterns(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatternsRequest>,
) -> impl IntoResponse {
    match state.service.add_spam_patterns(&req.patterns).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse::ok(format!("Added {} patterns", req.patterns.len()))),
        )
            .into_response(),
        Err(e @ MailError::Spam(_)) => {
            warn!("Rejected spam pattern: {}", e);
            (StatusCode::BAD_REQUEST, Json(StatusResponse::failed(e.to_string()))).into_response()
        }
        Err(e) => failure("Failed to add patterns", &e),
    }
}
