use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::common::PromptError;
use crate::domains::assistant::{answer, classify};
use crate::server::app::AppState;
use crate::server::middleware::{AuthUser, SessionId};

/// Longest accepted prompt, in characters.
pub const MAX_MESSAGE_LEN: usize = 500;

#[derive(Debug, Deserialize)]
pub struct TryPromptRequest {
    #[serde(default)]
    pub message: String,
}

/// Successful prompt: answer plus remaining guest tries.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSuccess {
    pub answer: String,
    pub remaining: Option<u32>,
}

/// Failed prompt: the error plus whatever remaining count applies at the
/// point of failure.
#[derive(Debug)]
pub struct PromptFailure {
    pub error: PromptError,
    pub remaining: Option<u32>,
}

#[derive(Serialize)]
struct AnswerBody {
    answer: String,
    remaining: Option<u32>,
    requires_login: bool,
}

#[derive(Serialize)]
struct RejectionBody {
    message: String,
    remaining: Option<u32>,
    requires_login: bool,
}

#[derive(Serialize)]
struct FaultBody {
    message: String,
    error: String,
    remaining: Option<u32>,
}

impl IntoResponse for PromptFailure {
    fn into_response(self) -> Response {
        match &self.error {
            PromptError::QuotaExceeded => (
                StatusCode::UNAUTHORIZED,
                Json(RejectionBody {
                    message: self.error.to_string(),
                    remaining: Some(0),
                    requires_login: true,
                }),
            )
                .into_response(),
            PromptError::Validation | PromptError::NoAnswer => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RejectionBody {
                    message: self.error.to_string(),
                    remaining: self.remaining,
                    requires_login: false,
                }),
            )
                .into_response(),
            PromptError::DatasetUnavailable(source) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FaultBody {
                    message: "Request failed".to_string(),
                    error: source.to_string(),
                    remaining: self.remaining,
                }),
            )
                .into_response(),
        }
    }
}

/// Everything POST /ai/try does after HTTP extraction, separated out so
/// tests can drive the full flow without a socket.
///
/// Sequence: validate message, consume guest quota, snapshot the dataset,
/// classify, format. Quota rejection happens before any dataset access.
pub async fn run_prompt(
    state: &AppState,
    session_id: &str,
    is_authenticated: bool,
    message: &str,
) -> Result<PromptSuccess, PromptFailure> {
    let text = message.trim();
    if text.is_empty() || text.chars().count() > MAX_MESSAGE_LEN {
        let status = state.quota.peek(session_id, is_authenticated).await;
        return Err(PromptFailure {
            error: PromptError::Validation,
            remaining: status.remaining,
        });
    }

    let decision = state.quota.check_and_consume(session_id, is_authenticated).await;
    if !decision.allowed {
        return Err(PromptFailure {
            error: PromptError::QuotaExceeded,
            remaining: Some(0),
        });
    }
    let remaining = decision.remaining;

    tracing::info!(authenticated = is_authenticated, message = %text, "ai try request");

    let dataset = match state.dataset.snapshot() {
        Ok(dataset) => dataset,
        Err(source) => {
            tracing::error!(error = %source, "ai try failed to load dataset");
            return Err(PromptFailure {
                error: PromptError::DatasetUnavailable(source),
                remaining,
            });
        }
    };

    let today = Utc::now().date_naive().to_string();
    let reply = answer(classify(text), text, &dataset, &today);

    tracing::info!(
        intent = reply.label,
        has_answer = reply.text.is_some(),
        "ai try matched intent"
    );

    match reply.text {
        Some(answer) => Ok(PromptSuccess { answer, remaining }),
        None => Err(PromptFailure {
            error: PromptError::NoAnswer,
            remaining,
        }),
    }
}

/// POST /ai/try
pub async fn try_prompt_handler(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<SessionId>,
    auth_user: Option<Extension<AuthUser>>,
    Json(body): Json<TryPromptRequest>,
) -> Response {
    match run_prompt(&state, &session.0, auth_user.is_some(), &body.message).await {
        Ok(success) => (
            StatusCode::OK,
            Json(AnswerBody {
                answer: success.answer,
                remaining: success.remaining,
                requires_login: false,
            }),
        )
            .into_response(),
        Err(failure) => failure.into_response(),
    }
}

#[derive(Serialize)]
pub struct TryStatusResponse {
    pub is_authenticated: bool,
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    pub used: Option<u32>,
}

/// GET /ai/try-status
///
/// Read-only: reports the guest counter without consuming a try.
pub async fn try_status_handler(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<SessionId>,
    auth_user: Option<Extension<AuthUser>>,
) -> Json<TryStatusResponse> {
    let status = state.quota.peek(&session.0, auth_user.is_some()).await;

    Json(TryStatusResponse {
        is_authenticated: status.is_authenticated,
        remaining: status.remaining,
        limit: status.limit,
        used: status.used,
    })
}
