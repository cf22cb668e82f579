//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for login, session status, and logout.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use food_api_core::domain::SessionData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::web::schemas::LoginRequestSchema;
use crate::web::session::{expired_session_cookie, SessionContext};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub logged_in: bool,
}

type JsonError = (StatusCode, Json<MessageResponse>);

/// Pulls the string `email` and `password` out of a login body. Bodies that
/// are empty, not JSON, or lack either string yield `None`.
fn credentials(body: &Value) -> Option<(&str, &str)> {
    Some((body.get("email")?.as_str()?, body.get("password")?.as_str()?))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/login - Login with an email and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestSchema,
    responses(
        (status = 200, description = "Login successful", body = MessageResponse),
        (status = 401, description = "Invalid email or password", body = MessageResponse),
        (status = 500, description = "The user data could not be read", body = MessageResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    body: Bytes,
) -> Result<Json<MessageResponse>, JsonError> {
    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            MessageResponse::new("Invalid email or password"),
        )
    };

    // 1. Both credentials are required; an unreadable body has none
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let Some((email, password)) = credentials(&body) else {
        return Err(unauthorized());
    };

    // 2. Compare against the stored users
    let user = state
        .store
        .find_user_by_credentials(email, password)
        .await
        .map_err(|e| {
            error!("Failed to read users: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                MessageResponse::new("Login failed"),
            )
        })?
        .ok_or_else(unauthorized)?;

    // 3. Remember the user in the current session
    state
        .sessions
        .set(
            &session.id,
            SessionData {
                user_id: Some(user.id),
            },
        )
        .await
        .map_err(|e| {
            error!("Failed to store session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                MessageResponse::new("Login failed"),
            )
        })?;

    info!(user_id = user.id, "User logged in");
    Ok(MessageResponse::new("Login successful"))
}

/// GET /api/session - Check if the user is logged in
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "User session status", body = SessionStatus)
    )
)]
pub async fn session_handler(Extension(session): Extension<SessionContext>) -> Json<SessionStatus> {
    Json(SessionStatus {
        logged_in: session.data.is_logged_in(),
    })
}

/// POST /api/logout - Logout and destroy the session
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 500, description = "Logout failed", body = MessageResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, JsonError> {
    state.sessions.destroy(&session.id).await.map_err(|e| {
        error!("Failed to destroy session: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            MessageResponse::new("Logout failed"),
        )
    })?;

    if let Some(user_id) = session.data.user_id {
        info!(user_id, "User logged out");
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie(&state.config))],
        MessageResponse::new("Logout successful"),
    ))
}
