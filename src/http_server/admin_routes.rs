//! Admin HTTP Routes
//!
//! Password login issuing a session cookie, allow-list management and the
//! calculation history. Everything except login and logout requires the
//! session.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult, INVALID_USER_ID};
use super::state::{json_object, user_id, AppState};
use crate::auth::{verify_admin_password, AdminSessions, AllowedUser, AuthError};
use crate::history::HistoryEntry;
use crate::lenient;

pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/admin/login", post(login_handler))
        .route("/api/admin/logout", post(logout_handler))
        .route("/api/admin/users", get(list_users_handler).post(add_user_handler))
        .route("/api/admin/users/:user_id", delete(delete_user_handler))
        .route("/api/admin/history", get(history_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<AllowedUser>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: AllowedUser,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

// ==================
// Handlers
// ==================

async fn login_handler(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Response> {
    let payload = json_object(&body)?;
    let password = payload
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if !verify_admin_password(password, &state.admin_password) {
        tracing::warn!("admin login rejected");
        let body = SuccessResponse {
            success: false,
            message: Some(AuthError::InvalidPassword.to_string()),
        };
        return Ok((StatusCode::FORBIDDEN, Json(body)).into_response());
    }

    let token = state.sessions.issue()?;
    tracing::info!("admin logged in");

    Ok((
        [(header::SET_COOKIE, state.sessions.login_cookie(&token))],
        SuccessResponse::ok(),
    )
        .into_response())
}

async fn logout_handler() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, AdminSessions::logout_cookie())],
        SuccessResponse::ok(),
    )
}

async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<UsersResponse>> {
    state.require_admin(&headers)?;
    Ok(Json(UsersResponse {
        users: state.allow_list.list(),
    }))
}

async fn add_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<UserResponse>> {
    state.require_admin(&headers)?;

    let payload = json_object(&body)?;
    let id = user_id(payload.get("user_id").unwrap_or(&Value::Null))?;
    let name = payload
        .get("name")
        .and_then(lenient::as_text)
        .unwrap_or_default();

    let user = state.allow_list.add(id, &name)?;
    tracing::info!(user_id = %user.id, "user added to allow-list");

    Ok(Json(UserResponse { user }))
}

async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.require_admin(&headers)?;

    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(INVALID_USER_ID.to_string()))?;

    state.allow_list.delete(id)?;
    tracing::info!(user_id = id, "user removed from allow-list");

    Ok(SuccessResponse::ok())
}

async fn history_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<HistoryResponse>> {
    state.require_admin(&headers)?;
    Ok(Json(HistoryResponse {
        history: state.history.list(),
    }))
}
