//! Access Check Route
//!
//! The Mini App calls this on start to decide whether to show the
//! calculator. Unlike other routes the body uses `allowed` / `message`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use super::errors::{INVALID_JSON, INVALID_USER_ID};
use super::state::{json_object, AppState};
use crate::auth::AuthError;
use crate::lenient;

pub const MISSING_USER_ID: &str = "user_id отсутствует";

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AccessResponse {
    fn denied(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                allowed: false,
                message: Some(message.into()),
            }),
        )
    }
}

pub fn access_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/check_access", post(check_access_handler))
        .with_state(state)
}

async fn check_access_handler(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let Ok(payload) = json_object(&body) else {
        return AccessResponse::denied(StatusCode::BAD_REQUEST, INVALID_JSON);
    };

    let raw = payload.get("user_id").cloned().unwrap_or_default();
    if lenient::is_blank(&raw) {
        return AccessResponse::denied(StatusCode::BAD_REQUEST, MISSING_USER_ID);
    }

    let Some(user_id) = lenient::as_i64(&raw) else {
        return AccessResponse::denied(StatusCode::BAD_REQUEST, INVALID_USER_ID);
    };

    if !state.allow_list.is_authorised(user_id) {
        tracing::info!(user_id, "access denied");
        return AccessResponse::denied(StatusCode::FORBIDDEN, AuthError::AccessDenied.to_string());
    }

    (
        StatusCode::OK,
        Json(AccessResponse {
            allowed: true,
            message: None,
        }),
    )
}
