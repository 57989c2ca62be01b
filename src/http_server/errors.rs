//! HTTP error responses
//!
//! Every error renders as `{"error": "<message>"}` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::calc::CalcError;
use crate::materials::MaterialError;
use crate::storage::StorageError;

pub const INVALID_JSON: &str = "Некорректный JSON";
pub const INVALID_USER_ID: &str = "Некорректный user_id";
pub const INTERNAL_ERROR: &str = "Внутренняя ошибка сервера";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// User is not on the allow-list
    #[error("⛔ Доступ запрещён. Обратитесь к администратору.")]
    Forbidden,

    /// Admin session missing or invalid
    #[error("Требуется вход")]
    LoginRequired,

    /// Detail is logged, never sent
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::LoginRequired => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                INTERNAL_ERROR.to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccessDenied => ApiError::Forbidden,
            AuthError::AuthenticationRequired
            | AuthError::SessionExpired
            | AuthError::SessionInvalid => ApiError::LoginRequired,
            e if e.is_client_error() => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<MaterialError> for ApiError {
    fn from(err: MaterialError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
