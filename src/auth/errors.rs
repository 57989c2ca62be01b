//! # Auth Errors
//!
//! Error types for the allow-list and the admin session.
//! Display strings are the user-facing (Russian) messages.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Access control errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Allow-list Errors
    // ==================

    /// The Telegram ID is already on the allow-list
    #[error("Пользователь уже существует")]
    UserAlreadyExists,

    /// The Telegram ID is not on the allow-list
    #[error("⛔ Доступ запрещён. Обратитесь к администратору.")]
    AccessDenied,

    // ==================
    // Admin Session Errors
    // ==================

    /// Admin password mismatch
    #[error("Неверный пароль")]
    InvalidPassword,

    /// No valid admin session
    #[error("Требуется вход")]
    AuthenticationRequired,

    /// Session token expired
    #[error("Сессия истекла")]
    SessionExpired,

    /// Session token malformed or signed with another key
    #[error("Недействительная сессия")]
    SessionInvalid,

    // ==================
    // Internal Errors
    // ==================

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Data file write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::UserAlreadyExists => 400,

            // 401 Unauthorized
            AuthError::AuthenticationRequired => 401,
            AuthError::SessionExpired => 401,
            AuthError::SessionInvalid => 401,

            // 403 Forbidden
            AuthError::AccessDenied => 403,
            AuthError::InvalidPassword => 403,

            // 500 Internal Server Error
            AuthError::TokenGenerationFailed => 500,
            AuthError::Storage(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::UserAlreadyExists.status_code(), 400);
        assert_eq!(AuthError::AuthenticationRequired.status_code(), 401);
        assert_eq!(AuthError::AccessDenied.status_code(), 403);
        assert_eq!(AuthError::InvalidPassword.status_code(), 403);
        assert_eq!(AuthError::TokenGenerationFailed.status_code(), 500);
    }

    #[test]
    fn test_duplicate_message() {
        assert_eq!(
            AuthError::UserAlreadyExists.to_string(),
            "Пользователь уже существует"
        );
        assert!(AuthError::UserAlreadyExists.is_client_error());
    }
}
