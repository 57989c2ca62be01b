//! Shared handler state

use std::sync::Arc;

use axum::body::Bytes;
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult, INVALID_JSON, INVALID_USER_ID};
use crate::auth::{AdminSessions, AllowList, SessionConfig};
use crate::config::AppConfig;
use crate::history::HistoryLog;
use crate::lenient;
use crate::materials::{analyzer_for, MaterialAnalyzer, MaterialCache, MaterialResult, MaterialService};

/// State shared by every route
pub struct AppState {
    pub allow_list: AllowList,
    pub history: HistoryLog,
    pub materials: MaterialService,
    pub sessions: AdminSessions,
    pub admin_password: String,
}

impl AppState {
    /// State with the analyzer chosen by configuration
    pub fn new(config: &AppConfig) -> MaterialResult<Self> {
        let analyzer = analyzer_for(config.openai.as_ref())?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    pub fn with_analyzer(config: &AppConfig, analyzer: Arc<dyn MaterialAnalyzer>) -> Self {
        let data_dir = config.data_dir.as_path();

        Self {
            allow_list: AllowList::in_dir(data_dir),
            history: HistoryLog::in_dir(data_dir),
            materials: MaterialService::new(MaterialCache::in_dir(data_dir), analyzer),
            sessions: AdminSessions::new(SessionConfig::with_secret(&config.admin.secret_key)),
            admin_password: config.admin.password.clone(),
        }
    }

    /// Whether the request carries a valid admin session cookie
    pub fn is_admin(&self, headers: &axum::http::HeaderMap) -> bool {
        self.sessions.is_admin(cookie_header(headers))
    }

    pub fn require_admin(&self, headers: &axum::http::HeaderMap) -> ApiResult<()> {
        self.sessions.authenticate(cookie_header(headers))?;
        Ok(())
    }
}

fn cookie_header(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
}

/// Parse a request body as a JSON object, whatever the content type
pub(crate) fn json_object(body: &Bytes) -> ApiResult<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::BadRequest(INVALID_JSON.to_string())),
    }
}

/// Read a Telegram user ID from a number or numeric string
pub(crate) fn user_id(value: &Value) -> ApiResult<i64> {
    lenient::as_i64(value).ok_or_else(|| ApiError::BadRequest(INVALID_USER_ID.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::HeuristicAnalyzer;
    use axum::http::{header, HeaderMap, HeaderValue};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_admin_cookie_check() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::default().with_data_dir(temp.path());
        let state = AppState::with_analyzer(&config, Arc::new(HeuristicAnalyzer));

        let mut headers = HeaderMap::new();
        assert!(matches!(
            state.require_admin(&headers),
            Err(ApiError::LoginRequired)
        ));

        let token = state.sessions.issue().unwrap();
        let cookie = format!("theme=dark; tgcnc_admin={}", token);
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
        assert!(state.require_admin(&headers).is_ok());
    }

    #[test]
    fn test_body_helpers() {
        assert!(json_object(&Bytes::from_static(b"{\"a\": 1}")).is_ok());
        assert!(json_object(&Bytes::from_static(b"[1]")).is_err());
        assert!(json_object(&Bytes::new()).is_err());

        assert_eq!(user_id(&json!("12345")).unwrap(), 12345);
        assert!(user_id(&json!("abc")).is_err());
    }
}
