//! # Admin Session
//!
//! The admin panel has a single "logged in" flag. It is carried in a signed
//! HS256 token stored in an `HttpOnly` cookie, so the server keeps no
//! session state and a restart does not log the admin out.
//!
//! ## Invariants
//! - A token is only valid under the secret key it was signed with
//! - A token expires at `exp`; there is no refresh
//! - Logout clears the cookie on the client

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// Name of the admin session cookie
pub const ADMIN_COOKIE: &str = "tgcnc_admin";

/// Secret used when `FLASK_SECRET_KEY` is not set
pub const DEFAULT_SECRET_KEY: &str = "tg-cnc-secret";

const ADMIN_SUBJECT: &str = "admin";

/// Claims of an admin session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Always `"admin"`
    pub sub: String,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiration (Unix epoch seconds)
    pub exp: i64,

    pub aud: String,

    pub iss: String,
}

/// Admin session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signing secret
    pub secret: String,

    /// Session lifetime
    pub ttl: Duration,

    pub issuer: String,

    pub audience: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET_KEY.to_string(),
            ttl: Duration::hours(12),
            issuer: "tgcnc".to_string(),
            audience: "admin-panel".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }
}

/// Issues and validates admin session tokens
#[derive(Clone)]
pub struct AdminSessions {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AdminSessions {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a new session token
    pub fn issue(&self) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.ttl).timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate a session token and return its claims
    pub fn validate(&self, token: &str) -> AuthResult<AdminClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                    _ => AuthError::SessionInvalid,
                }
            })?;

        if token_data.claims.sub != ADMIN_SUBJECT {
            return Err(AuthError::SessionInvalid);
        }

        Ok(token_data.claims)
    }

    /// Validate the session cookie carried in a `Cookie` header
    pub fn authenticate(&self, cookie_header: Option<&str>) -> AuthResult<AdminClaims> {
        let token = cookie_header
            .and_then(|header| cookie_value(header, ADMIN_COOKIE))
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::AuthenticationRequired)?;
        self.validate(token)
    }

    pub fn is_admin(&self, cookie_header: Option<&str>) -> bool {
        self.authenticate(cookie_header).is_ok()
    }

    /// `Set-Cookie` value that stores a session token
    pub fn login_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            ADMIN_COOKIE,
            token,
            self.config.ttl.num_seconds()
        )
    }

    /// `Set-Cookie` value that removes the session
    pub fn logout_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", ADMIN_COOKIE)
    }
}

/// Find a cookie by name in a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_sessions() -> AdminSessions {
        AdminSessions::new(SessionConfig::with_secret("test_secret_key_for_testing_only"))
    }

    #[test]
    fn test_token_round_trip() {
        let sessions = create_test_sessions();
        let token = sessions.issue().unwrap();

        assert_eq!(token.split('.').count(), 3);
        let claims = sessions.validate(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let sessions1 = AdminSessions::new(SessionConfig::with_secret("secret_one"));
        let sessions2 = AdminSessions::new(SessionConfig::with_secret("secret_two"));

        let token = sessions1.issue().unwrap();
        assert!(matches!(
            sessions2.validate(&token),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test_secret";
        let now = Utc::now();
        let claims = AdminClaims {
            sub: "admin".to_string(),
            iat: (now - Duration::hours(30)).timestamp(),
            exp: (now - Duration::hours(18)).timestamp(),
            aud: "admin-panel".to_string(),
            iss: "tgcnc".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let sessions = AdminSessions::new(SessionConfig::with_secret(secret));
        assert!(matches!(
            sessions.validate(&token),
            Err(AuthError::SessionExpired)
        ));
    }

    #[test]
    fn test_cookie_header_parsing() {
        assert_eq!(
            cookie_value("a=1; tgcnc_admin=tok.en.sig; b=2", ADMIN_COOKIE),
            Some("tok.en.sig")
        );
        assert_eq!(cookie_value("a=1", ADMIN_COOKIE), None);
        assert_eq!(cookie_value("", ADMIN_COOKIE), None);
    }

    #[test]
    fn test_is_admin() {
        let sessions = create_test_sessions();
        let token = sessions.issue().unwrap();

        let header = format!("theme=dark; {}={}", ADMIN_COOKIE, token);
        assert!(sessions.is_admin(Some(&header)));
        assert!(!sessions.is_admin(Some("tgcnc_admin=garbage")));
        assert!(!sessions.is_admin(None));
    }

    #[test]
    fn test_authenticate_without_cookie() {
        let sessions = create_test_sessions();

        assert!(matches!(
            sessions.authenticate(None),
            Err(AuthError::AuthenticationRequired)
        ));
        assert!(matches!(
            sessions.authenticate(Some("theme=dark")),
            Err(AuthError::AuthenticationRequired)
        ));
        assert!(matches!(
            sessions.authenticate(Some("tgcnc_admin=")),
            Err(AuthError::AuthenticationRequired)
        ));
        assert!(matches!(
            sessions.authenticate(Some("tgcnc_admin=garbage")),
            Err(AuthError::SessionInvalid)
        ));

        let header = format!("{}={}", ADMIN_COOKIE, sessions.issue().unwrap());
        assert_eq!(sessions.authenticate(Some(&header)).unwrap().sub, "admin");
    }

    #[test]
    fn test_cookies() {
        let sessions = create_test_sessions();
        let cookie = sessions.login_cookie("abc");
        assert!(cookie.starts_with("tgcnc_admin=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(AdminSessions::logout_cookie().contains("Max-Age=0"));
    }
}
