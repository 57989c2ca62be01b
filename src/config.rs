//! # Application Configuration
//!
//! Everything is read from the process environment (a `.env` file is loaded
//! into it by the CLI). Blank variables count as unset.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `CORS_ORIGINS` | any origin |
//! | `DATA_DIR` | `db` |
//! | `ADMIN_PASSWORD` | `admin123` |
//! | `FLASK_SECRET_KEY` | `tg-cnc-secret` |
//! | `OPENAI_API_KEY` | heuristic analyzer |
//! | `OPENAI_MODEL` | `gpt-4.1-mini` |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `BOT_TOKEN` | required by `tgcnc bot` |
//! | `BOT_ADMIN_IDS` | none |

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::{DEFAULT_ADMIN_PASSWORD, DEFAULT_SECRET_KEY};
use crate::bot::parse_admin_ids;
use crate::http_server::HttpServerConfig;
use crate::materials::OpenAiConfig;

pub const DEFAULT_DATA_DIR: &str = "db";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid {name} value: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Admin panel credentials
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub password: String,
    /// HMAC key for session cookies
    pub secret_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotConfig {
    pub token: Option<String>,
    /// Telegram IDs allowed to register users through the bot
    pub admin_ids: BTreeSet<String>,
}

impl BotConfig {
    pub fn require_token(&self) -> ConfigResult<&str> {
        self.token.as_deref().ok_or(ConfigError::Missing("BOT_TOKEN"))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http: HttpServerConfig,
    pub admin: AdminConfig,
    /// Present iff `OPENAI_API_KEY` is set
    pub openai: Option<OpenAiConfig>,
    pub bot: BotConfig,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            admin: AdminConfig::default(),
            openai: None,
            bot: BotConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = var("HOST") {
            config.http.host = host;
        }
        if let Some(port) = var("PORT") {
            config.http.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            config.http.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(dir) = var("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(password) = var("ADMIN_PASSWORD") {
            config.admin.password = password;
        }
        if let Some(secret) = var("FLASK_SECRET_KEY") {
            config.admin.secret_key = secret;
        }

        config.openai = var("OPENAI_API_KEY").map(|key| {
            let mut openai = OpenAiConfig::new(key);
            if let Some(model) = var("OPENAI_MODEL") {
                openai.model = model;
            }
            if let Some(base_url) = var("OPENAI_BASE_URL") {
                openai.base_url = base_url;
            }
            openai
        });

        config.bot = BotConfig {
            token: var("BOT_TOKEN"),
            admin_ids: var("BOT_ADMIN_IDS")
                .map(|raw| parse_admin_ids(&raw))
                .unwrap_or_default(),
        };

        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.http.port = port;
        self
    }
}
