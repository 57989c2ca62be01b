//! # tgcnc HTTP Server Module
//!
//! The Mini App backend: access checks, material analysis, the cutting-mode
//! calculator and the admin panel, combined into one Axum router.
//!
//! # Endpoints
//!
//! - `/` and `/admin` - HTML pages
//! - `/health` - Health check
//! - `/api/check_access` - Allow-list check
//! - `/api/materials/*` - Material cache and analysis
//! - `/api/calc` - Cutting-mode calculation
//! - `/api/admin/*` - Session-gated administration

pub mod access_routes;
pub mod admin_routes;
pub mod calc_routes;
pub mod config;
pub mod errors;
pub mod material_routes;
pub mod observability_routes;
pub mod page_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
