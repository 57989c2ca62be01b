//! # Auth Module
//!
//! Access control for the calculator and the admin panel:
//! the Telegram ID allow-list, the admin password check and the
//! cookie-carried admin session.

pub mod allow_list;
pub mod crypto;
pub mod errors;
pub mod session;

pub use allow_list::{AllowList, AllowedUser, DEFAULT_USER_NAME};
pub use crypto::{verify_admin_password, DEFAULT_ADMIN_PASSWORD};
pub use errors::{AuthError, AuthResult};
pub use session::{AdminSessions, SessionConfig, ADMIN_COOKIE, DEFAULT_SECRET_KEY};
