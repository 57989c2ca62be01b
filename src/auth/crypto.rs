//! # Secret Comparison
//!
//! The admin password is compared in constant time.

use subtle::ConstantTimeEq;

/// Password used when `ADMIN_PASSWORD` is not set
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Constant-time comparison of two byte slices
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

/// Check a login attempt against the configured admin password
pub fn verify_admin_password(candidate: &str, expected: &str) -> bool {
    constant_time_str_eq(candidate, expected)
}
