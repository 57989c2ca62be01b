//! # Data Files
//!
//! Whole-file JSON documents backing the allow-list, the calculation
//! history and the material cache.
//!
//! - A document is read and written as one JSON value
//! - Writes overwrite the whole file; there is no locking (last writer wins)
//! - A missing or unreadable document reads as its empty default, and an
//!   entry of the wrong shape is skipped rather than emptying the document
//! - Updates refuse to overwrite a file that does not parse

mod errors;
mod json_file;

pub use errors::{StorageError, StorageResult};
pub use json_file::{Document, JsonFile};

/// File name of the allow-list document inside the data directory
pub const USERS_FILE: &str = "users.json";

/// File name of the calculation history document
pub const HISTORY_FILE: &str = "history.json";

/// File name of the material cache document
pub const MATERIALS_FILE: &str = "materials.json";
