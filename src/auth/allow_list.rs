//! # Allow-list
//!
//! Telegram user IDs permitted to use the calculator, stored as an ordered
//! JSON array in `users.json`. IDs are compared as decimal strings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};
use crate::lenient;
use crate::storage::{JsonFile, USERS_FILE};

/// Name stored when a user is added without one
pub const DEFAULT_USER_NAME: &str = "Без имени";

/// One allow-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedUser {
    /// Telegram user ID as a decimal string
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

/// The allow-list document
#[derive(Debug, Clone)]
pub struct AllowList {
    file: JsonFile<Vec<AllowedUser>>,
}

impl AllowList {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Allow-list stored in `<data_dir>/users.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(USERS_FILE))
    }

    /// All entries in insertion order
    pub fn list(&self) -> Vec<AllowedUser> {
        self.file.load()
    }

    /// Add a user; fails if the ID is already present
    pub fn add(&self, user_id: i64, name: &str) -> AuthResult<AllowedUser> {
        let id = user_id.to_string();
        let name = name.trim();

        let mut users = self.file.read()?;
        if users.iter().any(|u| u.id == id) {
            return Err(AuthError::UserAlreadyExists);
        }

        let entry = AllowedUser {
            id,
            name: if name.is_empty() {
                DEFAULT_USER_NAME.to_string()
            } else {
                name.to_string()
            },
        };
        users.push(entry.clone());
        self.file.save(&users)?;

        Ok(entry)
    }

    /// Remove a user; removing an absent ID is not an error
    pub fn delete(&self, user_id: i64) -> AuthResult<()> {
        let id = user_id.to_string();
        self.file.update(|users| users.retain(|u| u.id != id))?;
        Ok(())
    }

    pub fn is_authorised(&self, user_id: i64) -> bool {
        let id = user_id.to_string();
        self.list().iter().any(|u| u.id == id)
    }

    /// Gate for user-facing endpoints
    pub fn require(&self, user_id: i64) -> AuthResult<()> {
        if self.is_authorised(user_id) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }
}
