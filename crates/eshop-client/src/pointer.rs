//! # Session Pointer
//!
//! A small JSON blob on disk remembering who was signed in, so a restart
//! can restore the session without asking for credentials again.
//!
//! ## Not the Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  currentUser.json          users table (record store)                   │
//! │  ┌──────────────┐          ┌────────────────────────┐                   │
//! │  │ id           │  ──?──▶  │ authoritative record   │                   │
//! │  │ name, email  │          │ (may have vanished)    │                   │
//! │  │ createdAt    │          └────────────────────────┘                   │
//! │  └──────────────┘                                                       │
//! │                                                                         │
//! │  The pointer is a hint. On restore it is re-validated against the      │
//! │  store; a pointer with no backing record is stale and gets discarded.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The blob never contains the password hash — only the sanitized
//! projection a frontend is allowed to see.

use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use eshop_core::User;

/// The sanitized slice of a user that gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPointer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SessionPointer {
    fn from(user: &User) -> Self {
        SessionPointer {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// File-backed storage for the session pointer.
#[derive(Debug, Clone)]
pub struct PointerStore {
    path: PathBuf,
}

impl PointerStore {
    /// Creates a pointer store over the given file path.
    pub fn new(path: PathBuf) -> Self {
        PointerStore { path }
    }

    /// Reads the persisted pointer, if any.
    ///
    /// A missing file means "nobody was signed in". An unreadable or
    /// unparsable file is treated the same way, after discarding it, so a
    /// corrupt blob can never wedge startup.
    pub fn load(&self) -> Option<SessionPointer> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session pointer");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(pointer) => Some(pointer),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session pointer");
                self.clear();
                None
            }
        }
    }

    /// Writes the pointer, replacing any previous one.
    ///
    /// The blob is pretty-printed so it stays human-inspectable on disk.
    pub fn save(&self, pointer: &SessionPointer) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(pointer)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)?;

        debug!(path = %self.path.display(), "Session pointer saved");
        Ok(())
    }

    /// Removes the pointer. Never fails: a pointer that cannot be removed
    /// is logged and otherwise ignored, so logout always succeeds.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Session pointer cleared"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to clear session pointer");
            }
        }
    }

    /// Whether a pointer file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
