//! Session persistence for picvote
//!
//! This module stores the backend-issued session identifier as a small
//! JSON file so that a returning client reuses the same session instead
//! of requesting a new one. The file lives in the platform data
//! directory by default, overridable via configuration or the
//! `PICVOTE_SESSION_FILE` environment variable.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PicvoteError, Result};

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// A persisted voting session.
///
/// The identifier is opaque to the client; the backend uses it to
/// enforce its one-vote-per-picture-per-day rule. `created_at` is kept
/// for display only — the client never expires a session on its own.
///
/// # Examples
///
/// ```
/// use picvote::session::SessionRecord;
///
/// let record = SessionRecord::new("abc-123");
/// assert_eq!(record.session_id, "abc-123");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier issued by the backend.
    pub session_id: String,

    /// UTC timestamp at which the session was first persisted.
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record for a freshly issued session identifier.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// File-backed store for the client's session record.
///
/// # Examples
///
/// ```no_run
/// use picvote::session::{SessionRecord, SessionStore};
///
/// # fn example() -> picvote::error::Result<()> {
/// let store = SessionStore::new(None)?;
/// if store.load()?.is_none() {
///     store.save(&SessionRecord::new("abc-123"))?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store using the standard path resolution.
    ///
    /// Resolution order: the explicit path argument (from configuration),
    /// then the `PICVOTE_SESSION_FILE` environment variable, then
    /// `session.json` inside the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns error if no platform data directory can be determined.
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new_with_path(path.to_path_buf()));
        }

        if let Ok(override_path) = std::env::var("PICVOTE_SESSION_FILE") {
            return Ok(Self::new_with_path(override_path));
        }

        let proj_dirs = ProjectDirs::from("com", "picvote", "picvote")
            .ok_or_else(|| PicvoteError::Session("Could not determine data directory".into()))?;

        Ok(Self {
            path: proj_dirs.data_dir().join("session.json"),
        })
    }

    /// Create a store that uses the specified file path.
    ///
    /// This is primarily useful for tests where the default application
    /// data directory is not desirable (for example, a temporary
    /// directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use picvote::session::SessionStore;
    ///
    /// let store = SessionStore::new_with_path("/tmp/picvote-test-session.json");
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session record.
    ///
    /// Returns `Ok(None)` when no session has been persisted yet,
    /// allowing callers to distinguish "first run" from a genuine read
    /// or parse error.
    pub fn load(&self) -> Result<Option<SessionRecord>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let record: SessionRecord = serde_json::from_str(&contents)?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PicvoteError::Io(e).into()),
        }
    }

    /// Persist a session record, creating parent directories as needed.
    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PicvoteError::Session(format!("Failed to create session directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Delete the stored session record.
    ///
    /// This is a no-op when no record exists, so it is safe to call even
    /// when the caller is not sure whether a session was previously
    /// saved.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PicvoteError::Io(e).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
