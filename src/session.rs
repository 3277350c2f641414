//! Session state and the persisted session record
//!
//! One `Session` owns the active thread id and last result for the
//! lifetime of the app; nothing else may hold follow-up state. The
//! `SessionStore` persists a single `{idea_data, result, timestamp}`
//! record, overwritten on each successful validation. Store operations
//! are best-effort: a failed save costs a re-validation, nothing more,
//! and a malformed record on disk is discarded rather than surfaced.

use crate::model::{FollowUpExchange, ValidationResult};
use crate::request::ValidationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_DIR: &str = "idea-validator";
const SESSION_FILE: &str = "session.json";

/// The single persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub idea_data: ValidationRequest,
    pub result: ValidationResult,
    pub timestamp: DateTime<Utc>,
}

/// In-memory session state. The active thread id is written only after a
/// successful validation response.
#[derive(Debug, Default)]
pub struct Session {
    thread_id: Option<String>,
    pub last_request: Option<ValidationRequest>,
    pub last_result: Option<ValidationResult>,
    pub follow_ups: Vec<FollowUpExchange>,
}

impl Session {
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Record a successful validation. Supersedes the previous result and
    /// clears any displayed follow-up answers.
    pub fn record_result(&mut self, request: ValidationRequest, result: ValidationResult) {
        self.thread_id = Some(result.thread_id.clone());
        self.last_request = Some(request);
        self.last_result = Some(result);
        self.follow_ups.clear();
    }

    pub fn record_follow_up(&mut self, exchange: FollowUpExchange) {
        self.follow_ups.push(exchange);
    }

    /// Restore a previous session record.
    pub fn restore(&mut self, record: SessionRecord) {
        self.thread_id = Some(record.result.thread_id.clone());
        self.last_request = Some(record.idea_data);
        self.last_result = Some(record.result);
        self.follow_ups.clear();
    }

    pub fn has_result(&self) -> bool {
        self.last_result.is_some()
    }
}

/// Persists the session record under a fixed file name.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store under the platform cache directory. `None` when the platform
    /// offers no cache location; callers then run without persistence.
    pub fn open_default() -> Option<Self> {
        dirs::cache_dir().map(|base| Self::at(base.join(SESSION_DIR)))
    }

    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Overwrite the stored record.
    pub fn save(&self, record: &SessionRecord) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string(record)?;
        write_atomic(&self.path(), &content)?;
        Ok(())
    }

    /// Load the stored record if present and well-formed. A record that
    /// fails to parse is deleted so the next run starts clean.
    pub fn load(&self) -> Option<SessionRecord> {
        let path = self.path();
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(_) => {
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Drop the stored record, if any.
    pub fn clear(&self) {
        let _ = fs::remove_file(self.path());
    }
}

/// Write content atomically by writing to a temp file first, then renaming.
fn write_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        let _ = fs::set_permissions(&tmp_path, perms);
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(())
}
