use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::user::User;

/// The one persisted client-side record: `{user, token}` as a single JSON
/// file. Authenticated state is exactly "a session record exists".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Owns the persisted session and its in-memory copy. Constructed once and
/// shared (`Arc`) between the HTTP client and the auth service, so token
/// lookups are explicit rather than ambient.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<AuthSession>>,
}

impl SessionStore {
    /// Bootstraps from disk. An absent or malformed file means "logged
    /// out", never an error; a malformed file is removed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = read_session(&path);
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("session lock poisoned").is_some()
    }

    pub fn set(&self, session: AuthSession) -> Result<()> {
        let encoded = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, encoded)?;
        *self.current.write().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    /// Clears disk and memory; idempotent.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove session file: {}", e);
            }
        }
        *self.current.write().expect("session lock poisoned") = None;
    }
}

fn read_session(path: &Path) -> Option<AuthSession> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Stored session is malformed, discarding: {}", e);
            let _ = fs::remove_file(path);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "hr_partner_session_{}_{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_means_logged_out() {
        let store = SessionStore::open(temp_session_path("missing"));
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn malformed_file_is_discarded_not_an_error() {
        let path = temp_session_path("malformed");
        fs::write(&path, "{not json at all").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn set_then_reopen_round_trips() {
        let path = temp_session_path("roundtrip");
        let store = SessionStore::open(&path);
        store
            .set(AuthSession {
                user: User::from_email("hr@example.com"),
                token: "abc123".to_string(),
            })
            .unwrap();
        assert!(store.is_authenticated());

        let reopened = SessionStore::open(&path);
        assert_eq!(reopened.token().as_deref(), Some("abc123"));

        store.clear();
        store.clear();
        assert!(!store.is_authenticated());
        assert!(!path.exists());
    }
}
