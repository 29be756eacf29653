use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use super::token::{decode_role, Role};
use crate::error::{StoreError, TokenError};

const TOKEN_KEY: &str = "access_token";

/// An authenticated session.
///
/// Only the token is held; the role is decoded from it on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Result<Role, TokenError> {
        decode_role(&self.token)
    }
}

/// The SessionStore persists the access token in a small SQLite
/// key-value table so a login survives restarts.
pub struct SessionStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SessionStore {
    /// Open (or create) the store at the given database path.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        info!("📁 Session store at: {}", db_path.display());

        let store = SessionStore {
            conn: Mutex::new(conn),
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = SessionStore {
            conn: Mutex::new(Connection::open_in_memory()?),
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn().execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock cannot leave the table half-written
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the stored token.
    pub fn set(&self, token: &str) -> Result<(), StoreError> {
        self.conn().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![TOKEN_KEY, token],
        )?;
        debug!("Session token stored");
        Ok(())
    }

    /// The current session, if a token is stored.
    pub fn get(&self) -> Result<Option<Session>, StoreError> {
        let token: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                [TOKEN_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(token.filter(|t| !t.is_empty()).map(Session::new))
    }

    /// Like `get`, but a read failure counts as "no session".
    pub fn current(&self) -> Option<Session> {
        match self.get() {
            Ok(session) => session,
            Err(e) => {
                warn!("⚠️  Could not read session: {}", e);
                None
            }
        }
    }

    /// Forget the stored token.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn()
            .execute("DELETE FROM kv WHERE key = ?1", [TOKEN_KEY])?;
        debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
