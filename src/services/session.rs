use std::sync::{Arc, Mutex, RwLock};

use anyhow::Context;
use rusqlite::Connection;

use crate::db::queries;

/// Storage key the session token lives under.
pub const TOKEN_KEY: &str = "authToken";

/// Bearer token held in memory and mirrored to the storage table so it
/// survives restarts.
pub struct TokenStore {
    db: Arc<Mutex<Connection>>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Opens the store, picking up a token persisted by an earlier run.
    pub fn load(db: Arc<Mutex<Connection>>) -> anyhow::Result<Self> {
        let token = {
            let conn = db
                .lock()
                .map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
            queries::get_item(&conn, TOKEN_KEY).context("failed to read session token")?
        };
        if token.is_some() {
            tracing::info!("restored persisted session token");
        }
        Ok(Self {
            db,
            token: RwLock::new(token),
        })
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }

    pub fn set(&self, token: &str) {
        if let Ok(mut held) = self.token.write() {
            *held = Some(token.to_string());
        }
        if let Err(e) = self.persist(|conn| queries::set_item(conn, TOKEN_KEY, token)) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
    }

    pub fn clear(&self) {
        if let Ok(mut held) = self.token.write() {
            *held = None;
        }
        if let Err(e) = self.persist(|conn| queries::remove_item(conn, TOKEN_KEY).map(|_| ())) {
            tracing::warn!(error = %e, "failed to remove persisted session token");
        }
    }

    fn persist<F>(&self, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&Connection) -> anyhow::Result<()>,
    {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
        write(&conn)
    }
}
