use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// On-device key-value storage. Each key holds one opaque payload; JSON
/// helpers cover the structured values the app keeps.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open defaults database")?;
        let catalog = Self { conn };
        catalog.migrate()?;
        Ok(catalog)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let catalog = Self { conn };
        catalog.migrate()?;
        Ok(catalog)
    }

    fn migrate(&self) -> Result<()> {
        info!("running defaults migrations");
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS defaults (
                key        TEXT PRIMARY KEY,
                value      BLOB NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM defaults WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("read key {key}"))?;
        Ok(value)
    }

    /// Overwrite the whole payload under `key`.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO defaults (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')",
                params![key, value],
            )
            .with_context(|| format!("write key {key}"))?;
        Ok(())
    }

    /// Decode a JSON payload. Missing, unreadable, or malformed values all
    /// come back as `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!(%key, %err, "failed to read payload");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%key, %err, "discarding undecodable payload");
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec(value).with_context(|| format!("encode payload for {key}"))?;
        self.set(key, &bytes)
    }
}
