//! SQLite database layer for Readmill.
//!
//! Holds the namespaced key-value table that backs [`PreferenceStore`].

mod migrations;

use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use crate::preferences::{PreferenceStore, PreferenceStoreError, PreferenceValue};

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Default path: `~/.local/share/readmill/readmill.db`
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    /// Open the database at a specific path.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open_at(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        tracing::debug!(path = %path.display(), "Opened preferences database");

        Ok(Self { conn, path })
    }

    /// Open a throwaway database that lives only as long as this value.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Get the default database path.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("readmill").join("readmill.db"))
    }

    /// Run database migrations.
    ///
    /// Safe to call multiple times - migrations are tracked and only run once.
    pub fn migrate(&self) -> anyhow::Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Get the database file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// List the keys stored under a namespace, sorted.
    pub fn list_preference_keys(&self, namespace: &str) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM preferences WHERE namespace = ? ORDER BY key")?;
        let rows = stmt.query_map([namespace], |row| row.get(0))?;
        rows.collect()
    }

    /// Remove every key stored under a namespace.
    pub fn clear_namespace(&self, namespace: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM preferences WHERE namespace = ?", [namespace])?;
        Ok(())
    }
}

impl PreferenceStore for Database {
    fn read(
        &self,
        namespace: &str,
        key: &str,
    ) -> Result<Option<PreferenceValue>, PreferenceStoreError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE namespace = ? AND key = ?",
                [namespace, key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn commit(
        &self,
        namespace: &str,
        entries: &[(&str, PreferenceValue)],
    ) -> Result<(), PreferenceStoreError> {
        // Dropping the transaction without commit rolls everything back.
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            let json = serde_json::to_string(value)?;
            tx.execute(
                "INSERT INTO preferences (namespace, key, value, updated_at) VALUES (?, ?, ?, unixepoch())
                 ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                [namespace, *key, json.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
