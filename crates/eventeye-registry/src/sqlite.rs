//! SQLite implementation of the Registry trait.
//!
//! Used when verification records must outlive the process. Uses rusqlite
//! with bundled SQLite, wrapped in async via `tokio::task::spawn_blocking`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use eventeye_core::{VerificationRecord, VerificationToken};

use crate::error::{RegistryError, Result};
use crate::migration;
use crate::traits::Registry;

/// SQLite-backed registry.
///
/// Thread-safe via an internal mutex; every call runs on the blocking pool.
pub struct SqliteRegistry {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRegistry {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking closure against the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| RegistryError::LockPoisoned)?;
            f(&conn)
        })
        .await
        .map_err(|e| RegistryError::Task(e.to_string()))?
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<VerificationRecord> {
    Ok(VerificationRecord {
        participant_name: row.get("participant_name")?,
        event_name: row.get("event_name")?,
        event_date: row.get("event_date")?,
        organizer: row.get("organizer")?,
        issued_at: row.get("issued_at")?,
    })
}

#[async_trait]
impl Registry for SqliteRegistry {
    async fn register(
        &self,
        token: &VerificationToken,
        record: &VerificationRecord,
    ) -> Result<()> {
        let token = *token;
        let record = record.clone();

        self.with_conn(move |conn| {
            // Insert unless the token is already taken
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO verification_records (
                    token, participant_name, event_name, event_date, organizer, issued_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    token.to_hex(),
                    record.participant_name,
                    record.event_name,
                    record.event_date,
                    record.organizer,
                    record.issued_at,
                ],
            )?;

            // Zero rows changed means the token already existed
            if inserted == 0 {
                return Err(RegistryError::DuplicateToken(token));
            }
            Ok(())
        })
        .await
    }

    async fn lookup(&self, token: &VerificationToken) -> Result<Option<VerificationRecord>> {
        let key = token.to_hex();

        self.with_conn(move |conn| {
            let record = conn
                .query_row(
                    "SELECT participant_name, event_name, event_date, organizer, issued_at
                     FROM verification_records WHERE token = ?1",
                    params![key],
                    row_to_record,
                )
                .optional()?;
            Ok(record)
        })
        .await
    }

    async fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM verification_records", [], |row| {
                    row.get(0)
                })?;
            // COUNT(*) comes back as i64
            usize::try_from(count)
                .map_err(|_| RegistryError::InvalidData(format!("negative row count {}", count)))
        })
        .await
    }
}
