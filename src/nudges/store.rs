//! Nudge storage: trait and SQLite implementation.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::models::{NudgeRecord, Schedule};
use super::schema::NUDGE_VERSIONED_SCHEMAS;

/// Trait for nudge storage operations.
pub trait NudgeStore: Send + Sync {
    /// Persist a nudge for a client.
    /// Enforces the per-client retention cap by deleting oldest rows if needed.
    fn create_nudge(&self, client_id: &str, record: NudgeRecord) -> Result<()>;

    /// Get all nudges for a client, in insertion order.
    /// Returns Err if there is a database error.
    fn get_client_nudges(&self, client_id: &str) -> Result<Vec<NudgeRecord>>;

    /// Mark a nudge as read. Returns the updated nudge.
    /// Returns Ok(None) if the nudge doesn't exist or belongs to another client.
    fn mark_nudge_read(&self, client_id: &str, nudge_id: &str) -> Result<Option<NudgeRecord>>;

    /// Get count of unread nudges for a client.
    fn get_unread_count(&self, client_id: &str) -> Result<usize>;

    /// Delete a nudge. Returns true if a row was removed.
    /// Returns false if the nudge doesn't exist or belongs to another client.
    fn delete_nudge(&self, client_id: &str, nudge_id: &str) -> Result<bool>;
}

/// SQLite-backed nudge store.
#[derive(Clone)]
pub struct SqliteNudgeStore {
    conn: Arc<Mutex<Connection>>,
    max_per_client: usize,
}

impl SqliteNudgeStore {
    /// Create a store on an existing connection.
    ///
    /// This will initialize the schema if the tables don't exist.
    pub fn new(conn: Arc<Mutex<Connection>>, max_per_client: usize) -> Result<Self> {
        {
            let conn = conn.lock().unwrap();
            let schema = NUDGE_VERSIONED_SCHEMAS.first().unwrap();
            conn.execute_batch(schema.up)
                .context("Failed to initialize nudge schema")?;
        }

        Ok(Self {
            conn,
            max_per_client,
        })
    }

    /// Open (or create) a store at the given database path.
    pub fn open(path: &Path, max_per_client: usize) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open nudge database: {:?}", path))?;
        Self::new(Arc::new(Mutex::new(conn)), max_per_client)
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<NudgeRecord> {
        let schedule_type: String = row.get(1)?;
        let date: Option<String> = row.get(2)?;
        let recurrence_days_json: Option<String> = row.get(3)?;

        let schedule = match schedule_type.as_str() {
            "recurring" => Schedule::Recurring {
                recurrence_days: recurrence_days_json.as_deref().and_then(|raw| {
                    match serde_json::from_str(raw) {
                        Ok(days) => Some(days),
                        Err(e) => {
                            warn!("Discarding unreadable recurrence pattern {:?}: {}", raw, e);
                            None
                        }
                    }
                }),
            },
            // Anything else is treated as a fixed-date nudge, mirroring
            // how reads degrade for loosely shaped records
            other => {
                if other != "schedule" {
                    warn!("Unknown schedule_type {:?}, treating as fixed-date", other);
                }
                Schedule::Scheduled { date }
            }
        };

        Ok(NudgeRecord {
            id: row.get(0)?,
            schedule,
            created_at: row.get(4)?,
            subject: row.get(5)?,
            message: row.get(6)?,
            is_read: row.get::<_, i64>(7)? != 0,
        })
    }
}

const NUDGE_COLUMNS: &str =
    "id, schedule_type, date, recurrence_days, created_at, subject, message, is_read";

impl NudgeStore for SqliteNudgeStore {
    fn create_nudge(&self, client_id: &str, record: NudgeRecord) -> Result<()> {
        let (schedule_type, date, recurrence_days) = match &record.schedule {
            Schedule::Scheduled { date } => ("schedule", date.clone(), None),
            Schedule::Recurring { recurrence_days } => (
                "recurring",
                None,
                recurrence_days
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()
                    .context("Failed to encode recurrence pattern")?,
            ),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO nudges (id, client_id, schedule_type, date, recurrence_days,
                                 created_at, subject, message, is_read, inserted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.id,
                client_id,
                schedule_type,
                date,
                recurrence_days,
                record.created_at,
                record.subject,
                record.message,
                record.is_read as i64,
                chrono::Utc::now().timestamp(),
            ],
        )
        .context("Failed to insert nudge")?;

        // Retention cap: keep only the newest rows for this client
        let evicted = conn.execute(
            "DELETE FROM nudges
             WHERE client_id = ?1 AND rowid NOT IN (
                 SELECT rowid FROM nudges WHERE client_id = ?1
                 ORDER BY rowid DESC LIMIT ?2
             )",
            params![client_id, self.max_per_client as i64],
        )?;
        if evicted > 0 {
            debug!(
                "Evicted {} nudges over the cap for client {}",
                evicted, client_id
            );
        }

        Ok(())
    }

    fn get_client_nudges(&self, client_id: &str) -> Result<Vec<NudgeRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM nudges WHERE client_id = ?1 ORDER BY rowid ASC",
            NUDGE_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![client_id], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn mark_nudge_read(&self, client_id: &str, nudge_id: &str) -> Result<Option<NudgeRecord>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE nudges SET is_read = 1 WHERE id = ?1 AND client_id = ?2",
            params![nudge_id, client_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM nudges WHERE id = ?1 AND client_id = ?2",
                    NUDGE_COLUMNS
                ),
                params![nudge_id, client_id],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn get_unread_count(&self, client_id: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM nudges WHERE client_id = ?1 AND is_read = 0",
            params![client_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn delete_nudge(&self, client_id: &str, nudge_id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM nudges WHERE id = ?1 AND client_id = ?2",
            params![nudge_id, client_id],
        )?;
        Ok(deleted > 0)
    }
}
