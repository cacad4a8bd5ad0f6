//! Database schema for the nudge store.

/// Schema definition for nudge tables.
pub struct NudgeSchema {
    pub version: usize,
    pub up: &'static str,
}

pub const NUDGE_VERSIONED_SCHEMAS: &[NudgeSchema] = &[NudgeSchema {
    version: 1,
    up: r#"
            CREATE TABLE IF NOT EXISTS nudges (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                schedule_type TEXT NOT NULL,
                date TEXT,
                recurrence_days TEXT,
                created_at TEXT,
                subject TEXT,
                message TEXT,
                is_read INTEGER NOT NULL DEFAULT 0,
                inserted_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_nudges_client ON nudges(client_id);
            CREATE INDEX IF NOT EXISTS idx_nudges_client_unread ON nudges(client_id, is_read);
        "#,
}];
