use rusqlite::Connection;

use crate::error::Result;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS habits (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            frequency    TEXT NOT NULL CHECK(frequency IN ('daily','weekly')),
            owner_id     INTEGER NOT NULL,
            created_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habit_completions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id        INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            completion_date TEXT NOT NULL,
            created_at      TEXT DEFAULT (datetime('now')),
            UNIQUE(habit_id, completion_date)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_habit_date
            ON habit_completions(habit_id, completion_date);
    ")?;
    Ok(())
}
