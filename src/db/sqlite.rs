use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use crate::db::{HabitStore, migrations};
use crate::error::{Error, Result};
use crate::models::{Completion, Frequency, Habit};

const DATE_FMT: &str = "%Y-%m-%d";

fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))
}

fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// SQLite-backed store. Dates are stored as ISO `YYYY-MM-DD` text; the
/// one-completion-per-day rule is also a `UNIQUE(habit_id, completion_date)`
/// constraint in the schema, so concurrent writers cannot slip a duplicate
/// past the application-level check.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::init(conn)
    }

    /// Fully in-memory database, handy for scratch use.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // WAL for better concurrent access; foreign_keys so habit
        // deletion actually cascades.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        migrations::run_migrations(&conn)?;
        info!("sqlite store ready");
        Ok(Self { conn })
    }

    fn habit_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM habits WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn completed_on(&self, habit_id: i64, date: NaiveDate) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM habit_completions WHERE habit_id = ?1 AND completion_date = ?2",
                params![habit_id, fmt_date(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl HabitStore for SqliteStore {
    fn insert_habit(&mut self, habit: Habit) -> Result<Habit> {
        self.conn.execute(
            "INSERT INTO habits (name, description, frequency, owner_id, created_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.name,
                habit.description,
                habit.frequency.as_str(),
                habit.owner_id,
                fmt_date(habit.created_date),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("inserted habit {} ('{}')", id, habit.name);
        Ok(Habit {
            id: Some(id),
            ..habit
        })
    }

    fn find_habit(&self, id: i64) -> Result<Habit> {
        let habit = self
            .conn
            .query_row(
                "SELECT id, name, description, frequency, owner_id, created_date
                 FROM habits WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Habit {
                        id: Some(row.get::<_, i64>(0)?),
                        name: row.get(1)?,
                        description: row.get(2)?,
                        frequency: Frequency::from_str(&row.get::<_, String>(3)?).map_err(|e| {
                            rusqlite::Error::InvalidParameterName(e.to_string())
                        })?,
                        owner_id: row.get(4)?,
                        created_date: parse_date(&row.get::<_, String>(5)?)?,
                    })
                },
            )
            .optional()?;
        habit.ok_or(Error::HabitNotFound(id))
    }

    fn update_habit(&mut self, habit: &Habit) -> Result<()> {
        let id = habit.id.ok_or(Error::HabitNotFound(0))?;
        let updated = self.conn.execute(
            "UPDATE habits SET name = ?1, description = ?2, frequency = ?3 WHERE id = ?4",
            params![habit.name, habit.description, habit.frequency.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::HabitNotFound(id));
        }
        Ok(())
    }

    fn delete_habit(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::HabitNotFound(id));
        }
        debug!("deleted habit {} and its completions", id);
        Ok(())
    }

    fn habits_for_owner(&self, owner_id: i64) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, frequency, owner_id, created_date
             FROM habits WHERE owner_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![owner_id], |row| {
            Ok(Habit {
                id: Some(row.get::<_, i64>(0)?),
                name: row.get(1)?,
                description: row.get(2)?,
                frequency: Frequency::from_str(&row.get::<_, String>(3)?)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                owner_id: row.get(4)?,
                created_date: parse_date(&row.get::<_, String>(5)?)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    fn completion_dates(&self, habit_id: i64) -> Result<BTreeSet<NaiveDate>> {
        if !self.habit_exists(habit_id)? {
            return Err(Error::HabitNotFound(habit_id));
        }
        let mut stmt = self.conn.prepare(
            "SELECT completion_date FROM habit_completions
             WHERE habit_id = ?1 ORDER BY completion_date",
        )?;
        let rows = stmt.query_map(params![habit_id], |row| {
            parse_date(&row.get::<_, String>(0)?)
        })?;
        rows.collect::<rusqlite::Result<BTreeSet<_>>>()
            .map_err(Error::from)
    }

    fn completions(&self, habit_id: i64) -> Result<Vec<Completion>> {
        if !self.habit_exists(habit_id)? {
            return Err(Error::HabitNotFound(habit_id));
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, completion_date FROM habit_completions
             WHERE habit_id = ?1 ORDER BY completion_date",
        )?;
        let rows = stmt.query_map(params![habit_id], |row| {
            Ok(Completion {
                id: Some(row.get::<_, i64>(0)?),
                habit_id: row.get(1)?,
                date: parse_date(&row.get::<_, String>(2)?)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    fn record_completion(&mut self, habit_id: i64, date: NaiveDate) -> Result<Completion> {
        if !self.habit_exists(habit_id)? {
            return Err(Error::HabitNotFound(habit_id));
        }
        if self.completed_on(habit_id, date)? {
            return Err(Error::DuplicateCompletion { habit_id, date });
        }
        self.conn.execute(
            "INSERT INTO habit_completions (habit_id, completion_date) VALUES (?1, ?2)",
            params![habit_id, fmt_date(date)],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("habit {} completed on {}", habit_id, date);
        Ok(Completion {
            id: Some(id),
            habit_id,
            date,
        })
    }

    fn move_completion(&mut self, habit_id: i64, from: NaiveDate, to: NaiveDate) -> Result<bool> {
        if !self.habit_exists(habit_id)? {
            return Err(Error::HabitNotFound(habit_id));
        }
        if from == to {
            return self.completed_on(habit_id, from);
        }
        if self.completed_on(habit_id, to)? {
            return Err(Error::DuplicateCompletion {
                habit_id,
                date: to,
            });
        }
        let updated = self.conn.execute(
            "UPDATE habit_completions SET completion_date = ?1
             WHERE habit_id = ?2 AND completion_date = ?3",
            params![fmt_date(to), habit_id, fmt_date(from)],
        )?;
        Ok(updated > 0)
    }
}
