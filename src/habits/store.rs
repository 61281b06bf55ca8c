//! Habit and completion storage.
//!
//! Persists habits and their daily completions to the local database.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::types::{Habit, HabitCompletion, HabitId, HabitRef, HabitUpdate, NewHabit};
use crate::error::StreaksError;
use crate::storage::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

const HABIT_COLUMNS: &str = "id, name, target, unit, color, is_active, created_at";

/// Storage for habits and completions.
pub struct HabitStore {
    db: Database,
}

impl HabitStore {
    /// Open the store on the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, StreaksError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Create a habit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if validation fails or the name is taken.
    pub fn create(&self, habit: &NewHabit) -> Result<Habit, StreaksError> {
        habit.validate()?;
        let name = habit.name.trim();
        if self.find_by_name(name)?.is_some() {
            return Err(StreaksError::InvalidArgument(format!(
                "a habit named '{name}' already exists"
            )));
        }

        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO habits (name, target, unit, color, is_active, created_at)
              VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![
                name,
                habit.target,
                habit.unit,
                habit.color,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| StreaksError::Database(format!("Failed to insert habit: {e}")))?;

        let id = conn.last_insert_rowid();
        log::info!("Created habit {id} '{name}'");
        self.require(id)
    }

    /// Get a habit by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: HabitId) -> Result<Option<Habit>, StreaksError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
                [id],
                row_to_habit,
            )
            .optional()
            .map_err(|e| StreaksError::Database(format!("Failed to query habit: {e}")))
    }

    /// Find a habit by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Habit>, StreaksError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE name = ?1 COLLATE NOCASE"),
                [name.trim()],
                row_to_habit,
            )
            .optional()
            .map_err(|e| StreaksError::Database(format!("Failed to query habit: {e}")))
    }

    /// Resolve a command-line reference to a habit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no habit matches.
    pub fn resolve(&self, reference: &HabitRef) -> Result<Habit, StreaksError> {
        let habit = match reference {
            HabitRef::Id(id) => self.get(*id)?,
            HabitRef::Name(name) => self.find_by_name(name)?,
        };
        habit.ok_or_else(|| StreaksError::NotFound(format!("habit {reference}")))
    }

    fn require(&self, id: HabitId) -> Result<Habit, StreaksError> {
        self.resolve(&HabitRef::Id(id))
    }

    /// List habits ordered by id. Archived habits only with `include_archived`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, include_archived: bool) -> Result<Vec<Habit>, StreaksError> {
        let sql = if include_archived {
            format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY id")
        } else {
            format!("SELECT {HABIT_COLUMNS} FROM habits WHERE is_active = 1 ORDER BY id")
        };

        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_habit)
            .map_err(|e| StreaksError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?);
        }
        Ok(habits)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidArgument` for invalid
    /// fields or a name collision.
    pub fn update(&self, id: HabitId, update: &HabitUpdate) -> Result<Habit, StreaksError> {
        update.validate()?;
        let mut habit = self.require(id)?;

        if let Some(name) = &update.name {
            let name = name.trim();
            if let Some(other) = self.find_by_name(name)? {
                if other.id != id {
                    return Err(StreaksError::InvalidArgument(format!(
                        "a habit named '{name}' already exists"
                    )));
                }
            }
            habit.name = name.to_string();
        }
        if let Some(target) = update.target {
            habit.target = target;
        }
        if let Some(unit) = &update.unit {
            habit.unit = if unit.is_empty() { None } else { Some(unit.clone()) };
        }
        if let Some(color) = &update.color {
            habit.color.clone_from(color);
        }

        self.db
            .connection()
            .execute(
                "UPDATE habits SET name = ?1, target = ?2, unit = ?3, color = ?4 WHERE id = ?5",
                params![habit.name, habit.target, habit.unit, habit.color, id],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to update habit: {e}")))?;

        Ok(habit)
    }

    /// Archive (`false`) or restore (`true`) a habit. Completions are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn set_active(&self, id: HabitId, active: bool) -> Result<Habit, StreaksError> {
        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE habits SET is_active = ?1 WHERE id = ?2",
                params![active, id],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to update habit: {e}")))?;

        if changed == 0 {
            return Err(StreaksError::NotFound(format!("habit #{id}")));
        }
        log::info!("Habit {id} is_active = {active}");
        self.require(id)
    }

    /// Insert or replace the completion for `(habit_id, date)`.
    ///
    /// Negative progress is clamped to 0. Notes are kept from the previous
    /// record when `notes` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-finite progress or an archived
    /// habit, and `NotFound` for an unknown habit.
    pub fn upsert_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
        progress: f64,
        notes: Option<&str>,
    ) -> Result<HabitCompletion, StreaksError> {
        if !progress.is_finite() {
            return Err(StreaksError::InvalidArgument(format!(
                "progress must be a number, got {progress}"
            )));
        }
        let habit = self.require(habit_id)?;
        if !habit.is_active {
            return Err(StreaksError::InvalidArgument(format!(
                "habit '{}' is archived; restore it before logging",
                habit.name
            )));
        }

        let progress = progress.max(0.0);
        self.db
            .connection()
            .execute(
                r"INSERT INTO habit_completions (habit_id, completion_date, progress, notes, updated_at)
                  VALUES (?1, ?2, ?3, ?4, ?5)
                  ON CONFLICT (habit_id, completion_date) DO UPDATE SET
                    progress = excluded.progress,
                    notes = COALESCE(excluded.notes, habit_completions.notes),
                    updated_at = excluded.updated_at",
                params![
                    habit_id,
                    date.format(DATE_FORMAT).to_string(),
                    progress,
                    notes,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to upsert completion: {e}")))?;

        log::debug!("Logged {progress} for habit {habit_id} on {date}");
        self.get_completion(habit_id, date)?
            .ok_or_else(|| StreaksError::NotFound(format!("completion for habit #{habit_id} on {date}")))
    }

    /// Get the completion for one habit and day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>, StreaksError> {
        self.db
            .connection()
            .query_row(
                r"SELECT habit_id, completion_date, progress, notes
                  FROM habit_completions WHERE habit_id = ?1 AND completion_date = ?2",
                params![habit_id, date.format(DATE_FORMAT).to_string()],
                row_to_completion,
            )
            .optional()
            .map_err(|e| StreaksError::Database(format!("Failed to query completion: {e}")))
    }

    /// Delete a single day's completion. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_completion(&self, habit_id: HabitId, date: NaiveDate) -> Result<bool, StreaksError> {
        let rows = self
            .db
            .connection()
            .execute(
                "DELETE FROM habit_completions WHERE habit_id = ?1 AND completion_date = ?2",
                params![habit_id, date.format(DATE_FORMAT).to_string()],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to delete completion: {e}")))?;

        Ok(rows > 0)
    }

    /// Load completions, optionally filtered by habit and an inclusive date
    /// range, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn completions(
        &self,
        habit_id: Option<HabitId>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<HabitCompletion>, StreaksError> {
        let mut sql = String::from(
            "SELECT habit_id, completion_date, progress, notes FROM habit_completions WHERE 1 = 1",
        );
        let mut values: Vec<Value> = Vec::new();

        if let Some(id) = habit_id {
            sql.push_str(" AND habit_id = ?");
            values.push(Value::Integer(id));
        }
        if let Some(from) = from {
            sql.push_str(" AND completion_date >= ?");
            values.push(Value::Text(from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = to {
            sql.push_str(" AND completion_date <= ?");
            values.push(Value::Text(to.format(DATE_FORMAT).to_string()));
        }
        sql.push_str(" ORDER BY completion_date DESC, habit_id ASC");

        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(values), row_to_completion)
            .map_err(|e| StreaksError::Database(format!("Failed to query completions: {e}")))?;

        let mut completions = Vec::new();
        for row in rows {
            completions.push(row?);
        }
        Ok(completions)
    }
}

fn row_to_habit(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
    let created_at: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        target: row.get(2)?,
        unit: row.get(3)?,
        color: row.get(4)?,
        is_active: row.get(5)?,
        created_at,
    })
}

fn row_to_completion(row: &Row<'_>) -> Result<HabitCompletion, rusqlite::Error> {
    let date: String = row.get(1)?;
    let completion_date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(HabitCompletion {
        habit_id: row.get(0)?,
        completion_date,
        progress: row.get(2)?,
        notes: row.get(3)?,
    })
}
