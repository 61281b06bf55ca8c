//! The habit database.
//!
//! One `SQLite` file, `streaks.db` in the data directory, holding habits and
//! their daily completions. Opening it always brings the schema up to date.

use std::path::Path;

use rusqlite::Connection;

use super::migrations;
use crate::config::Paths;
use crate::error::StreaksError;

/// An open, migrated database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `streaks.db` in the data directory, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved or created,
    /// or the database cannot be opened and migrated.
    pub fn open() -> Result<Self, StreaksError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Database` if the file cannot be opened or
    /// migrated.
    pub fn open_at(path: &Path) -> Result<Self, StreaksError> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| StreaksError::Database(format!("cannot open {}: {e}", path.display())))?;
        Self::prepare(conn)
    }

    /// A private in-memory database, used by tests.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Database` if migration fails.
    pub fn open_in_memory() -> Result<Self, StreaksError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StreaksError::Database(format!("cannot open in-memory database: {e}")))?;
        Self::prepare(conn)
    }

    // Completions reference habits, so foreign keys must be on before any
    // write.
    fn prepare(conn: Connection) -> Result<Self, StreaksError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| StreaksError::Database(format!("cannot enable foreign keys: {e}")))?;
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in `PRAGMA user_version`.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Database` if the pragma cannot be read.
    pub fn schema_version(&self) -> Result<i32, StreaksError> {
        migrations::get_version(&self.conn)
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_is_migrated() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_file_is_created_and_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("streaks.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO habits (name, target, color, created_at)
                     VALUES ('Read', 1, '#000000', '2026-10-16T00:00:00Z')",
                    [],
                )
                .unwrap();
        }
        assert!(path.exists());

        let db = Database::open_at(&path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM habits", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(db.schema_version().unwrap(), migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_completion_requires_existing_habit() {
        let db = Database::open_in_memory().unwrap();
        let result = db.connection().execute(
            "INSERT INTO habit_completions (habit_id, completion_date, progress, updated_at)
             VALUES (42, '2026-10-16', 1, '2026-10-16T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
