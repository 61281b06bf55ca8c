//! Schema migrations.
//!
//! The schema version lives in `PRAGMA user_version`. Each pending step runs
//! in its own transaction together with the version bump, so a failed step
//! leaves the database at the previous version.

use rusqlite::Connection;

use crate::error::StreaksError;

/// Habits and their daily completions. `habit_completions` is keyed by
/// `(habit_id, completion_date)` so logging a day twice upserts.
const V1_HABITS: &str = r"
    CREATE TABLE IF NOT EXISTS habits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        target REAL NOT NULL CHECK (target > 0),
        color TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_habits_name
    ON habits(name COLLATE NOCASE);

    CREATE TABLE IF NOT EXISTS habit_completions (
        habit_id INTEGER NOT NULL REFERENCES habits(id),
        completion_date TEXT NOT NULL,
        progress REAL NOT NULL DEFAULT 0 CHECK (progress >= 0),
        notes TEXT,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (habit_id, completion_date)
    );

    CREATE INDEX IF NOT EXISTS idx_habit_completions_date
    ON habit_completions(completion_date);
";

/// Optional unit label for targets ("glasses", "pages").
const V2_UNIT: &str = "ALTER TABLE habits ADD COLUMN unit TEXT;";

const MIGRATIONS: [(i32, &str); 2] = [(1, V1_HABITS), (2, V2_UNIT)];

pub const CURRENT_VERSION: i32 = 2;

/// Schema version of `conn`; 0 for a fresh database.
///
/// # Errors
///
/// Returns `StreaksError::Database` if the pragma cannot be read.
pub fn get_version(conn: &Connection) -> Result<i32, StreaksError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StreaksError::Database(format!("cannot read schema version: {e}")))
}

/// Apply every migration newer than the recorded version.
///
/// # Errors
///
/// Returns `StreaksError::Database` naming the step that failed, or if the
/// database was written by a newer schema.
pub fn run(conn: &Connection) -> Result<(), StreaksError> {
    let current = get_version(conn)?;
    if current > CURRENT_VERSION {
        return Err(StreaksError::Database(format!(
            "database schema v{current} is newer than supported v{CURRENT_VERSION}"
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        log::info!("Applying schema migration v{version}");
        let step = |e: rusqlite::Error| StreaksError::Database(format!("migration v{version}: {e}"));

        let tx = conn.unchecked_transaction().map_err(step)?;
        tx.execute_batch(sql).map_err(step)?;
        tx.pragma_update(None, "user_version", version).map_err(step)?;
        tx.commit().map_err(step)?;
    }

    Ok(())
}
