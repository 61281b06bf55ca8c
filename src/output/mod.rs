//! Output formatting for streaks.
//!
//! Each formatter renders either a colored terminal view or pretty JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::habits::{Habit, HabitCompletion};

pub use json::*;
pub use pretty::*;

/// Format habits based on output format
///
/// # Errors
///
/// Returns `StreaksError::Json` if JSON serialization fails.
pub fn format_habits(habits: &[Habit], format: OutputFormat) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(habits)),
        OutputFormat::Json => format_habits_json(habits),
    }
}

/// Format a single habit based on output format
///
/// # Errors
///
/// Returns `StreaksError::Json` if JSON serialization fails.
pub fn format_habit(habit: &Habit, format: OutputFormat) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit)),
        OutputFormat::Json => to_json(habit),
    }
}

/// Format a habit's history based on output format
///
/// # Errors
///
/// Returns `StreaksError::Json` if JSON serialization fails.
pub fn format_history(
    habit: &Habit,
    completions: &[HabitCompletion],
    format: OutputFormat,
) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(habit, completions)),
        OutputFormat::Json => format_history_json(habit, completions),
    }
}
