//! Logging progress and reading it back.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::features::stats::window_start;
use crate::output::{format_completion_pretty, format_history, to_json};

/// Record progress for one habit and day, replacing that day's value.
///
/// # Errors
///
/// Returns an error for an unknown or archived habit, an unparseable or
/// future date, or a database failure.
pub fn log(
    ctx: &Context,
    habit: &str,
    progress: Option<f64>,
    date: Option<&str>,
    notes: Option<&str>,
) -> Result<String, StreaksError> {
    let habit = ctx.resolve(habit)?;
    let date = ctx.date_or_today(date)?;
    if date > ctx.as_of {
        return Err(StreaksError::InvalidArgument(format!(
            "cannot log {date}, it is after {}",
            ctx.as_of
        )));
    }

    let progress = progress.unwrap_or(habit.target);
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    let completion = ctx.store.upsert_completion(habit.id, date, progress, notes)?;

    match ctx.format {
        OutputFormat::Json => to_json(&completion),
        OutputFormat::Pretty => Ok(format_completion_pretty(&habit, &completion)),
    }
}

/// Remove one day's record for a habit.
///
/// # Errors
///
/// Returns `StreaksError::NotFound` if the habit is unknown or nothing was
/// logged that day.
pub fn unlog(ctx: &Context, habit: &str, date: Option<&str>) -> Result<String, StreaksError> {
    let habit = ctx.resolve(habit)?;
    let date = ctx.date_or_today(date)?;

    if !ctx.store.delete_completion(habit.id, date)? {
        return Err(StreaksError::NotFound(format!(
            "nothing logged for '{}' on {date}",
            habit.name
        )));
    }
    log::info!("Removed {date} from habit {}", habit.id);

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "habit_id": habit.id,
            "completion_date": date,
            "removed": true
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {} on {date}",
            "Removed".yellow(),
            habit.name.bold()
        )),
    }
}

/// Show a habit's records over the trailing window, newest first. The
/// window defaults to `stats.default_days`.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` if `days` is zero.
pub fn history(ctx: &Context, habit: &str, days: Option<u32>) -> Result<String, StreaksError> {
    let from = window_start(ctx.as_of, ctx.window_days(days))?;
    let habit = ctx.resolve(habit)?;
    let completions = ctx
        .store
        .completions(Some(habit.id), Some(from), Some(ctx.as_of))?;

    format_history(&habit, &completions, ctx.format)
}
