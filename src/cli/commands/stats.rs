//! Statistics command implementations.
//!
//! Handles stats, heatmap, achievements, and insights.

use chrono::{Datelike, NaiveDate};
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::features::stats::{
    evaluate_achievements, generate_insights, window_start, Dashboard, HabitStats, StatsWindow,
};
use crate::habits::{Habit, HabitCompletion};
use crate::output::{
    format_achievements_pretty, format_dashboard_pretty, format_heatmap_pretty,
    format_insights_pretty, format_stats_pretty, to_json,
};

/// Execute the stats command.
///
/// With a habit, reports that habit's window; otherwise a dashboard of every
/// active habit.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` for a zero-day window and
/// `StreaksError::NotFound` for an unknown habit.
pub fn stats(ctx: &Context, habit: Option<&str>, days: Option<u32>) -> Result<String, StreaksError> {
    let days = ctx.window_days(days);

    let Some(reference) = habit else {
        let dashboard = dashboard(ctx, days)?;
        return match ctx.format {
            OutputFormat::Json => to_json(&dashboard),
            OutputFormat::Pretty => Ok(format_dashboard_pretty(&dashboard)),
        };
    };

    let habit = ctx.resolve(reference)?;
    let completions = window_completions(ctx, Some(&habit), days)?;
    let stats = StatsWindow::calculate(habit.id, habit.target, days, &completions, ctx.as_of)?;

    match ctx.format {
        OutputFormat::Json => to_json(&HabitStats { habit, stats }),
        OutputFormat::Pretty => Ok(format_stats_pretty(&habit, &stats)),
    }
}

/// Execute the heatmap command.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` for zero weeks and
/// `StreaksError::NotFound` for an unknown habit.
pub fn heatmap(ctx: &Context, habit: &str, weeks: Option<u32>) -> Result<String, StreaksError> {
    let weeks = weeks.unwrap_or(ctx.config.stats.heatmap_weeks);
    if weeks == 0 {
        return Err(StreaksError::InvalidArgument(
            "weeks must be at least 1".to_string(),
        ));
    }

    let habit = ctx.resolve(habit)?;
    let days = heatmap_days(ctx.as_of, weeks);
    let completions = window_completions(ctx, Some(&habit), days)?;
    let stats = StatsWindow::calculate(habit.id, habit.target, days, &completions, ctx.as_of)?;

    match ctx.format {
        OutputFormat::Json => to_json(&HabitStats { habit, stats }),
        OutputFormat::Pretty => Ok(format_heatmap_pretty(&habit, &stats, weeks as usize)),
    }
}

/// Execute the achievements command for one habit or every active habit.
///
/// # Errors
///
/// Returns `StreaksError::NotFound` for an unknown habit.
pub fn achievements(ctx: &Context, habit: Option<&str>) -> Result<String, StreaksError> {
    let habits = match habit {
        Some(reference) => vec![ctx.resolve(reference)?],
        None => ctx.store.list(false)?,
    };

    let mut results = Vec::new();
    for habit in habits {
        let completions = ctx.store.completions(Some(habit.id), None, Some(ctx.as_of))?;
        let list = evaluate_achievements(&habit, &completions, ctx.as_of)?;
        results.push((habit, list));
    }

    match ctx.format {
        OutputFormat::Json => {
            let items: Vec<_> = results
                .iter()
                .map(|(habit, list)| json!({ "habit": habit, "achievements": list }))
                .collect();
            to_json(&json!({ "as_of": ctx.as_of, "items": items }))
        }
        OutputFormat::Pretty => {
            if results.is_empty() {
                return Ok("No active habits".to_string());
            }
            Ok(results
                .iter()
                .map(|(habit, list)| format_achievements_pretty(habit, list))
                .collect::<Vec<_>>()
                .join("\n\n"))
        }
    }
}

/// Execute the insights command.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` for a zero-day window.
pub fn insights(ctx: &Context, days: Option<u32>) -> Result<String, StreaksError> {
    let dashboard = dashboard(ctx, ctx.window_days(days))?;
    let insights = generate_insights(&dashboard);

    match ctx.format {
        OutputFormat::Json => to_json(&insights),
        OutputFormat::Pretty => Ok(format_insights_pretty(&insights)),
    }
}

fn dashboard(ctx: &Context, days: u32) -> Result<Dashboard, StreaksError> {
    let habits = ctx.store.list(false)?;
    let completions = window_completions(ctx, None, days)?;
    Dashboard::calculate(&habits, &completions, days, ctx.as_of)
}

/// Load only the records that can fall inside a `days`-long window.
fn window_completions(
    ctx: &Context,
    habit: Option<&Habit>,
    days: u32,
) -> Result<Vec<HabitCompletion>, StreaksError> {
    let from = window_start(ctx.as_of, days)?;
    ctx.store
        .completions(habit.map(|h| h.id), Some(from), Some(ctx.as_of))
}

/// Days needed to fill `weeks` Monday-aligned columns ending at `as_of`.
fn heatmap_days(as_of: NaiveDate, weeks: u32) -> u32 {
    weeks
        .saturating_sub(1)
        .saturating_mul(7)
        .saturating_add(as_of.weekday().num_days_from_monday() + 1)
}
