//! All-habit dashboard.
//!
//! Runs the window calculation for every active habit and aggregates the
//! results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::{window_start, StatsWindow};
use crate::error::StreaksError;
use crate::habits::{Habit, HabitCompletion};

/// A habit together with its window statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit: Habit,
    pub stats: StatsWindow,
}

/// Aggregated statistics across active habits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub days: u32,
    pub habits: Vec<HabitStats>,
    /// Active habits whose target was met on the as-of day.
    pub completed_today: usize,
    /// Mean completion rate across habits, 0-100.
    pub average_completion_rate: f64,
    /// Name and length of the longest current streak.
    pub best_current_streak: Option<(String, u32)>,
}

impl Dashboard {
    /// Build the dashboard from a snapshot of habits and completions.
    ///
    /// Archived habits are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` if `days` is 0.
    pub fn calculate(
        habits: &[Habit],
        completions: &[HabitCompletion],
        days: u32,
        as_of: NaiveDate,
    ) -> Result<Self, StreaksError> {
        window_start(as_of, days)?;
        let mut rows = Vec::new();
        for habit in habits.iter().filter(|h| h.is_active) {
            let stats = StatsWindow::calculate(habit.id, habit.target, days, completions, as_of)?;
            rows.push(HabitStats {
                habit: habit.clone(),
                stats,
            });
        }

        let completed_today = rows.iter().filter(|r| r.stats.is_complete_today()).count();
        let average_completion_rate = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.stats.completion_rate).sum::<f64>() / rows.len() as f64
        };
        let best_current_streak = rows
            .iter()
            .filter(|r| r.stats.current_streak > 0)
            .max_by_key(|r| r.stats.current_streak)
            .map(|r| (r.habit.name.clone(), r.stats.current_streak));

        Ok(Self {
            as_of,
            days,
            habits: rows,
            completed_today,
            average_completion_rate,
            best_current_streak,
        })
    }
}
