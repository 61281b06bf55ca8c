//! Statistics and insights module.
//!
//! Provides habit statistics computed from completion snapshots:
//! - Rolling-window streaks and completion rates
//! - Calendar day data and day detail
//! - All-habit dashboard
//! - Actionable insights and milestone achievements
//! - Terminal charts

pub mod achievements;
pub mod calendar;
pub mod dashboard;
pub mod insights;
pub mod visualization;
pub mod window;

pub use achievements::{evaluate as evaluate_achievements, Achievement, AchievementKind};
pub use calendar::{day_data, month_days, DayData, HabitDayFlag, Month};
pub use dashboard::{Dashboard, HabitStats};
pub use insights::{generate_insights, Insight, InsightLevel};
pub use visualization::{render_heatmap, render_progress_bar, render_sparkline};
pub use window::{effective_target, window_start, DayStatus, StatsWindow, MAX_WINDOW_DAYS};
