//! Insights generation from statistics.
//!
//! Turns dashboard numbers into short, actionable messages.

use serde::{Deserialize, Serialize};

use super::dashboard::{Dashboard, HabitStats};

/// Completion rate below which a habit is flagged as struggling.
const LOW_RATE_THRESHOLD: f64 = 30.0;

/// Windows shorter than this are too noisy for rate insights.
const MIN_DAYS_FOR_RATE: u32 = 7;

/// Insight importance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightLevel {
    /// Needs attention today
    High,
    /// Worth noting
    Medium,
    /// Informational
    Low,
}

impl InsightLevel {
    /// Get icon for this level.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::High => "!",
            Self::Medium => "*",
            Self::Low => "-",
        }
    }
}

/// An actionable insight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub message: String,
    pub level: InsightLevel,
    /// Habit the insight is about, if any.
    pub habit: Option<String>,
    pub suggestion: Option<String>,
}

impl Insight {
    fn new(message: String, level: InsightLevel, habit: Option<&str>) -> Self {
        Self {
            message,
            level,
            habit: habit.map(str::to_string),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

/// Generate insights for every habit on the dashboard, most urgent first.
#[must_use]
pub fn generate_insights(dashboard: &Dashboard) -> Vec<Insight> {
    if dashboard.habits.is_empty() {
        return vec![Insight::new(
            "You are not tracking any habits yet".to_string(),
            InsightLevel::Low,
            None,
        )
        .with_suggestion("Create one with 'streaks habit add <name>'".to_string())];
    }

    let mut insights: Vec<Insight> = dashboard
        .habits
        .iter()
        .flat_map(|row| habit_insights(row, dashboard.days))
        .collect();

    if dashboard.completed_today == dashboard.habits.len() {
        insights.push(Insight::new(
            format!("All {} habits are done for today", dashboard.habits.len()),
            InsightLevel::Low,
            None,
        ));
    }

    insights.sort_by_key(|i| i.level);
    insights
}

fn habit_insights(row: &HabitStats, days: u32) -> Vec<Insight> {
    let stats = &row.stats;
    let name = row.habit.name.as_str();
    let mut insights = Vec::new();

    let streak_at_risk = streak_before_today(row);
    if streak_at_risk > 0 {
        insights.push(
            Insight::new(
                format!("{name}: your {streak_at_risk}-day streak ends unless you log today"),
                InsightLevel::High,
                Some(name),
            )
            .with_suggestion(format!("streaks log \"{name}\"")),
        );
    } else if stats.current_streak == 0 && stats.longest_streak >= 3 {
        insights.push(Insight::new(
            format!(
                "{name}: best run in the last {days} days was {} days",
                stats.longest_streak
            ),
            InsightLevel::Medium,
            Some(name),
        ));
    }

    if days >= MIN_DAYS_FOR_RATE {
        if stats.completion_rate < LOW_RATE_THRESHOLD {
            insights.push(
                Insight::new(
                    format!(
                        "{name}: completed on {:.0}% of the last {days} days",
                        stats.completion_rate
                    ),
                    InsightLevel::Medium,
                    Some(name),
                )
                .with_suggestion(format!(
                    "Consider lowering the target ({}) to rebuild momentum",
                    row.habit.target_label()
                )),
            );
        } else if stats.completed_days == stats.total_days {
            insights.push(Insight::new(
                format!("{name}: perfect record for the last {days} days"),
                InsightLevel::Low,
                Some(name),
            ));
        }
    }

    insights
}

/// Length of the streak ending the day before as-of, when as-of itself is
/// still incomplete.
fn streak_before_today(row: &HabitStats) -> u32 {
    let days = &row.stats.days;
    if days.first().map_or(true, |d| d.completed) {
        return 0;
    }
    let run = days.iter().skip(1).take_while(|d| d.completed).count();
    u32::try_from(run).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::{Habit, HabitCompletion};
    use chrono::{Duration, NaiveDate, Utc};

    fn habit(id: i64, name: &str) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            target: 1.0,
            unit: None,
            color: "#000000".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn done(id: i64, days_ago: i64) -> HabitCompletion {
        HabitCompletion::new(id, today() - Duration::days(days_ago), 1.0)
    }

    #[test]
    fn test_no_habits() {
        let dashboard = Dashboard::calculate(&[], &[], 7, today()).unwrap();
        let insights = generate_insights(&dashboard);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].suggestion.is_some());
    }

    #[test]
    fn test_streak_at_risk_is_high() {
        let habits = [habit(1, "Read")];
        let completions = [done(1, 1), done(1, 2), done(1, 3)];
        let dashboard = Dashboard::calculate(&habits, &completions, 7, today()).unwrap();

        let insights = generate_insights(&dashboard);
        assert_eq!(insights[0].level, InsightLevel::High);
        assert!(insights[0].message.contains("3-day streak"));
    }

    #[test]
    fn test_perfect_window() {
        let habits = [habit(1, "Read")];
        let completions: Vec<_> = (0..7).map(|d| done(1, d)).collect();
        let dashboard = Dashboard::calculate(&habits, &completions, 7, today()).unwrap();

        let insights = generate_insights(&dashboard);
        assert!(insights.iter().all(|i| i.level == InsightLevel::Low));
        assert!(insights.iter().any(|i| i.message.contains("perfect record")));
        assert!(insights.iter().any(|i| i.message.contains("All 1 habits")));
    }

    #[test]
    fn test_low_rate_and_broken_streak() {
        let habits = [habit(1, "Run")];
        let completions = [done(1, 10), done(1, 11), done(1, 12)];
        let dashboard = Dashboard::calculate(&habits, &completions, 14, today()).unwrap();

        let insights = generate_insights(&dashboard);
        assert!(insights.iter().any(|i| i.message.contains("best run")));
        assert!(insights.iter().any(|i| i.message.contains("completed on 21%")));
    }

    #[test]
    fn test_sorted_by_level() {
        let habits = [habit(1, "Read"), habit(2, "Run")];
        let mut completions: Vec<_> = (0..7).map(|d| done(1, d)).collect();
        completions.push(done(2, 1));
        let dashboard = Dashboard::calculate(&habits, &completions, 7, today()).unwrap();

        let insights = generate_insights(&dashboard);
        let levels: Vec<_> = insights.iter().map(|i| i.level).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
        assert_eq!(levels[0], InsightLevel::High);
    }
}
