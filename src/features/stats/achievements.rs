//! Milestone achievements.
//!
//! Achievements are derived from a habit's full completion history up to the
//! as-of day; nothing is persisted.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::window::{StatsWindow, MAX_WINDOW_DAYS};
use crate::error::StreaksError;
use crate::habits::{Habit, HabitCompletion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstStep,
    TenDays,
    HundredDays,
    WeekStreak,
    MonthStreak,
    CenturyStreak,
    PerfectWeek,
}

impl AchievementKind {
    pub const ALL: [Self; 7] = [
        Self::FirstStep,
        Self::TenDays,
        Self::HundredDays,
        Self::WeekStreak,
        Self::MonthStreak,
        Self::CenturyStreak,
        Self::PerfectWeek,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstStep => "First Step",
            Self::TenDays => "Ten Days",
            Self::HundredDays => "Hundred Days",
            Self::WeekStreak => "Week Streak",
            Self::MonthStreak => "Month Streak",
            Self::CenturyStreak => "Century Streak",
            Self::PerfectWeek => "Perfect Week",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstStep => "Meet the target once",
            Self::TenDays => "Meet the target on 10 days",
            Self::HundredDays => "Meet the target on 100 days",
            Self::WeekStreak => "Reach a 7-day streak",
            Self::MonthStreak => "Reach a 30-day streak",
            Self::CenturyStreak => "Reach a 100-day streak",
            Self::PerfectWeek => "Complete every day of a Monday-Sunday week",
        }
    }

    const fn goal(self) -> u32 {
        match self {
            Self::FirstStep | Self::PerfectWeek => 1,
            Self::TenDays => 10,
            Self::HundredDays | Self::CenturyStreak => 100,
            Self::WeekStreak => 7,
            Self::MonthStreak => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub unlocked: bool,
    /// Progress toward `goal`, capped at `goal`.
    pub progress: u32,
    pub goal: u32,
}

/// Evaluate every achievement for `habit`. Records more than
/// [`MAX_WINDOW_DAYS`] before `as_of` are not counted.
///
/// # Errors
///
/// Propagates window calculation errors.
pub fn evaluate(
    habit: &Habit,
    completions: &[HabitCompletion],
    as_of: NaiveDate,
) -> Result<Vec<Achievement>, StreaksError> {
    let earliest = completions
        .iter()
        .filter(|c| c.habit_id == habit.id && c.completion_date <= as_of)
        .map(|c| c.completion_date)
        .min()
        .unwrap_or(as_of);
    let span = u32::try_from((as_of - earliest).num_days() + 1)
        .unwrap_or(u32::MAX)
        .min(MAX_WINDOW_DAYS);

    let history = StatsWindow::calculate(habit.id, habit.target, span, completions, as_of)?;
    let perfect_weeks = count_perfect_weeks(&history);

    Ok(AchievementKind::ALL
        .iter()
        .map(|&kind| {
            let value = match kind {
                AchievementKind::FirstStep
                | AchievementKind::TenDays
                | AchievementKind::HundredDays => history.completed_days,
                AchievementKind::WeekStreak
                | AchievementKind::MonthStreak
                | AchievementKind::CenturyStreak => history.longest_streak,
                AchievementKind::PerfectWeek => perfect_weeks,
            };
            let goal = kind.goal();
            Achievement {
                kind,
                unlocked: value >= goal,
                progress: value.min(goal),
                goal,
            }
        })
        .collect())
}

/// Count Monday-Sunday weeks fully inside the window with every day complete.
fn count_perfect_weeks(history: &StatsWindow) -> u32 {
    let mut perfect = 0;
    let mut run = 0u32;
    // Walk oldest to newest so a run can start on a Monday
    for day in history.days.iter().rev() {
        if day.date.weekday() == Weekday::Mon {
            run = 0;
        }
        if day.completed {
            run += 1;
            if day.date.weekday() == Weekday::Sun && run == 7 {
                perfect += 1;
            }
        } else {
            run = 0;
        }
    }
    perfect
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn habit() -> Habit {
        Habit {
            id: 1,
            name: "Read".to_string(),
            target: 1.0,
            unit: None,
            color: "#000000".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    // 2026-10-18 is a Sunday
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn run_ending(end: NaiveDate, len: i64) -> Vec<HabitCompletion> {
        (0..len)
            .map(|d| HabitCompletion::new(1, end - Duration::days(d), 1.0))
            .collect()
    }

    fn find(list: &[Achievement], kind: AchievementKind) -> &Achievement {
        list.iter().find(|a| a.kind == kind).unwrap()
    }

    #[test]
    fn test_nothing_unlocked_without_history() {
        let list = evaluate(&habit(), &[], sunday()).unwrap();
        assert_eq!(list.len(), AchievementKind::ALL.len());
        assert!(list.iter().all(|a| !a.unlocked && a.progress == 0));
    }

    #[test]
    fn test_week_streak_and_perfect_week() {
        let list = evaluate(&habit(), &run_ending(sunday(), 7), sunday()).unwrap();

        assert!(find(&list, AchievementKind::FirstStep).unlocked);
        assert!(find(&list, AchievementKind::WeekStreak).unlocked);
        assert!(find(&list, AchievementKind::PerfectWeek).unlocked);
        assert!(!find(&list, AchievementKind::MonthStreak).unlocked);
        assert_eq!(find(&list, AchievementKind::TenDays).progress, 7);
    }

    #[test]
    fn test_seven_days_not_aligned_to_week() {
        let saturday = sunday() - Duration::days(1);
        let list = evaluate(&habit(), &run_ending(saturday, 7), saturday).unwrap();

        assert!(find(&list, AchievementKind::WeekStreak).unlocked);
        assert!(!find(&list, AchievementKind::PerfectWeek).unlocked);
    }

    #[test]
    fn test_future_completions_ignored() {
        let completions = run_ending(sunday() + Duration::days(10), 5);
        let list = evaluate(&habit(), &completions, sunday()).unwrap();
        assert!(!find(&list, AchievementKind::FirstStep).unlocked);
    }

    #[test]
    fn test_ancient_record_does_not_fail_evaluation() {
        let mut completions = run_ending(sunday(), 3);
        completions.push(HabitCompletion::new(1, NaiveDate::MIN, 1.0));

        let list = evaluate(&habit(), &completions, sunday()).unwrap();
        assert!(find(&list, AchievementKind::FirstStep).unlocked);
        assert_eq!(find(&list, AchievementKind::TenDays).progress, 3);
    }
}
