use chrono::Datelike;
use colored::{ColoredString, Colorize};

use crate::features::stats::{
    render_heatmap, render_progress_bar, render_sparkline, Achievement, Dashboard, DayData,
    Insight, InsightLevel, Month, StatsWindow,
};
use crate::habits::{format_amount, Habit, HabitCompletion};

/// Colored dot in the habit's own color.
fn swatch(habit: &Habit) -> ColoredString {
    let hex = habit.color.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(255)
    };
    "●".truecolor(channel(0), channel(2), channel(4))
}

fn streak_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Format a list of habits
pub fn format_habits_pretty(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "Habits (0)\n  No habits. Add one with 'streaks habit add <name>'".to_string();
    }

    let mut output = format!("Habits ({})\n", habits.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for habit in habits {
        let mut line = format!(
            "{} {:>3}  {}  {}",
            swatch(habit),
            habit.id.to_string().dimmed(),
            habit.name.bold(),
            format!("target {}", habit.target_label()).dimmed()
        );
        if !habit.is_active {
            line.push_str(&format!("  {}", "archived".yellow()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single habit
pub fn format_habit_pretty(habit: &Habit) -> String {
    let mut output = format!("{} {}\n", swatch(habit), habit.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));
    output.push_str(&format!("  {}: {}\n", "Target".dimmed(), habit.target_label()));
    output.push_str(&format!("  {}: {}\n", "Color".dimmed(), habit.color));
    output.push_str(&format!(
        "  {}: {}\n",
        "Status".dimmed(),
        if habit.is_active { "active" } else { "archived" }
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        habit.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}

/// Format the result of logging progress
pub fn format_completion_pretty(habit: &Habit, completion: &HabitCompletion) -> String {
    let icon = if habit.is_met_by(completion.progress) {
        "[x]".green()
    } else {
        "[ ]".white()
    };
    let mut output = format!(
        "{} {} {} / {} on {}",
        icon,
        habit.name.bold(),
        format_amount(completion.progress),
        habit.target_label(),
        completion.completion_date
    );
    if let Some(notes) = &completion.notes {
        output.push_str(&format!("\n  {}: {}", "Notes".dimmed(), notes));
    }
    output
}

/// Format a habit's recent completions
pub fn format_history_pretty(habit: &Habit, completions: &[HabitCompletion]) -> String {
    if completions.is_empty() {
        return format!("{} (0 entries)\n  Nothing logged yet", habit.name);
    }

    let mut output = format!("{} ({} entries)\n", habit.name.bold(), completions.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for completion in completions {
        let icon = if habit.is_met_by(completion.progress) {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let mut line = format!(
            "{} {}  {}",
            icon,
            completion.completion_date.format("%a %Y-%m-%d"),
            format_amount(completion.progress)
        );
        if let Some(notes) = &completion.notes {
            line.push_str(&format!("  {}", notes.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format window statistics for one habit
pub fn format_stats_pretty(habit: &Habit, stats: &StatsWindow) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}  {}",
        swatch(habit),
        habit.name.bold(),
        format!("{} to {}", stats.start, stats.end).dimmed()
    ));
    lines.push("─".repeat(50));

    let current = if stats.current_streak > 0 {
        streak_label(stats.current_streak).green().to_string()
    } else {
        "0 days".dimmed().to_string()
    };
    lines.push(format!(
        "  Current streak: {}  Longest: {}",
        current,
        streak_label(stats.longest_streak)
    ));
    lines.push(format!(
        "  Completed: {}/{} days  Rate: {:.2}%",
        stats.completed_days, stats.total_days, stats.completion_rate
    ));
    lines.push(format!(
        "  Average progress: {}",
        render_progress_bar(stats.average_progress, 20)
    ));

    let recent: Vec<f64> = stats.ratios_oldest_first().into_iter().rev().take(30).rev().collect();
    lines.push(format!("  Recent: {}", render_sparkline(&recent)));

    lines.join("\n")
}

/// Format the all-habit dashboard
pub fn format_dashboard_pretty(dashboard: &Dashboard) -> String {
    if dashboard.habits.is_empty() {
        return "No active habits. Add one with 'streaks habit add <name>'".to_string();
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "{}  {}",
        "HABIT DASHBOARD".bold(),
        format!("last {} days to {}", dashboard.days, dashboard.as_of).dimmed()
    ));
    lines.push("─".repeat(60));
    lines.push(format!(
        "  Done today: {}/{}  Average rate: {:.1}%",
        dashboard.completed_today.to_string().green(),
        dashboard.habits.len(),
        dashboard.average_completion_rate
    ));
    if let Some((name, streak)) = &dashboard.best_current_streak {
        lines.push(format!("  Best streak: {} ({})", name.cyan(), streak_label(*streak)));
    }
    lines.push(String::new());

    let width = dashboard
        .habits
        .iter()
        .map(|r| r.habit.name.chars().count())
        .max()
        .unwrap_or(0);

    for row in &dashboard.habits {
        let today = if row.stats.is_complete_today() {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let recent: Vec<f64> = row.stats.ratios_oldest_first().into_iter().rev().take(14).rev().collect();
        lines.push(format!(
            "{} {} {:<width$}  streak {:>3}  best {:>3}  {:>5.1}%  {}",
            today,
            swatch(&row.habit),
            row.habit.name,
            row.stats.current_streak,
            row.stats.longest_streak,
            row.stats.completion_rate,
            render_sparkline(&recent),
        ));
    }

    lines.join("\n")
}

/// Format a month calendar
pub fn format_calendar_pretty(month: Month, days: &[DayData]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{}", month.to_string().bold()));
    lines.push(" Mon Tue Wed Thu Fri Sat Sun".to_string());

    let offset = days
        .first()
        .map_or(0, |d| d.date.weekday().num_days_from_monday() as usize);

    let mut row = "    ".repeat(offset);
    let mut column = offset;
    for day in days {
        let cell = format!("{:>3}", day.date.day());
        let cell = if day.is_perfect() {
            cell.green().bold().to_string()
        } else if day.completed_count > 0 {
            cell.yellow().to_string()
        } else {
            cell.dimmed().to_string()
        };
        row.push(' ');
        row.push_str(&cell);
        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut row));
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row);
    }

    let perfect = days.iter().filter(|d| d.is_perfect()).count();
    lines.push(String::new());
    lines.push(format!(
        "{} all habits done  {} some done  ({perfect} perfect days)",
        "green".green(),
        "yellow".yellow()
    ));
    lines.join("\n")
}

/// Format a day detail panel
pub fn format_day_pretty(day: &DayData, habits: &[Habit], completions: &[HabitCompletion]) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{}  {}/{} done",
        day.date.format("%A %Y-%m-%d").to_string().bold(),
        day.completed_count,
        day.total_habits
    ));
    lines.push("─".repeat(50));

    for flag in &day.habits {
        let Some(habit) = habits.iter().find(|h| h.id == flag.habit_id) else {
            continue;
        };
        let icon = if flag.completed { "[x]".green() } else { "[ ]".white() };
        let mut line = format!(
            "{} {} {}  {} / {}",
            icon,
            swatch(habit),
            habit.name,
            format_amount(flag.progress),
            habit.target_label()
        );
        if let Some(notes) = completions
            .iter()
            .find(|c| c.habit_id == habit.id && c.completion_date == day.date)
            .and_then(|c| c.notes.as_ref())
        {
            line.push_str(&format!("  {}", notes.dimmed()));
        }
        lines.push(line);
    }

    if day.habits.is_empty() {
        lines.push("  No active habits".to_string());
    }
    lines.join("\n")
}

/// Format a habit heatmap
pub fn format_heatmap_pretty(habit: &Habit, stats: &StatsWindow, weeks: usize) -> String {
    format!(
        "{} {}\n\n{}",
        swatch(habit),
        habit.name.bold(),
        render_heatmap(stats, weeks)
    )
}

/// Format achievements for one habit
pub fn format_achievements_pretty(habit: &Habit, achievements: &[Achievement]) -> String {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}  {unlocked}/{} unlocked",
        swatch(habit),
        habit.name.bold(),
        achievements.len()
    ));
    lines.push("─".repeat(50));

    for achievement in achievements {
        let (icon, title) = if achievement.unlocked {
            ("★".yellow(), achievement.kind.title().bold())
        } else {
            ("☆".dimmed(), achievement.kind.title().normal())
        };
        lines.push(format!(
            "{} {:<15} {}  {}",
            icon,
            title,
            format!("{}/{}", achievement.progress, achievement.goal).dimmed(),
            achievement.kind.description().dimmed()
        ));
    }
    lines.join("\n")
}

/// Format insights
pub fn format_insights_pretty(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "No insights right now".to_string();
    }

    let mut lines = vec!["INSIGHTS".bold().to_string(), "─".repeat(50)];
    for insight in insights {
        let icon = match insight.level {
            InsightLevel::High => insight.level.icon().red(),
            InsightLevel::Medium => insight.level.icon().yellow(),
            InsightLevel::Low => insight.level.icon().blue(),
        };
        lines.push(format!("  {} {}", icon, insight.message));
        if let Some(suggestion) = &insight.suggestion {
            lines.push(format!("      {}", suggestion.dimmed()));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn make_habit(name: &str, active: bool) -> Habit {
        Habit {
            id: 1,
            name: name.to_string(),
            target: 2.0,
            unit: Some("pages".to_string()),
            color: "#ff0000".to_string(),
            is_active: active,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_format_habits_pretty_empty() {
        assert!(format_habits_pretty(&[]).contains("No habits"));
    }

    #[test]
    fn test_format_habits_pretty() {
        let output = format_habits_pretty(&[make_habit("Read", true), make_habit("Old", false)]);
        assert!(output.contains("Habits (2)"));
        assert!(output.contains("Read"));
        assert!(output.contains("2 pages"));
        assert!(output.contains("archived"));
    }

    #[test]
    fn test_format_stats_pretty() {
        let habit = make_habit("Read", true);
        let completions = [HabitCompletion::new(1, today(), 2.0)];
        let stats = StatsWindow::calculate(1, 2.0, 3, &completions, today()).unwrap();

        let output = format_stats_pretty(&habit, &stats);
        assert!(output.contains("Current streak"));
        assert!(output.contains("1/3 days"));
        assert!(output.contains("33.33%"));
    }

    #[test]
    fn test_format_calendar_pretty() {
        let month = Month { year: 2026, month: 10 };
        let habits = [make_habit("Read", true)];
        let days = crate::features::stats::month_days(month, &habits, &[]).unwrap();

        let output = format_calendar_pretty(month, &days);
        assert!(output.contains("2026-10"));
        assert!(output.contains("Mon Tue"));
        assert!(output.contains("31"));
    }

    #[test]
    fn test_format_completion_pretty_shows_notes() {
        let habit = make_habit("Read", true);
        let mut completion = HabitCompletion::new(1, today(), 1.0);
        completion.notes = Some("chapter 3".to_string());

        let output = format_completion_pretty(&habit, &completion);
        assert!(output.contains("1 / 2 pages"));
        assert!(output.contains("chapter 3"));
    }
}
