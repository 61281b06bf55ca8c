//! Terminal visualization for statistics.
//!
//! Provides sparklines, progress bars, and a weekly heatmap.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

use super::window::StatsWindow;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a sparkline from ratios in `0.0..=1.0`.
///
/// Values outside the range are clamped. A complete day renders as a full
/// block so finished days stand out from partial ones.
#[must_use]
pub fn render_sparkline(ratios: &[f64]) -> String {
    ratios
        .iter()
        .map(|&r| {
            let r = if r.is_nan() { 0.0 } else { r.clamp(0.0, 1.0) };
            if r >= 1.0 {
                FULL_BLOCK
            } else if r <= 0.0 {
                BAR_CHARS[0]
            } else {
                // Partial progress always shows at least the lowest bar
                let idx = ((r * 7.0) as usize).clamp(1, 7);
                BAR_CHARS[idx]
            }
        })
        .collect()
}

/// Render a progress bar for a percentage in `0..=100`.
#[must_use]
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let fraction = if percent.is_nan() {
        0.0
    } else {
        (percent / 100.0).clamp(0.0, 1.0)
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let empty = width - filled;

    format!(
        "[{}{}] {:.0}%",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty),
        fraction * 100.0
    )
}

/// Render a Monday-aligned heatmap of the window's days.
///
/// One row per weekday, one column per week; the last column is the week
/// containing the window's end. Days outside the window are left blank.
#[must_use]
pub fn render_heatmap(stats: &StatsWindow, weeks: usize) -> String {
    let weeks = weeks.max(1);
    let end = stats.end;
    let ratios: HashMap<NaiveDate, (f64, bool)> = stats
        .days
        .iter()
        .map(|d| (d.date, ((d.progress / stats.target).min(1.0), d.completed)))
        .collect();

    let last_monday = end - Duration::days(i64::from(end.weekday().num_days_from_monday()));
    let first_monday = last_monday - Duration::days(7 * (weeks as i64 - 1));

    let day_labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let mut lines = Vec::new();

    let mut header = "    ".to_string();
    for w in 0..weeks {
        let monday = first_monday + Duration::days(7 * w as i64);
        header.push_str(&format!("{:>3}", monday.format("%d")));
    }
    lines.push(header);

    for (day_idx, label) in day_labels.iter().enumerate() {
        let mut row = format!("{label} ");
        for w in 0..weeks {
            let date = first_monday + Duration::days(7 * w as i64 + day_idx as i64);
            let cell = match ratios.get(&date) {
                None => ' ',
                Some((_, true)) => '█',
                Some((ratio, false)) if *ratio <= 0.0 => '·',
                Some((ratio, false)) if *ratio < 0.34 => '░',
                Some((ratio, false)) if *ratio < 0.67 => '▒',
                Some(_) => '▓',
            };
            row.push_str(&format!(" {cell} "));
        }
        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push("Legend: · = none  ░ ▒ ▓ = partial  █ = target met".to_string());

    lines.join("\n")
}
