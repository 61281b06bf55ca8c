//! Command implementations for streaks.
//!
//! Every command returns the text to print; `main` owns stdout and exit
//! codes.

mod calendar;
mod config;
mod habit;
mod progress;
mod shell;
mod stats;

pub use calendar::{calendar, day};
pub use config::config;
pub use habit::habit;
pub use progress::{history, log, unlog};
pub use shell::completions;
pub use stats::{achievements, heatmap, insights, stats};

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::core::parse_date;
use crate::error::StreaksError;
use crate::habits::{Habit, HabitRef, HabitStore};

/// Everything a data command needs.
pub struct Context {
    pub store: HabitStore,
    pub config: Config,
    /// The day treated as "today".
    pub as_of: NaiveDate,
    pub format: OutputFormat,
}

impl Context {
    /// Look up a habit from its command-line reference.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::NotFound` if no habit matches.
    pub fn resolve(&self, reference: &str) -> Result<Habit, StreaksError> {
        self.store.resolve(&HabitRef::parse(reference))
    }

    /// Parse an optional date argument, defaulting to the as-of day.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Parse` if the date is not recognised.
    pub fn date_or_today(&self, input: Option<&str>) -> Result<NaiveDate, StreaksError> {
        input.map_or(Ok(self.as_of), |s| parse_date(s, self.as_of))
    }

    /// Window length from the flag or the configured default.
    #[must_use]
    pub fn window_days(&self, days: Option<u32>) -> u32 {
        days.unwrap_or(self.config.stats.default_days)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{add_habit, context};
    use super::*;

    #[test]
    fn test_resolve_by_id_and_name() {
        let ctx = context(OutputFormat::Json);
        let habit = add_habit(&ctx, "Read", 1.0);

        assert_eq!(ctx.resolve("read").unwrap().id, habit.id);
        assert_eq!(ctx.resolve(&habit.id.to_string()).unwrap().name, "Read");
        assert!(matches!(ctx.resolve("nope"), Err(StreaksError::NotFound(_))));
    }

    #[test]
    fn test_date_or_today_is_relative_to_as_of() {
        let ctx = context(OutputFormat::Json);
        assert_eq!(ctx.date_or_today(None).unwrap(), ctx.as_of);
        assert_eq!(
            ctx.date_or_today(Some("yesterday")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
        );
    }

    #[test]
    fn test_window_days_falls_back_to_config() {
        let ctx = context(OutputFormat::Json);
        assert_eq!(ctx.window_days(None), 30);
        assert_eq!(ctx.window_days(Some(7)), 7);
    }
}
