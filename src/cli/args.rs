use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "streaks")]
#[command(about = "Track daily habits, streaks, and completion rates from the terminal")]
#[command(long_about = "streaks - a habit tracker for the terminal

Create habits with a daily target, log progress each day, and see streaks,
completion rates, calendars, and achievements.

QUICK START:
  streaks habit add Water --target 8 --unit glasses
  streaks log water 3               Log 3 glasses today
  streaks log water --date yesterday
  streaks stats water --days 30     Streaks and rates for the last 30 days
  streaks stats                     Dashboard across all habits

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.streaks (override with STREAKS_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Treat this date as "today" (e.g. 2026-10-16, yesterday)
    ///
    /// Statistics windows end on this day and relative dates resolve
    /// against it.
    #[arg(long, global = true, env = "STREAKS_AS_OF")]
    pub as_of: Option<String>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage habits
    ///
    /// # Examples
    ///
    ///   streaks habit add Read --target 20 --unit pages
    ///   streaks habit list --all
    ///   streaks habit archive read
    #[command(alias = "h")]
    Habit(HabitArgs),

    /// Log progress for a habit
    ///
    /// Sets the day's progress (replacing any earlier value for that day).
    /// Without a progress amount the habit's target is logged, marking the
    /// day complete.
    ///
    /// # Examples
    ///
    ///   streaks log read              Mark today done
    ///   streaks log water 3           3 glasses today
    ///   streaks log run 5 --date "2 days ago" --notes "felt good"
    #[command(alias = "l")]
    Log {
        /// Habit id or name
        habit: String,

        /// Amount of progress (defaults to the habit's target)
        progress: Option<f64>,

        /// Day to log (default: today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Notes for the day
        #[arg(long, short = 'n')]
        notes: Option<String>,
    },

    /// Remove the progress logged for a habit on one day
    Unlog {
        /// Habit id or name
        habit: String,

        /// Day to clear (default: today)
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Show logged progress for a habit, newest first
    History {
        /// Habit id or name
        habit: String,

        /// How many days back to show (default from config, 30)
        #[arg(long = "days", short = 'D')]
        days: Option<u32>,
    },

    /// Show streaks and completion statistics
    ///
    /// With a habit, shows that habit's window. Without, shows a dashboard
    /// of every active habit.
    ///
    /// # Examples
    ///
    ///   streaks stats                 Dashboard, default window
    ///   streaks stats water -D 7      Last 7 days for one habit
    ///   streaks stats -D 365 -o json
    #[command(alias = "s")]
    Stats {
        /// Habit id or name
        habit: Option<String>,

        /// Window length in days (default from config, 30)
        #[arg(long = "days", short = 'D')]
        days: Option<u32>,
    },

    /// Show a month calendar across all habits
    Calendar {
        /// Month as YYYY-MM (default: the current month)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },

    /// Show every habit's progress on one day
    Day {
        /// Day to show (default: today)
        date: Option<String>,
    },

    /// Show a weekly heatmap for a habit
    Heatmap {
        /// Habit id or name
        habit: String,

        /// Number of weeks (default from config, 8)
        #[arg(long, short = 'w')]
        weeks: Option<u32>,
    },

    /// Show milestone achievements
    Achievements {
        /// Habit id or name (default: every active habit)
        habit: Option<String>,
    },

    /// Show actionable insights about your habits
    Insights {
        /// Window length in days (default from config, 30)
        #[arg(long = "days", short = 'D')]
        days: Option<u32>,
    },

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   streaks completions bash > ~/.local/share/bash-completion/completions/streaks
    ///   streaks completions zsh --install
    Completions {
        /// Shell (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Print installation instructions instead of the script
        #[arg(long)]
        install: bool,
    },
}

/// Arguments for habit management.
#[derive(Args)]
pub struct HabitArgs {
    #[command(subcommand)]
    pub command: HabitCommands,
}

/// Habit subcommands.
#[derive(Subcommand)]
pub enum HabitCommands {
    /// Create a habit
    Add {
        /// Habit name
        name: String,

        /// Daily target (default from config, 1)
        #[arg(long, short = 't')]
        target: Option<f64>,

        /// Unit label for the target (e.g. glasses, pages)
        #[arg(long, short = 'u')]
        unit: Option<String>,

        /// Color as #RRGGBB
        #[arg(long, short = 'c')]
        color: Option<String>,
    },

    /// List habits
    #[command(alias = "ls")]
    List {
        /// Include archived habits
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Show a habit
    Show {
        /// Habit id or name
        habit: String,
    },

    /// Change a habit's name, target, unit, or color
    Edit {
        /// Habit id or name
        habit: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, short = 't')]
        target: Option<f64>,

        /// New unit; pass an empty string to clear it
        #[arg(long, short = 'u')]
        unit: Option<String>,

        #[arg(long, short = 'c')]
        color: Option<String>,
    },

    /// Archive a habit (its history is kept)
    Archive {
        /// Habit id or name
        habit: String,
    },

    /// Restore an archived habit
    Restore {
        /// Habit id or name
        habit: String,
    },
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file if none exists
    Init,
}
