//! streaks - a habit tracker for the terminal
//!
//! Habits have a daily numeric target. Progress is logged per day into a
//! local SQLite database, and [`StatsWindow`] derives streaks and completion
//! rates over a trailing window of days.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod habits;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StreaksError;
pub use features::stats::StatsWindow;
pub use habits::HabitStore;
