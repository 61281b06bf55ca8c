//! Configuration management for streaks.
//!
//! This module handles loading and saving configuration from `~/.streaks/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, HabitDefaults, StatsConfig};
