//! Configuration settings for streaks.
//!
//! Settings are loaded from `config.yaml` in the data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::habits::NewHabit;

/// Settings read from `config.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub stats: StatsConfig,
    /// Defaults for new habits.
    pub habits: HabitDefaults,
}

/// Output preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--output` is not given.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Leave the decision to `colored` (TTY and `NO_COLOR` detection).
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Defaults for the statistics commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Window length used when `--days` is not given.
    #[serde(default = "default_window_days")]
    pub default_days: u32,
    /// Number of weeks shown by the heatmap.
    #[serde(default = "default_heatmap_weeks")]
    pub heatmap_weeks: u32,
}

/// Defaults applied by `habit add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitDefaults {
    /// Daily target when `--target` is omitted.
    #[serde(default = "default_target")]
    pub default_target: f64,
    /// Color when `--color` is omitted.
    #[serde(default = "default_habit_color")]
    pub default_color: String,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_window_days() -> u32 {
    30
}

const fn default_heatmap_weeks() -> u32 {
    8
}

const fn default_target() -> f64 {
    1.0
}

fn default_habit_color() -> String {
    "#3b82f6".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_days: default_window_days(),
            heatmap_weeks: default_heatmap_weeks(),
        }
    }
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            default_target: default_target(),
            default_color: default_habit_color(),
        }
    }
}

impl Config {
    /// Read a config file, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Config` if the file is unreadable, is not
    /// valid YAML, or holds out-of-range values.
    pub fn load_from_path(path: &Path) -> Result<Self, StreaksError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StreaksError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| StreaksError::Config(format!("{}: {e}", path.display())))?;
        config
            .validate()
            .map_err(|e| StreaksError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Config` if the file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StreaksError> {
        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            StreaksError::Config(format!("cannot write {}: {e}", path.display()))
        })
    }

    /// The config rendered as YAML.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Config` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StreaksError> {
        serde_yaml::to_string(self)
            .map_err(|e| StreaksError::Config(format!("cannot serialize config: {e}")))
    }

    /// Window lengths must be positive and habit defaults must pass the same
    /// checks as `habit add`.
    fn validate(&self) -> Result<(), String> {
        if self.stats.default_days == 0 {
            return Err("stats.default_days must be at least 1".to_string());
        }
        if self.stats.heatmap_weeks == 0 {
            return Err("stats.heatmap_weeks must be at least 1".to_string());
        }
        NewHabit {
            name: "default".to_string(),
            target: self.habits.default_target,
            unit: None,
            color: self.habits.default_color.clone(),
        }
        .validate()
        .map_err(|e| format!("habits: {e}"))
    }
}
