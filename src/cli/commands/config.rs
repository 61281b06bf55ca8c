//! Configuration commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::StreaksError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns `StreaksError::Config` if the config file cannot be written or
/// serialized.
pub fn config(
    paths: &Paths,
    config: &Config,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, StreaksError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(config),
            OutputFormat::Pretty => config.to_yaml(),
        },
        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({
                "root": paths.root,
                "config_file": paths.config_file,
                "database": paths.database
            })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },
        ConfigCommands::Init => {
            if paths.config_file.exists() {
                return Ok(format!(
                    "Config already exists at {}",
                    paths.config_file.display()
                ));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            log::info!("Wrote default config to {}", paths.config_file.display());
            Ok(format!(
                "{} {}",
                "Created".green(),
                paths.config_file.display()
            ))
        }
    }
}
