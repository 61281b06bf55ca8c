//! Habit management commands.

use colored::Colorize;

use super::Context;
use crate::cli::args::{HabitCommands, OutputFormat};
use crate::error::StreaksError;
use crate::habits::{HabitUpdate, NewHabit};
use crate::output::{format_habit, format_habits};

/// Execute habit subcommands.
///
/// # Errors
///
/// Returns an error if validation, lookup, or the database fails.
pub fn habit(ctx: &Context, cmd: HabitCommands) -> Result<String, StreaksError> {
    match cmd {
        HabitCommands::Add {
            name,
            target,
            unit,
            color,
        } => {
            let defaults = &ctx.config.habits;
            let new = NewHabit {
                name,
                target: target.unwrap_or(defaults.default_target),
                unit: unit.filter(|u| !u.trim().is_empty()),
                color: color.unwrap_or_else(|| defaults.default_color.clone()),
            };
            let habit = ctx.store.create(&new)?;
            announce(ctx, "Created", &habit)
        }
        HabitCommands::List { all } => {
            let habits = ctx.store.list(all)?;
            format_habits(&habits, ctx.format)
        }
        HabitCommands::Show { habit } => {
            let habit = ctx.resolve(&habit)?;
            format_habit(&habit, ctx.format)
        }
        HabitCommands::Edit {
            habit,
            name,
            target,
            unit,
            color,
        } => {
            let habit = ctx.resolve(&habit)?;
            let update = HabitUpdate {
                name,
                target,
                unit,
                color,
            };
            if update.is_empty() {
                return Err(StreaksError::InvalidArgument(
                    "nothing to change; pass --name, --target, --unit, or --color".to_string(),
                ));
            }
            let habit = ctx.store.update(habit.id, &update)?;
            announce(ctx, "Updated", &habit)
        }
        HabitCommands::Archive { habit } => {
            let habit = ctx.resolve(&habit)?;
            let habit = ctx.store.set_active(habit.id, false)?;
            announce(ctx, "Archived", &habit)
        }
        HabitCommands::Restore { habit } => {
            let habit = ctx.resolve(&habit)?;
            let habit = ctx.store.set_active(habit.id, true)?;
            announce(ctx, "Restored", &habit)
        }
    }
}

fn announce(
    ctx: &Context,
    verb: &str,
    habit: &crate::habits::Habit,
) -> Result<String, StreaksError> {
    match ctx.format {
        OutputFormat::Json => format_habit(habit, OutputFormat::Json),
        OutputFormat::Pretty => Ok(format!(
            "{} {} (#{})",
            verb.green(),
            habit.name.bold(),
            habit.id
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_habit, context};
    use super::*;

    fn add(name: &str) -> HabitCommands {
        HabitCommands::Add {
            name: name.to_string(),
            target: None,
            unit: None,
            color: None,
        }
    }

    #[test]
    fn test_add_uses_config_defaults() {
        let ctx = context(OutputFormat::Json);
        let output = habit(&ctx, add("Meditate")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["name"], "Meditate");
        assert_eq!(parsed["target"], 1.0);
        assert_eq!(parsed["color"], "#3b82f6");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let ctx = context(OutputFormat::Json);
        habit(&ctx, add("Read")).unwrap();
        assert!(matches!(
            habit(&ctx, add("read")),
            Err(StreaksError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_edit_requires_a_change() {
        let ctx = context(OutputFormat::Json);
        add_habit(&ctx, "Read", 1.0);
        let result = habit(
            &ctx,
            HabitCommands::Edit {
                habit: "Read".to_string(),
                name: None,
                target: None,
                unit: None,
                color: None,
            },
        );
        assert!(matches!(result, Err(StreaksError::InvalidArgument(_))));
    }

    #[test]
    fn test_archive_hides_from_list() {
        let ctx = context(OutputFormat::Json);
        add_habit(&ctx, "Read", 1.0);
        add_habit(&ctx, "Run", 1.0);

        habit(&ctx, HabitCommands::Archive { habit: "run".to_string() }).unwrap();

        let active: serde_json::Value =
            serde_json::from_str(&habit(&ctx, HabitCommands::List { all: false }).unwrap())
                .unwrap();
        let all: serde_json::Value =
            serde_json::from_str(&habit(&ctx, HabitCommands::List { all: true }).unwrap())
                .unwrap();
        assert_eq!(active["count"], 1);
        assert_eq!(all["count"], 2);
    }

    #[test]
    fn test_pretty_announce() {
        let ctx = context(OutputFormat::Pretty);
        let output = habit(&ctx, add("Stretch")).unwrap();
        assert!(output.contains("Created"));
        assert!(output.contains("Stretch"));
    }
}
