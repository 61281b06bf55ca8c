use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use streaks::cli::args::{Cli, Commands};
use streaks::cli::commands::{self, Context};
use streaks::config::{Config, Paths};
use streaks::core::{local_today, parse_date};
use streaks::habits::HabitStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Config(args) => commands::config(&paths, &config, &args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
        command => {
            let today = local_today();
            let as_of = match cli.as_of.as_deref() {
                Some(input) => parse_date(input, today)?,
                None => today,
            };
            let ctx = Context {
                store: HabitStore::new()?,
                config,
                as_of,
                format,
            };
            dispatch(&ctx, command)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn dispatch(ctx: &Context, command: Commands) -> Result<String, streaks::StreaksError> {
    match command {
        Commands::Habit(args) => commands::habit(ctx, args.command),
        Commands::Log {
            habit,
            progress,
            date,
            notes,
        } => commands::log(ctx, &habit, progress, date.as_deref(), notes.as_deref()),
        Commands::Unlog { habit, date } => commands::unlog(ctx, &habit, date.as_deref()),
        Commands::History { habit, days } => commands::history(ctx, &habit, days),
        Commands::Stats { habit, days } => commands::stats(ctx, habit.as_deref(), days),
        Commands::Calendar { month } => commands::calendar(ctx, month.as_deref()),
        Commands::Day { date } => commands::day(ctx, date.as_deref()),
        Commands::Heatmap { habit, weeks } => commands::heatmap(ctx, &habit, weeks),
        Commands::Achievements { habit } => commands::achievements(ctx, habit.as_deref()),
        Commands::Insights { days } => commands::insights(ctx, days),
        Commands::Config(args) => {
            commands::config(&Paths::new()?, &ctx.config, &args.command, ctx.format)
        }
        Commands::Completions { shell, install } => commands::completions(&shell, install),
    }
}

/// `-v` raises the default level; `RUST_LOG` still wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
