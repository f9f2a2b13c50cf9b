use chrono::Utc;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use piley_core::db;
use piley_core::error::CoreError;
use piley_core::repository::{SqliteRepository, TaskRepository};
use piley_core::timezone::parse_timezone;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

/// Environment variable overriding the configured log filter.
const LOG_ENV: &str = "PILEY_LOG";

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    // Only fails when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    let tz = match parse_timezone(&config.timezone) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);
    tracing::debug!(database = %config.database_path, timezone = %tz, "starting");

    if let Err(e) = repository.reactivate_recurring(Utc::now()).await {
        tracing::warn!(error = %e, "could not reactivate recurring tasks");
    }

    let result = match cli.command {
        cli::Commands::Pile(command) => commands::pile::pile_command(&repository, command).await,
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, &tz).await,
        cli::Commands::List(command) => commands::list::list_tasks(&repository, command, &tz).await,
        cli::Commands::Do(command) => commands::r#do::do_task(&repository, command, &tz).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        cli::Commands::Upcoming => commands::upcoming::upcoming_tasks(&repository, &tz).await,
        cli::Commands::Stats(command) => commands::stats::show_stats(&repository, command, &tz).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();
    tracing::debug!(error = ?err, "command failed");

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::PileFull { name, limit } => {
                eprintln!(
                    "{} Pile '{}' is full: it already holds {} active tasks",
                    "Error:".style(error_style),
                    name.yellow(),
                    limit
                );
            }
            CoreError::DefaultPileProtected(name) => {
                eprintln!(
                    "{} '{}' is the default pile and cannot be deleted",
                    "Error:".style(error_style),
                    name.yellow()
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
