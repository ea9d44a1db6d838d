use clap::Parser;
use owo_colors::{OwoColorize, Style};
use recur_core::db;
use recur_core::error::{CoreError, RecurrenceError};
use recur_core::repository::SqliteRepository;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let today = match util::resolve_today(cli.today.as_deref()) {
        Ok(today) => today,
        Err(e) => exit_with_error(e),
    };

    // The bare engine needs no database.
    if let cli::Commands::NextDate(command) = cli.command {
        if let Err(e) = commands::next_date::next_date(command, today) {
            exit_with_error(e);
        }
        return;
    }

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => exit_with_error(e.into()),
    };
    let repository = SqliteRepository::new(db_pool);
    tracing::debug!(%today, database = %config.database_path, "running command");

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, today).await,
        cli::Commands::List(command) => {
            commands::list::list_tasks(&repository, command, &config, today).await
        }
        cli::Commands::Show(command) => commands::show::show_task(&repository, command, today).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command, today).await,
        cli::Commands::Done(command) => {
            commands::done::complete_task(&repository, command, today).await
        }
        cli::Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        cli::Commands::NextDate(_) => Ok(()),
    };

    if let Err(e) = result {
        exit_with_error(e);
    }
}

fn exit_with_error(err: anyhow::Error) -> ! {
    handle_error(&err);
    std::process::exit(1);
}

fn handle_error(err: &anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task '{}' not found", "Error:".style(error_style), id);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Recurrence(RecurrenceError::InvalidRuleFormat { rule, reason }) => {
                eprintln!(
                    "{} Invalid repeat rule '{}': {}",
                    "Error:".style(error_style),
                    rule.yellow(),
                    reason
                );
                eprintln!("Rules look like: d 7 | y | w 1,3,5 | m 1,-1 | m -1 2,8");
            }
            CoreError::Recurrence(e) => {
                eprintln!("{} {}", "Error:".style(error_style), e);
            }
            _ => {
                tracing::error!(error = ?core_error, "unexpected core failure");
                eprintln!("{} {}", "Error:".style(error_style), err);
            }
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
