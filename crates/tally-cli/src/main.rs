use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tally_core::db;
use tally_core::engine::ScoreEngine;
use tally_core::error::CoreError;
use tally_core::repository::SqliteRepository;
use util::resolve_current_user;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let engine = ScoreEngine::new(SqliteRepository::new(db_pool), config.scoring.policy);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Init(command) => {
            commands::init::init_profile(engine.repo(), &config, command).await
        }
        other => {
            let user = match resolve_current_user(engine.repo(), &config).await {
                Ok(user) => user,
                Err(e) => {
                    handle_error(e);
                    return;
                }
            };
            match other {
                cli::Commands::Init(_) => unreachable!(),
                cli::Commands::Add(command) => {
                    commands::add::add_task(engine.repo(), &user, command).await
                }
                cli::Commands::List => commands::list::list_tasks(engine.repo(), &user).await,
                cli::Commands::Today(command) => {
                    commands::today::today(&engine, &user, command).await
                }
                cli::Commands::Done(command) => commands::done::done(&engine, &user, command).await,
                cli::Commands::Edit(command) => {
                    commands::edit::edit_task(engine.repo(), &user, command).await
                }
                cli::Commands::Delete(command) => {
                    commands::delete::delete_task(engine.repo(), &user, command).await
                }
                cli::Commands::Settle(command) => {
                    commands::settle::settle(&engine, &user, command).await
                }
                cli::Commands::Feed(command) => {
                    commands::feed::feed(engine.repo(), &user, command).await
                }
                cli::Commands::Stats => commands::stats::stats(engine.repo(), &user).await,
                cli::Commands::Score => {
                    commands::score::score(engine.repo(), &user, engine.policy()).await
                }
            }
        }
    };

    if let Err(e) = result {
        handle_error(e);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::TaskNotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::DuplicateCompletion => {
                eprintln!(
                    "{} Already completed for this period.",
                    "Error:".style(error_style)
                );
            }
            CoreError::Forbidden => {
                eprintln!(
                    "{} That task belongs to another profile.",
                    "Error:".style(error_style)
                );
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(tz) => {
                eprintln!(
                    "{} Invalid timezone: {}. Use IANA names like 'Europe/Berlin'.",
                    "Error:".style(error_style),
                    tz.yellow()
                );
            }
            CoreError::UsernameTaken(name) => {
                eprintln!(
                    "{} Username '{}' is already taken.",
                    "Error:".style(error_style),
                    name.yellow()
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
    std::process::exit(1);
}
