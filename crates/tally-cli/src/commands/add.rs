use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tally_core::models::{Frequency, NewTaskData, User};
use tally_core::repository::Repository;

use crate::cli::AddCommand;

pub async fn add_task(repo: &impl Repository, user: &User, command: AddCommand) -> Result<()> {
    let task = repo
        .add_task(NewTaskData {
            user_id: user.id,
            title: command.title,
            frequency: Some(command.frequency),
        })
        .await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    let subtle_style = Style::new().bright_black();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        task.id.to_string().yellow()
    );

    match task.frequency {
        Frequency::Daily => println!(
            "  {} Recurs daily; missing a day costs points",
            "→".style(info_style)
        ),
        Frequency::Weekly => println!(
            "  {} Recurs weekly (ISO weeks, Monday start)",
            "→".style(info_style)
        ),
        Frequency::None => {}
    }

    println!("\n{} Quick actions:", "💡".style(subtle_style));
    println!(
        "   {} Mark complete: tally done {}",
        "•".style(subtle_style),
        (&task.id.to_string()[..7]).yellow()
    );

    Ok(())
}
