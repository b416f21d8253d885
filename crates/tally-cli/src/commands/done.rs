use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tally_core::engine::ScoreEngine;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::cli::DoneCommand;
use crate::parser::parse_occurred_at;
use crate::util::resolve_task_id;

pub async fn done(
    engine: &ScoreEngine<impl Repository>,
    user: &User,
    command: DoneCommand,
) -> Result<()> {
    let task_id = resolve_task_id(engine.repo(), &command.id).await?;
    let occurred_at = command.at.as_deref().map(parse_occurred_at).transpose()?;

    let receipt = engine
        .complete(task_id, user.id, occurred_at, command.timezone.as_deref())
        .await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Completed! {} points",
        "✓".style(success_style),
        format!("+{}", receipt.points_awarded).green().bold()
    );
    if receipt.streak_after > 1 {
        println!(
            "  {} Streak continued ({})",
            "→".style(info_style),
            receipt.streak_after.to_string().cyan()
        );
    }

    Ok(())
}
