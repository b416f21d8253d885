use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tally_core::error::CoreError;
use tally_core::models::{UpdateTaskData, User};
use tally_core::repository::Repository;

use crate::cli::EditCommand;
use crate::util::resolve_task_id;

pub async fn edit_task(repo: &impl Repository, user: &User, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))?;
    if task.user_id != user.id {
        return Err(CoreError::Forbidden.into());
    }

    let is_active = if command.pause {
        Some(false)
    } else if command.resume {
        Some(true)
    } else {
        None
    };

    let updated = repo
        .update_task(
            task_id,
            UpdateTaskData {
                title: command.title,
                frequency: command.frequency,
                is_active,
            },
        )
        .await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Updated task: {} ({}{})",
        "✓".style(success_style),
        updated.title.bright_white().bold(),
        updated.frequency,
        if updated.is_active { "" } else { ", paused" }
    );

    Ok(())
}
