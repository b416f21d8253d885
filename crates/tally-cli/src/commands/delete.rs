use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use tally_core::error::CoreError;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::cli::DeleteCommand;
use crate::util::resolve_task_id;

pub async fn delete_task(
    repo: &impl Repository,
    user: &User,
    command: DeleteCommand,
) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))?;
    if task.user_id != user.id {
        return Err(CoreError::Forbidden.into());
    }

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Delete task '{}' and its completion history?",
                task.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_task(task_id).await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Deleted task: {}",
        "✓".style(success_style),
        task.title.bright_white()
    );

    Ok(())
}
