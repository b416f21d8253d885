use anyhow::{anyhow, Result};
use tally_core::error::CoreError;
use tally_core::models::User;
use tally_core::repository::Repository;
use uuid::Uuid;

use crate::config::Config;

pub async fn resolve_task_id(repo: &impl Repository, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let tasks = repo.find_tasks_by_short_id_prefix(short_id).await?;
    if tasks.len() == 1 {
        Ok(tasks[0].id)
    } else if tasks.is_empty() {
        Err(anyhow!(CoreError::TaskNotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let task_info: Vec<(String, String)> = tasks
            .into_iter()
            .map(|t| (t.id.to_string(), t.title))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(task_info)))
    }
}

/// Resolve the acting profile: the configured username, or the only profile
/// in the database.
pub async fn resolve_current_user(repo: &impl Repository, config: &Config) -> Result<User> {
    if let Some(username) = &config.username {
        return repo
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "No profile named '{}'. Create one with: tally init {}",
                    username,
                    username
                )
            });
    }

    let users = repo.find_users().await?;
    match users.len() {
        0 => Err(anyhow!(
            "No profile yet. Create one with: tally init <username>"
        )),
        1 => Ok(users.into_iter().next().unwrap()),
        _ => {
            let names: Vec<String> = users.into_iter().map(|u| u.username).collect();
            Err(anyhow!(
                "Multiple profiles exist ({}). Set `username` in tally.toml or TALLY_USERNAME.",
                names.join(", ")
            ))
        }
    }
}
