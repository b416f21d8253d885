use anyhow::Result;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl Repository, user: &User) -> Result<()> {
    let tasks = repo.list_tasks(user.id).await?;
    display_tasks(&tasks);
    Ok(())
}
