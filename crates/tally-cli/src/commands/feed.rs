use anyhow::Result;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::cli::FeedCommand;
use crate::views::table::display_feed;

pub async fn feed(repo: &impl Repository, user: &User, command: FeedCommand) -> Result<()> {
    let items = repo.recent_ledger_events(user.id, command.limit).await?;
    display_feed(&items);
    Ok(())
}
