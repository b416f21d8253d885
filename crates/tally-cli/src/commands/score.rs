use anyhow::Result;
use owo_colors::OwoColorize;
use tally_core::models::User;
use tally_core::repository::Repository;
use tally_core::scoring::{level_from_xp, tier_for_score, xp_for_level, ScoringPolicy};

pub async fn score(repo: &impl Repository, user: &User, policy: ScoringPolicy) -> Result<()> {
    // Re-read: the cached row may predate a settlement in this invocation
    let user = repo
        .find_user_by_id(user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Profile no longer exists"))?;

    match policy {
        ScoringPolicy::Reputation => {
            println!(
                "{}  {} — {}",
                user.username.bright_white().bold(),
                user.score.to_string().cyan().bold(),
                tier_for_score(user.score).yellow()
            );
        }
        ScoringPolicy::Xp => {
            let level = level_from_xp(user.score);
            let next_at = xp_for_level(level + 1);
            println!(
                "{}  level {} — {} XP ({} to next level)",
                user.username.bright_white().bold(),
                level.to_string().cyan().bold(),
                user.score.to_string().yellow(),
                (next_at - user.score).max(0)
            );
        }
    }

    Ok(())
}
