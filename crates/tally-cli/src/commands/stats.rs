use anyhow::Result;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use tally_core::calendar::day_bucket;
use tally_core::models::User;
use tally_core::repository::Repository;
use tally_core::timezone::resolve_timezone;

pub async fn stats(repo: &impl Repository, user: &User) -> Result<()> {
    let tz = resolve_timezone(None, Some(&user.timezone))?;
    let now = Utc::now();
    let today = day_bucket(now, tz);

    let window_start = now - Duration::days(6);
    let completions = repo.completions_since(user.id, window_start).await?;

    println!("Last 7 days:");
    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let (count, points) = completions
            .iter()
            .filter(|c| day_bucket(c.completed_at, tz) == day)
            .fold((0usize, 0i64), |(n, p), c| (n + 1, p + c.points_awarded));

        let bar = "█".repeat(count);
        let label = if day == today {
            "today".to_string()
        } else {
            day.format("%a %d").to_string()
        };
        if count > 0 {
            println!(
                "  {:>7}  {} {} ({} pts)",
                label,
                bar.green(),
                count,
                points.to_string().cyan()
            );
        } else {
            println!("  {:>7}  {}", label, "-".bright_black());
        }
    }

    Ok(())
}
