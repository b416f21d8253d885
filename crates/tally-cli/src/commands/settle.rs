use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tally_core::engine::ScoreEngine;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::cli::SettleCommand;

pub async fn settle(
    engine: &ScoreEngine<impl Repository>,
    user: &User,
    command: SettleCommand,
) -> Result<()> {
    let report = engine
        .settle(user.id, command.timezone.as_deref())
        .await?;

    let info_style = Style::new().blue();

    println!(
        "Settled through {} (daily) and week of {} (weekly)",
        report.daily_bucket.to_string().cyan(),
        report.weekly_bucket.to_string().cyan()
    );

    let penalized = report.penalized_daily + report.penalized_weekly;
    if penalized == 0 {
        println!("{} Nothing missed. Keep it up!", "✓".green().bold());
    } else {
        if report.penalized_daily > 0 {
            println!(
                "  {} {} daily task(s) missed",
                "→".style(info_style),
                report.penalized_daily.to_string().red()
            );
        }
        if report.penalized_weekly > 0 {
            println!(
                "  {} {} weekly task(s) missed",
                "→".style(info_style),
                report.penalized_weekly.to_string().red()
            );
        }
    }

    Ok(())
}
