use anyhow::Result;
use owo_colors::OwoColorize;
use tally_core::engine::ScoreEngine;
use tally_core::models::User;
use tally_core::repository::Repository;

use crate::cli::TodayCommand;
use crate::views::table::display_today;

pub async fn today(
    engine: &ScoreEngine<impl Repository>,
    user: &User,
    command: TodayCommand,
) -> Result<()> {
    // Settlement is lazy: it runs when the user shows up, so penalties for
    // closed buckets land before the dashboard is rendered.
    if !command.no_settle {
        let report = engine.settle(user.id, None).await?;
        let penalized = report.penalized_daily + report.penalized_weekly;
        if penalized > 0 {
            println!(
                "{} {} missed period(s) settled",
                "!".yellow().bold(),
                penalized.to_string().yellow()
            );
        }
    }

    let items = engine.today(user.id, None).await?;
    display_today(&items);
    Ok(())
}
