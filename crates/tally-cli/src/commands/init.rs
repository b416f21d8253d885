use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tally_core::repository::Repository;

use crate::cli::InitCommand;
use crate::config::{detect_system_timezone, validate_timezone, Config};

pub async fn init_profile(
    repo: &impl Repository,
    config: &Config,
    command: InitCommand,
) -> Result<()> {
    let timezone = match command.timezone {
        Some(tz) => {
            validate_timezone(&tz).map_err(|e| anyhow::anyhow!(e))?;
            tz
        }
        None => {
            if validate_timezone(&config.default_timezone).is_ok() {
                config.default_timezone.clone()
            } else {
                detect_system_timezone()
            }
        }
    };

    let user = repo.create_user(&command.username, &timezone).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    let subtle_style = Style::new().bright_black();

    println!(
        "{} Created profile: {}",
        "✓".style(success_style),
        user.username.bright_white().bold()
    );
    println!(
        "  {} Timezone: {}",
        "→".style(info_style),
        user.timezone.cyan()
    );
    println!("\n{} Next steps:", "💡".style(subtle_style));
    println!(
        "   {} Add a daily habit: tally add \"Morning run\" -f daily",
        "•".style(subtle_style)
    );
    println!(
        "   {} See today's tasks: tally today",
        "•".style(subtle_style)
    );

    Ok(())
}
