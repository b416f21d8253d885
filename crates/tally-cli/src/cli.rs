use clap::{Parser, Subcommand};
use tally_core::models::Frequency;

/// A gamified habit tracker: earn points for streaks, lose them for misses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create your local profile
    Init(InitCommand),
    /// Add a new habit or one-off task
    Add(AddCommand),
    /// List all tasks
    List,
    /// Show today's tasks with their period state
    Today(TodayCommand),
    /// Mark a task as completed for the current period
    Done(DoneCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Settle missed periods now
    Settle(SettleCommand),
    /// Show the recent score ledger
    Feed(FeedCommand),
    /// Show completions over the last seven days
    Stats,
    /// Show your current score
    Score,
}

pub fn parse_frequency(s: &str) -> Result<Frequency, String> {
    s.parse().map_err(|e| format!("{}", e))
}

#[derive(Parser, Debug, Clone)]
pub struct InitCommand {
    /// Username (3-20 lowercase letters, digits or underscores)
    pub username: String,
    /// Your IANA timezone (e.g., 'Europe/Berlin'); detected when omitted
    #[clap(long)]
    pub timezone: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// How often the task recurs
    #[clap(short, long, value_parser = parse_frequency, default_value = "none")]
    pub frequency: Frequency,
}

#[derive(Parser, Debug, Clone)]
pub struct TodayCommand {
    /// Skip the implicit settlement run
    #[clap(long)]
    pub no_settle: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to complete (short prefix is fine)
    pub id: String,
    /// When the completion happened (e.g., 'yesterday 9pm'); defaults to now
    #[clap(long)]
    pub at: Option<String>,
    /// Timezone override for bucket attribution
    #[clap(long)]
    pub timezone: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Option<Frequency>,

    /// Stop tracking (and penalizing) this task
    #[arg(long)]
    pub pause: bool,
    /// Resume a paused task
    #[arg(long, conflicts_with = "pause")]
    pub resume: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SettleCommand {
    /// Timezone override for bucket computation
    #[clap(long)]
    pub timezone: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct FeedCommand {
    /// Number of ledger events to show
    #[clap(long, short, default_value = "20")]
    pub limit: i64,
}
