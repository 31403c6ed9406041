use clap::Parser;

use crate::cmd::Commands;

/// Session-scoped task and calendar manager.
/// All data lives in memory for the lifetime of the process.
#[derive(Parser)]
#[command(name = "zenith", version, about = "Task and calendar manager TUI")]
pub struct Cli {
    /// Start with an empty schedule instead of the sample tasks.
    #[arg(long, global = true)]
    pub empty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
