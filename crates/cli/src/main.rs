//! Headless battle runner.
//!
//! Loads content from a data directory, plays one battle with strategy-driven
//! providers on both sides and prints the outcome.
//!
//! ```bash
//! battle run --data-dir crates/battle/content/data --seed 7
//! battle run --party party.ron --save-party party.ron --format json
//! battle list --data-dir crates/battle/content/data
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{List, Run};

/// Turn-based battle runner
#[derive(Parser)]
#[command(name = "battle")]
#[command(about = "Run turn-based battles from content files", long_about = None)]
#[command(version)]
struct Cli {
    /// Write logs to this file in addition to stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play one battle to completion
    Run(Run),

    /// List registered combatants and power catalogues
    List(List),
}

fn main() -> Result<()> {
    // Load .env file if it exists (BATTLE_SEED, RUST_LOG, ...)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
    }
}
