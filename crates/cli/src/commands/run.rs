//! Play one battle headlessly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ConfigLoader, ContentFactory, RosterLoader, SnapshotLoader};
use battle_core::{BattleEvent, BattleSummary};
use battle_runtime::{BattleSession, RuntimeConfig, StrategyActionProvider, Topic};
use clap::Parser;
use console::style;
use tokio::sync::broadcast::error::TryRecvError;

/// Play one battle to completion
#[derive(Parser)]
pub struct Run {
    /// Content directory (config.toml, allies.ron, enemies.ron, ...)
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Battle rules file (defaults to <DIR>/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ally roster file (defaults to <DIR>/allies.ron)
    #[arg(long, value_name = "FILE", conflicts_with = "party")]
    allies: Option<PathBuf>,

    /// Enemy roster file (defaults to <DIR>/enemies.ron)
    #[arg(long, value_name = "FILE")]
    enemies: Option<PathBuf>,

    /// Restore allies from a saved party snapshot
    #[arg(long, value_name = "FILE")]
    party: Option<PathBuf>,

    /// Save the surviving party after the battle
    #[arg(long, value_name = "FILE")]
    save_party: Option<PathBuf>,

    /// Battle seed (overrides BATTLE_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Battle log followed by the outcome
    Summary,
    /// Battle summary as JSON
    Json,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        let battle_config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };
        let registry = factory.load_registry()?;

        let allies = match (&self.party, &self.allies) {
            (Some(party), _) => SnapshotLoader::load_roster(party)?,
            (None, Some(path)) => RosterLoader::load(path, &registry)?,
            (None, None) => RosterLoader::load(&self.data_dir.join("allies.ron"), &registry)?,
        };
        let enemies = match &self.enemies {
            Some(path) => RosterLoader::load(path, &registry)?,
            None => RosterLoader::load(&self.data_dir.join("enemies.ron"), &registry)?,
        };

        let mut runtime_config = RuntimeConfig::from_env();
        if let Some(seed) = self.seed {
            runtime_config = runtime_config.with_seed(seed);
        }
        let max_ticks = runtime_config.max_ticks;

        let mut session = BattleSession::new(battle_config, runtime_config);
        let seed = session.seed();
        session.set_player_provider(StrategyActionProvider::new(seed));
        session.set_crew_provider(StrategyActionProvider::new(seed.rotate_left(32)));

        let mut narration = session.subscribe(Topic::Narration);
        session
            .start(allies, enemies)
            .context("Failed to start battle")?;

        let verbose = self.format == OutputFormat::Summary;
        loop {
            let running = session.step()?;
            if verbose {
                print_narration(&mut narration);
            }
            if !running {
                break;
            }
            if session.ticks() >= max_ticks {
                anyhow::bail!("battle still running after {} ticks", session.ticks());
            }
        }

        let report = session.finish();
        match self.format {
            OutputFormat::Summary => print_summary(&report.summary, seed),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.summary)?),
        }

        if let Some(path) = &self.save_party {
            SnapshotLoader::save(path, &report.allies)?;
        }
        Ok(())
    }
}

fn print_narration(rx: &mut tokio::sync::broadcast::Receiver<battle_runtime::Event>) {
    loop {
        match rx.try_recv() {
            Ok(event) => {
                if let BattleEvent::Message(text) = event.event {
                    println!("{} {}", style(format!("[R{}]", event.round)).dim(), text);
                }
            }
            Err(TryRecvError::Lagged(missed)) => {
                tracing::warn!(missed, "narration lagged behind");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn print_summary(summary: &BattleSummary, seed: u64) {
    let outcome = if summary.victory {
        style("Victory").green().bold()
    } else {
        style("Defeat").red().bold()
    };
    println!();
    println!("{} after {} rounds (seed {})", outcome, summary.round, seed);
    println!(
        "  rewards: {} exp, {} berries",
        summary.experience_reward, summary.currency_reward
    );
    println!(
        "  combatants: {} allies, {} enemies",
        summary.ally_count, summary.enemy_count
    );
}
