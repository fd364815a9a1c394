//! List registered content.

use std::path::PathBuf;

use anyhow::Result;
use battle_content::ContentFactory;
use clap::Parser;
use console::style;

/// List registered combatants and power catalogues
#[derive(Parser)]
pub struct List {
    /// Content directory (config.toml, combatants.ron, catalogues.ron, ...)
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let registry = ContentFactory::new(&self.data_dir).load_registry()?;

        println!("{}", style("Combatants").bold());
        for key in registry.names() {
            let combatant = registry.create(key)?;
            println!(
                "  {:<12} {} (Lv.{}, {})",
                style(key).cyan(),
                combatant.display_name(),
                combatant.level(),
                combatant.kind
            );
        }

        println!("{}", style("Power catalogues").bold());
        for key in registry.catalogue_names() {
            if let Some(catalogue) = registry.catalogue(key) {
                println!(
                    "  {:<12} {} ({} powers)",
                    style(key).cyan(),
                    catalogue.name,
                    catalogue.powers().len()
                );
            }
        }
        Ok(())
    }
}
