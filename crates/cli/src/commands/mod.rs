//! Subcommands of the battle runner.

mod list;
mod run;

pub use list::List;
pub use run::Run;
