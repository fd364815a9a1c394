//! Special powers and their per-combatant catalogue.
//!
//! A [`Power`] is a named special action with a resource cost, a cooldown and
//! optional damage. Powers are grouped into a [`PowerCatalogue`] that carries
//! a mastery progression: every successful use grants a mastery point, and a
//! fully mastered catalogue can be awakened once to permanently strengthen all
//! of its powers.

mod catalogue;
mod power;

pub use catalogue::{PowerCatalogue, PowerUse};
pub use power::Power;
