//! Combatant stat model.
//!
//! Every stat carries three layers:
//!
//! ```text
//! [ Base ]          persistent, survives battles, grows on level-up
//!    +
//! [ Modifier ]      additive, battle-scoped
//!    ×
//! [ Multiplier ]    multiplicative (default 1.0), battle-scoped
//!    ↓
//! floor(max(0, ...)) = final value
//! ```
//!
//! Current health is the *base* layer of [`StatKind::Health`]; maximum health
//! is the *final* value of [`StatKind::MaxHealth`].

pub mod block;
pub mod growth;
pub mod kind;

pub use block::StatBlock;
pub use growth::{LevelGrowth, experience_required};
pub use kind::StatKind;
