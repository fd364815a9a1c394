//! Topic-based event bus for battle events.
//!
//! The session drains the engine's event queue after every tick and
//! republishes each event on its topic.

mod bus;

pub use bus::{Event, EventBus, Topic};
