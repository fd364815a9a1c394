//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use battle_core::BattleEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Narration lines
    Narration,
    /// Damage and power use
    Combat,
    /// Level ups and the end of the battle
    Progress,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Narration, Topic::Combat, Topic::Progress];

    pub fn of(event: &BattleEvent) -> Self {
        match event {
            BattleEvent::Message(_) => Topic::Narration,
            BattleEvent::DamageDealt { .. } | BattleEvent::PowerUsed { .. } => Topic::Combat,
            BattleEvent::LevelUp { .. } | BattleEvent::BattleEnded { .. } => Topic::Progress,
        }
    }
}

/// Engine event stamped with the round it was drained in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub round: u32,
    pub event: BattleEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Receivers can be polled with `try_recv`, so no
/// async executor is required.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic) {
            if tx.send(event).is_err() {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!("No subscribers for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created up front; this arm only keeps the
            // signature infallible.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
