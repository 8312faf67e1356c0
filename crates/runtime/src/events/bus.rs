//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use battle_core::BattleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Moves, hits, damage, healing, spells, shields and deaths
    Combat,
    /// Status and field-effect lifecycle, dance combinations
    Effects,
    /// Round started / finished
    Round,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Effects, Topic::Round];

    /// Topic a domain event is published under.
    pub fn of(event: &BattleEvent) -> Self {
        use BattleEvent::*;

        match event {
            RoundStarted { .. } | RoundFinished { .. } => Topic::Round,
            StatusApplied { .. }
            | StatusExpired { .. }
            | TeamStatusApplied { .. }
            | TeamStatusExpired { .. }
            | FieldEffectAdded { .. }
            | FieldEffectRenewed { .. }
            | FieldEffectExpired { .. }
            | FieldEffectCancelled { .. }
            | FieldEffectsCombined { .. } => Topic::Effects,
            _ => Topic::Combat,
        }
    }
}

/// A domain event stamped with the round it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub round: u32,
    pub event: BattleEvent,
}

impl Event {
    pub fn new(round: u32, event: BattleEvent) -> Self {
        Self { round, event }
    }

    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Topics are fixed at construction, so the
/// channel map is shared without a lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created in `with_capacity`; a detached receiver
            // keeps the signature total.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
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
