//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! queuing moves, resolving rounds or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActiveFieldEffect, BattleState, QueuedMove, RoundOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Queue a move for the coming round
    pub async fn enqueue_move(&self, queued: QueuedMove) -> Result<()> {
        self.request(|reply| Command::EnqueueMove { queued, reply })
            .await?
    }

    /// Drop every move queued so far this round
    pub async fn clear_queue(&self) -> Result<()> {
        self.request(|reply| Command::ClearQueue { reply }).await
    }

    /// Resolve every queued move as one round
    pub async fn run_round(&self) -> Result<RoundOutcome> {
        self.request(|reply| Command::RunRound { reply }).await?
    }

    /// Live field effects in activation order
    pub async fn active_field_effects(&self) -> Result<Vec<ActiveFieldEffect>> {
        self.request(|reply| Command::ActiveFieldEffects { reply })
            .await
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_state(&self) -> Result<BattleState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Moves, hits, damage, spells, shields, deaths
    /// - `Topic::Effects` - Statuses, field effects, combinations
    /// - `Topic::Round` - Round started / finished
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use battle_runtime::Topic;
    ///
    /// let mut rounds = handle.subscribe(Topic::Round);
    /// while let Ok(event) = rounds.recv().await {
    ///     // Handle round events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
