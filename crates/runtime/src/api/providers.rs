//! Asynchronous abstraction for sourcing each side's moves.
//!
//! Runtime users plug in [`MoveProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or AI policies.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{BattleState, QueuedMove, Side};

use super::errors::Result;

/// Trait for choosing one side's moves for the coming round.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed moves
/// - Testing fixtures
#[async_trait]
pub trait MoveProvider: Send + Sync {
    /// Returns the moves `side` queues for the next round. At most one move
    /// per fighter is accepted by the engine.
    ///
    /// # Arguments
    /// * `side` - The team being asked
    /// * `state` - Read-only snapshot of the battle before the round
    async fn provide_moves(&self, side: Side, state: &BattleState) -> Result<Vec<QueuedMove>>;
}

/// A provider that never queues anything.
/// Useful for testing or as a fallback.
pub struct IdleMoveProvider;

#[async_trait]
impl MoveProvider for IdleMoveProvider {
    async fn provide_moves(&self, _side: Side, _state: &BattleState) -> Result<Vec<QueuedMove>> {
        Ok(Vec::new())
    }
}

/// Replays a fixed list of rounds, then goes idle.
///
/// Moves whose owner has died since the script was written are dropped so
/// a replay never trips the engine's validation.
#[derive(Default)]
pub struct ScriptedMoveProvider {
    rounds: Mutex<VecDeque<Vec<QueuedMove>>>,
}

impl ScriptedMoveProvider {
    pub fn new(rounds: impl IntoIterator<Item = Vec<QueuedMove>>) -> Self {
        Self {
            rounds: Mutex::new(rounds.into_iter().collect()),
        }
    }

    /// Repeats the same moves every round, `rounds` times.
    pub fn repeat(moves: Vec<QueuedMove>, rounds: usize) -> Self {
        Self::new(std::iter::repeat_n(moves, rounds))
    }

    pub fn remaining(&self) -> usize {
        self.rounds.lock().map_or(0, |rounds| rounds.len())
    }
}

#[async_trait]
impl MoveProvider for ScriptedMoveProvider {
    async fn provide_moves(&self, _side: Side, state: &BattleState) -> Result<Vec<QueuedMove>> {
        let next = match self.rounds.lock() {
            Ok(mut rounds) => rounds.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        Ok(next
            .unwrap_or_default()
            .into_iter()
            .filter(|queued| state.is_alive(queued.owner))
            .collect())
    }
}
