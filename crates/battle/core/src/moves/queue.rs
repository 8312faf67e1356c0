//! Per-round move queue.
//!
//! Ordering: higher priority first, then higher speed, then earlier
//! insertion. The speed source is injectable so effective speed (after
//! multipliers) can replace base speed without touching the queue.

use std::cmp::Reverse;
use std::collections::VecDeque;

use super::{BattleMove, MoveTarget};
use crate::error::{BattleFault, ErrorSeverity};
use crate::state::FighterId;

/// A move with its owner and target already decided.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedMove {
    pub battle_move: BattleMove,
    pub owner: FighterId,
    pub target: MoveTarget,
}

impl QueuedMove {
    pub fn new(battle_move: BattleMove, owner: FighterId, target: MoveTarget) -> Self {
        Self {
            battle_move,
            owner,
            target,
        }
    }

    /// Targets a single fighter.
    pub fn at(battle_move: BattleMove, owner: FighterId, target: FighterId) -> Self {
        Self::new(battle_move, owner, MoveTarget::Fighter(target))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueError {
    /// `pop_next` on an empty queue; the caller's loop is out of step.
    #[error("move queue is empty")]
    QueueEmpty,
}

impl BattleFault for QueueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QueueEmpty => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::QueueEmpty => "QUEUE_EMPTY",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    seq: u64,
    queued: QueuedMove,
}

/// Moves waiting to execute this round.
#[derive(Clone, Debug, Default)]
pub struct MoveQueue {
    entries: VecDeque<Entry>,
    next_seq: u64,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move; insertion order breaks sort ties.
    pub fn push(&mut self, queued: QueuedMove) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(Entry { seq, queued });
    }

    /// Removes and returns the front move.
    pub fn pop_next(&mut self) -> Result<QueuedMove, QueueError> {
        self.entries
            .pop_front()
            .map(|entry| entry.queued)
            .ok_or(QueueError::QueueEmpty)
    }

    /// Sorts by priority, then `speed(owner)`, both descending.
    pub fn sort_with<F>(&mut self, mut speed: F)
    where
        F: FnMut(FighterId) -> i64,
    {
        self.entries
            .make_contiguous()
            .sort_by_cached_key(|entry| {
                (
                    Reverse(entry.queued.battle_move.priority),
                    Reverse(speed(entry.queued.owner)),
                    entry.seq,
                )
            });
    }

    /// `sort_with(speed)` followed by `pop_next()`.
    pub fn sort_and_pop<F>(&mut self, speed: F) -> Result<QueuedMove, QueueError>
    where
        F: FnMut(FighterId) -> i64,
    {
        self.sort_with(speed);
        self.pop_next()
    }

    pub fn contains_owner(&self, owner: FighterId) -> bool {
        self.entries.iter().any(|e| e.queued.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedMove> {
        self.entries.iter().map(|e| &e.queued)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
