//! Expansion of multi-turn moves into one queued move per round.
//!
//! The round controller never special-cases multi-turn moves: the move
//! selection layer expands them with [`MultiTurnPlan`] and queues one step
//! per round.

use std::collections::VecDeque;

use super::{BattleMove, MoveKind, MoveTarget, QueuedMove};
use crate::state::FighterId;

/// Remaining steps of one expanded multi-turn move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiTurnPlan {
    owner: FighterId,
    target: MoveTarget,
    steps: VecDeque<BattleMove>,
}

impl MultiTurnPlan {
    /// Expands a queued move.
    ///
    /// - `MultiTurn { moves }` yields each move in order (nested multi-turn
    ///   moves are flattened),
    /// - a field move with sub-moves yields the field move itself first,
    ///   then each sub-move,
    /// - anything else yields itself once.
    pub fn expand(queued: QueuedMove) -> Self {
        let mut steps = VecDeque::new();
        flatten(queued.battle_move, &mut steps);
        Self {
            owner: queued.owner,
            target: queued.target,
            steps,
        }
    }

    pub fn owner(&self) -> FighterId {
        self.owner
    }

    /// Queued move for the coming round.
    pub fn next_move(&mut self) -> Option<QueuedMove> {
        self.steps
            .pop_front()
            .map(|step| QueuedMove::new(step, self.owner, self.target))
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Iterator for MultiTurnPlan {
    type Item = QueuedMove;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_move()
    }
}

fn flatten(battle_move: BattleMove, steps: &mut VecDeque<BattleMove>) {
    match battle_move.kind {
        MoveKind::MultiTurn { moves } => {
            for step in moves {
                flatten(step, steps);
            }
        }
        MoveKind::Field(mut field) if !field.sub_moves.is_empty() => {
            let sub_moves = std::mem::take(&mut field.sub_moves);
            steps.push_back(BattleMove {
                kind: MoveKind::Field(field),
                ..battle_move
            });
            for step in sub_moves {
                flatten(step, steps);
            }
        }
        kind => steps.push_back(BattleMove { kind, ..battle_move }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DanceEffectType;
    use crate::moves::{FieldMove, TargetType};

    #[test]
    fn multi_turn_yields_one_move_per_round() {
        let combo = BattleMove::new(
            "Flurry",
            TargetType::SingleEnemy,
            MoveKind::MultiTurn {
                moves: vec![BattleMove::attack("Jab", 1), BattleMove::attack("Hook", 3)],
            },
        );
        let plan = MultiTurnPlan::expand(QueuedMove::at(combo, FighterId(1), FighterId(2)));
        let names: Vec<_> = plan.map(|q| q.battle_move.name).collect();
        assert_eq!(names, vec!["Jab", "Hook"]);
    }

    #[test]
    fn field_move_runs_before_its_sub_moves() {
        let dance = BattleMove::new(
            "Fire Dance",
            TargetType::Field,
            MoveKind::Field(FieldMove {
                effects: Vec::new(),
                dance: Some(DanceEffectType::Fire),
                duration: Some(3),
                sub_moves: vec![BattleMove::wait(), BattleMove::wait()],
            }),
        );
        let mut plan = MultiTurnPlan::expand(QueuedMove::new(dance, FighterId(1), MoveTarget::Field));
        assert_eq!(plan.remaining(), 3);

        let first = plan.next_move().map(|q| q.battle_move);
        assert!(matches!(
            first.map(|m| m.kind),
            Some(MoveKind::Field(FieldMove { sub_moves, .. })) if sub_moves.is_empty()
        ));
        assert_eq!(plan.by_ref().count(), 2);
        assert!(plan.is_finished());
    }

    #[test]
    fn plain_moves_yield_themselves() {
        let mut plan = MultiTurnPlan::expand(QueuedMove::at(
            BattleMove::attack("Jab", 1),
            FighterId(1),
            FighterId(2),
        ));
        assert_eq!(plan.next_move().map(|q| q.owner), Some(FighterId(1)));
        assert!(plan.next_move().is_none());
    }
}
