//! Target validation and resolution.
//!
//! Validation checks that the chosen target fits the move's target type
//! (side and shape) and is a programmer error when it does not. Resolution
//! expands the target into the fighters currently alive; an empty result
//! means the move has nothing left to hit.

use crate::error::BattleError;
use crate::moves::{MoveTarget, QueuedMove, TargetType};
use crate::state::{BattleState, FighterId, Side};

fn invalid(queued: &QueuedMove, reason: &'static str) -> BattleError {
    BattleError::InvalidTarget {
        move_name: queued.battle_move.name.clone(),
        target: queued.target,
        reason,
    }
}

/// Checks owner and target against the move's target type.
pub fn validate_target(state: &BattleState, queued: &QueuedMove) -> Result<(), BattleError> {
    let owner_side = state
        .side_of(queued.owner)
        .ok_or(BattleError::UnknownFighter(queued.owner))?;

    let target_type = queued.battle_move.target_type;
    if !target_type.is_single() {
        return Ok(());
    }

    let MoveTarget::Fighter(target) = queued.target else {
        return Err(invalid(queued, "a single fighter must be chosen"));
    };
    let target_side = state
        .side_of(target)
        .ok_or(BattleError::UnknownFighter(target))?;

    match target_type {
        TargetType::SingleAlly if target == queued.owner => {
            Err(invalid(queued, "target must be an ally other than the owner"))
        }
        TargetType::SingleAlly | TargetType::SingleAllyOrSelf if target_side != owner_side => {
            Err(invalid(queued, "target must be on the owner's team"))
        }
        TargetType::SingleEnemy if target_side == owner_side => {
            Err(invalid(queued, "target must be on the opposing team"))
        }
        _ => Ok(()),
    }
}

/// Validates, then expands the target into living fighters.
pub fn resolve_targets(
    state: &BattleState,
    queued: &QueuedMove,
) -> Result<Vec<FighterId>, BattleError> {
    validate_target(state, queued)?;
    let owner_side = state
        .side_of(queued.owner)
        .ok_or(BattleError::UnknownFighter(queued.owner))?;

    let alive_on = |side: Side| state.team(side).alive_ids();

    let targets = match queued.battle_move.target_type {
        TargetType::Caster => vec![queued.owner],
        TargetType::SingleAlly | TargetType::SingleAllyOrSelf | TargetType::SingleEnemy => {
            match queued.target {
                MoveTarget::Fighter(id) => vec![id],
                _ => Vec::new(),
            }
        }
        TargetType::OwnTeam => alive_on(owner_side),
        TargetType::EnemyTeam => alive_on(owner_side.opposite()),
        TargetType::Field => {
            let mut all = alive_on(Side::Home);
            all.extend(alive_on(Side::Away));
            all
        }
    };

    Ok(targets
        .into_iter()
        .filter(|id| state.is_alive(*id))
        .collect())
}
