//! Legality checks run before a move touches any target.
//!
//! Programmer errors (an unexpanded multi-turn move, an unlearned spell)
//! come back as `Err`. Expected rejections come back as
//! `Ok(Some(reason))` and leave state untouched.

use super::ExecutionContext;
use crate::combat::FailureReason;
use crate::error::BattleError;
use crate::event::BattleEvent;
use crate::moves::{MoveKind, QueuedMove};
use crate::stats::Effective;

/// Rejects moves the pipeline must never see: multi-turn moves and field
/// moves that still carry sub-moves.
pub fn check_shape(queued: &QueuedMove) -> Result<(), BattleError> {
    match queued.battle_move.kind {
        MoveKind::MultiTurn { .. } => Err(BattleError::UnexpandedMultiTurn(
            queued.battle_move.name.clone(),
        )),
        MoveKind::Field(ref field) if !field.sub_moves.is_empty() => Err(
            BattleError::UnexpandedMultiTurn(queued.battle_move.name.clone()),
        ),
        _ => Ok(()),
    }
}

/// Evaluates the move's `requires` condition.
pub fn check_requirement(ctx: &ExecutionContext<'_>, queued: &QueuedMove) -> Option<FailureReason> {
    match &queued.battle_move.requires {
        Some(condition) if !ctx.effects.evaluate(condition) => {
            Some(FailureReason::ConditionNotMet)
        }
        _ => None,
    }
}

/// Spell legality and payment.
///
/// Order: known (else error), not sealed, affordable after every
/// spell-cost multiplier (own and team, multiplied then floored). Mana is
/// spent here, before any roll, and is never refunded.
pub fn pay_spell_cost(
    ctx: &mut ExecutionContext<'_>,
    queued: &QueuedMove,
    base_cost: u32,
) -> Result<Option<FailureReason>, BattleError> {
    let owner = queued.owner;
    let spell = &queued.battle_move.name;

    let view = Effective::of(ctx.state, owner).ok_or(BattleError::UnknownFighter(owner))?;
    if !view.fighter.knows_spell(spell) {
        return Err(BattleError::spell_not_known(owner, spell.clone(), ctx.round));
    }
    if view.is_sealed() {
        return Ok(Some(FailureReason::MagicSealed));
    }

    let cost = view.spell_cost(base_cost);
    if view.fighter.mana.current < cost {
        return Ok(Some(FailureReason::NotEnoughMana));
    }

    let fighter = ctx.state.require_mut(owner)?;
    let spent = fighter.mana.deplete(cost);
    if spent > 0 {
        ctx.emit(BattleEvent::ManaLost {
            fighter: owner,
            amount: spent,
        });
    }
    Ok(None)
}
