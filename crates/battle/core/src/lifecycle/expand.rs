//! Expansion of field effect templates into concrete changes.

use crate::combat::apply;
use crate::effect::{FieldEffect, FieldEffectId, FieldEffectKind, Status};
use crate::event::EventSink;
use crate::state::{BattleState, FighterId, Side};

/// Everything one expansion needs to know about the cast.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cast {
    pub id: FieldEffectId,
    pub source: FighterId,
    pub caster_side: Side,
    pub duration: Option<u32>,
}

/// Applies every template once, in order, to the living members of each
/// scoped side (home first for field-wide effects).
pub(crate) fn expand(
    state: &mut BattleState,
    effects: &[FieldEffect],
    cast: Cast,
    events: &mut dyn EventSink,
) {
    for effect in effects {
        for side in effect.scope.sides(cast.caster_side) {
            expand_one(state, &effect.kind, side, cast, events);
        }
    }
}

fn expand_one(
    state: &mut BattleState,
    kind: &FieldEffectKind,
    side: Side,
    cast: Cast,
    events: &mut dyn EventSink,
) {
    if let FieldEffectKind::TeamStatus(status) = kind {
        let status = Status::new(*status, cast.duration).with_origin(cast.id);
        apply::apply_team_status(state, side, status, events);
        return;
    }

    for target in state.team(side).alive_ids() {
        match kind {
            FieldEffectKind::Status(status) => {
                let status = Status::new(*status, cast.duration).with_origin(cast.id);
                apply::apply_status(state, target, status, events);
            }
            FieldEffectKind::Restore { resource, percent } => {
                apply::restore_percent(state, target, *resource, *percent, events);
            }
            FieldEffectKind::GrantShield(shield) => {
                apply::grant_shield(state, target, shield, events);
            }
            FieldEffectKind::Damage { amount } => {
                apply::deliver_unshielded(state, target, *amount, Some(cast.source), events);
            }
            FieldEffectKind::TeamStatus(_) => {}
        }
    }
}

/// Removes every status expanded from `id`, on fighters and teams alike.
pub(crate) fn retract(state: &mut BattleState, id: FieldEffectId) {
    for side in Side::BOTH {
        let team = state.team_mut(side);
        team.statuses.remove_origin(id);
        for fighter in &mut team.fighters {
            fighter.statuses.remove_origin(id);
        }
    }
}
