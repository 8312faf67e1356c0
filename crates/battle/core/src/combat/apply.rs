//! State mutations shared by the pipeline and the lifecycle manager.
//!
//! Each helper clamps at the point of change and emits the matching events
//! in the order the changes happen.

use crate::effect::{Shield, Status};
use crate::event::{BattleEvent, EventSink};
use crate::state::{BattleState, FighterId, Resource, Side};

/// What a delivered hit did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Health the fighter actually lost.
    pub dealt: u32,
    /// Damage taken out of a shield instead.
    pub absorbed: u32,
    pub killed: bool,
}

/// Delivers one hit.
///
/// A held shield takes the hit first: its defense reduces the damage, the
/// rest comes out of shield health and nothing carries over to the fighter.
/// A shield at zero health is destroyed. Without a shield the fighter loses
/// health (a `DamageTaken` event is emitted even for 0) and may die.
pub fn deliver_damage(
    state: &mut BattleState,
    target: FighterId,
    amount: u32,
    source: Option<FighterId>,
    events: &mut dyn EventSink,
) -> DamageReport {
    let Some(fighter) = state.fighter_mut(target) else {
        return DamageReport::default();
    };
    if !fighter.is_alive() {
        return DamageReport::default();
    }

    if let Some(shield) = fighter.shield.as_mut() {
        let hit = shield.absorb(amount);
        events.emit(BattleEvent::ShieldAbsorbed {
            fighter: target,
            amount: hit.absorbed,
        });
        if hit.destroyed
            && let Some(broken) = fighter.shield.take()
        {
            events.emit(BattleEvent::ShieldDestroyed {
                fighter: target,
                shield: broken.name,
            });
        }
        return DamageReport {
            dealt: 0,
            absorbed: hit.absorbed,
            killed: false,
        };
    }

    deliver_unshielded(state, target, amount, source, events)
}

/// Removes health directly, ignoring shields.
pub fn deliver_unshielded(
    state: &mut BattleState,
    target: FighterId,
    amount: u32,
    source: Option<FighterId>,
    events: &mut dyn EventSink,
) -> DamageReport {
    let Some(fighter) = state.fighter_mut(target) else {
        return DamageReport::default();
    };
    if !fighter.is_alive() {
        return DamageReport::default();
    }

    let dealt = fighter.take_damage(amount);
    let killed = !fighter.is_alive();
    events.emit(BattleEvent::DamageTaken {
        fighter: target,
        amount: dealt,
        source,
    });
    if killed {
        events.emit(BattleEvent::Killed {
            fighter: target,
            killer: source,
        });
    }
    DamageReport {
        dealt,
        absorbed: 0,
        killed,
    }
}

/// Restores a flat amount of a resource. Emits `Healed` only when
/// something was restored.
pub fn restore(
    state: &mut BattleState,
    target: FighterId,
    resource: Resource,
    amount: u32,
    events: &mut dyn EventSink,
) -> u32 {
    let Some(fighter) = state.fighter_mut(target) else {
        return 0;
    };
    if !fighter.is_alive() {
        return 0;
    }
    let gained = fighter.meter_mut(resource).restore(amount);
    report_restored(target, resource, gained, events)
}

/// Restores `floor(max × percent / 100)` of a resource.
pub fn restore_percent(
    state: &mut BattleState,
    target: FighterId,
    resource: Resource,
    percent: u32,
    events: &mut dyn EventSink,
) -> u32 {
    let Some(fighter) = state.fighter_mut(target) else {
        return 0;
    };
    let gained = fighter.restore_percent(resource, percent);
    report_restored(target, resource, gained, events)
}

fn report_restored(
    target: FighterId,
    resource: Resource,
    gained: u32,
    events: &mut dyn EventSink,
) -> u32 {
    if gained > 0 {
        events.emit(BattleEvent::Healed {
            fighter: target,
            resource,
            amount: gained,
        });
    }
    gained
}

/// Attaches a copy of `status` to a living fighter.
pub fn apply_status(
    state: &mut BattleState,
    target: FighterId,
    status: Status,
    events: &mut dyn EventSink,
) -> bool {
    let Some(fighter) = state.fighter_mut(target) else {
        return false;
    };
    if !fighter.is_alive() || !fighter.statuses.push(status) {
        return false;
    }
    events.emit(BattleEvent::StatusApplied {
        fighter: target,
        status: status.kind,
    });
    true
}

/// Attaches a copy of `status` to a whole team.
pub fn apply_team_status(
    state: &mut BattleState,
    side: Side,
    status: Status,
    events: &mut dyn EventSink,
) -> bool {
    if !state.team_mut(side).statuses.push(status) {
        return false;
    }
    events.emit(BattleEvent::TeamStatusApplied {
        side,
        status: status.kind,
    });
    true
}

/// Gives a living fighter its own copy of `shield`.
pub fn grant_shield(
    state: &mut BattleState,
    target: FighterId,
    shield: &Shield,
    events: &mut dyn EventSink,
) -> bool {
    let Some(fighter) = state.fighter_mut(target) else {
        return false;
    };
    if !fighter.is_alive() {
        return false;
    }
    fighter.equip_shield(shield.clone());
    events.emit(BattleEvent::ShieldGranted {
        fighter: target,
        shield: shield.name.clone(),
    });
    true
}
