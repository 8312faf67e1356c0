//! Effect lifecycle manager.
//!
//! Owns the live field-effect set, expands new field effects onto fighters
//! and teams, ticks every timed effect at round end and runs the dance
//! combination rule.
//!
//! # Round-end order
//!
//! 1. Dance effects and combinations whose owner died are cancelled
//! 2. Restoration statuses fire for every living holder
//! 3. Fighter statuses tick (home, then away); dead fighters are pruned
//!    silently
//! 4. Team statuses tick
//! 5. Field effects tick
mod expand;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::combat::apply;
use crate::effect::{
    ActiveFieldEffect, BattleCondition, CombinationRegistry, DanceEffectType, FieldEffectId,
    StatusKind, Tick,
};
use crate::error::BattleError;
use crate::event::{BattleEvent, EventSink};
use crate::moves::FieldMove;
use crate::state::{BattleState, FighterId, Resource, Side};
use crate::stats::Effective;

use expand::{Cast, expand, retract};

#[derive(Clone, Debug, Default)]
pub struct EffectManager {
    active: Vec<ActiveFieldEffect>,
    registry: CombinationRegistry,
    next_id: u32,
}

impl EffectManager {
    pub fn new(registry: CombinationRegistry) -> Self {
        Self {
            active: Vec::new(),
            registry,
            next_id: 1,
        }
    }

    /// Live field effects in activation order.
    pub fn active(&self) -> &[ActiveFieldEffect] {
        &self.active
    }

    pub fn registry(&self) -> &CombinationRegistry {
        &self.registry
    }

    pub fn get(&self, id: FieldEffectId) -> Option<&ActiveFieldEffect> {
        self.active.iter().find(|e| e.id == id)
    }

    pub fn is_dance_active(&self, tag: DanceEffectType) -> bool {
        self.active.iter().any(|e| e.dance == Some(tag))
    }

    /// Evaluates a condition against the live field-effect set.
    pub fn evaluate(&self, condition: &BattleCondition) -> bool {
        condition.evaluate(&self.active)
    }

    fn allocate_id(&mut self) -> FieldEffectId {
        let id = FieldEffectId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Registers one cast of a field move and expands it.
    ///
    /// A re-cast of the same move by the same owner resets the existing
    /// effect's duration and re-expands it instead of adding a duplicate.
    pub fn attach_field(
        &mut self,
        state: &mut BattleState,
        owner: FighterId,
        move_name: &str,
        field: &FieldMove,
        events: &mut dyn EventSink,
    ) -> Result<FieldEffectId, BattleError> {
        let caster_side = state
            .side_of(owner)
            .ok_or(BattleError::UnknownFighter(owner))?;

        let existing = self
            .active
            .iter()
            .position(|e| !e.combined && e.is_owned_by(owner) && e.name == move_name);

        let id = match existing {
            Some(index) => {
                let effect = &mut self.active[index];
                effect.remaining = field.duration;
                effect.effects = field.effects.clone();
                let id = effect.id;
                debug!(%id, name = move_name, "field effect renewed");
                retract(state, id);
                events.emit(BattleEvent::FieldEffectRenewed {
                    id,
                    name: move_name.to_owned(),
                });
                id
            }
            None => {
                let id = self.allocate_id();
                let mut owners = ArrayVec::new();
                owners.push(owner);
                self.active.push(ActiveFieldEffect {
                    id,
                    name: move_name.to_owned(),
                    dance: field.dance,
                    owners,
                    caster_side,
                    effects: field.effects.clone(),
                    remaining: field.duration,
                    combined: false,
                });
                debug!(%id, name = move_name, dance = ?field.dance, "field effect added");
                events.emit(BattleEvent::FieldEffectAdded {
                    id,
                    name: move_name.to_owned(),
                    owner,
                });
                id
            }
        };

        let cast = Cast {
            id,
            source: owner,
            caster_side,
            duration: field.duration,
        };
        expand(state, &field.effects, cast, events);
        Ok(id)
    }

    /// Looks for two different active dances forming a registered pair.
    ///
    /// On a match both sources are removed. If either source's owner is
    /// dead both are cancelled and nothing else happens; otherwise a single
    /// `FieldEffectsCombined` event is emitted and the combined effect is
    /// attached (immediate parts fire at once). Returns the combined id.
    pub fn check_combination(
        &mut self,
        state: &mut BattleState,
        events: &mut dyn EventSink,
    ) -> Option<FieldEffectId> {
        let (first, second, combined) = self.find_pair()?;

        // Remove the later index first so the earlier one stays valid.
        let b = self.active.remove(second);
        let a = self.active.remove(first);
        retract(state, a.id);
        retract(state, b.id);

        let owners_alive = |effect: &ActiveFieldEffect| {
            effect.owners.iter().all(|owner| state.is_alive(*owner))
        };
        if !owners_alive(&a) || !owners_alive(&b) {
            debug!(first = %a.id, second = %b.id, "combination interrupted by owner death");
            for effect in [a, b] {
                events.emit(BattleEvent::FieldEffectCancelled {
                    id: effect.id,
                    name: effect.name,
                });
            }
            return None;
        }

        let id = self.allocate_id();
        let mut owners = ArrayVec::new();
        for owner in a.owners.iter().chain(b.owners.iter()) {
            if !owners.contains(owner) && !owners.is_full() {
                owners.push(*owner);
            }
        }
        let source = b.owners.first().copied().unwrap_or_default();

        debug!(first = %a.id, second = %b.id, combined = %id, name = %combined.name, "dance effects combined");
        events.emit(BattleEvent::FieldEffectsCombined {
            first: a.id,
            second: b.id,
            combined: id,
            name: combined.name.clone(),
        });

        self.active.push(ActiveFieldEffect {
            id,
            name: combined.name.clone(),
            dance: None,
            owners,
            caster_side: b.caster_side,
            effects: combined.effects.clone(),
            remaining: combined.duration,
            combined: true,
        });

        let cast = Cast {
            id,
            source,
            caster_side: b.caster_side,
            duration: combined.duration,
        };
        expand(state, &combined.effects, cast, events);
        Some(id)
    }

    fn find_pair(&self) -> Option<(usize, usize, crate::effect::CombinedFieldEffect)> {
        for second in 0..self.active.len() {
            let Some(tag_b) = self.active[second].dance else {
                continue;
            };
            for first in 0..second {
                let Some(tag_a) = self.active[first].dance else {
                    continue;
                };
                if tag_a == tag_b {
                    continue;
                }
                if let Some(combined) = self.registry.get(tag_a, tag_b) {
                    return Some((first, second, combined.clone()));
                }
            }
        }
        None
    }

    fn cancel_where<F>(&mut self, state: &mut BattleState, events: &mut dyn EventSink, mut doomed: F)
    where
        F: FnMut(&ActiveFieldEffect, &BattleState) -> bool,
    {
        let mut index = 0;
        while index < self.active.len() {
            let effect = &self.active[index];
            if effect.ends_with_owner() && doomed(effect, state) {
                let effect = self.active.remove(index);
                retract(state, effect.id);
                debug!(id = %effect.id, name = %effect.name, "field effect cancelled");
                events.emit(BattleEvent::FieldEffectCancelled {
                    id: effect.id,
                    name: effect.name,
                });
            } else {
                index += 1;
            }
        }
    }

    /// Round-end processing; see the module docs for the order.
    pub fn on_round_end(&mut self, state: &mut BattleState, events: &mut dyn EventSink) {
        self.cancel_where(state, events, |effect, state| {
            effect.owners.iter().any(|owner| !state.is_alive(*owner))
        });

        fire_restorations(state, events);

        for side in Side::BOTH {
            for fighter in &mut state.team_mut(side).fighters {
                if !fighter.is_alive() {
                    fighter.statuses.clear();
                    continue;
                }
                for status in fighter.statuses.tick() {
                    events.emit(BattleEvent::StatusExpired {
                        fighter: fighter.id,
                        status: status.kind,
                    });
                }
            }
        }

        for side in Side::BOTH {
            for status in state.team_mut(side).statuses.tick() {
                events.emit(BattleEvent::TeamStatusExpired {
                    side,
                    status: status.kind,
                });
            }
        }

        let mut index = 0;
        while index < self.active.len() {
            match self.active[index].tick() {
                Tick::Active => index += 1,
                Tick::Expired => {
                    let effect = self.active.remove(index);
                    debug!(id = %effect.id, name = %effect.name, "field effect expired");
                    events.emit(BattleEvent::FieldEffectExpired {
                        id: effect.id,
                        name: effect.name,
                    });
                }
            }
        }
    }
}

fn fire_restorations(state: &mut BattleState, events: &mut dyn EventSink) {
    let mut pending: Vec<(FighterId, Resource, u32)> = Vec::new();
    for side in Side::BOTH {
        let team = state.team(side);
        for fighter in team.alive() {
            let view = Effective::new(fighter, team);
            for status in view.statuses() {
                if let StatusKind::Restoration { resource, percent } = status.kind {
                    pending.push((fighter.id, resource, percent));
                }
            }
        }
    }
    for (fighter, resource, percent) in pending {
        apply::restore_percent(state, fighter, resource, percent, events);
    }
}
