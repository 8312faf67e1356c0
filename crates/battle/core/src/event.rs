//! Domain events and the sinks that receive them.
//!
//! The pipeline, lifecycle manager and round controller push events into an
//! [`EventSink`] in exactly the order things happen; tests and renderers rely
//! on that order.

use crate::combat::{FailureReason, SkipReason};
use crate::effect::{FieldEffectId, StatusKind};
use crate::engine::RoundOutcome;
use crate::moves::MoveTarget;
use crate::state::{FighterId, Resource, Side};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    // ========================================================================
    // Round
    // ========================================================================
    RoundStarted {
        round: u32,
    },
    RoundFinished {
        round: u32,
        outcome: RoundOutcome,
    },

    // ========================================================================
    // Moves
    // ========================================================================
    MoveUsed {
        owner: FighterId,
        move_name: String,
        target: MoveTarget,
    },
    MoveSkipped {
        owner: FighterId,
        move_name: String,
        reason: SkipReason,
    },
    /// A move was rejected as an expected gameplay outcome.
    MoveFailed {
        owner: FighterId,
        move_name: String,
        reason: FailureReason,
    },

    // ========================================================================
    // Combat
    // ========================================================================
    Missed {
        attacker: FighterId,
        target: FighterId,
    },
    Evaded {
        attacker: FighterId,
        target: FighterId,
    },
    CriticalHit {
        attacker: FighterId,
        target: FighterId,
    },
    /// Emitted for every landed hit, including hits that deal 0.
    DamageTaken {
        fighter: FighterId,
        amount: u32,
        source: Option<FighterId>,
    },
    Healed {
        fighter: FighterId,
        resource: Resource,
        amount: u32,
    },
    ManaLost {
        fighter: FighterId,
        amount: u32,
    },
    SpellSuccessful {
        caster: FighterId,
        spell: String,
    },
    SpellReflected {
        caster: FighterId,
        reflector: FighterId,
        spell: String,
    },
    SpellCancelled {
        caster: FighterId,
        target: FighterId,
        spell: String,
    },
    ShieldGranted {
        fighter: FighterId,
        shield: String,
    },
    ShieldAbsorbed {
        fighter: FighterId,
        amount: u32,
    },
    ShieldDestroyed {
        fighter: FighterId,
        shield: String,
    },
    ShieldBusted {
        fighter: FighterId,
        shield: String,
    },
    Killed {
        fighter: FighterId,
        killer: Option<FighterId>,
    },
    ShadeAbsorbed {
        absorber: FighterId,
        shade: FighterId,
    },
    FighterTransformed {
        fighter: FighterId,
        into: String,
    },

    // ========================================================================
    // Effects
    // ========================================================================
    StatusApplied {
        fighter: FighterId,
        status: StatusKind,
    },
    StatusExpired {
        fighter: FighterId,
        status: StatusKind,
    },
    TeamStatusApplied {
        side: Side,
        status: StatusKind,
    },
    TeamStatusExpired {
        side: Side,
        status: StatusKind,
    },
    FieldEffectAdded {
        id: FieldEffectId,
        name: String,
        owner: FighterId,
    },
    /// Re-cast by the same owner: duration reset instead of a duplicate.
    FieldEffectRenewed {
        id: FieldEffectId,
        name: String,
    },
    FieldEffectExpired {
        id: FieldEffectId,
        name: String,
    },
    FieldEffectCancelled {
        id: FieldEffectId,
        name: String,
    },
    FieldEffectsCombined {
        first: FieldEffectId,
        second: FieldEffectId,
        combined: FieldEffectId,
        name: String,
    },
}

impl BattleEvent {
    /// Short variant name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RoundStarted { .. } => "round_started",
            Self::RoundFinished { .. } => "round_finished",
            Self::MoveUsed { .. } => "move_used",
            Self::MoveSkipped { .. } => "move_skipped",
            Self::MoveFailed { .. } => "move_failed",
            Self::Missed { .. } => "missed",
            Self::Evaded { .. } => "evaded",
            Self::CriticalHit { .. } => "critical_hit",
            Self::DamageTaken { .. } => "damage_taken",
            Self::Healed { .. } => "healed",
            Self::ManaLost { .. } => "mana_lost",
            Self::SpellSuccessful { .. } => "spell_successful",
            Self::SpellReflected { .. } => "spell_reflected",
            Self::SpellCancelled { .. } => "spell_cancelled",
            Self::ShieldGranted { .. } => "shield_granted",
            Self::ShieldAbsorbed { .. } => "shield_absorbed",
            Self::ShieldDestroyed { .. } => "shield_destroyed",
            Self::ShieldBusted { .. } => "shield_busted",
            Self::Killed { .. } => "killed",
            Self::ShadeAbsorbed { .. } => "shade_absorbed",
            Self::FighterTransformed { .. } => "fighter_transformed",
            Self::StatusApplied { .. } => "status_applied",
            Self::StatusExpired { .. } => "status_expired",
            Self::TeamStatusApplied { .. } => "team_status_applied",
            Self::TeamStatusExpired { .. } => "team_status_expired",
            Self::FieldEffectAdded { .. } => "field_effect_added",
            Self::FieldEffectRenewed { .. } => "field_effect_renewed",
            Self::FieldEffectExpired { .. } => "field_effect_expired",
            Self::FieldEffectCancelled { .. } => "field_effect_cancelled",
            Self::FieldEffectsCombined { .. } => "field_effects_combined",
        }
    }
}

/// Receiver of domain events.
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

impl EventSink for Vec<BattleEvent> {
    fn emit(&mut self, event: BattleEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: BattleEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: BattleEvent) {
        (**self).emit(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: BattleEvent) {}
}
