//! Move templates, queued moves and the round queue.
//!
//! A [`BattleMove`] is an immutable template. Collaborators (menus, AI)
//! resolve it into a [`QueuedMove`] by picking the owner and target, then
//! push it into the [`MoveQueue`].

pub mod multi_turn;
pub mod queue;

pub use multi_turn::MultiTurnPlan;
pub use queue::{MoveQueue, QueueError, QueuedMove};

use strum::IntoStaticStr;

use crate::effect::{BattleCondition, DanceEffectType, FieldEffect, Shield, StatusKind};
use crate::element::Element;
use crate::state::{FighterId, Resource, Side};
use crate::stats::{Multiplier, StatBlock};

/// Which fighters a move may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// The owner itself.
    Caster,
    /// A living teammate other than the owner.
    SingleAlly,
    /// A living teammate or the owner.
    SingleAllyOrSelf,
    SingleEnemy,
    /// Every living member of the owner's team.
    OwnTeam,
    /// Every living member of the opposing team.
    EnemyTeam,
    /// Every living fighter on both teams.
    Field,
}

impl TargetType {
    /// Single-target types need a fighter chosen by the collaborator.
    pub fn is_single(self) -> bool {
        matches!(
            self,
            Self::SingleAlly | Self::SingleAllyOrSelf | Self::SingleEnemy
        )
    }
}

/// Target chosen for a queued move.
///
/// Team and field targets are resolved lazily to the living members at
/// execution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveTarget {
    Fighter(FighterId),
    Team(Side),
    Field,
}

/// Stats a transforming fighter takes on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformTemplate {
    pub name: String,
    pub stats: StatBlock,
    /// New maximum health; current health is clamped to it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_health: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
}

/// Payload of a field ("dance") move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMove {
    pub effects: Vec<FieldEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dance: Option<DanceEffectType>,
    /// `None` keeps the effect until it is cancelled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    /// Moves the owner performs on the following rounds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_moves: Vec<BattleMove>,
}

/// Closed set of move behaviors.
#[derive(Clone, Debug, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Physical hit.
    Attack { power: i32 },

    /// Elemental magic; the owner must know it by name.
    Spell {
        element: Element,
        power: i32,
        cost: u32,
    },

    InflictStatus {
        status: StatusKind,
        duration: Option<u32>,
    },

    Field(FieldMove),

    /// Restores `percent` of a resource on each target.
    Restore { resource: Resource, percent: u32 },

    /// Gives every target a copy of the shield.
    GrantShield(Shield),

    /// Removes the target's shield if `power` beats its buster defense.
    ShieldBuster { power: i32 },

    /// Consecutive moves by the same owner; expanded by [`MultiTurnPlan`].
    MultiTurn { moves: Vec<BattleMove> },

    /// The owner consumes an ally, taking over its health and strength.
    Absorb,

    Transform(TransformTemplate),

    /// Does nothing.
    Wait,
}

impl MoveKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Kinds that roll accuracy (and may therefore miss).
    pub fn rolls_accuracy(&self) -> bool {
        matches!(
            self,
            Self::Attack { .. }
                | Self::Spell { .. }
                | Self::InflictStatus { .. }
                | Self::ShieldBuster { .. }
        )
    }
}

/// Effect attached to an attack or spell, guarded by an optional condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMoveEffect {
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<BattleCondition>,
    pub kind: MoveEffectKind,
}

impl BattleMoveEffect {
    pub fn always(kind: MoveEffectKind) -> Self {
        Self {
            condition: None,
            kind,
        }
    }

    pub fn when(condition: BattleCondition, kind: MoveEffectKind) -> Self {
        Self {
            condition: Some(condition),
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffectKind {
    /// Scales the damage of this hit.
    DamageMultiplier(Multiplier),
    /// Heals the owner after a landed hit.
    HealCaster { amount: u32 },
    /// Restores the owner's mana after a landed hit.
    RestoreCasterMana { amount: u32 },
    /// Inflicts a status on the hit target.
    InflictStatus {
        status: StatusKind,
        duration: Option<u32>,
    },
}

/// Immutable move template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMove {
    pub name: String,
    pub target_type: TargetType,
    /// Higher acts first; 0 by default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Hit chance in percent.
    #[cfg_attr(feature = "serde", serde(default = "BattleMove::default_accuracy"))]
    pub accuracy: u32,
    pub kind: MoveKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<BattleMoveEffect>,
    /// The move fails with `ConditionNotMet` unless this holds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires: Option<BattleCondition>,
}

impl BattleMove {
    pub const DEFAULT_ACCURACY: u32 = 100;

    pub fn new(name: impl Into<String>, target_type: TargetType, kind: MoveKind) -> Self {
        Self {
            name: name.into(),
            target_type,
            priority: 0,
            accuracy: Self::DEFAULT_ACCURACY,
            kind,
            effects: Vec::new(),
            requires: None,
        }
    }

    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    fn default_accuracy() -> u32 {
        Self::DEFAULT_ACCURACY
    }

    pub fn attack(name: impl Into<String>, power: i32) -> Self {
        Self::new(name, TargetType::SingleEnemy, MoveKind::Attack { power })
    }

    pub fn spell(name: impl Into<String>, element: Element, power: i32, cost: u32) -> Self {
        Self::new(
            name,
            TargetType::SingleEnemy,
            MoveKind::Spell {
                element,
                power,
                cost,
            },
        )
    }

    pub fn wait() -> Self {
        Self::new("Wait", TargetType::Caster, MoveKind::Wait)
    }

    #[must_use]
    pub fn with_target_type(mut self, target_type: TargetType) -> Self {
        self.target_type = target_type;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: BattleMoveEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, condition: BattleCondition) -> Self {
        self.requires = Some(condition);
        self
    }

    /// Dance tag of a field move.
    pub fn dance(&self) -> Option<DanceEffectType> {
        match &self.kind {
            MoveKind::Field(field) => field.dance,
            _ => None,
        }
    }
}
