//! Team- and field-scoped timed effects.
//!
//! A field move carries a list of [`FieldEffect`] templates. Casting it
//! registers one [`ActiveFieldEffect`] with the lifecycle manager and expands
//! the templates once:
//!
//! - `Status` becomes one [`Status`](super::Status) per alive member of each
//!   scoped team, tagged with the effect's id,
//! - `TeamStatus` becomes one status on each scoped team,
//! - `Restore`, `GrantShield` and `Damage` fire immediately and never again.

use std::fmt;

use arrayvec::ArrayVec;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use super::{Shield, StatusKind, Tick};
use crate::config::BattleConfig;
use crate::state::{FighterId, Resource, Side};

/// Identifier of one cast of a field effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldEffectId(pub u32);

impl fmt::Display for FieldEffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx{}", self.0)
    }
}

/// Teams a field effect reaches, relative to whoever cast it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectScope {
    /// Both teams.
    Field,
    OwnTeam,
    EnemyTeam,
}

impl EffectScope {
    /// Resolves the scope into concrete sides, home first.
    pub fn sides(self, caster: Side) -> ArrayVec<Side, 2> {
        let mut sides = ArrayVec::new();
        match self {
            Self::Field => sides.extend(Side::BOTH),
            Self::OwnTeam => sides.push(caster),
            Self::EnemyTeam => sides.push(caster.opposite()),
        }
        sides
    }
}

/// Payload of one field effect template.
#[derive(Clone, Debug, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldEffectKind {
    /// Expanded into a status on every alive member of the scope.
    Status(StatusKind),
    /// Attached once to each scoped team.
    TeamStatus(StatusKind),
    /// Immediate: restore `percent` of a resource for every alive member.
    Restore { resource: Resource, percent: u32 },
    /// Immediate: every alive member receives a copy of the shield.
    GrantShield(Shield),
    /// Immediate: flat damage to every alive member, bypassing defenses.
    Damage { amount: u32 },
}

impl FieldEffectKind {
    /// Immediate kinds fire once at cast and are not re-applied later.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            Self::Restore { .. } | Self::GrantShield(_) | Self::Damage { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// One field effect template carried by a move or a combination.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEffect {
    pub kind: FieldEffectKind,
    pub scope: EffectScope,
}

impl FieldEffect {
    pub fn new(kind: FieldEffectKind, scope: EffectScope) -> Self {
        Self { kind, scope }
    }

    pub fn is_immediate(&self) -> bool {
        self.kind.is_immediate()
    }
}

/// Tag carried by dance moves; two active dances may combine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumCount,
    EnumIter,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DanceEffectType {
    Fire,
    Water,
    Earth,
    Wind,
    Heart,
    Soul,
    Mind,
    Danger,
}

impl DanceEffectType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for DanceEffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field effect currently registered with the lifecycle manager.
///
/// # State machine
///
/// `Active(n) → Active(n-1) → … → Active(0) → Expired`, with
/// `Active(_) → Cancelled` on owner death and `Active(_) → Combined` when it
/// merges with another dance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveFieldEffect {
    pub id: FieldEffectId,
    /// Move (or combination) name.
    pub name: String,
    pub dance: Option<DanceEffectType>,
    /// Fighters whose death cancels this effect.
    pub owners: ArrayVec<FighterId, { BattleConfig::MAX_EFFECT_OWNERS }>,
    pub caster_side: Side,
    pub effects: Vec<FieldEffect>,
    pub remaining: Option<u32>,
    /// Produced by a dance combination.
    pub combined: bool,
}

impl ActiveFieldEffect {
    pub fn is_owned_by(&self, fighter: FighterId) -> bool {
        self.owners.contains(&fighter)
    }

    /// Dance effects and combinations end when an owner dies.
    pub fn ends_with_owner(&self) -> bool {
        self.dance.is_some() || self.combined
    }

    /// Advances the effect by one round end.
    pub fn tick(&mut self) -> Tick {
        match self.remaining.as_mut() {
            None => Tick::Active,
            Some(0) => Tick::Expired,
            Some(n) => {
                *n -= 1;
                Tick::Active
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_resolve_relative_to_caster() {
        assert_eq!(EffectScope::OwnTeam.sides(Side::Away).as_slice(), &[Side::Away]);
        assert_eq!(EffectScope::EnemyTeam.sides(Side::Away).as_slice(), &[Side::Home]);
        assert_eq!(
            EffectScope::Field.sides(Side::Away).as_slice(),
            &[Side::Home, Side::Away]
        );
    }

    #[test]
    fn immediate_kinds() {
        assert!(FieldEffectKind::Damage { amount: 1 }.is_immediate());
        assert!(
            FieldEffectKind::Restore {
                resource: Resource::Health,
                percent: 10
            }
            .is_immediate()
        );
        assert!(!FieldEffectKind::Status(StatusKind::MagicSealed).is_immediate());
        assert!(!FieldEffectKind::TeamStatus(StatusKind::MagicSealed).is_immediate());
    }
}
