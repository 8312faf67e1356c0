//! Fighter- and team-scoped timed statuses.
//!
//! A [`Status`] is a plain value: attaching one copies it into the holder's
//! [`StatusSet`], and two statuses compare equal when their kind, remaining
//! duration and origin match. Duplicates by value are allowed and apply
//! independently.
//!
//! # Duration
//!
//! `remaining: Some(n)` counts the round-end ticks still to survive. A tick on
//! `Some(0)` expires the status, so a status attached with duration 2 is
//! present after rounds 1 and 2 and gone after round 3. `None` is permanent
//! until removed explicitly.

use arrayvec::ArrayVec;
use strum::IntoStaticStr;

use super::FieldEffectId;
use crate::config::BattleConfig;
use crate::element::Element;
use crate::state::Resource;
use crate::stats::{Multiplier, StatKind};

/// Which spells a magic-related status applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MagicScope {
    All,
    Element(Element),
}

impl MagicScope {
    #[inline]
    pub fn matches(self, element: Element) -> bool {
        match self {
            Self::All => true,
            Self::Element(scoped) => scoped == element,
        }
    }
}

/// Closed set of status payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Scales one base stat.
    StatMultiplier {
        stat: StatKind,
        multiplier: Multiplier,
    },

    /// Scales the caster's spell-power term for matching spells.
    MagicMultiplier {
        scope: MagicScope,
        multiplier: Multiplier,
    },

    /// Scales the defender's resistance term against matching spells.
    MagicResistanceMultiplier {
        scope: MagicScope,
        multiplier: Multiplier,
    },

    /// Bounces matching spells back at their caster at `power × multiplier`.
    Reflect {
        scope: MagicScope,
        multiplier: Multiplier,
    },

    /// Scales the mana cost of every spell the holder casts.
    SpellCostMultiplier { multiplier: Multiplier },

    /// Scales the holder's critical-hit chance.
    CriticalChanceMultiplier { multiplier: Multiplier },

    /// Evades every physical attack without a roll, optionally striking back.
    AutoEvade { counter: bool },

    /// Replaces the accuracy of every move the holder uses.
    Blind { accuracy: u32 },

    /// The holder cannot cast spells.
    MagicSealed,

    /// Restores a percentage of a resource at every round end.
    Restoration { resource: Resource, percent: u32 },
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// A status attached to one fighter or one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub kind: StatusKind,
    /// Round-end ticks left; `None` = permanent.
    pub remaining: Option<u32>,
    /// Field effect this status was expanded from, if any.
    pub origin: Option<FieldEffectId>,
}

/// Result of ticking a status once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Active,
    Expired,
}

impl Status {
    pub fn new(kind: StatusKind, duration: Option<u32>) -> Self {
        Self {
            kind,
            remaining: duration,
            origin: None,
        }
    }

    pub fn timed(kind: StatusKind, turns: u32) -> Self {
        Self::new(kind, Some(turns))
    }

    pub fn permanent(kind: StatusKind) -> Self {
        Self::new(kind, None)
    }

    #[must_use]
    pub fn with_origin(mut self, origin: FieldEffectId) -> Self {
        self.origin = Some(origin);
        self
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.remaining.is_none()
    }

    /// Advances the status by one round end.
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

/// Bounded collection of statuses held by one fighter or team.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSet {
    statuses: ArrayVec<Status, { BattleConfig::MAX_STATUSES }>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self {
            statuses: ArrayVec::new(),
        }
    }

    /// Attaches a copy of `status`. Returns false when the set is full.
    pub fn push(&mut self, status: Status) -> bool {
        self.statuses.try_push(status).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter()
    }

    /// Status kinds currently held.
    pub fn kinds(&self) -> impl Iterator<Item = &StatusKind> {
        self.statuses.iter().map(|s| &s.kind)
    }

    pub fn contains(&self, kind: &StatusKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    /// Removes every status equal by value to `status`.
    pub fn remove(&mut self, status: &Status) -> usize {
        let before = self.statuses.len();
        self.statuses.retain(|s| *s != *status);
        before - self.statuses.len()
    }

    /// Removes every status expanded from the given field effect.
    pub fn remove_origin(&mut self, origin: FieldEffectId) -> usize {
        let before = self.statuses.len();
        self.statuses.retain(|s| s.origin != Some(origin));
        before - self.statuses.len()
    }

    /// Ticks every status, removing and returning the ones that expired in
    /// holding order.
    pub fn tick(&mut self) -> Vec<Status> {
        let mut expired = Vec::new();
        self.statuses.retain(|status| match status.tick() {
            Tick::Active => true,
            Tick::Expired => {
                expired.push(*status);
                false
            }
        });
        expired
    }
}

impl<'a> IntoIterator for &'a StatusSet {
    type Item = &'a Status;
    type IntoIter = core::slice::Iter<'a, Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blind() -> StatusKind {
        StatusKind::Blind { accuracy: 50 }
    }

    #[test]
    fn duration_two_survives_two_round_ends() {
        let mut set = StatusSet::new();
        set.push(Status::timed(blind(), 2));

        assert!(set.tick().is_empty());
        assert!(set.contains(&blind()));
        assert!(set.tick().is_empty());
        assert!(set.contains(&blind()));
        assert_eq!(set.tick().len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn permanent_statuses_never_expire() {
        let mut set = StatusSet::new();
        set.push(Status::permanent(StatusKind::MagicSealed));
        for _ in 0..10 {
            assert!(set.tick().is_empty());
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn duplicates_by_value_apply_independently() {
        let mut set = StatusSet::new();
        let status = Status::timed(blind(), 1);
        set.push(status);
        set.push(status);
        assert_eq!(set.len(), 2);
        assert_eq!(set.remove(&status), 2);
    }

    #[test]
    fn full_set_drops_new_statuses() {
        let mut set = StatusSet::new();
        for _ in 0..BattleConfig::MAX_STATUSES {
            assert!(set.push(Status::permanent(StatusKind::MagicSealed)));
        }
        assert!(!set.push(Status::permanent(blind())));
    }

    #[test]
    fn origin_removal_only_touches_expanded_statuses() {
        let mut set = StatusSet::new();
        set.push(Status::timed(blind(), 3).with_origin(FieldEffectId(4)));
        set.push(Status::timed(blind(), 3));
        assert_eq!(set.remove_origin(FieldEffectId(4)), 1);
        assert_eq!(set.len(), 1);
    }
}
