//! Effective-value queries.
//!
//! Every query reads the fighter's own statuses followed by its team's
//! statuses. Multipliers from both sources stack multiplicatively and the
//! result is floored once.

use super::{Multiplier, MultiplierStack, StatKind};
use crate::effect::{Status, StatusKind};
use crate::element::Element;
use crate::state::{BattleState, Fighter, FighterId, Team};

/// Read-only view of one fighter together with its team.
#[derive(Clone, Copy, Debug)]
pub struct Effective<'a> {
    pub fighter: &'a Fighter,
    pub team: &'a Team,
}

impl<'a> Effective<'a> {
    pub fn new(fighter: &'a Fighter, team: &'a Team) -> Self {
        Self { fighter, team }
    }

    /// Looks a fighter up in the battle state.
    pub fn of(state: &'a BattleState, id: FighterId) -> Option<Self> {
        let team = state.team(state.side_of(id)?);
        Some(Self::new(team.get(id)?, team))
    }

    /// Own statuses, then team statuses.
    pub fn statuses(&self) -> impl Iterator<Item = &'a Status> + 'a {
        self.fighter.statuses.iter().chain(self.team.statuses.iter())
    }

    fn stack<F>(&self, select: F) -> MultiplierStack
    where
        F: Fn(&StatusKind) -> Option<Multiplier>,
    {
        self.statuses().filter_map(|s| select(&s.kind)).collect()
    }

    /// Multipliers scaling one stat.
    pub fn stat_stack(&self, kind: StatKind) -> MultiplierStack {
        self.stack(|status| match *status {
            StatusKind::StatMultiplier { stat, multiplier } if stat == kind => Some(multiplier),
            _ => None,
        })
    }

    /// `floor(base × Π stat multipliers)`.
    pub fn stat(&self, kind: StatKind) -> i64 {
        self.stat_stack(kind).apply(i64::from(self.fighter.stats.get(kind)))
    }

    /// Multipliers on the caster's spell-power term for `element`.
    pub fn magic_stack(&self, element: Element) -> MultiplierStack {
        self.stack(|status| match *status {
            StatusKind::MagicMultiplier { scope, multiplier } if scope.matches(element) => {
                Some(multiplier)
            }
            _ => None,
        })
    }

    /// Multipliers on the defender's resistance term against `element`.
    pub fn resistance_stack(&self, element: Element) -> MultiplierStack {
        self.stack(|status| match *status {
            StatusKind::MagicResistanceMultiplier { scope, multiplier }
                if scope.matches(element) =>
            {
                Some(multiplier)
            }
            _ => None,
        })
    }

    /// `floor(base cost × Π spell-cost multipliers)`, never negative.
    pub fn spell_cost(&self, base: u32) -> u32 {
        let stack = self.stack(|status| match *status {
            StatusKind::SpellCostMultiplier { multiplier } => Some(multiplier),
            _ => None,
        });
        u32::try_from(stack.apply(i64::from(base)).max(0)).unwrap_or(u32::MAX)
    }

    /// Critical-hit probability: `luck × Π crit multipliers / 100`, in [0, 1].
    pub fn critical_chance(&self) -> f64 {
        let stack = self.stack(|status| match *status {
            StatusKind::CriticalChanceMultiplier { multiplier } => Some(multiplier),
            _ => None,
        });
        let luck = f64::from(self.fighter.stats.luck.max(0));
        (luck * stack.factor() / 100.0).clamp(0.0, 1.0)
    }

    /// Product of every matching reflect multiplier, or `None` without one.
    pub fn reflect(&self, element: Element) -> Option<MultiplierStack> {
        let stack = self.stack(|status| match *status {
            StatusKind::Reflect { scope, multiplier } if scope.matches(element) => {
                Some(multiplier)
            }
            _ => None,
        });
        (!stack.is_empty()).then_some(stack)
    }

    /// `Some(counter)` if any auto-evade is held; countering wins over not.
    pub fn auto_evade(&self) -> Option<bool> {
        self.statuses()
            .filter_map(|s| match s.kind {
                StatusKind::AutoEvade { counter } => Some(counter),
                _ => None,
            })
            .reduce(|a, b| a || b)
    }

    /// Lowest accuracy override from any held blind status.
    pub fn blind_accuracy(&self) -> Option<u32> {
        self.statuses()
            .filter_map(|s| match s.kind {
                StatusKind::Blind { accuracy } => Some(accuracy),
                _ => None,
            })
            .min()
    }

    pub fn is_sealed(&self) -> bool {
        self.statuses()
            .any(|s| matches!(s.kind, StatusKind::MagicSealed))
    }
}
