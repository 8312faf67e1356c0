//! Conditions guarding conditional move effects.

use super::{ActiveFieldEffect, DanceEffectType};

/// Predicate over the live field-effect set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleCondition {
    /// A dance effect with this tag is currently active.
    DanceActive(DanceEffectType),

    /// Negation.
    Not(Box<BattleCondition>),

    /// Every condition holds (true when empty).
    All(Vec<BattleCondition>),

    /// At least one condition holds (false when empty).
    Any(Vec<BattleCondition>),
}

impl BattleCondition {
    pub fn dance_active(tag: DanceEffectType) -> Self {
        Self::DanceActive(tag)
    }

    /// Evaluates the condition. Pure: never mutates, never fails.
    pub fn evaluate(&self, active: &[ActiveFieldEffect]) -> bool {
        match self {
            Self::DanceActive(tag) => active.iter().any(|effect| effect.dance == Some(*tag)),
            Self::Not(inner) => !inner.evaluate(active),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(active)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(active)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::FieldEffectId;
    use crate::state::{FighterId, Side};

    fn dance(tag: DanceEffectType) -> ActiveFieldEffect {
        let mut owners = arrayvec::ArrayVec::new();
        owners.push(FighterId(1));
        ActiveFieldEffect {
            id: FieldEffectId(1),
            name: "dance".into(),
            dance: Some(tag),
            owners,
            caster_side: Side::Home,
            effects: Vec::new(),
            remaining: Some(2),
            combined: false,
        }
    }

    #[test]
    fn dance_active_reads_live_set() {
        let active = vec![dance(DanceEffectType::Fire)];
        assert!(BattleCondition::dance_active(DanceEffectType::Fire).evaluate(&active));
        assert!(!BattleCondition::dance_active(DanceEffectType::Danger).evaluate(&active));
        assert!(!BattleCondition::dance_active(DanceEffectType::Fire).evaluate(&[]));
    }

    #[test]
    fn combinators() {
        use BattleCondition::*;
        let active = vec![dance(DanceEffectType::Fire)];
        let fire = DanceActive(DanceEffectType::Fire);
        let water = DanceActive(DanceEffectType::Water);

        assert!(Not(Box::new(water.clone())).evaluate(&active));
        assert!(!All(vec![fire.clone(), water.clone()]).evaluate(&active));
        assert!(Any(vec![fire, water]).evaluate(&active));
        assert!(All(vec![]).evaluate(&active));
        assert!(!Any(vec![]).evaluate(&active));
    }
}
