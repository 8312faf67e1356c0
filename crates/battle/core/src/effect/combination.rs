//! Dance-combination registry.
//!
//! Pairs are unordered: registering `(Fire, Wind)` also matches
//! `(Wind, Fire)`. Looking up an unregistered pair is a no-op, never an
//! error.

use super::{DanceEffectType, EffectScope, FieldEffect, FieldEffectKind, StatusKind};
use crate::element::Element;
use crate::effect::MagicScope;
use crate::state::Resource;
use crate::stats::{Multiplier, StatKind};

/// Effect that replaces two combined dances.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedFieldEffect {
    pub name: String,
    pub description: String,
    pub effects: Vec<FieldEffect>,
    /// Duration of the combined effect; `None` = until an owner dies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
}

/// Unordered pair of dance tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DancePair(DanceEffectType, DanceEffectType);

impl DancePair {
    pub fn new(a: DanceEffectType, b: DanceEffectType) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn tags(&self) -> (DanceEffectType, DanceEffectType) {
        (self.0, self.1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinationRegistry {
    entries: Vec<(DancePair, CombinedFieldEffect)>,
}

impl CombinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the combination for an unordered pair.
    pub fn register(&mut self, a: DanceEffectType, b: DanceEffectType, combined: CombinedFieldEffect) {
        let pair = DancePair::new(a, b);
        match self.entries.iter_mut().find(|(p, _)| *p == pair) {
            Some((_, existing)) => *existing = combined,
            None => self.entries.push((pair, combined)),
        }
    }

    #[must_use]
    pub fn with(mut self, a: DanceEffectType, b: DanceEffectType, combined: CombinedFieldEffect) -> Self {
        self.register(a, b, combined);
        self
    }

    pub fn get(&self, a: DanceEffectType, b: DanceEffectType) -> Option<&CombinedFieldEffect> {
        let pair = DancePair::new(a, b);
        self.entries.iter().find(|(p, _)| *p == pair).map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DancePair, &CombinedFieldEffect)> {
        self.entries.iter().map(|(p, c)| (p, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Built-in combinations.
    pub fn standard() -> Self {
        use DanceEffectType::*;

        Self::new()
            .with(
                Fire,
                Wind,
                CombinedFieldEffect {
                    name: "Firestorm".into(),
                    description: "Fire and wind whirl into a burning storm.".into(),
                    effects: vec![FieldEffect::new(
                        FieldEffectKind::Damage { amount: 10 },
                        EffectScope::EnemyTeam,
                    )],
                    duration: Some(0),
                },
            )
            .with(
                Water,
                Earth,
                CombinedFieldEffect {
                    name: "Mudslide".into(),
                    description: "The ground turns to mud under the enemy.".into(),
                    effects: vec![FieldEffect::new(
                        FieldEffectKind::Status(StatusKind::StatMultiplier {
                            stat: StatKind::Speed,
                            multiplier: Multiplier::HALF,
                        }),
                        EffectScope::EnemyTeam,
                    )],
                    duration: Some(2),
                },
            )
            .with(
                Heart,
                Soul,
                CombinedFieldEffect {
                    name: "Kindred Spirits".into(),
                    description: "Hearts and souls mend together.".into(),
                    effects: vec![
                        FieldEffect::new(
                            FieldEffectKind::Restore {
                                resource: Resource::Health,
                                percent: 25,
                            },
                            EffectScope::OwnTeam,
                        ),
                        FieldEffect::new(
                            FieldEffectKind::TeamStatus(StatusKind::Restoration {
                                resource: Resource::Mana,
                                percent: 10,
                            }),
                            EffectScope::OwnTeam,
                        ),
                    ],
                    duration: Some(3),
                },
            )
            .with(
                Mind,
                Danger,
                CombinedFieldEffect {
                    name: "Dread".into(),
                    description: "A sense of doom saps the enemy's will.".into(),
                    effects: vec![FieldEffect::new(
                        FieldEffectKind::TeamStatus(StatusKind::MagicResistanceMultiplier {
                            scope: MagicScope::All,
                            multiplier: Multiplier::HALF,
                        }),
                        EffectScope::EnemyTeam,
                    )],
                    duration: Some(2),
                },
            )
            .with(
                Fire,
                Water,
                CombinedFieldEffect {
                    name: "Scalding Mist".into(),
                    description: "Steam veils the dancers' team.".into(),
                    effects: vec![FieldEffect::new(
                        FieldEffectKind::Status(StatusKind::MagicMultiplier {
                            scope: MagicScope::Element(Element::Water),
                            multiplier: Multiplier::percent(150),
                        }),
                        EffectScope::OwnTeam,
                    )],
                    duration: Some(2),
                },
            )
    }
}
