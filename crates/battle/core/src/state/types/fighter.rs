//! Fighter state.
//!
//! The engine owns fighters by value inside their [`Team`](super::Team) and
//! refers to them by [`FighterId`] everywhere else (targets, effect owners,
//! events), so identity never depends on structural equality.

use super::{FighterId, Resource, ResourceMeter};
use crate::effect::{Shield, StatusSet};
use crate::element::{Affinity, Element, ElementTable};
use crate::stats::StatBlock;

/// Complete fighter state.
///
/// # Invariants
///
/// - `health.current == 0` ⇔ the fighter is dead
/// - `shield` is an owned copy, never shared with the move that granted it
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub stats: StatBlock,

    /// The fighter's own element, used by the relationship chart.
    pub element: Option<Element>,
    /// Flat bonus added to spell power when casting each element.
    pub element_strength: ElementTable<i32>,
    /// Flat bonus added to magic resistance against each element.
    pub element_resistance: ElementTable<i32>,
    /// Stated weak / resistant / immune stance per element.
    pub affinities: ElementTable<Affinity>,

    /// Names of the spells this fighter has learned.
    pub spells: Vec<String>,
    pub statuses: StatusSet,
    pub shield: Option<Shield>,
}

impl Fighter {
    pub fn builder(id: FighterId, name: impl Into<String>) -> FighterBuilder {
        FighterBuilder::new(id, name)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    pub fn knows_spell(&self, spell: &str) -> bool {
        self.spells.iter().any(|known| known == spell)
    }

    pub fn meter(&self, resource: Resource) -> &ResourceMeter {
        match resource {
            Resource::Health => &self.health,
            Resource::Mana => &self.mana,
        }
    }

    pub fn meter_mut(&mut self, resource: Resource) -> &mut ResourceMeter {
        match resource {
            Resource::Health => &mut self.health,
            Resource::Mana => &mut self.mana,
        }
    }

    /// Removes health, clamping at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health.deplete(amount)
    }

    /// Restores `floor(max × percent / 100)` of a resource, clamped at max.
    pub fn restore_percent(&mut self, resource: Resource, percent: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let meter = self.meter_mut(resource);
        let amount = meter.percent_of_max(percent);
        meter.restore(amount)
    }

    /// Installs a copy of `shield`, replacing any current one.
    pub fn equip_shield(&mut self, shield: Shield) -> Option<Shield> {
        self.shield.replace(shield)
    }
}

/// Builder for constructing fighters with sensible defaults.
#[derive(Clone, Debug)]
pub struct FighterBuilder {
    fighter: Fighter,
}

impl FighterBuilder {
    pub const DEFAULT_HEALTH: u32 = 10;

    pub fn new(id: FighterId, name: impl Into<String>) -> Self {
        Self {
            fighter: Fighter {
                id,
                name: name.into(),
                health: ResourceMeter::full(Self::DEFAULT_HEALTH),
                mana: ResourceMeter::default(),
                stats: StatBlock::default(),
                element: None,
                element_strength: ElementTable::default(),
                element_resistance: ElementTable::default(),
                affinities: ElementTable::default(),
                spells: Vec::new(),
                statuses: StatusSet::new(),
                shield: None,
            },
        }
    }

    /// Sets maximum health and fills it.
    pub fn health(mut self, maximum: u32) -> Self {
        self.fighter.health = ResourceMeter::full(maximum);
        self
    }

    /// Sets maximum mana and fills it.
    pub fn mana(mut self, maximum: u32) -> Self {
        self.fighter.mana = ResourceMeter::full(maximum);
        self
    }

    pub fn stats(mut self, stats: StatBlock) -> Self {
        self.fighter.stats = stats;
        self
    }

    pub fn strength(mut self, value: i32) -> Self {
        self.fighter.stats.strength = value;
        self
    }

    pub fn defense(mut self, value: i32) -> Self {
        self.fighter.stats.defense = value;
        self
    }

    pub fn magic_strength(mut self, value: i32) -> Self {
        self.fighter.stats.magic_strength = value;
        self
    }

    pub fn magic_resistance(mut self, value: i32) -> Self {
        self.fighter.stats.magic_resistance = value;
        self
    }

    pub fn speed(mut self, value: i32) -> Self {
        self.fighter.stats.speed = value;
        self
    }

    pub fn evade(mut self, value: i32) -> Self {
        self.fighter.stats.evade = value;
        self
    }

    pub fn luck(mut self, value: i32) -> Self {
        self.fighter.stats.luck = value;
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.fighter.element = Some(element);
        self
    }

    pub fn element_strength(mut self, element: Element, bonus: i32) -> Self {
        self.fighter.element_strength.set(element, bonus);
        self
    }

    pub fn element_resistance(mut self, element: Element, bonus: i32) -> Self {
        self.fighter.element_resistance.set(element, bonus);
        self
    }

    pub fn affinity(mut self, element: Element, affinity: Affinity) -> Self {
        self.fighter.affinities.set(element, affinity);
        self
    }

    pub fn spell(mut self, name: impl Into<String>) -> Self {
        self.fighter.spells.push(name.into());
        self
    }

    pub fn shield(mut self, shield: Shield) -> Self {
        self.fighter.shield = Some(shield);
        self
    }

    /// Builds the fighter.
    pub fn build(self) -> Fighter {
        self.fighter
    }
}
