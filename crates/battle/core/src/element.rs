//! Elements, the elemental relationship chart and per-fighter affinities.
//!
//! Two independent sources change magical damage by element:
//!
//! - the fixed relationship chart between the spell's element and the
//!   defender's own element (Fire ≻ Wind ≻ Earth ≻ Water ≻ Fire), and
//! - the defender's stated [`Affinity`] toward the spell's element.
//!
//! A stated affinity overrides the chart for that element; see
//! [`elemental_multiplier`].

use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Magical elements.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Element {
    Fire = 0,
    Water = 1,
    Earth = 2,
    Wind = 3,
    Lightning = 4,
    Ice = 5,
    Light = 6,
    Dark = 7,
}

impl Element {
    /// Returns the canonical element name.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Relationship of `self` attacking into `defender`.
    pub fn relationship(self, defender: Element) -> Relationship {
        RELATIONSHIP_CHART[self as usize][defender as usize]
    }
}

impl core::fmt::Display for Element {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of looking up an attacking element against a defending one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relationship {
    /// Attacker is strong against the defender: double damage.
    Strong,
    /// Attacker is weak against the defender: half damage.
    Weak,
    /// No relationship: damage unchanged.
    #[default]
    None,
}

impl Relationship {
    /// Applies this relationship to a damage value (halving floors).
    pub fn apply(self, damage: u32) -> u32 {
        match self {
            Self::Strong => damage.saturating_mul(2),
            Self::Weak => damage / 2,
            Self::None => damage,
        }
    }
}

/// Ordered "strong against" pairs. The reverse of every pair is weak.
pub const STRONG_AGAINST: [(Element, Element); 4] = [
    (Element::Fire, Element::Wind),
    (Element::Wind, Element::Earth),
    (Element::Earth, Element::Water),
    (Element::Water, Element::Fire),
];

const fn build_chart() -> [[Relationship; Element::COUNT]; Element::COUNT] {
    let mut chart = [[Relationship::None; Element::COUNT]; Element::COUNT];
    let mut i = 0;
    while i < STRONG_AGAINST.len() {
        let (strong, weak) = STRONG_AGAINST[i];
        chart[strong as usize][weak as usize] = Relationship::Strong;
        chart[weak as usize][strong as usize] = Relationship::Weak;
        i += 1;
    }
    chart
}

/// Attacker × defender relationship chart.
pub const RELATIONSHIP_CHART: [[Relationship; Element::COUNT]; Element::COUNT] = build_chart();

/// Looks up the relationship between an attacking and a defending element.
pub fn relationship(attacker: Element, defender: Element) -> Relationship {
    attacker.relationship(defender)
}

/// A fighter's stated stance toward one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    #[default]
    Neutral,
    /// Takes double damage.
    Weak,
    /// Takes half damage.
    Resistant,
    /// Takes no damage.
    Immune,
}

/// Final elemental adjustment of a magical damage value.
///
/// Immunity always forces 0. Any other stated affinity replaces the chart
/// multiplier; a neutral affinity leaves the chart in charge.
pub fn elemental_multiplier(
    damage: u32,
    spell: Element,
    defender_element: Option<Element>,
    affinity: Affinity,
) -> u32 {
    match affinity {
        Affinity::Immune => 0,
        Affinity::Weak => damage.saturating_mul(2),
        Affinity::Resistant => damage / 2,
        Affinity::Neutral => defender_element
            .map(|defender| relationship(spell, defender))
            .unwrap_or_default()
            .apply(damage),
    }
}

/// Fixed-size table holding one value per [`Element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementTable<T> {
    values: [T; Element::COUNT],
}

impl<T: Copy> ElementTable<T> {
    /// Table with every element set to `value`.
    pub const fn filled(value: T) -> Self {
        Self {
            values: [value; Element::COUNT],
        }
    }

    pub fn get(&self, element: Element) -> T {
        self.values[element as usize]
    }

    pub fn set(&mut self, element: Element, value: T) {
        self.values[element as usize] = value;
    }

    /// Builder variant of [`ElementTable::set`].
    #[must_use]
    pub fn with(mut self, element: Element, value: T) -> Self {
        self.set(element, value);
        self
    }
}

impl<T: Copy + Default> Default for ElementTable<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn cycle_is_strong_forward_and_weak_backward() {
        for (strong, weak) in STRONG_AGAINST {
            assert_eq!(relationship(strong, weak), Relationship::Strong);
            assert_eq!(relationship(weak, strong), Relationship::Weak);
        }
        assert_eq!(relationship(Element::Fire, Element::Wind), Relationship::Strong);
        assert_eq!(relationship(Element::Wind, Element::Fire), Relationship::Weak);
    }

    #[test]
    fn unrelated_pairs_have_no_relationship() {
        assert_eq!(relationship(Element::Fire, Element::Earth), Relationship::None);
        assert_eq!(relationship(Element::Water, Element::Wind), Relationship::None);
        assert_eq!(relationship(Element::Fire, Element::Fire), Relationship::None);
        for element in Element::iter() {
            assert_eq!(relationship(Element::Light, element), Relationship::None);
            assert_eq!(relationship(element, Element::Dark), Relationship::None);
        }
    }

    #[test]
    fn stated_affinity_overrides_chart() {
        // Fire into a Wind fighter is strong, but a stated resistance wins.
        assert_eq!(
            elemental_multiplier(10, Element::Fire, Some(Element::Wind), Affinity::Neutral),
            20
        );
        assert_eq!(
            elemental_multiplier(10, Element::Fire, Some(Element::Wind), Affinity::Resistant),
            5
        );
        assert_eq!(
            elemental_multiplier(10, Element::Fire, Some(Element::Water), Affinity::Weak),
            20
        );
        assert_eq!(
            elemental_multiplier(10, Element::Fire, Some(Element::Wind), Affinity::Immune),
            0
        );
        assert_eq!(elemental_multiplier(7, Element::Fire, Some(Element::Water), Affinity::Neutral), 3);
    }
}
