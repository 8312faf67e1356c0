//! Stat system: base stat blocks, multipliers and effective values.
//!
//! Base stats live on the fighter. Statuses scale them multiplicatively,
//! and every consumer asks for the *effective* value: the base stat times
//! the product of every matching multiplier held by the fighter **and** its
//! team, floored once at the end.
//!
//! # Modules
//!
//! - [`multiplier`]: percentage multipliers and the exact product stack
//! - [`effective`]: effective-value queries over a fighter and its team

pub mod effective;
pub mod multiplier;

pub use effective::Effective;
pub use multiplier::{Multiplier, MultiplierStack};

use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Scalar stats a status may scale.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Strength,
    Defense,
    MagicStrength,
    MagicResistance,
    Speed,
    Evade,
    Luck,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Base combat stats of a fighter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub strength: i32,
    pub defense: i32,
    pub magic_strength: i32,
    pub magic_resistance: i32,
    pub speed: i32,
    /// Chance (percent) to dodge a physical attack that would otherwise hit.
    pub evade: i32,
    /// Base critical-hit chance (percent).
    pub luck: i32,
}

impl StatBlock {
    /// Returns the base value of one stat.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Defense => self.defense,
            StatKind::MagicStrength => self.magic_strength,
            StatKind::MagicResistance => self.magic_resistance,
            StatKind::Speed => self.speed,
            StatKind::Evade => self.evade,
            StatKind::Luck => self.luck,
        }
    }

    /// Overwrites the base value of one stat.
    pub fn set(&mut self, kind: StatKind, value: i32) {
        let slot = match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Defense => &mut self.defense,
            StatKind::MagicStrength => &mut self.magic_strength,
            StatKind::MagicResistance => &mut self.magic_resistance,
            StatKind::Speed => &mut self.speed,
            StatKind::Evade => &mut self.evade,
            StatKind::Luck => &mut self.luck,
        };
        *slot = value;
    }
}
