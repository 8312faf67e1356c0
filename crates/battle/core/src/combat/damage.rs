//! Damage formulas.
//!
//! Pure functions over already-effective stat values. Negative intermediate
//! results clamp to zero at the point of computation.

use crate::element::{Affinity, Element, elemental_multiplier};
use crate::stats::MultiplierStack;

/// Physical damage.
///
/// # Formula
/// ```text
/// damage = max(0, power + floor(strength) − floor(defense)) × (crit ? critical_multiplier : 1)
/// ```
pub fn physical_damage(
    power: i32,
    strength: i64,
    defense: i64,
    critical: bool,
    critical_multiplier: u32,
) -> u32 {
    let base = (i64::from(power) + strength - defense).max(0);
    let scaled = if critical {
        base.saturating_mul(i64::from(critical_multiplier))
    } else {
        base
    };
    clamp_u32(scaled)
}

/// Inputs to the magical damage formula.
#[derive(Clone, Debug)]
pub struct MagicInputs {
    pub element: Element,
    pub power: i32,
    /// Caster's effective magic strength.
    pub magic_strength: i64,
    /// Caster's flat bonus for `element`.
    pub element_bonus: i32,
    /// Caster's magic multiplier statuses matching `element`.
    pub magic_multipliers: MultiplierStack,
    /// Defender's effective magic resistance.
    pub magic_resistance: i64,
    /// Defender's flat resistance bonus against `element`.
    pub element_resistance: i32,
    /// Defender's resistance multiplier statuses matching `element`.
    pub resistance_multipliers: MultiplierStack,
    pub defender_element: Option<Element>,
    pub defender_affinity: Affinity,
}

/// Magical damage.
///
/// # Formula
/// ```text
/// attack  = floor((power + magic_strength + element_bonus) × Π magic multipliers)
/// defense = floor((magic_resistance + element_resistance) × Π resistance multipliers)
/// damage  = elemental(max(0, attack − defense))
/// ```
///
/// `elemental` applies the relationship chart, or the defender's stated
/// affinity when it has one.
pub fn magical_damage(inputs: &MagicInputs) -> u32 {
    let attack = inputs.magic_multipliers.apply(
        i64::from(inputs.power) + inputs.magic_strength + i64::from(inputs.element_bonus),
    );
    let defense = inputs
        .resistance_multipliers
        .apply(inputs.magic_resistance + i64::from(inputs.element_resistance));
    let raw = clamp_u32((attack - defense).max(0));

    elemental_multiplier(
        raw,
        inputs.element,
        inputs.defender_element,
        inputs.defender_affinity,
    )
}

/// Scales a damage value by conditional damage multipliers.
pub fn scale_damage(damage: u32, multipliers: &MultiplierStack) -> u32 {
    clamp_u32(multipliers.apply(i64::from(damage)).max(0))
}

pub(crate) fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
