//! Probability oracles for deterministic chance resolution.
//!
//! Every chance-based decision in a battle (accuracy, evasion, critical hits)
//! goes through a [`ProbabilityOracle`]. The engine calls the oracle in a fixed
//! order that mirrors the execution order of the sorted move queue, so a
//! deterministic oracle yields a reproducible battle.
//!
//! # Implementations
//!
//! - [`PcgOracle`]: seeded PCG generator for real battles and replays
//! - [`ScriptedOracle`]: queued answers for tests and fixtures

mod pcg;
mod scripted;

pub use pcg::PcgOracle;
pub use scripted::ScriptedOracle;

/// Source of chance outcomes injected into the engine.
pub trait ProbabilityOracle: Send {
    /// Returns whether an event with the given probability occurs.
    ///
    /// Probabilities outside `[0, 1]` are clamped.
    fn event_occurs(&mut self, probability: f64) -> bool;

    /// Picks one of several weighted options and returns its index.
    ///
    /// Returns `None` when no option carries a positive weight.
    fn which_event_occurs(&mut self, weights: &[u32]) -> Option<usize>;
}

impl<O: ProbabilityOracle + ?Sized> ProbabilityOracle for Box<O> {
    fn event_occurs(&mut self, probability: f64) -> bool {
        (**self).event_occurs(probability)
    }

    fn which_event_occurs(&mut self, weights: &[u32]) -> Option<usize> {
        (**self).which_event_occurs(weights)
    }
}

/// Clamps a probability into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

/// Maps a roll in `[0, total)` onto the weighted option it lands in.
pub(crate) fn pick_weighted(weights: &[u32], roll: u64) -> Option<usize> {
    let mut cursor = roll;
    for (index, &weight) in weights.iter().enumerate() {
        let weight = u64::from(weight);
        if cursor < weight {
            return Some(index);
        }
        cursor -= weight;
    }
    None
}

/// Sum of all weights, or `None` if nothing can be picked.
pub(crate) fn total_weight(weights: &[u32]) -> Option<u64> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    (total > 0).then_some(total)
}
