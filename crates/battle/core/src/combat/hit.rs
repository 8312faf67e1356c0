//! Oracle rolls made while resolving a move.
//!
//! Each helper makes at most one oracle call so the call order matches the
//! execution order exactly.

use crate::oracle::ProbabilityOracle;

/// Accuracy roll; 100 or more never asks the oracle.
pub fn roll_accuracy(oracle: &mut dyn ProbabilityOracle, accuracy: u32) -> bool {
    if accuracy >= 100 {
        return true;
    }
    oracle.event_occurs(f64::from(accuracy) / 100.0)
}

/// Evade roll against the defender's evade stat; skipped when evade ≤ 0.
pub fn roll_evade(oracle: &mut dyn ProbabilityOracle, evade: i64) -> bool {
    if evade <= 0 {
        return false;
    }
    oracle.event_occurs(evade as f64 / 100.0)
}

/// Critical roll; a zero chance never asks the oracle.
pub fn roll_critical(oracle: &mut dyn ProbabilityOracle, chance: f64) -> bool {
    if chance <= 0.0 {
        return false;
    }
    oracle.event_occurs(chance)
}
