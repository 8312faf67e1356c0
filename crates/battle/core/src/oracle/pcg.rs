//! Seeded PCG oracle.

use super::{ProbabilityOracle, clamp_probability, pick_weighted, total_weight};

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64-bit state, 32-bit output. The same seed
/// always produces the same sequence of answers, which is what replays and
/// deterministic tests rely on.
///
/// Every query advances the generator exactly once, even when the answer is
/// certain (`p <= 0` or `p >= 1`), so the number of draws depends only on the
/// number of queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgOracle {
    state: u64,
}

impl PcgOracle {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates an oracle from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Draws the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let output = Self::pcg_output(self.state);
        self.state = Self::pcg_step(self.state);
        output
    }

    /// Draws a value uniformly distributed in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

impl Default for PcgOracle {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ProbabilityOracle for PcgOracle {
    fn event_occurs(&mut self, probability: f64) -> bool {
        let roll = self.next_unit();
        roll < clamp_probability(probability)
    }

    fn which_event_occurs(&mut self, weights: &[u32]) -> Option<usize> {
        let total = total_weight(weights)?;
        let roll = (self.next_unit() * total as f64) as u64;
        pick_weighted(weights, roll.min(total - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_answers() {
        let mut a = PcgOracle::new(42);
        let mut b = PcgOracle::new(42);

        let left: Vec<bool> = (0..64).map(|_| a.event_occurs(0.5)).collect();
        let right: Vec<bool> = (0..64).map(|_| b.event_occurs(0.5)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn certain_probabilities_are_respected() {
        let mut oracle = PcgOracle::new(7);
        for _ in 0..32 {
            assert!(oracle.event_occurs(1.0));
            assert!(!oracle.event_occurs(0.0));
            assert!(oracle.event_occurs(3.5));
            assert!(!oracle.event_occurs(-1.0));
        }
    }

    #[test]
    fn weighted_choice_skips_zero_weights() {
        let mut oracle = PcgOracle::new(9);
        for _ in 0..64 {
            let picked = oracle.which_event_occurs(&[0, 3, 0, 1]).unwrap();
            assert!(picked == 1 || picked == 3);
        }
        assert_eq!(oracle.which_event_occurs(&[0, 0]), None);
        assert_eq!(oracle.which_event_occurs(&[]), None);
    }
}
