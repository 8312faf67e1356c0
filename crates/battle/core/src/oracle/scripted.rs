//! Scripted oracle for deterministic tests.

use std::collections::VecDeque;

use super::{ProbabilityOracle, clamp_probability, pick_weighted, total_weight};

/// Oracle that replays pre-recorded answers in order.
///
/// Every probability it is asked about is recorded, so tests can assert on
/// the exact sequence of chance checks the engine performed. Once the script
/// runs out, answers fall back to the configured default, or to "certain
/// events happen" (`p >= 1`) when no default is set.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOracle {
    answers: VecDeque<bool>,
    picks: VecDeque<usize>,
    fallback: Option<bool>,
    requests: Vec<f64>,
}

impl ScriptedOracle {
    /// Creates an oracle answering `event_occurs` with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates an oracle that always gives the same answer.
    pub fn always(answer: bool) -> Self {
        Self {
            fallback: Some(answer),
            ..Self::default()
        }
    }

    /// Queues indices returned by `which_event_occurs`.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Sets the answer used once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, answer: bool) -> Self {
        self.fallback = Some(answer);
        self
    }

    /// Appends more answers to the script.
    pub fn push(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// Probabilities requested so far, in call order.
    pub fn requests(&self) -> &[f64] {
        &self.requests
    }

    /// Number of scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ProbabilityOracle for ScriptedOracle {
    fn event_occurs(&mut self, probability: f64) -> bool {
        let probability = clamp_probability(probability);
        self.requests.push(probability);
        self.answers
            .pop_front()
            .or(self.fallback)
            .unwrap_or(probability >= 1.0)
    }

    fn which_event_occurs(&mut self, weights: &[u32]) -> Option<usize> {
        let total = total_weight(weights)?;
        match self.picks.pop_front() {
            Some(index) if index < weights.len() && weights[index] > 0 => Some(index),
            _ => pick_weighted(weights, total - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_answers_then_falls_back() {
        let mut oracle = ScriptedOracle::new([true, false]);

        assert!(oracle.event_occurs(0.3));
        assert!(!oracle.event_occurs(0.9));
        assert!(oracle.event_occurs(1.0));
        assert!(!oracle.event_occurs(0.99));
        assert_eq!(oracle.requests(), &[0.3, 0.9, 1.0, 0.99]);
    }

    #[test]
    fn invalid_picks_fall_back_to_last_positive_weight() {
        let mut oracle = ScriptedOracle::always(false).with_picks([1, 7]);

        assert_eq!(oracle.which_event_occurs(&[2, 5, 0]), Some(1));
        assert_eq!(oracle.which_event_occurs(&[2, 5, 0]), Some(1));
        assert_eq!(oracle.which_event_occurs(&[0, 0, 0]), None);
    }
}
