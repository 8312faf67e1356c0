/// Result of a round, reported from the home side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    Continuing,
    /// Every away fighter is dead.
    Victory,
    /// Every home fighter is dead (including a mutual wipe).
    Defeat,
}

impl RoundOutcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Continuing)
    }
}
