use strum::IntoStaticStr;

/// Why a move produced no effect. Expected gameplay outcomes, never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// Accuracy roll failed.
    Missed,
    /// The target dodged (evade roll or auto-evade).
    Evaded,
    NotEnoughMana,
    MagicSealed,
    /// The move's required condition did not hold.
    ConditionNotMet,
    /// Caster and target both reflect the spell's element.
    SpellCancelled,
    ShieldTooStrong,
    NoShield,
    /// Absorb aimed at a fighter that cannot be absorbed.
    NothingToAbsorb,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Why the round controller skipped a queued move without executing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    OwnerDead,
    NoLivingTarget,
}

/// Result of running one queued move through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// The move resolved against at least one target.
    Executed,
    Failed(FailureReason),
    Skipped(SkipReason),
}

impl MoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Self::Failed(reason) => Some(*reason),
            _ => None,
        }
    }
}
