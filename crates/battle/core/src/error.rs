//! Common error infrastructure for battle-core.
//!
//! Two tiers of failure exist in the engine:
//!
//! - **Invariant violations** (casting an unlearned spell, popping an empty
//!   queue, enqueueing a move for a fighter that is not in the battle) are
//!   programmer errors. They surface as [`BattleError`] / [`QueueError`] and
//!   abort the current round.
//! - **Expected gameplay outcomes** (miss, insufficient mana, shield too strong)
//!   are never errors. They are reported through
//!   [`MoveOutcome`](crate::combat::MoveOutcome) and a
//!   [`BattleEvent::MoveFailed`](crate::event::BattleEvent::MoveFailed) event.

use crate::state::{FighterId, Side};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may fix its input and retry the round
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with corrected input.
    ///
    /// Examples: queue drained too early, battle already finished
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown fighter, target on the wrong side
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a multi-turn move reached the pipeline unexpanded
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Fighter whose move triggered the error (if applicable).
    pub fighter: Option<FighterId>,

    /// Round in which the error occurred.
    pub round: u32,

    /// Optional static message providing additional context.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given round.
    #[must_use]
    pub const fn new(round: u32) -> Self {
        Self {
            fighter: None,
            round,
            message: None,
        }
    }

    /// Attaches a fighter to this context (builder pattern).
    #[must_use]
    pub const fn with_fighter(mut self, fighter: FighterId) -> Self {
        self.fighter = Some(fighter);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all battle-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Programmer errors raised while building or running a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    /// Caster tried to use a spell it never learned.
    #[error("fighter {fighter} does not know spell '{spell}'")]
    SpellNotKnown {
        fighter: FighterId,
        spell: String,
        context: ErrorContext,
    },

    /// Fighter id does not belong to this battle.
    #[error("fighter {0} is not part of this battle")]
    UnknownFighter(FighterId),

    /// Two fighters share the same id.
    #[error("fighter id {0} is used more than once")]
    DuplicateFighter(FighterId),

    /// The chosen target is not legal for the move's target type.
    #[error("move '{move_name}' cannot target {target:?}: {reason}")]
    InvalidTarget {
        move_name: String,
        target: crate::moves::MoveTarget,
        #[cfg_attr(feature = "serde", serde(skip))]
        reason: &'static str,
    },

    /// A multi-turn move, or a field move with sub-moves, must be expanded by
    /// the move-selection layer first.
    #[error("multi-turn move '{0}' must be expanded before it is queued")]
    UnexpandedMultiTurn(String),

    /// A fighter already has a move queued this round.
    #[error("fighter {0} already has a move queued this round")]
    AlreadyQueued(FighterId),

    /// A team was constructed empty.
    #[error("{0:?} team has no fighters")]
    EmptyTeam(Side),

    /// `run_round` was called after one side was eliminated.
    #[error("battle is already over")]
    BattleOver,

    /// The move queue was drained by something other than the round loop.
    #[error(transparent)]
    Queue(#[from] crate::moves::QueueError),
}

impl BattleError {
    /// Builds a [`BattleError::SpellNotKnown`] for the given round.
    pub fn spell_not_known(fighter: FighterId, spell: impl Into<String>, round: u32) -> Self {
        Self::SpellNotKnown {
            fighter,
            spell: spell.into(),
            context: ErrorContext::new(round)
                .with_fighter(fighter)
                .with_message("spell must be learned before it is queued"),
        }
    }
}

impl BattleFault for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            SpellNotKnown { .. } | InvalidTarget { .. } => ErrorSeverity::Validation,
            UnknownFighter(_) | DuplicateFighter(_) | EmptyTeam(_) => ErrorSeverity::Validation,
            AlreadyQueued(_) | BattleOver => ErrorSeverity::Recoverable,
            UnexpandedMultiTurn(_) => ErrorSeverity::Internal,
            Queue(e) => e.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::SpellNotKnown { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            SpellNotKnown { .. } => "BATTLE_SPELL_NOT_KNOWN",
            UnknownFighter(_) => "BATTLE_UNKNOWN_FIGHTER",
            DuplicateFighter(_) => "BATTLE_DUPLICATE_FIGHTER",
            InvalidTarget { .. } => "BATTLE_INVALID_TARGET",
            UnexpandedMultiTurn(_) => "BATTLE_UNEXPANDED_MULTI_TURN",
            AlreadyQueued(_) => "BATTLE_ALREADY_QUEUED",
            EmptyTeam(_) => "BATTLE_EMPTY_TEAM",
            BattleOver => "BATTLE_OVER",
            Queue(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_not_known_carries_context() {
        let err = BattleError::spell_not_known(FighterId(3), "fireball", 7);

        let context = err.context().expect("context attached");
        assert_eq!(context.fighter, Some(FighterId(3)));
        assert_eq!(context.round, 7);
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "BATTLE_SPELL_NOT_KNOWN");
        assert_eq!(err.to_string(), "fighter #3 does not know spell 'fireball'");
    }

    #[test]
    fn queue_errors_keep_their_code() {
        let err = BattleError::from(crate::moves::QueueError::QueueEmpty);
        assert_eq!(err.error_code(), "QUEUE_EMPTY");
        assert!(err.severity().is_internal());
    }
}
