//! Deterministic turn-based team battle engine.
//!
//! `battle-core` defines the canonical rules: move ordering, the move
//! execution pipeline, elemental relationships, timed statuses and field
//! effects (including dance combinations) and the round controller. It does
//! no I/O; chance comes from an injected [`ProbabilityOracle`] and every
//! observable change is reported as a [`BattleEvent`].
//!
//! All state mutation flows through [`engine::Battle::run_round`].
pub mod combat;
pub mod config;
pub mod effect;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod execute;
pub mod lifecycle;
pub mod moves;
pub mod oracle;
pub mod state;
pub mod stats;

pub use combat::{FailureReason, MoveOutcome, SkipReason};
pub use config::BattleConfig;
pub use effect::{
    ActiveFieldEffect, BattleCondition, CombinationRegistry, CombinedFieldEffect,
    DanceEffectType, EffectScope, FieldEffect, FieldEffectId, FieldEffectKind, MagicScope,
    Shield, Status, StatusKind, StatusSet,
};
pub use element::{Affinity, Element, ElementTable, Relationship, relationship};
pub use engine::{Battle, RoundOutcome};
pub use error::{BattleError, BattleFault, ErrorContext, ErrorSeverity};
pub use event::{BattleEvent, EventSink, NullSink};
pub use lifecycle::EffectManager;
pub use moves::{
    BattleMove, BattleMoveEffect, FieldMove, MoveEffectKind, MoveKind, MoveQueue, MoveTarget,
    MultiTurnPlan, QueueError, QueuedMove, TargetType, TransformTemplate,
};
pub use oracle::{PcgOracle, ProbabilityOracle, ScriptedOracle};
pub use state::{BattleState, Fighter, FighterBuilder, FighterId, Resource, ResourceMeter, Side, Team};
pub use stats::{Effective, Multiplier, MultiplierStack, StatBlock, StatKind};
