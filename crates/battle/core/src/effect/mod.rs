//! Effect primitives: statuses, shields, field effects, dance combinations
//! and the conditions that read them.
//!
//! Every effect is a plain value. Templates carried by moves are cloned on
//! attach; a live instance never shares state with the template it came
//! from.

pub mod combination;
pub mod condition;
pub mod field;
pub mod shield;
pub mod status;

pub use combination::{CombinationRegistry, CombinedFieldEffect, DancePair};
pub use condition::BattleCondition;
pub use field::{
    ActiveFieldEffect, DanceEffectType, EffectScope, FieldEffect, FieldEffectId, FieldEffectKind,
};
pub use shield::{Shield, ShieldHit};
pub use status::{MagicScope, Status, StatusKind, StatusSet, Tick};
