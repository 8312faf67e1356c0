//! Combat math and the state changes it produces.
//!
//! - [`damage`]: physical and magical formulas
//! - [`hit`]: accuracy, evade and critical rolls
//! - [`apply`]: damage delivery, healing, statuses and shields
//! - [`result`]: per-move outcomes and failure reasons

pub mod apply;
pub mod damage;
pub mod hit;
pub mod result;

pub use apply::DamageReport;
pub use damage::{MagicInputs, magical_damage, physical_damage, scale_damage};
pub use result::{FailureReason, MoveOutcome, SkipReason};
