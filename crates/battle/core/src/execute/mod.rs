//! Move execution.
//!
//! - **Context**: [`ExecutionContext`] bundles state, effects, oracle and
//!   event sink for one move
//! - **Targets**: validation and lazy resolution of move targets
//! - **Validation**: legality checks and spell payment
//! - **Pipeline**: per-kind resolution in a fixed, deterministic order

mod context;
mod pipeline;
mod targets;
mod validation;

pub use context::ExecutionContext;
pub use pipeline::execute_move;
pub use targets::{resolve_targets, validate_target};
