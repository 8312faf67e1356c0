//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the battle and executes commands one at a
//! time.

mod simulation;

pub use simulation::{Command, SimulationWorker};
