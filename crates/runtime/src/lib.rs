//! Runtime orchestration for the battle engine.
//!
//! This crate wires together the move provider abstraction, the probability
//! oracle and a simulation worker task into a cohesive runtime API.
//! Consumers embed [`Runtime`] to drive rounds, subscribe to events, and
//! interact with the battle through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for flexible event routing
//! - [`config`] and [`logging`] cover environment-driven setup
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod logging;
pub mod runtime;

mod workers;

pub use api::{
    IdleMoveProvider, MoveProvider, Result, RuntimeError, RuntimeHandle, ScriptedMoveProvider,
};
pub use config::{LoggingConfig, RuntimeConfig};
pub use events::{Event, EventBus, Topic};
pub use logging::init_tracing;
pub use runtime::{Runtime, RuntimeBuilder};
