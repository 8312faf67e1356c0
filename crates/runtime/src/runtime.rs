//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the battle.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use battle_core::{Battle, PcgOracle, ProbabilityOracle, RoundOutcome, Side};

use crate::api::{MoveProvider, Result, RuntimeError, RuntimeHandle};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Main runtime that orchestrates the battle
///
/// Design: Runtime owns the worker and coordinates providers.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    max_rounds: u32,

    // Move providers (injected by user)
    home_provider: Option<Box<dyn MoveProvider>>,
    away_provider: Option<Box<dyn MoveProvider>>,

    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Play one round: ask both providers for moves, queue them and resolve
    /// the round.
    ///
    /// Requires both providers to be configured. If any move is rejected the
    /// moves already queued this round are dropped, so the next step starts
    /// from an empty queue.
    pub async fn step(&mut self) -> Result<RoundOutcome> {
        let home = self
            .home_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet { side: Side::Home })?;
        let away = self
            .away_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet { side: Side::Away })?;

        let snapshot = self.handle.query_state().await?;

        let mut moves = home.provide_moves(Side::Home, &snapshot).await?;
        moves.extend(away.provide_moves(Side::Away, &snapshot).await?);
        debug!(queued = moves.len(), "moves collected");

        for queued in moves {
            if let Err(error) = self.handle.enqueue_move(queued).await {
                warn!(%error, "move rejected, clearing the round's queue");
                self.handle.clear_queue().await?;
                return Err(error);
            }
        }

        self.handle.run_round().await
    }

    /// Step until the battle is decided.
    ///
    /// Fails with [`RuntimeError::RoundLimitReached`] once the configured
    /// round limit is used up.
    pub async fn run_to_completion(&mut self) -> Result<RoundOutcome> {
        for _ in 0..self.max_rounds {
            let outcome = self.step().await?;
            if outcome.is_over() {
                info!(?outcome, "battle decided");
                return Ok(outcome);
            }
        }
        Err(RuntimeError::RoundLimitReached(self.max_rounds))
    }

    /// Set the home move provider
    pub fn set_home_provider(&mut self, provider: impl MoveProvider + 'static) {
        self.home_provider = Some(Box::new(provider));
    }

    /// Set the away move provider
    pub fn set_away_provider(&mut self, provider: impl MoveProvider + 'static) {
        self.away_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every clone of the handle is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    battle: Option<Battle>,
    oracle: Option<Box<dyn ProbabilityOracle>>,
    home_provider: Option<Box<dyn MoveProvider>>,
    away_provider: Option<Box<dyn MoveProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            battle: None,
            oracle: None,
            home_provider: None,
            away_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the battle to run (required)
    ///
    /// The configuration's rule constants replace the battle's own.
    pub fn battle(mut self, battle: Battle) -> Self {
        self.battle = Some(battle);
        self
    }

    /// Use a specific oracle instead of a [`PcgOracle`] seeded from the config
    pub fn oracle(mut self, oracle: impl ProbabilityOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Set home move provider (optional)
    pub fn home_provider(mut self, provider: impl MoveProvider + 'static) -> Self {
        self.home_provider = Some(Box::new(provider));
        self
    }

    /// Set away move provider (optional)
    pub fn away_provider(mut self, provider: impl MoveProvider + 'static) -> Self {
        self.away_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let battle = self
            .battle
            .ok_or(RuntimeError::MissingBattle)?
            .with_config(self.config.battle.clone());
        let seed = self.config.seed;
        let oracle = self
            .oracle
            .unwrap_or_else(|| Box::new(PcgOracle::new(seed)));

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(battle, oracle, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            max_rounds: self.config.max_rounds,
            home_provider: self.home_provider,
            away_provider: self.away_provider,
            sim_worker_handle,
        })
    }
}
