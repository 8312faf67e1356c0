//! Simulation worker that owns the authoritative [`battle_core::Battle`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! rounds through the engine, and publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use battle_core::{
    ActiveFieldEffect, Battle, BattleState, ProbabilityOracle, QueuedMove, RoundOutcome,
};

use crate::api::Result;
use crate::events::{Event, EventBus};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Queue one move for the coming round.
    EnqueueMove {
        queued: QueuedMove,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Drop every move queued for the coming round.
    ClearQueue { reply: oneshot::Sender<()> },
    /// Resolve the queued moves as one round.
    RunRound {
        reply: oneshot::Sender<Result<RoundOutcome>>,
    },
    /// Snapshot of the live field effects.
    ActiveFieldEffects {
        reply: oneshot::Sender<Vec<ActiveFieldEffect>>,
    },
    /// Query the current battle state (read-only).
    QueryState { reply: oneshot::Sender<BattleState> },
}

/// Background task that processes battle commands.
///
/// The worker is a pure executor: it does not own providers or do I/O.
/// Provider orchestration is done by [`Runtime`](crate::Runtime).
pub struct SimulationWorker {
    battle: Battle,
    oracle: Box<dyn ProbabilityOracle>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        battle: Battle,
        oracle: Box<dyn ProbabilityOracle>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            home = battle.state().home.fighters.len(),
            away = battle.state().away.fighters.len(),
            "SimulationWorker initialized"
        );

        Self {
            battle,
            oracle,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop; ends when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(round = self.battle.round(), "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::EnqueueMove { queued, reply } => {
                let result = self.battle.enqueue_move(queued).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("EnqueueMove reply channel closed (caller dropped)");
                }
            }
            Command::ClearQueue { reply } => {
                self.battle.clear_queue();
                if reply.send(()).is_err() {
                    debug!("ClearQueue reply channel closed (caller dropped)");
                }
            }
            Command::RunRound { reply } => {
                let result = self.run_round();
                if reply.send(result).is_err() {
                    debug!("RunRound reply channel closed (caller dropped)");
                }
            }
            Command::ActiveFieldEffects { reply } => {
                if reply.send(self.battle.active_field_effects().to_vec()).is_err() {
                    debug!("ActiveFieldEffects reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.battle.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one round and publishes whatever it emitted, including the
    /// events that preceded an aborting error.
    fn run_round(&mut self) -> Result<RoundOutcome> {
        let mut events = Vec::new();
        let result = self.battle.run_round(self.oracle.as_mut(), &mut events);

        let round = self.battle.round();
        for event in events {
            self.event_bus.publish(Event::new(round, event));
        }

        match result {
            Ok(outcome) => {
                debug!(round, ?outcome, "round resolved");
                Ok(outcome)
            }
            Err(error) => {
                warn!(round, %error, "round failed");
                Err(error.into())
            }
        }
    }
}
