//! Round controller.
//!
//! [`Battle`] owns the state, the live effects and the move queue. A round:
//!
//! 1. sorts the queue by priority, then effective speed, then insertion
//! 2. drains it through the pipeline, skipping moves whose owner died or
//!    whose targets are all gone
//! 3. runs the lifecycle manager's round-end processing
//! 4. evaluates victory / defeat
//!
//! Everything runs on the caller's thread; oracle calls happen strictly in
//! queue order.

mod outcome;

pub use outcome::RoundOutcome;

use tracing::{debug, warn};

use crate::combat::MoveOutcome;
use crate::config::BattleConfig;
use crate::effect::{ActiveFieldEffect, CombinationRegistry};
use crate::error::{BattleError, BattleFault};
use crate::event::{BattleEvent, EventSink};
use crate::execute::{ExecutionContext, execute_move, validate_target};
use crate::lifecycle::EffectManager;
use crate::moves::{MoveQueue, QueuedMove};
use crate::oracle::ProbabilityOracle;
use crate::state::{BattleState, Fighter, Side};
use crate::stats::{Effective, StatKind};

#[derive(Clone, Debug)]
pub struct Battle {
    state: BattleState,
    effects: EffectManager,
    queue: MoveQueue,
    config: BattleConfig,
    round: u32,
}

impl Battle {
    /// Creates a battle with the default configuration and the standard
    /// combination registry.
    pub fn new(home: Vec<Fighter>, away: Vec<Fighter>) -> Result<Self, BattleError> {
        Ok(Self::from_state(
            BattleState::new(home, away)?,
            BattleConfig::default(),
            CombinationRegistry::standard(),
        ))
    }

    pub fn from_state(
        state: BattleState,
        config: BattleConfig,
        registry: CombinationRegistry,
    ) -> Self {
        Self {
            state,
            effects: EffectManager::new(registry),
            queue: MoveQueue::new(),
            config,
            round: 0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the combination registry. Meant for setup before the first
    /// round; any live field effects are dropped.
    #[must_use]
    pub fn with_registry(mut self, registry: CombinationRegistry) -> Self {
        self.effects = EffectManager::new(registry);
        self
    }

    /// Read-only snapshot of both teams.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Mutable access for collaborators that set up fighters between rounds.
    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    pub fn active_field_effects(&self) -> &[ActiveFieldEffect] {
        self.effects.active()
    }

    /// Outcome of the current state.
    pub fn outcome(&self) -> RoundOutcome {
        if self.state.home.is_defeated() {
            RoundOutcome::Defeat
        } else if self.state.away.is_defeated() {
            RoundOutcome::Victory
        } else {
            RoundOutcome::Continuing
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Queues one move for the coming round.
    ///
    /// Rejects unknown owners, targets that do not fit the move's target
    /// type, and a second move for the same owner.
    pub fn enqueue_move(&mut self, queued: QueuedMove) -> Result<(), BattleError> {
        self.state.require(queued.owner)?;
        validate_target(&self.state, &queued)?;
        if self.queue.contains_owner(queued.owner) {
            return Err(BattleError::AlreadyQueued(queued.owner));
        }
        self.queue.push(queued);
        Ok(())
    }

    /// Drops every move queued for the coming round.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Resolves one full round.
    ///
    /// A programmer error aborts the round: the queue is cleared, the error
    /// is logged and returned, and round-end processing does not run.
    pub fn run_round(
        &mut self,
        oracle: &mut dyn ProbabilityOracle,
        events: &mut dyn EventSink,
    ) -> Result<RoundOutcome, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }

        self.round += 1;
        let round = self.round;
        debug!(round, queued = self.queue.len(), "round started");
        events.emit(BattleEvent::RoundStarted { round });

        let state = &self.state;
        self.queue.sort_with(|id| {
            Effective::of(state, id).map_or(i64::MIN, |view| view.stat(StatKind::Speed))
        });

        while !self.queue.is_empty() {
            let queued = self.queue.pop_next()?;
            if let Err(error) = self.run_move(&queued, oracle, events) {
                warn!(
                    round,
                    owner = %queued.owner,
                    name = %queued.battle_move.name,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "round aborted"
                );
                self.queue.clear();
                return Err(error);
            }
        }

        self.effects.on_round_end(&mut self.state, events);

        let outcome = self.outcome();
        debug!(round, ?outcome, "round finished");
        events.emit(BattleEvent::RoundFinished { round, outcome });
        Ok(outcome)
    }

    fn run_move(
        &mut self,
        queued: &QueuedMove,
        oracle: &mut dyn ProbabilityOracle,
        events: &mut dyn EventSink,
    ) -> Result<(), BattleError> {
        let mut ctx = ExecutionContext::new(
            &mut self.state,
            &mut self.effects,
            oracle,
            events,
            &self.config,
            self.round,
        );
        let outcome = execute_move(&mut ctx, queued)?;

        match outcome {
            MoveOutcome::Skipped(reason) => {
                debug!(owner = %queued.owner, name = %queued.battle_move.name, ?reason, "move skipped");
                events.emit(BattleEvent::MoveSkipped {
                    owner: queued.owner,
                    move_name: queued.battle_move.name.clone(),
                    reason,
                });
            }
            MoveOutcome::Executed | MoveOutcome::Failed(_) => {
                debug!(owner = %queued.owner, name = %queued.battle_move.name, ?outcome, "move executed");
            }
        }
        Ok(())
    }

    /// Living fighters on one side, in roster order.
    pub fn alive(&self, side: Side) -> impl Iterator<Item = &Fighter> {
        self.state.team(side).alive()
    }
}
