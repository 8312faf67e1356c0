//! Execution context passed through the pipeline.

use crate::config::BattleConfig;
use crate::event::{BattleEvent, EventSink};
use crate::lifecycle::EffectManager;
use crate::oracle::ProbabilityOracle;
use crate::state::BattleState;

/// Everything one move execution may read or mutate.
///
/// Built by the round controller for each queued move; nothing else holds
/// these borrows while a move resolves.
pub struct ExecutionContext<'a> {
    /// Mutable battle state.
    pub state: &'a mut BattleState,

    /// Live field effects and the combination registry.
    pub effects: &'a mut EffectManager,

    /// Injected source of chance.
    pub oracle: &'a mut dyn ProbabilityOracle,

    /// Receiver of domain events, in execution order.
    pub events: &'a mut dyn EventSink,

    pub config: &'a BattleConfig,

    /// Current round number (for error context).
    pub round: u32,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        state: &'a mut BattleState,
        effects: &'a mut EffectManager,
        oracle: &'a mut dyn ProbabilityOracle,
        events: &'a mut dyn EventSink,
        config: &'a BattleConfig,
        round: u32,
    ) -> Self {
        Self {
            state,
            effects,
            oracle,
            events,
            config,
            round,
        }
    }

    #[inline]
    pub fn emit(&mut self, event: BattleEvent) {
        self.events.emit(event);
    }
}
