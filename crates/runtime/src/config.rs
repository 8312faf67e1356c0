//! Runtime configuration structures and loaders.
use std::env;

use battle_core::BattleConfig;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Rule constants applied to the battle when the runtime is built.
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed of the default [`battle_core::PcgOracle`].
    pub seed: u64,
    /// `run_to_completion` gives up after this many rounds.
    pub max_rounds: u32,
    pub logging: LoggingConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: 0,
            max_rounds: 1_000,
            logging: LoggingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Seed of the default probability oracle (default: 0)
    /// - `BATTLE_EVENT_BUFFER` - Per-topic event channel capacity (default: 100)
    /// - `BATTLE_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `BATTLE_MAX_ROUNDS` - Round limit for `run_to_completion` (default: 1000)
    /// - `BATTLE_LOG` - Default tracing directive when `RUST_LOG` is unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup`. Unparsable values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = parse(lookup("BATTLE_SEED")) {
            config.seed = seed;
        }
        if let Some(capacity) = parse::<usize>(lookup("BATTLE_EVENT_BUFFER")) {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = parse::<usize>(lookup("BATTLE_COMMAND_BUFFER")) {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(rounds) = parse::<u32>(lookup("BATTLE_MAX_ROUNDS")) {
            config.max_rounds = rounds.max(1);
        }
        if let Some(directive) = lookup("BATTLE_LOG").filter(|d| !d.trim().is_empty()) {
            config.logging.default_directive = directive;
        }

        config
    }

    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Settings for [`crate::logging::init_tracing`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub default_directive: String,
    /// Print the event target (module path) in each line.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_owned(),
            with_target: true,
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
