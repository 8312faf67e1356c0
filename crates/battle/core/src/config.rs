/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Damage multiplier applied to critical physical hits.
    pub critical_multiplier: u32,

    /// Move power of the strike an auto-evading fighter answers with.
    pub counter_power: i32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Statuses a single fighter (or team) may hold at once. Further statuses
    /// are dropped until older ones wear off.
    pub const MAX_STATUSES: usize = 32;
    /// Fighters that may own one field effect (two after a combination).
    pub const MAX_EFFECT_OWNERS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRITICAL_MULTIPLIER: u32 = 2;
    pub const DEFAULT_COUNTER_POWER: i32 = 0;

    pub fn new() -> Self {
        Self {
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            counter_power: Self::DEFAULT_COUNTER_POWER,
        }
    }

    #[must_use]
    pub fn with_critical_multiplier(mut self, multiplier: u32) -> Self {
        self.critical_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_counter_power(mut self, power: i32) -> Self {
        self.counter_power = power;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
