//! Engine configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine rule constants from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The stock configuration shipped with this crate.
    pub fn embedded() -> LoadResult<BattleConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }

    fn parse(content: &str) -> LoadResult<BattleConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_overrides_counter_power() {
        let config = ConfigLoader::embedded().unwrap();
        assert_eq!(config.critical_multiplier, 2);
        assert_eq!(config.counter_power, 2);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("counter_power = 7\n").unwrap();
        assert_eq!(config, BattleConfig::new().with_counter_power(7));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = ConfigLoader::parse("critical_multiplier = \"lots\"\n").unwrap_err();
        assert!(err.to_string().contains("config TOML"));
    }
}
