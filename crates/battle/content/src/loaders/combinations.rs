//! Dance combination loader.

use std::path::Path;

use battle_core::{CombinationRegistry, CombinedFieldEffect, DanceEffectType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// One registry entry as written in RON. Pair order does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationSpec {
    pub first: DanceEffectType,
    pub second: DanceEffectType,
    pub effect: CombinedFieldEffect,
}

/// Loader for dance combination registries from RON files.
pub struct CombinationLoader;

impl CombinationLoader {
    /// Load a registry from a RON file of `Vec<CombinationSpec>`.
    ///
    /// A pair listed twice keeps the later entry.
    pub fn load(path: &Path) -> LoadResult<CombinationRegistry> {
        let content = read_file(path)?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// The stock registry shipped with this crate.
    pub fn embedded() -> LoadResult<CombinationRegistry> {
        Self::parse("combinations.ron", include_str!("../../data/combinations.ron"))
    }

    fn parse(source: &str, content: &str) -> LoadResult<CombinationRegistry> {
        let specs: Vec<CombinationSpec> = parse_ron(source, content)?;
        for spec in &specs {
            if spec.first == spec.second {
                anyhow::bail!(
                    "Combination '{}' pairs {} with itself",
                    spec.effect.name,
                    spec.first
                );
            }
        }
        debug!(source, count = specs.len(), "loaded dance combinations");

        let mut registry = CombinationRegistry::new();
        for spec in specs {
            registry.register(spec.first, spec.second, spec.effect);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_registry_matches_standard() {
        let registry = CombinationLoader::embedded().expect("Failed to load combinations");
        assert_eq!(registry, CombinationRegistry::standard());
    }

    #[test]
    fn self_pairs_are_rejected() {
        let ron = r#"[(
            first: Mind,
            second: Mind,
            effect: (name: "Echo", description: "", effects: []),
        )]"#;
        let err = CombinationLoader::parse("echo.ron", ron).unwrap_err();
        assert!(err.to_string().contains("Echo"));
    }
}
