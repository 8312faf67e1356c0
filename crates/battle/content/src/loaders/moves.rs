//! Move catalog loader.
//!
//! Loads `BattleMove` templates from RON data files and provides lookup by
//! move name.

use std::collections::HashMap;
use std::path::Path;

use anyhow::bail;
use battle_core::BattleMove;
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Stock move files, embedded at compile time.
const EMBEDDED: [(&str, &str); 4] = [
    ("physical.ron", include_str!("../../data/moves/physical.ron")),
    ("magic.ron", include_str!("../../data/moves/magic.ron")),
    ("support.ron", include_str!("../../data/moves/support.ron")),
    ("dances.ron", include_str!("../../data/moves/dances.ron")),
];

/// Registry of move templates keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    moves: HashMap<String, BattleMove>,
}

impl MoveCatalog {
    /// Loads all moves from the embedded RON data files.
    pub fn load() -> LoadResult<Self> {
        let mut catalog = Self::default();
        for (source, content) in EMBEDDED {
            catalog.extend_from(source, content)?;
        }
        Ok(catalog)
    }

    /// Loads every `*.ron` file in `dir`, in file-name order.
    pub fn from_path(dir: &Path) -> LoadResult<Self> {
        let mut files = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read move directory {}: {}", dir.display(), e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect::<Vec<_>>();
        files.sort();

        let mut catalog = Self::default();
        for path in files {
            let content = read_file(&path)?;
            catalog.extend_from(&path.display().to_string(), &content)?;
        }
        Ok(catalog)
    }

    fn extend_from(&mut self, source: &str, content: &str) -> LoadResult<()> {
        let moves: Vec<BattleMove> = parse_ron(source, content)?;
        debug!(source, count = moves.len(), "loaded moves");
        for mv in moves {
            self.insert(mv)?;
        }
        Ok(())
    }

    /// Adds one move. Names must be unique.
    pub fn insert(&mut self, mv: BattleMove) -> LoadResult<()> {
        if self.moves.contains_key(&mv.name) {
            bail!("Duplicate move name '{}'", mv.name);
        }
        self.moves.insert(mv.name.clone(), mv);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BattleMove> {
        self.moves.get(name)
    }

    /// Like [`get`](Self::get), but a missing move is an error.
    pub fn require(&self, name: &str) -> LoadResult<&BattleMove> {
        self.get(name)
            .ok_or_else(|| anyhow::anyhow!("Move '{}' is not in the catalog", name))
    }

    /// Returns an iterator over all move names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.moves.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DanceEffectType, Element, MoveKind, TargetType};

    #[test]
    fn test_load_embedded_moves() {
        let catalog = MoveCatalog::load().expect("Failed to load moves");
        assert!(catalog.len() >= 30);

        let strike = catalog.get("Strike").unwrap();
        assert_eq!(strike.kind, MoveKind::Attack { power: 4 });
        assert_eq!(strike.accuracy, BattleMove::DEFAULT_ACCURACY);
        assert_eq!(strike.priority, 0);

        let fireball = catalog.get("Fireball").unwrap();
        assert_eq!(
            fireball.kind,
            MoveKind::Spell {
                element: Element::Fire,
                power: 5,
                cost: 3
            }
        );

        let dance = catalog.get("Wind Dance").unwrap();
        assert_eq!(dance.target_type, TargetType::Field);
        assert_eq!(dance.dance(), Some(DanceEffectType::Wind));
    }

    #[test]
    fn every_dance_tag_has_a_move() {
        let catalog = MoveCatalog::load().unwrap();
        let tags: Vec<_> = catalog
            .names()
            .filter_map(|name| catalog.get(name).and_then(BattleMove::dance))
            .collect();
        assert_eq!(tags.len(), 8);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut catalog = MoveCatalog::default();
        catalog.insert(BattleMove::wait()).unwrap();
        assert!(catalog.insert(BattleMove::wait()).is_err());
        assert!(catalog.require("Strike").is_err());
    }
}
