//! Content factory for loading every content kind from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{Battle, BattleConfig, CombinationRegistry, Fighter};

use crate::loaders::{
    CombinationLoader, ConfigLoader, FighterLoader, FighterRoster, LoadResult, MoveCatalog,
};

/// Everything a battle needs from content: moves, fighter templates, the
/// dance combination registry and the rule constants.
#[derive(Debug, Clone)]
pub struct Content {
    pub moves: MoveCatalog,
    pub roster: FighterRoster,
    pub combinations: CombinationRegistry,
    pub config: BattleConfig,
}

impl Content {
    /// The stock content compiled into this crate.
    pub fn embedded() -> LoadResult<Self> {
        Ok(Self {
            moves: MoveCatalog::load()?,
            roster: FighterRoster::new(FighterLoader::embedded()?),
            combinations: CombinationLoader::embedded()?,
            config: ConfigLoader::embedded()?,
        })
    }

    /// Spawns both teams and builds a battle wired to this content's
    /// registry and configuration.
    pub fn battle(&mut self, home: &[&str], away: &[&str]) -> LoadResult<Battle> {
        let home: Vec<Fighter> = self.roster.spawn_team(home)?;
        let away: Vec<Fighter> = self.roster.spawn_team(away)?;
        let battle = Battle::new(home, away).context("Failed to set up battle")?;
        Ok(battle
            .with_config(self.config.clone())
            .with_registry(self.combinations.clone()))
    }
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── fighters.ron
/// ├── combinations.ron
/// └── moves/
///     ├── physical.ron
///     └── magic.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the move catalog from every file in `moves/`.
    pub fn load_moves(&self) -> LoadResult<MoveCatalog> {
        MoveCatalog::from_path(&self.data_dir.join("moves"))
    }

    /// Load fighter templates from `fighters.ron`.
    pub fn load_roster(&self) -> LoadResult<FighterRoster> {
        let templates = FighterLoader::load(&self.data_dir.join("fighters.ron"))?;
        Ok(FighterRoster::new(templates))
    }

    /// Load the dance combination registry from `combinations.ron`.
    pub fn load_combinations(&self) -> LoadResult<CombinationRegistry> {
        CombinationLoader::load(&self.data_dir.join("combinations.ron"))
    }

    /// Load everything at once.
    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            moves: self.load_moves()?,
            roster: self.load_roster()?,
            combinations: self.load_combinations()?,
            config: self.load_config()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
