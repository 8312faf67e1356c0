//! Content loaders for reading battle data from files.

pub mod combinations;
pub mod config;
pub mod factory;
pub mod fighters;
pub mod moves;

pub use combinations::{CombinationLoader, CombinationSpec};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use fighters::{FighterLoader, FighterRoster, FighterTemplate, ShieldSpec};
pub use moves::MoveCatalog;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parses RON text, naming `source` in the error.
pub(crate) fn parse_ron<T>(source: &str, content: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {source}: {e}"))
}
