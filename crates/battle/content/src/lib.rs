//! Data-driven battle content and loaders.
//!
//! This crate houses the stock move catalog, fighter templates and dance
//! combinations as RON data, plus engine rule constants as TOML:
//! - Move catalogs (`data/moves/*.ron`)
//! - Fighter templates (`data/fighters.ron`)
//! - Dance combinations (`data/combinations.ron`)
//! - Engine configuration (`data/config.toml`)
//!
//! Every loader deserializes `battle-core` types directly through their
//! serde derives. The stock data is embedded at compile time; the same
//! loaders read replacement files from disk.

pub mod loaders;

pub use loaders::{
    CombinationLoader, CombinationSpec, ConfigLoader, Content, ContentFactory, FighterLoader,
    FighterRoster, FighterTemplate, LoadResult, MoveCatalog, ShieldSpec,
};
