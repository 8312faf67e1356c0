//! Fighter template loader.
//!
//! Templates describe a fighter without an id. A [`FighterRoster`] spawns
//! fighters from templates and hands out fresh ids, so the same template
//! can appear on both teams.

use std::collections::HashMap;
use std::path::Path;

use battle_core::{
    Affinity, Element, Fighter, FighterId, Shield, StatBlock, Status, StatusKind,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Shield a template starts with; always full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldSpec {
    pub name: String,
    pub health: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub buster_defense: u32,
}

impl ShieldSpec {
    pub fn build(&self) -> Shield {
        Shield::new(self.name.clone(), self.health, self.defense, self.buster_defense)
    }
}

/// Fighter template structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterTemplate {
    pub name: String,
    pub health: u32,
    #[serde(default)]
    pub mana: u32,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub element: Option<Element>,
    /// Catalog move names this fighter may use. Spells among them are
    /// also the fighter's known spells.
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub element_strength: Vec<(Element, i32)>,
    #[serde(default)]
    pub element_resistance: Vec<(Element, i32)>,
    #[serde(default)]
    pub affinities: Vec<(Element, Affinity)>,
    #[serde(default)]
    pub shield: Option<ShieldSpec>,
    /// Innate statuses that never expire.
    #[serde(default)]
    pub statuses: Vec<StatusKind>,
}

impl FighterTemplate {
    /// Builds a fighter with the given id.
    pub fn build(&self, id: FighterId) -> Fighter {
        let mut builder = Fighter::builder(id, self.name.clone())
            .health(self.health)
            .mana(self.mana)
            .stats(self.stats);

        if let Some(element) = self.element {
            builder = builder.element(element);
        }
        for spell in &self.moves {
            builder = builder.spell(spell.clone());
        }
        for &(element, bonus) in &self.element_strength {
            builder = builder.element_strength(element, bonus);
        }
        for &(element, bonus) in &self.element_resistance {
            builder = builder.element_resistance(element, bonus);
        }
        for &(element, affinity) in &self.affinities {
            builder = builder.affinity(element, affinity);
        }
        if let Some(shield) = &self.shield {
            builder = builder.shield(shield.build());
        }

        let mut fighter = builder.build();
        for &kind in &self.statuses {
            fighter.statuses.push(Status::permanent(kind));
        }
        fighter
    }
}

/// Loader for fighter templates from RON files.
pub struct FighterLoader;

impl FighterLoader {
    /// Load fighter templates from a RON file.
    ///
    /// RON format: `Vec<FighterTemplate>`
    pub fn load(path: &Path) -> LoadResult<Vec<FighterTemplate>> {
        let content = read_file(path)?;
        parse_ron(&path.display().to_string(), &content)
    }

    /// The stock templates shipped with this crate.
    pub fn embedded() -> LoadResult<Vec<FighterTemplate>> {
        parse_ron("fighters.ron", include_str!("../../data/fighters.ron"))
    }
}

/// Templates by name plus an id counter.
#[derive(Debug, Clone)]
pub struct FighterRoster {
    templates: HashMap<String, FighterTemplate>,
    next_id: u32,
}

impl FighterRoster {
    pub fn new(templates: impl IntoIterator<Item = FighterTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.name.clone(), template))
                .collect(),
            next_id: 1,
        }
    }

    pub fn template(&self, name: &str) -> Option<&FighterTemplate> {
        self.templates.get(name)
    }

    /// Builds a fighter from the named template with a fresh id.
    pub fn spawn(&mut self, name: &str) -> LoadResult<Fighter> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown fighter template '{}'", name))?;
        let id = FighterId(self.next_id);
        self.next_id += 1;
        Ok(template.build(id))
    }

    /// Spawns one fighter per name, in order.
    pub fn spawn_team(&mut self, names: &[&str]) -> LoadResult<Vec<Fighter>> {
        names.iter().map(|name| self.spawn(name)).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_fighters() {
        let templates = FighterLoader::embedded().expect("Failed to load fighters");
        assert_eq!(templates.len(), 6);

        let knight = templates.iter().find(|t| t.name == "Knight").unwrap();
        assert_eq!(knight.stats.strength, 5);
        assert_eq!(knight.stats.evade, 0);
        assert_eq!(knight.shield.as_ref().map(|s| s.health), Some(10));
    }

    #[test]
    fn templates_build_complete_fighters() {
        let templates = FighterLoader::embedded().unwrap();
        let pyro = templates.iter().find(|t| t.name == "Pyromancer").unwrap();
        let fighter = pyro.build(FighterId(4));

        assert_eq!(fighter.id, FighterId(4));
        assert_eq!(fighter.health.current, 24);
        assert_eq!(fighter.mana.maximum, 30);
        assert_eq!(fighter.element, Some(Element::Fire));
        assert!(fighter.knows_spell("Fireball"));
        assert_eq!(fighter.element_strength.get(Element::Fire), 2);
        assert_eq!(fighter.affinities.get(Element::Water), Affinity::Weak);
    }

    #[test]
    fn innate_statuses_are_permanent() {
        let templates = FighterLoader::embedded().unwrap();
        let warlock = templates.iter().find(|t| t.name == "Warlock").unwrap();
        let fighter = warlock.build(FighterId(1));
        assert_eq!(fighter.statuses.len(), 1);
        assert!(fighter.statuses.iter().all(Status::is_permanent));
    }

    #[test]
    fn roster_hands_out_fresh_ids() {
        let mut roster = FighterRoster::new(FighterLoader::embedded().unwrap());
        let home = roster.spawn_team(&["Knight", "Dancer"]).unwrap();
        let away = roster.spawn_team(&["Knight"]).unwrap();

        let ids: Vec<_> = home.iter().chain(&away).map(|f| f.id).collect();
        assert_eq!(ids, vec![FighterId(1), FighterId(2), FighterId(3)]);
        assert!(roster.spawn("Dragon").is_err());
    }
}
