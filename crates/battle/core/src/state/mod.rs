//! Authoritative battle state.
//!
//! [`BattleState`] owns both rosters. Components query it freely but only the
//! round controller and the pipeline it drives mutate it, one move at a time.
pub mod types;

pub use types::{Fighter, FighterBuilder, FighterId, Resource, ResourceMeter, Side, Team};

use std::collections::BTreeSet;

use crate::error::BattleError;

/// Canonical snapshot of both rosters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub home: Team,
    pub away: Team,
}

impl BattleState {
    /// Builds the state, rejecting empty rosters and reused fighter ids.
    pub fn new(home: Vec<Fighter>, away: Vec<Fighter>) -> Result<Self, BattleError> {
        if home.is_empty() {
            return Err(BattleError::EmptyTeam(Side::Home));
        }
        if away.is_empty() {
            return Err(BattleError::EmptyTeam(Side::Away));
        }

        let mut seen = BTreeSet::new();
        for fighter in home.iter().chain(away.iter()) {
            if !seen.insert(fighter.id) {
                return Err(BattleError::DuplicateFighter(fighter.id));
            }
        }

        Ok(Self {
            home: Team::new(Side::Home, home),
            away: Team::new(Side::Away, away),
        })
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn side_of(&self, id: FighterId) -> Option<Side> {
        Side::BOTH.into_iter().find(|side| self.team(*side).contains(id))
    }

    pub fn fighter(&self, id: FighterId) -> Option<&Fighter> {
        self.home.get(id).or_else(|| self.away.get(id))
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        match self.side_of(id)? {
            Side::Home => self.home.get_mut(id),
            Side::Away => self.away.get_mut(id),
        }
    }

    /// Looks up a fighter that must exist.
    pub fn require(&self, id: FighterId) -> Result<&Fighter, BattleError> {
        self.fighter(id).ok_or(BattleError::UnknownFighter(id))
    }

    pub fn require_mut(&mut self, id: FighterId) -> Result<&mut Fighter, BattleError> {
        self.fighter_mut(id).ok_or(BattleError::UnknownFighter(id))
    }

    pub fn is_alive(&self, id: FighterId) -> bool {
        self.fighter(id).is_some_and(|f| f.is_alive())
    }

    pub fn fighters(&self) -> impl Iterator<Item = &Fighter> {
        self.home.fighters.iter().chain(self.away.fighters.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(id: u32) -> Fighter {
        Fighter::builder(FighterId(id), format!("f{id}")).build()
    }

    #[test]
    fn rejects_duplicate_ids_across_teams() {
        let err = BattleState::new(vec![fighter(1)], vec![fighter(1)]).unwrap_err();
        assert_eq!(err, BattleError::DuplicateFighter(FighterId(1)));
    }

    #[test]
    fn rejects_empty_rosters() {
        let err = BattleState::new(vec![], vec![fighter(1)]).unwrap_err();
        assert_eq!(err, BattleError::EmptyTeam(Side::Home));
    }

    #[test]
    fn resolves_sides() {
        let state = BattleState::new(vec![fighter(1), fighter(2)], vec![fighter(3)]).unwrap();
        assert_eq!(state.side_of(FighterId(2)), Some(Side::Home));
        assert_eq!(state.side_of(FighterId(3)), Some(Side::Away));
        assert_eq!(state.side_of(FighterId(9)), None);
        assert!(state.require(FighterId(9)).is_err());
    }
}
