use super::{Fighter, FighterId, Side};
use crate::effect::StatusSet;

/// One roster plus the statuses that apply to the whole team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub side: Side,
    pub fighters: Vec<Fighter>,
    /// Team-wide statuses; they multiply with every member's own statuses.
    pub statuses: StatusSet,
}

impl Team {
    pub fn new(side: Side, fighters: Vec<Fighter>) -> Self {
        Self {
            side,
            fighters,
            statuses: StatusSet::new(),
        }
    }

    pub fn get(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        self.fighters.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FighterId) -> bool {
        self.get(id).is_some()
    }

    /// Living members in roster order.
    pub fn alive(&self) -> impl Iterator<Item = &Fighter> {
        self.fighters.iter().filter(|f| f.is_alive())
    }

    pub fn alive_ids(&self) -> Vec<FighterId> {
        self.alive().map(|f| f.id).collect()
    }

    /// True once every member is dead.
    pub fn is_defeated(&self) -> bool {
        self.alive().next().is_none()
    }
}
