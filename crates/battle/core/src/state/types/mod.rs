pub mod common;
pub mod fighter;
pub mod team;

pub use common::{FighterId, Resource, ResourceMeter, Side};
pub use fighter::{Fighter, FighterBuilder};
pub use team::Team;
