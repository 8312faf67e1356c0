use crate::state::ResourceMeter;

/// A damage-absorbing barrier attached to one fighter.
///
/// Shields are copied on attach; the fighter owns its copy outright.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub name: String,
    pub health: ResourceMeter,
    /// Flat reduction applied to every hit before the shield absorbs it.
    pub defense: u32,
    /// Resistance to shield-busting moves.
    pub buster_defense: u32,
}

/// What happened when a hit met a shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShieldHit {
    /// Damage taken out of the shield's own health.
    pub absorbed: u32,
    /// The shield's health reached zero.
    pub destroyed: bool,
}

impl Shield {
    pub fn new(name: impl Into<String>, health: u32, defense: u32, buster_defense: u32) -> Self {
        Self {
            name: name.into(),
            health: ResourceMeter::full(health),
            defense,
            buster_defense,
        }
    }

    /// Absorbs one hit. Damage beyond the shield's remaining health is
    /// discarded rather than carried through to the holder.
    pub fn absorb(&mut self, damage: u32) -> ShieldHit {
        let reduced = damage.saturating_sub(self.defense);
        let absorbed = self.health.deplete(reduced);
        ShieldHit {
            absorbed,
            destroyed: self.health.is_empty(),
        }
    }

    /// True when a buster of `power` breaks this shield.
    pub fn is_busted_by(&self, power: i32) -> bool {
        i64::from(power) > i64::from(self.buster_defense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_reduces_before_absorbing() {
        let mut shield = Shield::new("Iron", 5, 2, 0);
        let hit = shield.absorb(3);
        assert_eq!(hit, ShieldHit { absorbed: 1, destroyed: false });
        assert_eq!(shield.health.current, 4);
    }

    #[test]
    fn overflow_is_discarded() {
        let mut shield = Shield::new("Iron", 5, 0, 0);
        let hit = shield.absorb(12);
        assert_eq!(hit, ShieldHit { absorbed: 5, destroyed: true });
        assert_eq!(shield.health.current, 0);
    }

    #[test]
    fn buster_must_exceed_defense() {
        let shield = Shield::new("Iron", 5, 0, 3);
        assert!(!shield.is_busted_by(3));
        assert!(shield.is_busted_by(4));
    }
}
