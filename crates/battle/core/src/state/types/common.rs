use std::fmt;

/// Unique identifier of a fighter within one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FighterId(pub u32);

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two rosters in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The roster the battle is reported from (victory / defeat).
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    /// Returns the other roster.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

/// The two pools a fighter spends and restores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Health,
    Mana,
}

/// Integer resource meter (health, mana, shield health).
///
/// `current` never exceeds `maximum` and never drops below zero; every
/// mutation clamps at the point of computation and reports the amount that
/// actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Removes up to `amount`, returning what was actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Adds up to `amount` without passing the maximum, returning what was
    /// actually added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.maximum.saturating_sub(self.current));
        self.current += gained;
        gained
    }

    /// `floor(maximum × percent / 100)`.
    pub fn percent_of_max(&self, percent: u32) -> u32 {
        let value = u64::from(self.maximum) * u64::from(percent) / 100;
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_both_ways() {
        let mut meter = ResourceMeter::new(8, 10);
        assert_eq!(meter.restore(5), 2);
        assert!(meter.is_full());
        assert_eq!(meter.deplete(25), 10);
        assert!(meter.is_empty());
        assert_eq!(ResourceMeter::new(50, 10).current, 10);
    }

    #[test]
    fn percent_of_max_floors() {
        assert_eq!(ResourceMeter::full(15).percent_of_max(10), 1);
        assert_eq!(ResourceMeter::full(200).percent_of_max(25), 50);
    }
}
