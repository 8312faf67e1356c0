//! Percentage multipliers and their exact product.
//!
//! Multipliers are stored as integer percentages (`200` = ×2, `50` = ×0.5),
//! the same convention as the rest of the rule tables. A [`MultiplierStack`]
//! multiplies a base value by every factor and floors **once** at the end,
//! so the order in which statuses were applied never changes the result.

/// Multiplicative factor stored as a percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Multiplier(pub u32);

impl Multiplier {
    /// ×1.
    pub const IDENTITY: Self = Self(100);

    /// ×2.
    pub const DOUBLE: Self = Self(200);

    /// ×0.5.
    pub const HALF: Self = Self(50);

    /// Creates a multiplier from a percentage (150 = ×1.5).
    pub const fn percent(percent: u32) -> Self {
        Self(percent)
    }

    /// Creates a whole-number multiplier (3 = ×3).
    pub const fn times(factor: u32) -> Self {
        Self(factor.saturating_mul(100))
    }

    /// Factor as a floating point value.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Scales a value by this multiplier, flooring the result.
    pub fn scale(self, value: i64) -> i64 {
        MultiplierStack::single(self).apply(value)
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Product of any number of multipliers, applied with a single floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiplierStack {
    factors: Vec<Multiplier>,
}

impl MultiplierStack {
    /// Create a new empty stack (×1).
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    fn single(multiplier: Multiplier) -> Self {
        Self {
            factors: vec![multiplier],
        }
    }

    /// Add a factor to the stack.
    pub fn add(&mut self, multiplier: Multiplier) {
        self.factors.push(multiplier);
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Get the number of factors in the stack.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Combined factor as a floating point value.
    pub fn factor(&self) -> f64 {
        self.factors.iter().map(|m| m.as_f64()).product()
    }

    /// Multiplies `base` by every factor and floors the result.
    ///
    /// # Formula
    /// ```text
    /// result = floor(base × Π(m_i) / 100^n)
    /// ```
    ///
    /// The product is computed in exact integer arithmetic; only if it would
    /// overflow 128 bits does the stack fall back to floating point.
    pub fn apply(&self, base: i64) -> i64 {
        match self.exact(base) {
            Some(value) => value,
            None => (base as f64 * self.factor()).floor() as i64,
        }
    }

    fn exact(&self, base: i64) -> Option<i64> {
        let mut numerator = i128::from(base);
        let mut denominator: i128 = 1;
        for multiplier in &self.factors {
            numerator = numerator.checked_mul(i128::from(multiplier.0))?;
            denominator = denominator.checked_mul(100)?;
        }
        i64::try_from(numerator.div_euclid(denominator)).ok()
    }
}

impl FromIterator<Multiplier> for MultiplierStack {
    fn from_iter<I: IntoIterator<Item = Multiplier>>(iter: I) -> Self {
        Self {
            factors: iter.into_iter().collect(),
        }
    }
}

impl Extend<Multiplier> for MultiplierStack {
    fn extend<I: IntoIterator<Item = Multiplier>>(&mut self, iter: I) {
        self.factors.extend(iter);
    }
}
