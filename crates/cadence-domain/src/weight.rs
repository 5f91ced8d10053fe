//! Weight value object

use std::fmt;

/// A per-category weight in `[0, 100]`
///
/// Raw input is never rejected: [`Weight::clamped`] pins it to the nearest
/// bound and truncates to the integer slider step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u8);

impl Weight {
    /// Lower bound
    pub const MIN: Weight = Weight(0);

    /// Upper bound
    pub const MAX: Weight = Weight(100);

    /// Weight used when a source has no profile ("balanced, unknown")
    pub const DEFAULT: Weight = Weight(50);

    /// Create a weight from an in-range integer
    ///
    /// Returns `None` above 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Create a weight from raw input, clamping into range
    ///
    /// `NaN` maps to [`Weight::MIN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cadence_domain::Weight;
    ///
    /// assert_eq!(Weight::clamped(150.0).value(), 100);
    /// assert_eq!(Weight::clamped(-3.0).value(), 0);
    /// assert_eq!(Weight::clamped(42.9).value(), 42);
    /// ```
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        Self(raw.clamp(0.0, 100.0).trunc() as u8)
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Weight> for u32 {
    fn from(weight: Weight) -> Self {
        weight.0 as u32
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Weight::new(100), Some(Weight::MAX));
        assert_eq!(Weight::new(0), Some(Weight::MIN));
        assert_eq!(Weight::new(101), None);
    }

    #[test]
    fn test_clamped_bounds() {
        assert_eq!(Weight::clamped(1e9), Weight::MAX);
        assert_eq!(Weight::clamped(f64::NEG_INFINITY), Weight::MIN);
        assert_eq!(Weight::clamped(f64::NAN), Weight::MIN);
        assert_eq!(Weight::clamped(99.99).value(), 99);
    }

    #[test]
    fn test_default_is_balanced() {
        assert_eq!(Weight::default().value(), 50);
    }
}
