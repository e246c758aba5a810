//! Clamped simulation values.
//!
//! One clamping policy everywhere: every percentage-like indicator is a
//! [`BoundedFixed`] created via [`new_percent`], and updates can never
//! escape the [0, 100] range. Unbounded quantities (gdp, treasury, debt)
//! stay plain `Fixed`.

use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};

/// A Fixed value clamped to a closed range.
///
/// Used for: support/legitimacy scores (0 to 100), crisis severity
/// (0 to 100), timeline divergence (0 to 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedFixed {
    value: Fixed,
    min: Fixed,
    max: Fixed,
}

impl BoundedFixed {
    pub const fn new(value: Fixed, min: Fixed, max: Fixed) -> Self {
        let value = if value.raw() < min.raw() {
            min
        } else if value.raw() > max.raw() {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    pub const fn get(&self) -> Fixed {
        self.value
    }

    pub const fn min(&self) -> Fixed {
        self.min
    }

    pub const fn max(&self) -> Fixed {
        self.max
    }

    pub fn add(&mut self, delta: Fixed) {
        self.value = (self.value + delta).clamp(self.min, self.max);
    }

    pub fn set(&mut self, value: Fixed) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Position within the range as 0.0..=1.0. Returns 0 if max == min.
    pub fn ratio(&self) -> Fixed {
        let range = self.max - self.min;
        if range == Fixed::ZERO {
            return Fixed::ZERO;
        }
        (self.value - self.min).div(range)
    }
}

/// Percentage-like indicator clamped to [0, 100].
pub type Percent = BoundedFixed;

/// A score in [0, 100] with the given starting value.
pub const fn new_percent(initial: i64) -> Percent {
    BoundedFixed::new(Fixed::from_int(initial), Fixed::ZERO, Fixed::HUNDRED)
}

/// Timeline divergence: 0 (on the historical path) to 100.
pub const fn new_divergence() -> BoundedFixed {
    BoundedFixed::new(Fixed::ZERO, Fixed::ZERO, Fixed::HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_initial_value() {
        let b = new_percent(130);
        assert_eq!(b.get(), Fixed::HUNDRED);
        let b = BoundedFixed::new(Fixed::from_int(-5), Fixed::ZERO, Fixed::HUNDRED);
        assert_eq!(b.get(), Fixed::ZERO);
    }

    #[test]
    fn test_add_clamps() {
        let mut b = new_percent(90);
        b.add(Fixed::from_int(5));
        assert_eq!(b.get(), Fixed::from_int(95));

        b.add(Fixed::from_int(20)); // clamps at 100
        assert_eq!(b.get(), Fixed::HUNDRED);

        b.add(Fixed::from_int(-300)); // clamps at 0
        assert_eq!(b.get(), Fixed::ZERO);
    }

    #[test]
    fn test_ratio() {
        let b = new_percent(50);
        assert_eq!(b.ratio(), Fixed::HALF);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_percent_updates_stay_within_bounds(
            initial in 0..100i64,
            updates in proptest::collection::vec(-500..500i64, 1..20)
        ) {
            let mut b = new_percent(initial);
            for update in updates {
                b.add(Fixed::from_int(update));
                prop_assert!(b.get() >= Fixed::ZERO);
                prop_assert!(b.get() <= Fixed::HUNDRED);
            }
        }
    }
}
