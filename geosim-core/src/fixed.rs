//! Fixed-point arithmetic for deterministic simulation.
//!
//! Every simulation quantity is stored as a [`Fixed`] so that turn
//! transitions replay bit-identically across platforms. Floats are only
//! allowed at the parse and display edges, never in turn logic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Fixed-point value with scale 10000.
///
/// Decimal values are stored as scaled integers: 0.5 → 5000, 1.0 → 10000.
/// Arithmetic stays in the integer domain; i64 leaves ample headroom for
/// aggregates such as global GDP.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Fixed(pub i64);

impl Fixed {
    /// Scale factor: 10000 = 1.0
    pub const SCALE: i64 = 10000;

    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(10_000);
    pub const HALF: Fixed = Fixed(5_000);
    pub const HUNDRED: Fixed = Fixed(1_000_000);

    /// Create from a raw scaled value (e.g. 12000 → 1.2).
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Fixed(raw)
    }

    /// Create from an integer (e.g. 5 → 50000).
    #[inline]
    pub const fn from_int(v: i64) -> Self {
        Fixed(v * Self::SCALE)
    }

    /// Convert from f32 (scenario/parse layer only, never in turn logic).
    ///
    /// Rounds for cross-platform stability; NaN and infinities map to zero.
    #[inline]
    pub fn from_f32(v: f32) -> Self {
        if !v.is_finite() {
            return Fixed::ZERO;
        }
        let scaled = v * Self::SCALE as f32;
        if scaled > i64::MAX as f32 {
            return Fixed(i64::MAX);
        }
        if scaled < i64::MIN as f32 {
            return Fixed(i64::MIN);
        }
        Fixed(scaled.round() as i64)
    }

    /// Convert to f32 (display only).
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Convert to f64 (display and RNG thresholds).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Raw scaled value.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Fixed-point multiply: (a * b) / SCALE.
    #[inline]
    pub const fn mul(self, other: Fixed) -> Fixed {
        Fixed(self.0 * other.0 / Self::SCALE)
    }

    /// Fixed-point divide: (a * SCALE) / b.
    ///
    /// Division by zero yields zero rather than panicking; callers that
    /// care must check the divisor themselves.
    #[inline]
    pub const fn div(self, other: Fixed) -> Fixed {
        if other.0 == 0 {
            return Fixed::ZERO;
        }
        Fixed(self.0 * Self::SCALE / other.0)
    }

    #[inline]
    pub const fn abs(self) -> Fixed {
        Fixed(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Fixed) -> Fixed {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn max(self, other: Fixed) -> Fixed {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    /// Clamp into [lo, hi].
    #[inline]
    pub fn clamp(self, lo: Fixed, hi: Fixed) -> Fixed {
        self.max(lo).min(hi)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fixed({})", self.to_f64())
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let a = Fixed::from_int(3);
        let b = Fixed::from_f32(1.5);

        assert_eq!(a + b, Fixed::from_f32(4.5));
        assert_eq!(a - b, Fixed::from_f32(1.5));
        assert_eq!(a.mul(b), Fixed::from_f32(4.5));
        assert_eq!(a.div(b), Fixed::from_int(2));
    }

    #[test]
    fn test_div_by_zero_is_zero() {
        assert_eq!(Fixed::from_int(10).div(Fixed::ZERO), Fixed::ZERO);
    }

    #[test]
    fn test_from_f32_guards() {
        assert_eq!(Fixed::from_f32(f32::NAN), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(f32::INFINITY), Fixed::ZERO);
        assert_eq!(Fixed::from_f32(0.5), Fixed::HALF);
    }

    #[test]
    fn test_clamp() {
        let lo = Fixed::from_int(5);
        let hi = Fixed::from_int(95);
        assert_eq!(Fixed::from_int(120).clamp(lo, hi), hi);
        assert_eq!(Fixed::from_int(-3).clamp(lo, hi), lo);
        assert_eq!(Fixed::from_int(50).clamp(lo, hi), Fixed::from_int(50));
    }

    #[test]
    fn test_ordering_and_abs() {
        assert!(Fixed::from_f32(-2.5) < Fixed::ZERO);
        assert_eq!(Fixed::from_f32(-2.5).abs(), Fixed::from_f32(2.5));
    }
}
