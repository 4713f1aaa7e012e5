//! Comparisons.

use crate::{
    add::cmp_abs_regular,
    context::{self, Flags},
    repr::{Float, Kind},
};
use core::cmp::Ordering;

/// Value comparison that treats -0 and +0 as equal and reports NaN as None.
fn cmp_values(a: &Float, b: &Float) -> Option<Ordering> {
    if a.is_nan() || b.is_nan() {
        return None;
    }
    let ord = match (a.kind, b.kind) {
        (Kind::Zero, Kind::Zero) => Ordering::Equal,
        (Kind::Zero, _) => {
            if b.sign.is_negative() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (_, Kind::Zero) => {
            if a.sign.is_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        _ => {
            if a.sign != b.sign {
                a.sign.cmp(&b.sign)
            } else {
                let mag = cmp_mag(a, b);
                if a.sign.is_negative() {
                    mag.reverse()
                } else {
                    mag
                }
            }
        }
    };
    Some(ord)
}

/// Magnitude comparison of two non-zero, non-NaN values.
fn cmp_mag(a: &Float, b: &Float) -> Ordering {
    match (a.kind, b.kind) {
        (Kind::Inf, Kind::Inf) => Ordering::Equal,
        (Kind::Inf, _) => Ordering::Greater,
        (_, Kind::Inf) => Ordering::Less,
        _ => cmp_abs_regular(a, b),
    }
}

impl Float {
    /// Compare two values; `None` (with the ERANGE flag raised) when either
    /// operand is NaN. Zeros compare equal regardless of sign.
    pub fn try_cmp(&self, other: &Float) -> Option<Ordering> {
        let ord = cmp_values(self, other);
        if ord.is_none() {
            context::raise_flags(Flags::ERANGE);
        }
        ord
    }

    /// Compare the magnitudes; `None` (with the ERANGE flag raised) when
    /// either operand is NaN.
    pub fn try_cmp_abs(&self, other: &Float) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            context::raise_flags(Flags::ERANGE);
            return None;
        }
        let ord = match (self.kind, other.kind) {
            (Kind::Zero, Kind::Zero) => Ordering::Equal,
            (Kind::Zero, _) => Ordering::Less,
            (_, Kind::Zero) => Ordering::Greater,
            _ => cmp_mag(self, other),
        };
        Some(ord)
    }
}

impl PartialEq for Float {
    /// NaN is not equal to anything, including itself; -0 equals +0.
    #[inline]
    fn eq(&self, other: &Float) -> bool {
        cmp_values(self, other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Float {
    /// NaN is unordered; no flags are raised (use [Float::try_cmp] to
    /// observe NaN comparisons through the ERANGE flag).
    #[inline]
    fn partial_cmp(&self, other: &Float) -> Option<Ordering> {
        cmp_values(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Round;
    use mantis_base::Sign;

    #[test]
    fn test_cmp_specials() {
        let nan = Float::new(10);
        let pos = {
            let mut x = Float::new(10);
            x.assign_u64(3, Round::HalfEven);
            x
        };
        let pinf = Float::inf(10, Sign::Positive);
        let ninf = Float::inf(10, Sign::Negative);
        let pzero = Float::zero(10, Sign::Positive);
        let nzero = Float::zero(10, Sign::Negative);

        assert!(nan.partial_cmp(&pos).is_none());
        assert!(nan != nan);
        assert_eq!(pzero.partial_cmp(&nzero), Some(Ordering::Equal));
        assert!(pzero == nzero);
        assert!(pinf > pos);
        assert!(ninf < nzero);
        assert!(pos > pzero);
        assert!(pos < pinf);
        assert_eq!(pinf.partial_cmp(&pinf), Some(Ordering::Equal));
    }

    #[test]
    fn test_cmp_regulars() {
        let mut a = Float::new(10);
        let mut b = Float::new(30);
        a.assign_u64(100, Round::HalfEven);
        b.assign_u64(101, Round::HalfEven);
        assert!(a < b);

        let mut na = Float::new(10);
        na.assign_i64(-100, Round::HalfEven);
        let mut nb = Float::new(10);
        nb.assign_i64(-101, Round::HalfEven);
        assert!(na > nb);
        assert_eq!(na.try_cmp_abs(&a), Some(Ordering::Equal));
        assert!(nb.try_cmp_abs(&a) == Some(Ordering::Greater));
    }

    #[test]
    fn test_nan_raises_erange() {
        context::clear_flags();
        let nan = Float::new(5);
        let zero = Float::zero(5, Sign::Positive);
        assert!(nan.try_cmp(&zero).is_none());
        assert!(context::flags().contains(Flags::ERANGE));
        context::clear_flags();
    }
}
