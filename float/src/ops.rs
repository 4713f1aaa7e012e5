//! Operator sugar.
//!
//! The operators allocate a result at the larger operand precision and use
//! the thread default rounding mode; use the explicit methods to control
//! destination precision, rounding and to observe the ternary value.

use crate::{context, repr::Float};
use core::ops::{Add, Div, Mul, Neg, Sub};

impl Neg for Float {
    type Output = Float;

    #[inline]
    fn neg(mut self) -> Float {
        self.negate();
        self
    }
}

impl Neg for &Float {
    type Output = Float;

    #[inline]
    fn neg(self) -> Float {
        let mut r = self.clone();
        r.negate();
        r
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Float> for &Float {
            type Output = Float;

            fn $method(self, rhs: &Float) -> Float {
                let mut r = Float::new(self.precision().max(rhs.precision()));
                Float::$method(&mut r, self, rhs, context::default_rounding());
                r
            }
        }

        impl $trait<Float> for Float {
            type Output = Float;

            #[inline]
            fn $method(self, rhs: Float) -> Float {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);
impl_binop!(Div, div);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Round;

    #[test]
    fn test_operator_sugar() {
        let mut a = Float::new(20);
        a.assign_u64(6, Round::HalfEven);
        let mut b = Float::new(24);
        b.assign_u64(7, Round::HalfEven);

        let s = &a + &b;
        assert_eq!(s.precision(), 24);
        let mut expect = Float::new(24);
        expect.assign_u64(13, Round::HalfEven);
        assert!(s == expect);

        let p = &a * &b;
        expect.assign_u64(42, Round::HalfEven);
        assert!(p == expect);

        let d = &p / &b;
        expect.assign_u64(6, Round::HalfEven);
        assert!(d == expect);

        let n = -&d;
        expect.assign_i64(-6, Round::HalfEven);
        assert!(n == expect);

        let z = &d - &d;
        assert!(z.is_zero());
    }
}
