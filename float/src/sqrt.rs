//! Square root.

use crate::{
    repr::{Float, Kind},
    round::{Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::{ternary_ordering, Sign};
use mantis_limb::{root, shift, Buffer, MemoryAllocation};

impl Float {
    /// self = sqrt(u), correctly rounded.
    ///
    /// `sqrt(-0)` is `-0`; the square root of a negative number is NaN.
    pub fn sqrt(&mut self, u: &Float, rnd: Round) -> Ordering {
        ternary_ordering(sqrt_impl(self, u, rnd))
    }
}

fn sqrt_impl(dest: &mut Float, u: &Float, rnd: Round) -> i32 {
    match u.kind {
        Kind::Nan => {
            dest.set_nan();
            return 0;
        }
        Kind::Inf => {
            if u.sign.is_negative() {
                dest.set_nan();
            } else {
                dest.set_inf_kind(Sign::Positive);
            }
            return 0;
        }
        Kind::Zero => {
            // the square root of a signed zero keeps the sign
            dest.set_zero_kind(u.sign);
            return 0;
        }
        Kind::Regular => {
            if u.sign.is_negative() {
                dest.set_nan();
                return 0;
            }
        }
    }

    // work on one limb more than the destination so a round bit always
    // exists inside the computed root
    let n1 = dest.mant.len() + 1;
    let un = u.mant.len();

    let mut arg = Buffer::allocate(2 * n1);
    let take = un.min(2 * n1);
    arg[2 * n1 - take..].copy_from_slice(&u.mant[un - take..]);
    let mut sticky = u.mant[..un - take].iter().any(|&w| w != 0);

    // make the exponent even so the square root halves it exactly; the
    // half bit shifted out joins the fractional tail
    let (arg_exp, odd) = if u.exp % 2 == 0 {
        (u.exp, false)
    } else {
        (u.exp + 1, true)
    };
    if odd {
        let out = shift::shr_in_place(&mut arg, 1);
        sticky |= out != 0;
    }
    let er = arg_exp / 2;

    let mut s = Buffer::allocate(n1);
    let mut allocation = MemoryAllocation::new(root::memory_requirement_sqrt_rem(n1));
    let rem_hi = root::sqrt_rem(&mut s, &mut arg, &mut allocation.memory());
    sticky |= rem_hi != 0 || arg[..n1].iter().any(|&w| w != 0);

    if sticky {
        s[0] |= 1;
    }
    dest.set_rounded(Sign::Positive, &s, n1 * WORD_BITS, er as i128, rnd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_u64(prec: usize, v: u64) -> Float {
        let mut x = Float::new(prec);
        assert_eq!(x.assign_u64(v, Round::HalfEven), Ordering::Equal);
        x
    }

    #[test]
    fn test_sqrt_perfect_square() {
        let u = from_u64(10, 9);
        let mut r = Float::new(10);
        assert_eq!(r.sqrt(&u, Round::HalfEven), Ordering::Equal);
        assert!(r == from_u64(10, 3));
    }

    #[test]
    fn test_sqrt_directed_neighbours() {
        // the toward-zero and away-from-zero roots of a non-square differ
        // by exactly one ulp
        let u = from_u64(24, 2);
        let mut down = Float::new(24);
        assert_eq!(down.sqrt(&u, Round::Zero), Ordering::Less);
        let mut up = Float::new(24);
        assert_eq!(up.sqrt(&u, Round::Away), Ordering::Greater);
        let mut step = down.clone();
        step.next_above();
        assert!(step == up);
    }

    #[test]
    fn test_sqrt_odd_exponent() {
        // 5 sits in an odd binade, so a half bit moves into the fraction
        let u = from_u64(24, 5);
        let mut r = Float::new(24);
        assert!(r.sqrt(&u, Round::HalfEven) != Ordering::Equal);
        // 2 < sqrt(5) < 3
        assert!(r > from_u64(24, 2));
        assert!(r < from_u64(24, 3));
        assert_eq!(r.exponent(), Some(2));
    }
}
