//! Division.

use crate::{
    context::{self, Flags},
    repr::{Float, Kind},
    round::{self, Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::{ternary_ordering, Sign};
use mantis_limb::{
    div,
    fast_divide::{FastDivideNormalized, FastDivideNormalized2},
    math,
    primitive::{extend_word, highest_dword, split_dword, WORD_HIGH_BIT},
    shift, short, Buffer, DoubleWord, MemoryAllocation, Word,
};

/// Smallest limb count for which the short division is attempted.
const DIV_SHORT_THRESHOLD: usize = 12;

impl Float {
    /// self = u / v, correctly rounded.
    pub fn div(&mut self, u: &Float, v: &Float, rnd: Round) -> Ordering {
        ternary_ordering(div_impl(self, u, v, rnd))
    }
}

fn div_impl(dest: &mut Float, u: &Float, v: &Float, rnd: Round) -> i32 {
    let sign = u.sign * v.sign;
    match (u.kind, v.kind) {
        (Kind::Nan, _) | (_, Kind::Nan) => {
            dest.set_nan();
            return 0;
        }
        (Kind::Inf, Kind::Inf) | (Kind::Zero, Kind::Zero) => {
            dest.set_nan();
            return 0;
        }
        (Kind::Inf, _) => {
            dest.set_inf_kind(sign);
            return 0;
        }
        (_, Kind::Inf) => {
            dest.set_zero_kind(sign);
            return 0;
        }
        (Kind::Zero, _) => {
            dest.set_zero_kind(sign);
            return 0;
        }
        (_, Kind::Zero) => {
            // finite non-zero over zero
            context::raise_flags(Flags::DIVBY0);
            dest.set_inf_kind(sign);
            return 0;
        }
        (Kind::Regular, Kind::Regular) => {}
    }

    // power of two divisor: only the exponent moves
    if v.is_mantissa_power_of_two() {
        let sprec = u.mant.len() * WORD_BITS;
        let iexp = u.exp as i128 - v.exp as i128 + 1;
        return dest.set_rounded(sign, &u.mant, sprec, iexp, rnd);
    }

    let (un, vn) = (u.mant.len(), v.mant.len());
    if dest.mant.len() == 1 && un == 1 && vn == 1 {
        return divsp1(dest, u, v, sign, rnd);
    }

    // try Mulders' short division for wide precisions
    let n = dest.mant.len() + 1;
    if vn >= n && n >= DIV_SHORT_THRESHOLD {
        let err = n * WORD_BITS - math::ceil_log2(2 * n + 2) as usize - 2;
        if dest.prec + 3 <= err {
            if let Some(t) = div_short(dest, u, v, sign, n, err, rnd) {
                return t;
            }
        }
    }

    div_exact(dest, u, v, sign, rnd)
}

/// Single-limb division through a double word dividend.
fn divsp1(dest: &mut Float, u: &Float, v: &Float, sign: Sign, rnd: Round) -> i32 {
    let u0 = u.mant[0];
    let v0 = v.mant[0];

    let num: DoubleWord = extend_word(u0) << WORD_BITS;
    let q = num / extend_word(v0);
    let r = num % extend_word(v0);

    // u0/v0 is in (1/2, 2), so q has W or W+1 bits
    let (aligned, iexp) = if q >> WORD_BITS != 0 {
        (q << (WORD_BITS - 1), u.exp as i128 - v.exp as i128 + 1)
    } else {
        (q << WORD_BITS, u.exp as i128 - v.exp as i128)
    };
    let (mut lo, hi) = split_dword(aligned);
    if r != 0 {
        lo |= 1;
    }
    dest.set_rounded(sign, &[lo, hi], 2 * WORD_BITS, iexp, rnd)
}

/// Approximate quotient by [short::divhigh] when the uncertainty window
/// does not straddle a rounding boundary. Returns None to fall back.
fn div_short(
    dest: &mut Float,
    u: &Float,
    v: &Float,
    sign: Sign,
    n: usize,
    err: usize,
    rnd: Round,
) -> Option<i32> {
    let (un, vn) = (u.mant.len(), v.mant.len());

    // top 2n limbs of u (zero padded) and top n limbs of v; the divhigh
    // error bound absorbs both truncations
    let mut nscratch = Buffer::allocate(2 * n);
    let take = un.min(2 * n);
    nscratch[2 * n - take..].copy_from_slice(&u.mant[un - take..]);
    let vtop = &v.mant[vn - n..];

    let mut qp = Buffer::allocate(n);
    let mut allocation = MemoryAllocation::new(short::memory_requirement_divhigh(n));
    let qh = short::divhigh(&mut qp, &mut nscratch, vtop, &mut allocation.memory());

    let iexp = if qh != 0 {
        let out = shift::shr_in_place_with_carry(&mut qp, 1, WORD_HIGH_BIT);
        if out != 0 {
            qp[0] |= 1;
        }
        u.exp as i128 - v.exp as i128 + 1
    } else {
        if qp[n - 1] & WORD_HIGH_BIT == 0 {
            // borderline approximation, take the exact path
            return None;
        }
        u.exp as i128 - v.exp as i128
    };

    if !round::round_p(&qp, err, dest.prec, rnd == Round::HalfEven) {
        return None;
    }
    Some(dest.set_rounded(sign, &qp, n * WORD_BITS, iexp, rnd))
}

/// Exact quotient path: divide the zero-extended dividend in full and read
/// the sticky bit off the remainder.
fn div_exact(dest: &mut Float, u: &Float, v: &Float, sign: Sign, rnd: Round) -> i32 {
    let (un, vn) = (u.mant.len(), v.mant.len());
    let qn = dest.mant.len() + 2;

    // dividend = mantissa of u extended by k zero limbs, so the quotient
    // always carries at least qn limbs
    let k = (vn + qn).saturating_sub(un);
    let ulen = un + k;
    let mut work = Buffer::allocate(ulen);
    work[k..].copy_from_slice(&u.mant);

    if vn == 1 {
        // the divisor mantissa is normalized already
        let fast_div = FastDivideNormalized::new(v.mant[0]);
        let rem = div::fast_div_by_word_in_place(&mut work, 0, fast_div);
        // the quotient of two normalized mantissas is in (1/2, 2): the top
        // limb of the full quotient is the overflow bit
        let qh = work[ulen - 1];
        debug_assert!(qh <= 1);
        let (quot, _) = work.split_at_mut(ulen - 1);
        finish_quotient(dest, quot, qh != 0, rem != 0, u, v, sign, rnd)
    } else {
        let fast_div = FastDivideNormalized2::new(highest_dword(&v.mant));
        let qh = div::div_rem_in_place(&mut work, &v.mant, fast_div);
        let rem_nonzero = work[..vn].iter().any(|&w| w != 0);
        let quot = &mut work[vn..];
        finish_quotient(dest, quot, qh, rem_nonzero, u, v, sign, rnd)
    }
}

/// Normalize a full quotient (value `qh * B^len + quot` in `(B^len / 2,
/// 2 B^len)`), fold the sticky information and round.
#[allow(clippy::too_many_arguments)]
fn finish_quotient(
    dest: &mut Float,
    quot: &mut [Word],
    qh: bool,
    rem_nonzero: bool,
    u: &Float,
    v: &Float,
    sign: Sign,
    rnd: Round,
) -> i32 {
    let (iexp, dropped) = if qh {
        let out = shift::shr_in_place_with_carry(quot, 1, WORD_HIGH_BIT);
        (u.exp as i128 - v.exp as i128 + 1, out != 0)
    } else {
        debug_assert!(quot[quot.len() - 1] & WORD_HIGH_BIT != 0);
        (u.exp as i128 - v.exp as i128, false)
    };

    if rem_nonzero || dropped {
        quot[0] |= 1;
    }
    let qbits = quot.len() * WORD_BITS;
    dest.set_rounded(sign, quot, qbits, iexp, rnd)
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
    fn test_div_exact_single_limb() {
        let u = from_u64(10, 10);
        let v = from_u64(10, 5);
        let mut r = Float::new(10);
        assert_eq!(r.div(&u, &v, Round::HalfEven), Ordering::Equal);
        assert!(r == from_u64(10, 2));
    }

    #[test]
    fn test_div_power_of_two_divisor() {
        let u = from_u64(10, 7);
        let v = from_u64(10, 2);
        let mut r = Float::new(10);
        assert_eq!(r.div(&u, &v, Round::HalfEven), Ordering::Equal);
        assert_eq!(r.exponent(), Some(2));
        let mut expect = from_u64(10, 7);
        let _ = expect.div_pow2(1, Round::HalfEven);
        assert!(r == expect);
    }

    #[test]
    fn test_div_inexact_directions() {
        // 1/10 is not representable in binary
        let u = from_u64(20, 1);
        let v = from_u64(20, 10);
        let mut down = Float::new(20);
        assert_eq!(down.div(&u, &v, Round::Zero), Ordering::Less);
        let mut up = Float::new(20);
        assert_eq!(up.div(&u, &v, Round::Away), Ordering::Greater);
        let mut diff = up.clone();
        diff.next_below();
        assert!(diff == down);
    }

    #[test]
    fn test_div_wide_operands() {
        // many-limb exact quotient: (x * y) / y == x
        let x = from_u64(300, 123_456_789);
        let y = from_u64(300, 987_654_321);
        let mut prod = Float::new(300);
        assert_eq!(prod.mul(&x, &y, Round::HalfEven), Ordering::Equal);
        let mut q = Float::new(300);
        assert_eq!(q.div(&prod, &y, Round::HalfEven), Ordering::Equal);
        assert!(q == x);
    }
}
