//! Mulders' short product, square and division.
//!
//! These routines trade exactness for speed: they approximate the high half
//! of a product or quotient with a proved error bound in ulps of the top
//! output limb. Callers compose them with a roundability test and fall back
//! to the exact kernels when the uncertainty window straddles a rounding
//! boundary.
//!
//! References:
//! * Short Division of Long Integers, David Harvey and Paul Zimmermann,
//!   ARITH-20, 2011.
//! * Quadratic Short Division, Juraj Sukop and Paul Zimmermann, 2024.

use crate::{
    add,
    arch::word::Word,
    cmp, div,
    fast_divide::{FastDivideNormalized, FastDivideNormalized2},
    math,
    memory::{self, Memory},
    mul,
    primitive::{double_word, highest_dword},
    shift,
};
use core::cmp::Ordering;
use static_assertions::const_assert;

/// Split points for [mulhigh]: -1 = exact full product, 0 = basecase,
/// otherwise the size of the exactly computed top part.
#[rustfmt::skip]
static MULHIGH_KTAB: [i16; 36] = [
    -1, -1, -1, -1,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
    12, 12, 13, 14, 15, 15, 16, 17, 18, 18, 19, 20, 21, 21, 22, 23,
    24, 24, 25, 26,
];
const_assert!(MULHIGH_KTAB.len() >= 8);

/// Split points for [sqrhigh], same convention as [MULHIGH_KTAB].
#[rustfmt::skip]
static SQRHIGH_KTAB: [i16; 36] = [
    -1, -1, -1, -1,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17,
    18, 18, 19, 19,
];
const_assert!(SQRHIGH_KTAB.len() > 2);

/// Split points for [divhigh]: 0 = basecase, otherwise the number of
/// quotient limbs obtained by an exact division of the top parts.
#[rustfmt::skip]
static DIVHIGH_KTAB: [i16; 32] = [
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, 10,
    10, 11, 12, 12, 13, 14, 14, 15, 16, 16, 17, 18, 18, 19, 20, 20,
];
const_assert!(DIVHIGH_KTAB.len() >= 15);

#[inline]
fn mulhigh_split(n: usize) -> isize {
    if n < MULHIGH_KTAB.len() {
        MULHIGH_KTAB[n] as isize
    } else {
        (3 * (n / 4)) as isize
    }
}

#[inline]
fn sqrhigh_split(n: usize) -> isize {
    if n < SQRHIGH_KTAB.len() {
        SQRHIGH_KTAB[n] as isize
    } else {
        ((n + 4) / 2) as isize
    }
}

#[inline]
fn divhigh_split(n: usize) -> usize {
    if n < DIVHIGH_KTAB.len() {
        DIVHIGH_KTAB[n] as usize
    } else {
        2 * (n / 3)
    }
}

/// Memory requirement in words for [mulhigh] with n input limbs.
pub fn memory_requirement_mulhigh(n: usize) -> usize {
    match mulhigh_split(n) {
        -1 => mul::memory_requirement_up_to(n),
        0 => 0,
        k => {
            let k = k as usize;
            mul::memory_requirement_up_to(k).max(memory_requirement_mulhigh(n - k))
        }
    }
}

/// Memory requirement in words for [sqrhigh] with n input limbs.
pub fn memory_requirement_sqrhigh(n: usize) -> usize {
    match sqrhigh_split(n) {
        -1 => mul::memory_requirement_up_to(n),
        0 => 0,
        k => {
            let k = k as usize;
            mul::memory_requirement_up_to(k)
                .max(memory_requirement_mulhigh(n - k))
        }
    }
}

/// Memory requirement in words for [divhigh] with n divisor limbs.
pub fn memory_requirement_divhigh(n: usize) -> usize {
    let k = divhigh_split(n);
    if k == 0 {
        0
    } else {
        let l = n - k;
        memory::add_capacity(
            2 * l + memory_requirement_mulhigh(l),
            memory_requirement_divhigh(l),
        )
    }
}

/// Put in rp[n-1..2n] an approximation of the n high limbs of `up * vp`.
///
/// The error is less than n ulps of rp[n], and the approximation is always
/// less than or equal to the truncated full product. Only rp[n-1..] is
/// written.
fn mulhigh_basecase(rp: &mut [Word], up: &[Word], vp: &[Word], n: usize) {
    debug_assert!(rp.len() == 2 * n && up.len() == n && vp.len() == n);

    let rp = &mut rp[n - 1..];
    // we neglect up[0..n-2] * vp[0], which is less than B^n
    let (lo, hi) = math::mul_add_carry(up[n - 1], vp[0], 0);
    rp[0] = lo;
    rp[1] = hi;
    for i in 1..n {
        // here we neglect up[0..n-i-2] * vp[i], which is less than B^n too
        rp[i + 1] = mul::add_mul_word_same_len_in_place(&mut rp[..i + 1], vp[i], &up[n - 1 - i..]);
    }
    // in total we neglect less than n*B^n, i.e. n ulps of rp[n]
}

/// Put in rp[n..2n] an approximation of the n high limbs of `np * mp`, with
/// `np.len() == mp.len() == n` and `rp.len() == 2n`.
///
/// The error is less than `(n + 2)` ulps of rp[n], and the approximation is
/// always less than or equal to the truncated full product.
pub fn mulhigh(rp: &mut [Word], np: &[Word], mp: &[Word], memory: &mut Memory) {
    let n = np.len();
    debug_assert!(mp.len() == n && rp.len() == 2 * n);

    let k = mulhigh_split(n);
    debug_assert!(k == -1 || k == 0 || (k as usize >= (n + 4) / 2 && (k as usize) < n));
    if k == -1 {
        // result is exact, no error
        mul::mul(rp, np, mp, memory);
    } else if k == 0 {
        mulhigh_basecase(rp, np, mp, n);
    } else {
        let k = k as usize;
        let l = n - k;

        // exact product of the top k limbs, fills rp[2l..2n]
        mul::mul(&mut rp[2 * l..], &np[l..], &mp[l..], memory);
        // first off-diagonal short product, fills rp[l-1..2l]
        mulhigh(&mut rp[..2 * l], &np[k..], &mp[..l], memory);
        let mut cy = Word::from(add_high_part(rp, n, l));
        // second off-diagonal short product
        mulhigh(&mut rp[..2 * l], &np[..l], &mp[k..], memory);
        cy += Word::from(add_high_part(rp, n, l));
        // propagate the accumulated carries
        let overflow = add::add_word_in_place(&mut rp[n + l..], cy);
        debug_assert!(!overflow);
    }
}

/// rp[n-1..n+l] += rp[l-1..2l], returning the carry.
///
/// The two ranges do not overlap because l is at most (n - 4) / 2.
fn add_high_part(rp: &mut [Word], n: usize, l: usize) -> bool {
    debug_assert!(2 * l <= n - 1);
    let (lo, hi) = rp.split_at_mut(n - 1);
    add::add_same_len_in_place(&mut hi[..l + 1], &lo[l - 1..2 * l])
}

/// Put in rp[n..2n] an approximation of the n high limbs of `np * np`.
///
/// The error is less than `(n + 2)` ulps of rp[n].
pub fn sqrhigh(rp: &mut [Word], np: &[Word], memory: &mut Memory) {
    let n = np.len();
    debug_assert!(rp.len() == 2 * n);

    let k = sqrhigh_split(n);
    debug_assert!(k == -1 || k == 0 || (k as usize >= (n + 4) / 2 && (k as usize) < n));
    if k == -1 {
        mul::mul(rp, np, np, memory);
    } else if k == 0 {
        mulhigh_basecase(rp, np, np, n);
    } else {
        let k = k as usize;
        let l = n - k;

        // exact square of the top k limbs, fills rp[2l..2n]
        mul::mul(&mut rp[2 * l..], &np[l..], &np[l..], memory);
        // the off-diagonal product counts twice
        mulhigh(&mut rp[..2 * l], &np[..l], &np[k..], memory);
        let mut cy = shift::shl_in_place(&mut rp[l - 1..2 * l], 1);
        cy += Word::from(add_high_part(rp, n, l));
        let overflow = add::add_word_in_place(&mut rp[n + l..], cy);
        debug_assert!(!overflow);
    }
}

/// Put in qp an n-limb approximation of `np / dp`, where np has 2n limbs
/// and dp has n normalized limbs (top bit set); the most significant limb
/// of the quotient (0 or 1) is the return value. Clobbers np.
///
/// The approximate quotient q' satisfies `q - 2(n-1) < q' <= q + 4` where q
/// is the true n-limb quotient.
///
/// Implements Algorithm BasecaseShortDiv with a 3/2 quotient selection.
fn divhigh_basecase(qp: &mut [Word], np: &mut [Word], dp: &[Word]) -> Word {
    let n = dp.len();
    debug_assert!(n >= 2 && qp.len() == n && np.len() == 2 * n);

    let qh = if cmp::cmp_same_len(&np[n..], dp) != Ordering::Less {
        let borrow = add::sub_same_len_in_place(&mut np[n..], dp);
        debug_assert!(!borrow);
        1
    } else {
        0
    };

    // now the top n limbs of np are less than D, hence np[2n-1] <= dp[n-1]
    let d1 = dp[n - 1];
    let d0 = dp[n - 2];
    let dinv2 = FastDivideNormalized2::new(double_word(d0, d1));
    let dinv1 = FastDivideNormalized::new(d1);

    // the window np[base-1..base+j] slides down as quotient limbs are
    // produced; the divisor drops its lowest limb in step
    let base = n;
    let mut j = n;
    while j > 0 {
        let top = np[base + j - 1];
        // divide by the upper two limbs of the divisor, except in the last
        // iteration where only one non-zero limb remains
        let mut q2 = if top > d1 || (top == d1 && np[base + j - 2] >= d0) {
            Word::MAX
        } else if j > 1 {
            dinv2
                .div_rem(np[base + j - 3], double_word(np[base + j - 2], top))
                .0
        } else if top == d1 {
            Word::MAX
        } else {
            dinv1.div_rem(double_word(np[base - 1], top)).0
        };

        // q0 is the value that must vanish from the top limb; if it does
        // not match, the partial quotient was off by one in either direction
        let dlo = &dp[n - j..];
        let mut q0 = mul::sub_mul_word_same_len_in_place(&mut np[base - 1..base + j - 1], q2, dlo);
        if q0 > np[base + j - 1] {
            // q2 was too large
            q0 -= Word::from(add::add_same_len_in_place(
                &mut np[base - 1..base + j - 1],
                dlo,
            ));
            q2 -= 1;
        }
        if q0 < np[base + j - 1] {
            // early exit: the partial quotient saturated, fill with ones
            for w in qp[..j].iter_mut() {
                *w = Word::MAX;
            }
            break;
        }
        debug_assert!(q0 == np[base + j - 1]);
        j -= 1;
        qp[j] = q2;
    }

    qh
}

/// Put in qp an n-limb approximation of `np / dp`, where np has 2n limbs
/// and dp has n normalized limbs; the most significant limb of the quotient
/// (0 or 1) is the return value. Clobbers np.
///
/// The approximate quotient q' satisfies `q - 2(n-1) < q' <= q + 4`.
pub fn divhigh(qp: &mut [Word], np: &mut [Word], dp: &[Word], memory: &mut Memory) -> Word {
    let n = dp.len();
    debug_assert!(n >= 2 && qp.len() == n && np.len() == 2 * n);
    debug_assert!(dp[n - 1].leading_zeros() == 0);

    let k = divhigh_split(n);
    if k == 0 {
        return divhigh_basecase(qp, np, dp);
    }
    debug_assert!((n + 4) / 2 <= k && k < n - 1);
    let l = n - k;

    // divide the most significant 2k limbs of N by the most significant k
    // limbs of D, exactly
    let fast_div = FastDivideNormalized2::new(highest_dword(dp));
    let mut qh = Word::from(div::div_rem_in_place(&mut np[2 * l..], &dp[l..], fast_div));
    // quotient to qp[l..], remainder stays at np[2l..2l+k]
    qp[l..].copy_from_slice(&np[2 * l + k..]);

    // subtract high(Q1) * D0 where Q1 = qh*B^k + qp[l..] and D0 = dp[..l]
    {
        let (tp, mut memory) = memory.allocate_slice_fill(2 * l, 0);
        mulhigh(tp, &qp[k..], &dp[..l], &mut memory);
        let mut cy = Word::from(sub_at(np, n, &tp[l..]));
        if qh != 0 {
            cy += Word::from(sub_at(np, n, &dp[..l]));
        }
        while cy > 0 {
            // Q1 was too large: subtract 1 from Q1 and add D back
            qh -= Word::from(add::sub_word_in_place(&mut qp[l..], 1));
            cy -= Word::from(add::add_same_len_in_place(&mut np[l..l + n], dp));
        }
    }

    // it remains {np, n+l} to divide by the most significant l limbs of D
    let cy = divhigh(&mut qp[..l], &mut np[k..k + 2 * l], &dp[k..], memory);
    qh + Word::from(add::add_word_in_place(&mut qp[l..], cy))
}

/// np[at..at+rhs.len()] -= rhs, returning the borrow.
#[inline]
fn sub_at(np: &mut [Word], at: usize, rhs: &[Word]) -> bool {
    add::sub_same_len_in_place(&mut np[at..at + rhs.len()], rhs)
}
