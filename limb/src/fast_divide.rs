//! Divide by a prearranged divisor quickly, using multiplication by the
//! reciprocal.
//!
//! Möller, Granlund, "Improved division by invariant integers".

use crate::{
    arch::word::{DoubleWord, Word},
    math,
    primitive::{double_word, extend_word, split_dword},
};

/// Divide a DoubleWord by a prearranged normalized divisor.
///
/// Assumes the quotient fits in a Word.
#[derive(Clone, Copy)]
pub struct FastDivideNormalized {
    // Top bit must be 1.
    divisor: Word,

    // floor ((B^2 - 1) / divisor) - B, where B = 2^WORD_BITS
    m: Word,
}

impl FastDivideNormalized {
    /// Calculate the inverse m > 0 of a normalized divisor (fit in a word), such that
    ///
    /// (m + B) * divisor = B^2 - k for some 1 <= k <= divisor
    #[inline]
    pub const fn invert_word(divisor: Word) -> Word {
        let (m, _hi) = split_dword(DoubleWord::MAX / extend_word(divisor));
        debug_assert!(_hi == 1);
        m
    }

    /// Initialize from a given normalized divisor.
    ///
    /// The divisor must have top bit of 1.
    #[inline]
    pub const fn new(divisor: Word) -> Self {
        debug_assert!(divisor.leading_zeros() == 0);
        Self {
            divisor,
            m: Self::invert_word(divisor),
        }
    }

    /// (a / divisor, a % divisor) for a single-word dividend.
    #[inline]
    pub const fn div_rem_word(&self, a: Word) -> (Word, Word) {
        if a < self.divisor {
            (0, a)
        } else {
            // the divisor is normalized, so the quotient can only be 1
            (1, a - self.divisor)
        }
    }

    /// (a / divisor, a % divisor). The quotient must fit in a single word,
    /// i.e. the high word of a must be less than the divisor.
    #[inline]
    pub const fn div_rem(&self, a: DoubleWord) -> (Word, Word) {
        let (a_lo, a_hi) = split_dword(a);
        debug_assert!(a_hi < self.divisor);

        // The approximate quotient is (m + B) * a / B^2, calculated as
        // q1 = (m * a_hi + a) / B. The true quotient is q1 or q1 + 1,
        // with the remainder in (q0 - B, B + q0) after taking q1 + 1.
        let (q0, q1) = split_dword(extend_word(self.m) * extend_word(a_hi) + a);
        let q = q1.wrapping_add(1);
        let r = a_lo.wrapping_sub(q.wrapping_mul(self.divisor));

        // if r mod B > q0 the guess was too large; fix in a branch-free way
        let (_, decrease) = split_dword(extend_word(q0).wrapping_sub(extend_word(r)));
        let mut q = q.wrapping_add(decrease);
        let mut r = r.wrapping_add(decrease & self.divisor);

        // now 0 <= r < 2 * divisor; the final fix step is unlikely
        if r >= self.divisor {
            q += 1;
            r -= self.divisor;
        }

        (q, r)
    }
}

/// Divide a 3-Word number by a prearranged normalized DoubleWord divisor.
///
/// Assumes the quotient fits in a Word.
#[derive(Clone, Copy)]
pub struct FastDivideNormalized2 {
    // Top bit must be 1.
    divisor: DoubleWord,

    // floor ((B^3 - 1) / divisor) - B, where B = 2^WORD_BITS
    m: Word,
}

impl FastDivideNormalized2 {
    /// Calculate the inverse m > 0 of a normalized divisor (fit in a DoubleWord), such that
    ///
    /// (m + B) * divisor = B^3 - k for some 1 <= k <= divisor
    #[inline]
    pub const fn invert_double_word(divisor: DoubleWord) -> Word {
        let (d0, d1) = split_dword(divisor);
        let mut v = FastDivideNormalized::invert_word(d1);
        // B^2 - d1 <= (B + v) * d1 < B^2

        let (mut p, c) = d1.wrapping_mul(v).overflowing_add(d0);
        if c {
            v -= 1;
            if p >= d1 {
                v -= 1;
                p -= d1;
            }
            p = p.wrapping_sub(d1);
        }
        // B^2 - d1 <= (B + v) * d1 + d0 < B^2

        let (t0, t1) = split_dword(extend_word(v) * extend_word(d0));
        let (p, c) = p.overflowing_add(t1);
        if c {
            v -= 1;
            if double_word(t0, p) >= divisor {
                v -= 1;
            }
        }

        v
    }

    /// Initialize from a given normalized divisor.
    ///
    /// The divisor must have top bit of 1.
    #[inline]
    pub const fn new(divisor: DoubleWord) -> Self {
        debug_assert!(divisor.leading_zeros() == 0);
        Self {
            divisor,
            m: Self::invert_double_word(divisor),
        }
    }

    #[inline]
    pub const fn div_rem_dword(&self, a: DoubleWord) -> (DoubleWord, DoubleWord) {
        if a < self.divisor {
            (0, a)
        } else {
            // the divisor is normalized, so the quotient can only be 1
            (1, a - self.divisor)
        }
    }

    /// The input a is arranged as (lo, mi & hi).
    /// The output is (a / divisor, a % divisor); the high part of a must be
    /// less than the divisor.
    pub const fn div_rem(&self, a_lo: Word, a_hi: DoubleWord) -> (Word, DoubleWord) {
        debug_assert!(a_hi < self.divisor);
        let (a1, a2) = split_dword(a_hi);
        let (d0, d1) = split_dword(self.divisor);

        // The first guess of the quotient is q1 + 1 where
        // q1 = (m * a2 + a_hi) / B; the remainder then satisfies
        // r >= d iff r1 >= q0 (with the values computed below).
        let (q0, q1) = split_dword(extend_word(self.m) * extend_word(a2) + a_hi);
        let r1 = a1.wrapping_sub(q1.wrapping_mul(d1));
        let t = extend_word(d0) * extend_word(q1);
        let r = double_word(a_lo, r1)
            .wrapping_sub(t)
            .wrapping_sub(self.divisor);

        // branch-free: decrease = -1 if r1 (mod B) < q0, else 0
        let (_, r1) = split_dword(r);
        let (_, decrease) = split_dword(extend_word(r1).wrapping_sub(extend_word(q0)));
        let mut q1 = q1.wrapping_sub(decrease);
        let mut r = r.wrapping_add(double_word(!decrease, !decrease) & self.divisor);

        // the final fix step is unlikely
        if r >= self.divisor {
            q1 += 1;
            r -= self.divisor;
        }

        (q1, r)
    }

    /// Divide a 4-word number by a double word divisor.
    ///
    /// The output is (a / divisor, a % divisor); a_hi must be less than the
    /// divisor.
    pub const fn div_rem_double(&self, a_lo: DoubleWord, a_hi: DoubleWord) -> (DoubleWord, DoubleWord) {
        let (a0, a1) = split_dword(a_lo);
        let (q1, r1) = self.div_rem(a1, a_hi);
        let (q0, r0) = self.div_rem(a0, r1);
        (double_word(q0, q1), r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::WORD_BITS;
    use rand::prelude::*;

    #[test]
    fn test_fast_divide_normalized() {
        let fast_div = FastDivideNormalized::new(Word::MAX);
        assert_eq!(fast_div.div_rem(0), (0, 0));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200000 {
            let d = rng.gen_range(Word::MAX / 2 + 1..=Word::MAX);
            let q = rng.gen();
            let r = rng.gen_range(0..d);
            let (a0, a1) = math::mul_add_carry(q, d, r);
            let fast_div = FastDivideNormalized::new(d);
            assert_eq!(fast_div.div_rem(double_word(a0, a1)), (q, r));
        }
    }

    #[test]
    fn test_fast_divide_normalized2() {
        let d = DoubleWord::MAX;
        let fast_div = FastDivideNormalized2::new(d);
        assert_eq!(fast_div.div_rem(0, 0), (0, 0));

        let mut rng = StdRng::seed_from_u64(1);
        // 3by2 division
        for _ in 0..100000 {
            let d = rng.gen_range(DoubleWord::MAX / 2 + 1..=DoubleWord::MAX);
            let r = rng.gen_range(0..d);
            let q = rng.gen();

            let (d0, d1) = split_dword(d);
            let (r0, r1) = split_dword(r);
            let (a0, c) = math::mul_add_carry(q, d0, r0);
            let (a1, a2) = math::mul_add_2carry(q, d1, r1, c);
            let a12 = double_word(a1, a2);

            let fast_div = FastDivideNormalized2::new(d);
            assert_eq!(fast_div.div_rem(a0, a12), (q, r), "failed at {:?} / {}", (a0, a12), d);
        }

        // 4by2 division
        for _ in 0..20000 {
            let d = rng.gen_range(DoubleWord::MAX / 2 + 1..=DoubleWord::MAX);
            let q = rng.gen();
            let r = rng.gen_range(0..d);
            let (a_lo, a_hi) = math::mul_add_carry_dword(q, d, r);
            let fast_div = FastDivideNormalized2::new(d);
            assert_eq!(fast_div.div_rem_double(a_lo, a_hi), (q, r));
        }
    }

    #[test]
    fn test_invert_word() {
        // (m + B) * d = B^2 - k, 1 <= k <= d
        let d = 1 << (WORD_BITS - 1);
        assert_eq!(FastDivideNormalized::invert_word(d), Word::MAX);
    }
}
