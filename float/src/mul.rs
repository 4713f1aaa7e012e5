//! Multiplication and squaring.

use crate::{
    add::shl_dword_pair,
    repr::{Float, Kind},
    round::{self, Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::ternary_ordering;
use mantis_limb::{
    math, mul,
    primitive::{double_word, extend_word, split_dword},
    shift, short, Buffer, MemoryAllocation,
};

/// Smallest limb count for which the short product is attempted.
const MUL_SHORT_THRESHOLD: usize = 12;

impl Float {
    /// self = a * b, correctly rounded.
    pub fn mul(&mut self, a: &Float, b: &Float, rnd: Round) -> Ordering {
        ternary_ordering(mul_impl(self, a, b, rnd))
    }

    /// self = a * a, correctly rounded.
    pub fn sqr(&mut self, a: &Float, rnd: Round) -> Ordering {
        ternary_ordering(mul_impl(self, a, a, rnd))
    }
}

fn mul_impl(dest: &mut Float, a: &Float, b: &Float, rnd: Round) -> i32 {
    let sign = a.sign * b.sign;
    match (a.kind, b.kind) {
        (Kind::Nan, _) | (_, Kind::Nan) => {
            dest.set_nan();
            return 0;
        }
        (Kind::Inf, Kind::Zero) | (Kind::Zero, Kind::Inf) => {
            dest.set_nan();
            return 0;
        }
        (Kind::Inf, _) | (_, Kind::Inf) => {
            dest.set_inf_kind(sign);
            return 0;
        }
        (Kind::Zero, _) | (_, Kind::Zero) => {
            dest.set_zero_kind(sign);
            return 0;
        }
        (Kind::Regular, Kind::Regular) => {}
    }

    let (an, bn) = (a.mant.len(), b.mant.len());
    let ax = a.exp as i128 + b.exp as i128;

    // single and double limb products through machine words
    if an == 1 && bn == 1 {
        let p = extend_word(a.mant[0]) * extend_word(b.mant[0]);
        let b1 = (p >> (2 * WORD_BITS - 1)) as usize;
        let aligned = p << (1 - b1 as u32);
        let (lo, hi) = split_dword(aligned);
        return dest.set_rounded(sign, &[lo, hi], 2 * WORD_BITS, ax - 1 + b1 as i128, rnd);
    }
    if an == 2 && bn == 2 {
        let (lo, hi) = math::mul_add_carry_dword(
            double_word(a.mant[0], a.mant[1]),
            double_word(b.mant[0], b.mant[1]),
            0,
        );
        let b1 = (hi >> (2 * WORD_BITS as u32 - 1)) as usize;
        let (hi, lo) = shl_dword_pair(hi, lo, 1 - b1 as u32);
        let (w0, w1) = split_dword(lo);
        let (w2, w3) = split_dword(hi);
        return dest.set_rounded(sign, &[w0, w1, w2, w3], 4 * WORD_BITS, ax - 1 + b1 as i128, rnd);
    }

    // try Mulders' short product on the top limbs for wide precisions
    let n = dest.mant.len() + 1;
    if an >= n && bn >= n && n >= MUL_SHORT_THRESHOLD {
        // correct bits of the approximation: the short product plus the
        // operand truncation together stay within 2(n+2) ulps of B^n
        let err_base = n * WORD_BITS - math::ceil_log2(n + 2) as usize - 2;
        if dest.prec + 3 <= err_base {
            let same = core::ptr::eq(a, b);
            let mut allocation = MemoryAllocation::new(if same {
                short::memory_requirement_sqrhigh(n)
            } else {
                short::memory_requirement_mulhigh(n)
            });
            let mut tmp = Buffer::allocate(2 * n);
            if same {
                short::sqrhigh(&mut tmp, &a.mant[an - n..], &mut allocation.memory());
            } else {
                short::mulhigh(
                    &mut tmp,
                    &a.mant[an - n..],
                    &b.mant[bn - n..],
                    &mut allocation.memory(),
                );
            }
            let b1 = (tmp[2 * n - 1] >> (WORD_BITS - 1)) as usize;
            if b1 == 0 {
                // only the top n+1 limbs of the short product are meaningful
                let out = shift::shl_in_place(&mut tmp[n - 1..], 1);
                debug_assert!(out == 0);
            }
            let src = &tmp[n - 1..];
            let err = err_base + b1;
            if round::round_p(src, err, dest.prec, rnd == Round::HalfEven) {
                let iexp = ax - 1 + b1 as i128;
                return dest.set_rounded(sign, src, (n + 1) * WORD_BITS, iexp, rnd);
            }
        }
    }

    // exact full product
    let k = an + bn;
    let mut prod = Buffer::allocate(k);
    let mut allocation = MemoryAllocation::new(mul::memory_requirement_up_to(an.min(bn)));
    mul::mul(&mut prod, &a.mant, &b.mant, &mut allocation.memory());

    let b1 = (prod[k - 1] >> (WORD_BITS - 1)) as usize;
    if b1 == 0 {
        let out = shift::shl_in_place(&mut prod, 1);
        debug_assert!(out == 0);
    }
    dest.set_rounded(sign, &prod, k * WORD_BITS, ax - 1 + b1 as i128, rnd)
}
