//! Cube root.

use crate::{
    repr::{Float, Kind},
    round::{Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::ternary_ordering;
use mantis_limb::{root, shift, Buffer};

impl Float {
    /// self = cbrt(u), correctly rounded.
    ///
    /// The cube root is an odd function: the result carries the sign of the
    /// operand.
    pub fn cbrt(&mut self, u: &Float, rnd: Round) -> Ordering {
        ternary_ordering(cbrt_impl(self, u, rnd))
    }
}

fn cbrt_impl(dest: &mut Float, u: &Float, rnd: Round) -> i32 {
    match u.kind {
        Kind::Nan => {
            dest.set_nan();
            return 0;
        }
        Kind::Inf => {
            dest.set_inf_kind(u.sign);
            return 0;
        }
        Kind::Zero => {
            dest.set_zero_kind(u.sign);
            return 0;
        }
        Kind::Regular => {}
    }
    let sign = u.sign;
    let n1 = dest.mant.len() + 1;
    let an = 3 * n1;
    let un = u.mant.len();

    let mut arg = Buffer::allocate(an);
    let take = un.min(an);
    arg[an - take..].copy_from_slice(&u.mant[un - take..]);
    let mut sticky = u.mant[..un - take].iter().any(|&w| w != 0);

    // align the exponent on a multiple of three, pushing spare bits into
    // the fractional tail
    let e = u.exp - (an * WORD_BITS) as i64;
    let r = (-e).rem_euclid(3) as u32;
    if r != 0 {
        let out = shift::shr_in_place(&mut arg, r);
        sticky |= out != 0;
    }
    let g = (e + r as i64) / 3;

    let (k, rem_nonzero) = root::cbrt_rem(&arg);
    sticky |= rem_nonzero;

    // left align the root
    let kn = k.len();
    let mut src = Buffer::allocate(kn);
    src.copy_from_slice(&k);
    let z = src[kn - 1].leading_zeros();
    if z > 0 {
        let out = shift::shl_in_place(&mut src, z);
        debug_assert!(out == 0);
    }
    let kbits = kn * WORD_BITS - z as usize;

    if sticky {
        src[0] |= 1;
    }
    let iexp = g as i128 + kbits as i128;
    dest.set_rounded(sign, &src, kn * WORD_BITS, iexp, rnd)
}
