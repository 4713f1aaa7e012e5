//! Rounding to an integer.

use crate::{
    add::set_signed,
    context::{self, Flags},
    repr::{Float, Kind},
    round::{self, Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::{ternary_ordering, Sign};
use mantis_limb::{add, math, primitive::WORD_HIGH_BIT, Buffer};

impl Float {
    /// self = u rounded to an integer in the direction of `rnd`, then
    /// rounded again to the precision of self if the integer does not fit.
    ///
    /// The ternary value describes the combined operation against `u`.
    pub fn rint(&mut self, u: &Float, rnd: Round) -> Ordering {
        ternary_ordering(rint_impl(self, u, rnd, false))
    }

    /// self = largest integer not above u.
    pub fn floor(&mut self, u: &Float) -> Ordering {
        ternary_ordering(rint_impl(self, u, Round::Down, false))
    }

    /// self = smallest integer not below u.
    pub fn ceil(&mut self, u: &Float) -> Ordering {
        ternary_ordering(rint_impl(self, u, Round::Up, false))
    }

    /// self = u with the fractional part discarded.
    pub fn trunc(&mut self, u: &Float) -> Ordering {
        ternary_ordering(rint_impl(self, u, Round::Zero, false))
    }

    /// self = nearest integer to u, ties rounded away from zero.
    pub fn round(&mut self, u: &Float) -> Ordering {
        ternary_ordering(rint_impl(self, u, Round::HalfEven, true))
    }
}

/// Integer-stage rounding decision; `half_away` replaces the even rule by
/// ties-away-from-zero.
fn int_round_dir(
    rnd: Round,
    half_away: bool,
    sign: Sign,
    rb: bool,
    sb: bool,
    even: bool,
) -> (bool, i32) {
    if half_away {
        if !rb && !sb {
            (false, 0)
        } else if rb {
            (true, sign.as_int())
        } else {
            (false, -sign.as_int())
        }
    } else {
        round::round_dir(rnd, sign, rb, sb, even)
    }
}

fn rint_impl(dest: &mut Float, u: &Float, rnd: Round, half_away: bool) -> i32 {
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

    // already an integer: a plain precision-rounded copy
    if u.exp >= u.prec as i64 {
        return set_signed(dest, u, sign, rnd);
    }

    if u.exp <= 0 {
        // |u| < 1: the integer part is 0 and the whole mantissa is fraction
        let rb = u.exp == 0;
        let sb = if rb {
            !u.is_mantissa_power_of_two()
        } else {
            true
        };
        let (inc, tern) = int_round_dir(rnd, half_away, sign, rb, sb, true);
        if inc {
            dest.set_min_normal(0);
            dest.sign = sign;
            return context::check_range(dest, 1, tern, rnd);
        }
        dest.set_zero_kind(sign);
        context::raise_flags(Flags::INEXACT);
        return tern;
    }

    // 0 < exp < prec: split the mantissa at the integer boundary
    let un = u.mant.len();
    let total = un * WORD_BITS;
    let cut = total - u.exp as usize; // index of the integer part's last bit
    let mut scratch = Buffer::allocate(un);
    scratch.copy_from_slice(&u.mant);

    let rb = round::get_bit(&scratch, cut - 1);
    let sb = round::any_bit_set(&scratch, 0, cut - 1);
    let even = !round::get_bit(&scratch, cut);

    // clear the fraction
    let cut_limb = cut / WORD_BITS;
    let cut_bit = (cut % WORD_BITS) as u32;
    scratch[..cut_limb].fill(0);
    if cut_bit > 0 {
        scratch[cut_limb] &= !math::ones_word(cut_bit);
    }

    let (inc, t1) = int_round_dir(rnd, half_away, sign, rb, sb, even);
    let mut iexp = u.exp as i128;
    if inc && add::add_word_in_place(&mut scratch[cut_limb..], 1 << cut_bit) {
        // crossed a power of two
        debug_assert!(scratch.iter().all(|&w| w == 0));
        *scratch.last_mut().unwrap() = WORD_HIGH_BIT;
        iexp += 1;
    }

    // second stage: fit the integer into the destination precision
    let t2 = dest.set_rounded(sign, &scratch, total, iexp, rnd);
    if t2 != 0 {
        t2
    } else {
        if t1 != 0 {
            context::raise_flags(Flags::INEXACT);
        }
        t1
    }
}
