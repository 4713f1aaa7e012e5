//! Reciprocal square root, the in-crate client of the correct-rounding
//! loop.

use crate::{
    context::{self, ExpRangeGuard, Flags},
    repr::{Float, Kind},
    round::{self, Round, WORD_BITS},
    ziv::ZivPrec,
};
use core::cmp::Ordering;
use mantis_base::{ternary_ordering, Sign};

impl Float {
    /// self = 1 / sqrt(u), correctly rounded.
    pub fn rsqrt(&mut self, u: &Float, rnd: Round) -> Ordering {
        ternary_ordering(rsqrt_impl(self, u, rnd))
    }
}

fn rsqrt_impl(dest: &mut Float, u: &Float, rnd: Round) -> i32 {
    match u.kind {
        Kind::Nan => {
            dest.set_nan();
            return 0;
        }
        Kind::Inf => {
            if u.sign.is_negative() {
                dest.set_nan();
            } else {
                dest.set_zero_kind(Sign::Positive);
            }
            return 0;
        }
        Kind::Zero => {
            // 1 / sqrt(±0) = +∞ with a zero divide
            context::raise_flags(Flags::DIVBY0);
            dest.set_inf_kind(Sign::Positive);
            return 0;
        }
        Kind::Regular => {
            if u.sign.is_negative() {
                dest.set_nan();
                return 0;
            }
        }
    }

    // an even power of two inverts to an exact power of two; everything
    // else is irrational, so the loop below terminates
    if u.is_mantissa_power_of_two() && (u.exp - 1) % 2 == 0 {
        dest.set_min_normal(0);
        dest.sign = Sign::Positive;
        let iexp = 1 - (u.exp as i128 - 1) / 2;
        return context::check_range(dest, iexp, 0, rnd);
    }

    let p = dest.prec;
    let mut one = Float::new(1);
    one.assign_u64(1, Round::Zero);

    let (mant, iexp) = {
        let _guard = ExpRangeGuard::new();
        let mut wp = ZivPrec::new(p);
        loop {
            let w = wp.get();
            let mut s = Float::new(w);
            s.sqrt(u, Round::HalfEven);
            let mut t = Float::new(w);
            t.div(&one, &s, Round::HalfEven);

            // two half-ulp roundings at precision w leave at least w - 3
            // correct leading bits in t
            let err = w.saturating_sub(3);
            let good = if rnd == Round::Faithful {
                err >= p + 2
            } else {
                round::round_p(&t.mant, err, p, rnd == Round::HalfEven)
            };
            if good {
                break (t.mant, t.exp);
            }
            wp.bump();
        }
    };

    dest.set_rounded(Sign::Positive, &mant, mant.len() * WORD_BITS, iexp as i128, rnd)
}
