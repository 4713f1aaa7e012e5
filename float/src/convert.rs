//! Assignment and conversion from machine integers.

use crate::{
    add::set_signed,
    repr::{Float, Kind},
    round::{Round, WORD_BITS},
};
use core::cmp::Ordering;
use mantis_base::{ternary_ordering, Sign};
use mantis_limb::Word;

impl Float {
    /// self = src, rounded to the precision of self.
    ///
    /// Assigning a NaN raises the NAN flag.
    pub fn assign(&mut self, src: &Float, rnd: Round) -> Ordering {
        match src.kind {
            Kind::Nan => {
                self.sign = src.sign;
                self.set_nan();
                Ordering::Equal
            }
            Kind::Inf => {
                self.set_inf_kind(src.sign);
                Ordering::Equal
            }
            Kind::Zero => {
                self.set_zero_kind(src.sign);
                Ordering::Equal
            }
            Kind::Regular => ternary_ordering(set_signed(self, src, src.sign, rnd)),
        }
    }

    /// self = v, rounded to the precision of self.
    pub fn assign_u64(&mut self, v: u64, rnd: Round) -> Ordering {
        if v == 0 {
            self.set_zero_kind(Sign::Positive);
            return Ordering::Equal;
        }
        ternary_ordering(assign_mag(self, Sign::Positive, v, rnd))
    }

    /// self = v, rounded to the precision of self.
    pub fn assign_i64(&mut self, v: i64, rnd: Round) -> Ordering {
        if v == 0 {
            self.set_zero_kind(Sign::Positive);
            return Ordering::Equal;
        }
        let sign = Sign::from(v < 0);
        ternary_ordering(assign_mag(self, sign, v.unsigned_abs(), rnd))
    }
}

fn assign_mag(dest: &mut Float, sign: Sign, v: u64, rnd: Round) -> i32 {
    debug_assert!(v != 0);
    let bits = (64 - v.leading_zeros()) as usize;
    let aligned = v << (64 - bits);

    // left aligned limbs of the 64-bit quantity, least significant first
    const U64_LIMBS: usize = 64 / WORD_BITS;
    let mut src = [0 as Word; U64_LIMBS];
    for (i, limb) in src.iter_mut().enumerate() {
        *limb = (aligned >> (i * WORD_BITS)) as Word;
    }
    dest.set_rounded(sign, &src, 64, bits as i128, rnd)
}
