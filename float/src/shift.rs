//! Multiplication by powers of two (pure exponent arithmetic).

use crate::{
    context,
    repr::{Float, Kind},
    round::Round,
};
use core::cmp::Ordering;
use mantis_base::ternary_ordering;

impl Float {
    /// self = self * 2^k; exact unless the exponent leaves the range.
    pub fn mul_pow2(&mut self, k: i64, rnd: Round) -> Ordering {
        ternary_ordering(mul_pow2_impl(self, k as i128, rnd))
    }

    /// self = self / 2^k; exact unless the exponent leaves the range.
    pub fn div_pow2(&mut self, k: i64, rnd: Round) -> Ordering {
        ternary_ordering(mul_pow2_impl(self, -(k as i128), rnd))
    }
}

fn mul_pow2_impl(x: &mut Float, k: i128, rnd: Round) -> i32 {
    match x.kind {
        Kind::Nan => {
            x.set_nan();
            0
        }
        Kind::Inf | Kind::Zero => 0,
        Kind::Regular => {
            let iexp = x.exp as i128 + k;
            context::check_range(x, iexp, 0, rnd)
        }
    }
}
