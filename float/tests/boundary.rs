//! Behaviour at the edges of the exponent range and around halfway points.

use core::cmp::Ordering;
use mantis_float::{
    clear_flags, flags, set_emax, set_emin, Flags, Float, Round, Sign, EMAX_MAX, EMIN_MIN,
};

mod util;
use util::{from_u64, pow2};

fn with_range(emin: i64, emax: i64, f: impl FnOnce()) {
    set_emin(emin);
    set_emax(emax);
    f();
    set_emin(EMIN_MIN);
    set_emax(EMAX_MAX);
    clear_flags();
}

#[test]
fn test_underflow_to_zero_directed() {
    with_range(-100, 100, || {
        clear_flags();
        let a = pow2(12, -101); // the smallest normal value, 2^(emin-1)
        let mut r = a.clone();
        let tern = r.div_pow2(1, Round::Zero);
        assert!(r.is_zero());
        assert!(!r.signbit());
        assert_eq!(tern, Ordering::Less);
        assert!(flags().contains(Flags::UNDERFLOW | Flags::INEXACT));
    });
}

#[test]
fn test_underflow_nearest_at_half_boundary() {
    // exactly half the smallest normal: nearest is downgraded to toward
    // zero and flushes instead of rounding up to the boundary
    with_range(-100, 100, || {
        clear_flags();
        let a = pow2(12, -101);
        let mut r = a.clone();
        let tern = r.div_pow2(1, Round::HalfEven);
        assert!(r.is_zero());
        assert_eq!(tern, Ordering::Less);
        assert!(flags().contains(Flags::UNDERFLOW | Flags::INEXACT));
    });
}

#[test]
fn test_underflow_nearest_rounds_to_min_normal() {
    // 0.75 * 2^(emin-1) is above the midpoint and rounds away to the
    // smallest normal under nearest
    with_range(-100, 100, || {
        clear_flags();
        let a = util::scaled(12, 3, -52); // 3 * 2^-52
        let b = pow2(12, -51);
        let mut r = Float::new(12);
        // a * b = 3 * 2^-103 = 0.75 * 2^-101
        let tern = r.mul(&a, &b, Round::HalfEven);
        assert!(r.is_regular());
        assert!(r == pow2(12, -101));
        assert_eq!(tern, Ordering::Greater);
        assert!(flags().contains(Flags::UNDERFLOW | Flags::INEXACT));
    });
}

#[test]
fn test_overflow_directed_saturates() {
    with_range(-100, 100, || {
        clear_flags();
        let big = pow2(8, 99);
        let mut r = Float::new(8);
        // 2^99 * 2^99 = 2^198 overflows; toward zero it saturates finite
        let tern = r.mul(&big, &big, Round::Zero);
        assert!(r.is_regular());
        assert_eq!(tern, Ordering::Less);
        assert!(flags().contains(Flags::OVERFLOW | Flags::INEXACT));
        // the saturated value is the predecessor of +inf
        let mut top = Float::inf(8, Sign::Positive);
        top.next_below();
        assert!(r == top);

        clear_flags();
        let tern = r.mul(&big, &big, Round::HalfEven);
        assert!(r.is_inf());
        assert_eq!(tern, Ordering::Greater);
        assert!(flags().contains(Flags::OVERFLOW | Flags::INEXACT));
    });
}

#[test]
fn test_negative_overflow_modes() {
    with_range(-100, 100, || {
        clear_flags();
        let mut big = pow2(8, 99);
        big.negate();
        let pos = pow2(8, 99);
        let mut r = Float::new(8);
        // -(2^198): toward +inf truncates to the most negative finite value
        let tern = r.mul(&big, &pos, Round::Up);
        assert!(r.is_regular());
        assert!(r.signbit());
        assert_eq!(tern, Ordering::Greater);

        // away from zero gives -inf
        let tern = r.mul(&big, &pos, Round::Away);
        assert!(r.is_inf());
        assert!(r.signbit());
        assert_eq!(tern, Ordering::Less);
    });
}

#[test]
fn test_halfway_tie_sticks_to_even() {
    for p in [7usize, 24, 53, 113] {
        clear_flags();
        let one = from_u64(p, 1);
        let half_ulp = pow2(p, -(p as i64));
        let mut r = Float::new(p);
        let tern = r.add(&one, &half_ulp, Round::HalfEven);
        assert!(r == one);
        assert_eq!(tern, Ordering::Less);
        assert!(flags().contains(Flags::INEXACT));

        // one sticky bit below the halfway point tips the sum upward
        let mut sum = Float::new(2 * p + 16);
        let t = sum.add(&half_ulp, &pow2(p, -(p as i64) - 6), Round::Zero);
        assert_eq!(t, Ordering::Equal);
        let mut s = Float::new(p);
        let tern = s.add(&one, &sum, Round::HalfEven);
        assert_eq!(tern, Ordering::Greater);
        let mut expect = Float::new(p);
        let te = expect.add(&one, &pow2(p, 1 - p as i64), Round::HalfEven);
        assert_eq!(te, Ordering::Equal);
        assert!(s == expect);
        clear_flags();
    }
}
