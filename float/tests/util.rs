//! Shared helpers for the integration tests.
#![allow(dead_code)]

use mantis_float::{Float, Round};

/// A float with the value of a small integer.
pub fn from_u64(prec: usize, v: u64) -> Float {
    let mut x = Float::new(prec);
    let tern = x.assign_u64(v, Round::HalfEven);
    assert_eq!(tern, core::cmp::Ordering::Equal, "inexact test constant");
    x
}

/// A float with the value of a small signed integer.
pub fn from_i64(prec: usize, v: i64) -> Float {
    let mut x = Float::new(prec);
    let tern = x.assign_i64(v, Round::HalfEven);
    assert_eq!(tern, core::cmp::Ordering::Equal, "inexact test constant");
    x
}

/// The power of two `2^k` at the given precision.
pub fn pow2(prec: usize, k: i64) -> Float {
    let mut x = from_u64(prec, 1);
    let tern = x.mul_pow2(k, Round::HalfEven);
    assert_eq!(tern, core::cmp::Ordering::Equal, "power of two out of range");
    x
}

/// `v * 2^k` at the given precision.
pub fn scaled(prec: usize, v: u64, k: i64) -> Float {
    let mut x = from_u64(prec, v);
    let tern = x.mul_pow2(k, Round::HalfEven);
    assert_eq!(tern, core::cmp::Ordering::Equal, "scaled constant out of range");
    x
}

/// All rounding modes, for exhaustive mode sweeps.
pub const MODES: [Round; 5] = [
    Round::Zero,
    Round::Away,
    Round::Up,
    Round::Down,
    Round::HalfEven,
];
