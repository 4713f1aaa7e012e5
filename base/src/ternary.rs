//! The ternary value of a rounded operation.
//!
//! Every rounded operation reports whether the stored result equals the
//! exact mathematical value (`Equal`), is above it (`Greater`) or below it
//! (`Less`). Internally the rounding kernel works with a small signed
//! integer so that the exact-halfway case of rounding to nearest can be
//! tagged with magnitude 2; the public surface collapses this to
//! [Ordering].

use core::cmp::Ordering;

/// Convert an internal integer ternary value to an [Ordering].
///
/// The magnitude of `t` carries no public meaning, only its sign does.
#[inline]
pub fn ternary_ordering(t: i32) -> Ordering {
    t.cmp(&0)
}
