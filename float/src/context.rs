//! Thread local state: exponent range, status flags, defaults, and the
//! final range check applied to every rounded result.

use crate::{
    repr::{Exp, Float, Kind},
    round::Round,
};
use core::cell::Cell;
use core::fmt;
use core::ops::{BitOr, BitOrAssign};
use mantis_base::Sign;

/// The largest exponent any thread may select.
pub const EMAX_MAX: Exp = (1 << 62) - 1;
/// The smallest exponent any thread may select.
pub const EMIN_MIN: Exp = -EMAX_MAX;

/// Default precision for results created by operator sugar.
pub const PRECISION_DEFAULT: usize = 53;

/// A bitset of sticky status flags.
///
/// Operations only ever set flags; the client reads and clears them
/// explicitly through [flags] and [clear_flags].
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Flags(u8);

impl Flags {
    pub const UNDERFLOW: Flags = Flags(1);
    pub const OVERFLOW: Flags = Flags(2);
    pub const NAN: Flags = Flags(4);
    pub const INEXACT: Flags = Flags(8);
    pub const ERANGE: Flags = Flags(16);
    pub const DIVBY0: Flags = Flags(32);

    /// The empty set.
    pub const EMPTY: Flags = Flags(0);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True iff all flags in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;
    #[inline]
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (bit, name) in [
            (Flags::UNDERFLOW, "UNDERFLOW"),
            (Flags::OVERFLOW, "OVERFLOW"),
            (Flags::NAN, "NAN"),
            (Flags::INEXACT, "INEXACT"),
            (Flags::ERANGE, "ERANGE"),
            (Flags::DIVBY0, "DIVBY0"),
        ] {
            if self.contains(bit) {
                list.entry(&name);
            }
        }
        list.finish()
    }
}

#[derive(Clone, Copy)]
struct Context {
    emin: Exp,
    emax: Exp,
    flags: Flags,
    rounding: Round,
    precision: usize,
}

impl Context {
    const fn new() -> Self {
        Context {
            emin: EMIN_MIN,
            emax: EMAX_MAX,
            flags: Flags::EMPTY,
            rounding: Round::HalfEven,
            precision: PRECISION_DEFAULT,
        }
    }
}

std::thread_local! {
    static CONTEXT: Cell<Context> = const { Cell::new(Context::new()) };
}

#[inline]
fn with_context<R>(f: impl FnOnce(&mut Context) -> R) -> R {
    CONTEXT.with(|cell| {
        let mut ctx = cell.get();
        let result = f(&mut ctx);
        cell.set(ctx);
        result
    })
}

/// The smallest exponent currently allowed for regular values.
#[inline]
pub fn emin() -> Exp {
    with_context(|ctx| ctx.emin)
}

/// The largest exponent currently allowed for regular values.
#[inline]
pub fn emax() -> Exp {
    with_context(|ctx| ctx.emax)
}

/// Narrow or restore the smallest allowed exponent.
///
/// # Panics
///
/// Panics if `e` is below [EMIN_MIN] or above [EMAX_MAX].
pub fn set_emin(e: Exp) {
    assert!((EMIN_MIN..=EMAX_MAX).contains(&e), "exponent bound out of range");
    with_context(|ctx| ctx.emin = e)
}

/// Narrow or restore the largest allowed exponent.
///
/// # Panics
///
/// Panics if `e` is below [EMIN_MIN] or above [EMAX_MAX].
pub fn set_emax(e: Exp) {
    assert!((EMIN_MIN..=EMAX_MAX).contains(&e), "exponent bound out of range");
    with_context(|ctx| ctx.emax = e)
}

/// Read the accumulated status flags of this thread.
#[inline]
pub fn flags() -> Flags {
    with_context(|ctx| ctx.flags)
}

/// Clear all status flags of this thread.
#[inline]
pub fn clear_flags() {
    with_context(|ctx| ctx.flags = Flags::EMPTY)
}

/// Raise status flags.
#[inline]
pub(crate) fn raise_flags(extra: Flags) {
    with_context(|ctx| ctx.flags |= extra)
}

/// The rounding mode used by operator sugar.
#[inline]
pub fn default_rounding() -> Round {
    with_context(|ctx| ctx.rounding)
}

/// Set the rounding mode used by operator sugar.
#[inline]
pub fn set_default_rounding(rnd: Round) {
    with_context(|ctx| ctx.rounding = rnd)
}

/// The precision used for results created without an explicit precision.
#[inline]
pub fn default_precision() -> usize {
    with_context(|ctx| ctx.precision)
}

/// Set the precision used for results created without an explicit
/// precision.
///
/// # Panics
///
/// Panics if `prec` is zero.
pub fn set_default_precision(prec: usize) {
    assert!(prec > 0, "precision must be positive");
    with_context(|ctx| ctx.precision = prec)
}

/// Scoped widening of the exponent range to its extrema.
///
/// Inner steps of compound operations work in the widened range so that
/// intermediate values cannot spuriously overflow or underflow; dropping
/// the guard restores the caller's range on every exit path and keeps the
/// flags raised in between.
pub struct ExpRangeGuard {
    saved_emin: Exp,
    saved_emax: Exp,
    saved_flags: Flags,
}

impl ExpRangeGuard {
    pub fn new() -> Self {
        with_context(|ctx| {
            let guard = ExpRangeGuard {
                saved_emin: ctx.emin,
                saved_emax: ctx.emax,
                saved_flags: ctx.flags,
            };
            ctx.emin = EMIN_MIN;
            ctx.emax = EMAX_MAX;
            guard
        })
    }
}

impl Default for ExpRangeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ExpRangeGuard {
    fn drop(&mut self) {
        with_context(|ctx| {
            ctx.emin = self.saved_emin;
            ctx.emax = self.saved_emax;
            // keep domain flags raised inside the scope; INEXACT, OVERFLOW
            // and UNDERFLOW of intermediate steps are artifacts of the
            // widened range and do not describe the final result
            let kept = Flags::NAN | Flags::DIVBY0 | Flags::ERANGE;
            ctx.flags = self.saved_flags | Flags(ctx.flags.0 & kept.0);
        });
    }
}

/// Replace `x` by the overflowed value for the rounding mode, raising
/// OVERFLOW and INEXACT.
pub(crate) fn overflow_value(x: &mut Float, rnd: Round, sign: Sign) -> i32 {
    raise_flags(Flags::OVERFLOW | Flags::INEXACT);
    x.sign = sign;
    if rnd.is_like_zero(sign) {
        x.set_max_finite(emax());
        -sign.as_int()
    } else {
        x.kind = Kind::Inf;
        sign.as_int()
    }
}

/// Replace `x` by the underflowed value for the rounding mode, raising
/// UNDERFLOW and INEXACT.
///
/// Callers must downgrade round-to-nearest to toward-zero themselves when
/// the exact value does not reach the midpoint of the smallest normal
/// number; a surviving nearest mode rounds away to the smallest normal.
pub(crate) fn underflow_value(x: &mut Float, rnd: Round, sign: Sign) -> i32 {
    raise_flags(Flags::UNDERFLOW | Flags::INEXACT);
    x.sign = sign;
    if rnd.is_like_zero(sign) {
        x.kind = Kind::Zero;
        -sign.as_int()
    } else {
        x.set_min_normal(emin());
        sign.as_int()
    }
}

/// Final range check of a rounded result.
///
/// `x` holds the rounded mantissa and sign; `iexp` is the candidate
/// exponent and `tern` the ternary value of the rounding step. Clamps to
/// the exponent range per the rounding mode, raises INEXACT when the
/// result is inexact, and returns the final ternary value.
pub(crate) fn check_range(x: &mut Float, iexp: i128, tern: i32, rnd: Round) -> i32 {
    debug_assert!(x.kind == Kind::Regular);
    let (lo, hi) = with_context(|ctx| (ctx.emin, ctx.emax));
    let sign = x.sign;

    if iexp > hi as i128 {
        return overflow_value(x, rnd, sign);
    }
    if iexp < lo as i128 {
        // rounding to nearest behaves like toward zero when the exact
        // value cannot reach the midpoint of the smallest normal number:
        // at least two binades below it, or sitting exactly on a power of
        // two without having been rounded down to it
        let mag_tern = sign.as_int() * tern;
        let rnd = if rnd == Round::HalfEven
            && (iexp < (lo as i128) - 1 || (x.is_mantissa_power_of_two() && mag_tern >= 0))
        {
            Round::Zero
        } else {
            rnd
        };
        return underflow_value(x, rnd, sign);
    }

    x.exp = iexp as Exp;
    if tern != 0 {
        raise_flags(Flags::INEXACT);
    }
    tern
}
