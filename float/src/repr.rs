//! The floating point datum and its invariants.

use crate::{
    context::{self, Flags},
    round::WORD_BITS,
};
use mantis_base::Sign;
use mantis_limb::{add, math, primitive::WORD_HIGH_BIT, Buffer, Word};

/// Exponent of a regular value.
///
/// A regular `x` represents `sign * (m / 2^prec) * 2^exp` with
/// `m / 2^prec` in `[1/2, 1)`, so the exponent is the position of the
/// leading bit plus one.
pub type Exp = i64;

/// The kind of a floating point datum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Kind {
    Nan,
    Inf,
    Zero,
    Regular,
}

/// An arbitrary precision binary floating point number.
///
/// The precision (significand width in bits) is chosen at creation and
/// never changes implicitly; every operation rounds its result to the
/// precision of the destination and returns an [Ordering][core::cmp::Ordering]
/// telling whether the stored value is below, equal to, or above the exact
/// result.
///
/// Mantissa invariants for regular values: the buffer holds exactly
/// `ceil(prec / W)` limbs, the top bit of the top limb is set, and the
/// unused low bits of the bottom limb are zero.
#[derive(Clone)]
pub struct Float {
    pub(crate) sign: Sign,
    pub(crate) kind: Kind,
    pub(crate) exp: Exp,
    pub(crate) prec: usize,
    pub(crate) mant: Buffer,
}

impl Float {
    /// Number of limbs needed for a precision.
    #[inline]
    pub(crate) fn limbs_for(prec: usize) -> usize {
        math::ceil_div(prec, WORD_BITS)
    }

    /// Create a new number of the given precision, initialized to NaN.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is zero.
    pub fn new(prec: usize) -> Self {
        assert!(prec > 0, "precision must be positive");
        Float {
            sign: Sign::Positive,
            kind: Kind::Nan,
            exp: 0,
            prec,
            mant: Buffer::allocate(Self::limbs_for(prec)),
        }
    }

    /// Create a zero of the given sign.
    pub fn zero(prec: usize, sign: Sign) -> Self {
        let mut x = Self::new(prec);
        x.kind = Kind::Zero;
        x.sign = sign;
        x
    }

    /// Create an infinity of the given sign.
    pub fn inf(prec: usize, sign: Sign) -> Self {
        let mut x = Self::new(prec);
        x.kind = Kind::Inf;
        x.sign = sign;
        x
    }

    /// Create a NaN.
    pub fn nan(prec: usize) -> Self {
        Self::new(prec)
    }

    /// The precision in bits.
    #[inline]
    pub fn precision(&self) -> usize {
        self.prec
    }

    /// Reset the precision, discarding the value (the number becomes NaN).
    ///
    /// # Panics
    ///
    /// Panics if `prec` is zero.
    pub fn set_prec(&mut self, prec: usize) {
        assert!(prec > 0, "precision must be positive");
        let n = Self::limbs_for(prec);
        if n != self.mant.len() {
            self.mant = Buffer::allocate(n);
        }
        self.prec = prec;
        self.kind = Kind::Nan;
        self.sign = Sign::Positive;
        self.exp = 0;
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.kind == Kind::Nan
    }

    #[inline]
    pub fn is_inf(&self) -> bool {
        self.kind == Kind::Inf
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.kind == Kind::Zero
    }

    /// True for values that are neither NaN, infinite nor zero.
    #[inline]
    pub fn is_regular(&self) -> bool {
        self.kind == Kind::Regular
    }

    /// The sign. Zeros are signed; the sign of a NaN is meaningless but
    /// preserved.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// True iff the sign is negative (including -0 and -inf).
    #[inline]
    pub fn signbit(&self) -> bool {
        self.sign.is_negative()
    }

    /// The exponent of a regular value, `None` otherwise.
    #[inline]
    pub fn exponent(&self) -> Option<Exp> {
        match self.kind {
            Kind::Regular => Some(self.exp),
            _ => None,
        }
    }

    /// Set the exponent of a regular value directly.
    ///
    /// # Panics
    ///
    /// Panics if the value is not regular or the exponent is outside the
    /// current range.
    pub fn set_exponent(&mut self, exp: Exp) {
        assert!(self.is_regular(), "set_exponent on a special value");
        assert!(
            (context::emin()..=context::emax()).contains(&exp),
            "exponent out of range"
        );
        self.exp = exp;
    }

    /// Force the sign.
    #[inline]
    pub fn set_sign(&mut self, sign: Sign) {
        self.sign = sign;
        if self.is_nan() {
            context::raise_flags(Flags::NAN);
        }
    }

    /// Flip the sign in place; exact for every input.
    #[inline]
    pub fn negate(&mut self) {
        self.sign = -self.sign;
        if self.is_nan() {
            context::raise_flags(Flags::NAN);
        }
    }

    /// Clear the sign in place; exact for every input.
    #[inline]
    pub fn abs_assign(&mut self) {
        self.set_sign(Sign::Positive);
    }

    /// Number of unused low bits in the bottom limb.
    #[inline]
    pub(crate) fn sh(&self) -> u32 {
        (self.mant.len() * WORD_BITS - self.prec) as u32
    }

    /// Whether a regular mantissa is `10...0`.
    pub(crate) fn is_mantissa_power_of_two(&self) -> bool {
        debug_assert!(self.kind == Kind::Regular);
        let (top, rest) = self.mant.split_last().unwrap();
        *top == WORD_HIGH_BIT && rest.iter().all(|&w| w == 0)
    }

    /// Set mantissa to all ones (the largest finite mantissa) at `exp`.
    pub(crate) fn set_max_finite(&mut self, exp: Exp) {
        self.kind = Kind::Regular;
        self.exp = exp;
        for w in self.mant.iter_mut() {
            *w = Word::MAX;
        }
        self.mant[0] &= !math::ones_word(self.sh());
    }

    /// Set mantissa to `10...0` at `exp` (`2^(exp-1)` in magnitude).
    pub(crate) fn set_min_normal(&mut self, exp: Exp) {
        self.kind = Kind::Regular;
        self.exp = exp;
        self.mant.fill_zero();
        *self.mant.last_mut().unwrap() = WORD_HIGH_BIT;
    }

    /// Check the mantissa invariants of a regular value; meant for
    /// debug assertions and tests.
    pub fn is_normalized(&self) -> bool {
        match self.kind {
            Kind::Regular => {
                self.mant.len() == Self::limbs_for(self.prec)
                    && self.mant.last().unwrap() & WORD_HIGH_BIT != 0
                    && self.mant[0] & math::ones_word(self.sh()) == 0
            }
            _ => true,
        }
    }

    /// Replace the value by the next representable number toward +∞.
    ///
    /// NaN stays NaN (and raises the NAN flag); +∞ is unchanged; the
    /// largest finite value becomes +∞. Zeros of either sign move to the
    /// smallest positive normal value.
    pub fn next_above(&mut self) {
        self.next_toward(Sign::Positive)
    }

    /// Replace the value by the next representable number toward -∞.
    pub fn next_below(&mut self) {
        self.next_toward(Sign::Negative)
    }

    fn next_toward(&mut self, dir: Sign) {
        match self.kind {
            Kind::Nan => {
                context::raise_flags(Flags::NAN);
            }
            Kind::Inf => {
                if self.sign != dir {
                    // e.g. next_above(-inf) is the most negative finite
                    self.set_max_finite(context::emax());
                }
            }
            Kind::Zero => {
                self.sign = dir;
                self.set_min_normal(context::emin());
            }
            Kind::Regular => {
                if self.sign == dir {
                    // grow in magnitude
                    let sh = self.sh();
                    let carry = add::add_word_in_place(&mut self.mant, 1 << sh);
                    if carry {
                        debug_assert!(self.mant.iter().all(|&w| w == 0));
                        if self.exp >= context::emax() {
                            self.kind = Kind::Inf;
                        } else {
                            *self.mant.last_mut().unwrap() = WORD_HIGH_BIT;
                            self.exp += 1;
                        }
                    }
                } else if self.is_mantissa_power_of_two() {
                    if self.exp <= context::emin() {
                        // below the smallest normal in magnitude
                        self.kind = Kind::Zero;
                    } else {
                        self.set_max_finite(self.exp);
                        self.exp -= 1;
                    }
                } else {
                    let sh = self.sh();
                    let borrow = add::sub_word_in_place(&mut self.mant, 1 << sh);
                    debug_assert!(!borrow);
                }
            }
        }
    }
}

/// Result plumbing shared by the arithmetic kernels: every operation ends
/// by rounding a normalized intermediate into the destination and checking
/// the exponent range.
impl Float {
    /// Round `src` (top `sprec` bits, normalized) into this number and run
    /// the range check with candidate exponent `iexp`.
    pub(crate) fn set_rounded(
        &mut self,
        sign: Sign,
        src: &[Word],
        sprec: usize,
        iexp: i128,
        rnd: crate::round::Round,
    ) -> i32 {
        let prec = self.prec;
        let (tern, carry) =
            crate::round::round_raw(&mut self.mant, src, sprec, prec, sign, rnd);
        self.kind = Kind::Regular;
        self.sign = sign;
        context::check_range(self, iexp + i128::from(carry as u8), tern, rnd)
    }

    /// Make this number NaN and raise the NAN flag.
    pub(crate) fn set_nan(&mut self) {
        self.kind = Kind::Nan;
        context::raise_flags(Flags::NAN);
    }

    /// Make this number a signed zero (no flags).
    pub(crate) fn set_zero_kind(&mut self, sign: Sign) {
        self.kind = Kind::Zero;
        self.sign = sign;
    }

    /// Make this number a signed infinity (no flags).
    pub(crate) fn set_inf_kind(&mut self, sign: Sign) {
        self.kind = Kind::Inf;
        self.sign = sign;
    }
}
