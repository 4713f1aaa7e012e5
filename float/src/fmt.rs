//! Debug formatting.

use crate::repr::{Float, Kind};
use core::fmt;

impl fmt::Debug for Float {
    /// Dump the raw representation: sign, hexadecimal mantissa (most
    /// significant limb first), binary exponent and precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign.is_negative() {
            write!(f, "-")?;
        }
        match self.kind {
            Kind::Nan => write!(f, "NaN[{}]", self.prec),
            Kind::Inf => write!(f, "Inf[{}]", self.prec),
            Kind::Zero => write!(f, "0[{}]", self.prec),
            Kind::Regular => {
                write!(f, "0x0.")?;
                for limb in self.mant.iter().rev() {
                    write!(f, "{:01$x}", limb, core::mem::size_of_val(limb) * 2)?;
                }
                write!(f, "p{}[{}]", self.exp, self.prec)
            }
        }
    }
}
