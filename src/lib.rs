//! The meta crate that re-exports all `mantis` building blocks.
//!
//! The actual functionality lives in the member crates:
//!
//! * [`mantis-base`](crate::base): common vocabulary ([Sign][base::Sign],
//!   ternary conversions).
//! * [`mantis-limb`](crate::limb): exact multi-limb integer kernels and the
//!   Mulders short product / short division engine.
//! * [`mantis-float`](crate::float): the [Float][float::Float] type with
//!   correctly rounded arithmetic.

/// Definitions of common traits and enums
pub mod base {
    pub use mantis_base::*;
}

/// Low-level limb arithmetic (exact kernels and short products)
pub mod limb {
    pub use mantis_limb::*;
}

/// Arbitrary precision floating point numbers with correct rounding
pub mod float {
    pub use mantis_float::*;
}

pub use mantis_base::Sign;
pub use mantis_float::{Float, Round};
