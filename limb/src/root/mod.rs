//! Integer roots with remainder.

mod karatsuba;
mod newton;

pub use karatsuba::{memory_requirement_sqrt_rem, sqrt_rem};
pub use newton::cbrt_rem;
