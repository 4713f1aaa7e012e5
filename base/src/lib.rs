// Licensed under either of
//
// * Apache License, Version 2.0
//   (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)
// * MIT license
//   (LICENSE-MIT or https://opensource.org/licenses/MIT)
//
// at your option.

//! This crate contains the trait and enum definitions shared by the
//! `mantis` crates: the [Sign] of a number and the conversions between the
//! internal integer ternary value and [core::cmp::Ordering].

#![cfg_attr(not(feature = "std"), no_std)]

pub mod sign;
pub mod ternary;

pub use sign::Sign;
pub use ternary::ternary_ordering;
