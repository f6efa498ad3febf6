#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std, no_main)]
extern crate alloc;

pub mod arithmetic;
pub mod bits;
mod const_helpers;
pub mod ct;
pub mod error;
pub mod field;
