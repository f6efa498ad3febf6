//! Error types for fallible field operations.
//!
//! Arithmetic itself never fails at run time; only conversions from
//! caller-supplied data and the checked inversion variant report errors.
//! Each fallible operation returns its status explicitly, nothing is
//! signalled through panics on runtime data paths.

use core::fmt::{self, Display};

/// A byte string could not be accepted as a canonical field element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// The input length differs from the canonical encoded length
    /// `⌈bits/8⌉` of the field.
    InvalidLength {
        /// Canonical encoded length of the field.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// Bits above the declared bit width are set in the top byte.
    ExcessBits,
    /// The encoded integer is not smaller than the modulus.
    NonCanonical,
}

impl Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} bytes, got {actual}")
            }
            ValueError::ExcessBits => {
                f.write_str("bits set above the declared bit width")
            }
            ValueError::NonCanonical => {
                f.write_str("encoded value is not below the modulus")
            }
        }
    }
}

/// A documented precondition of a checked operation was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantError {
    /// The checked inversion variant received a non-invertible element.
    NotInvertible,
}

impl Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::NotInvertible => {
                f.write_str("element has no multiplicative inverse")
            }
        }
    }
}
