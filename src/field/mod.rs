//! Finite field abstractions and the Montgomery-form implementation.

pub mod fp;
pub mod fp2;
pub mod group;
pub mod instance;
pub mod prime;

use core::{
    fmt::{Debug, Display},
    iter::Product,
    ops::{Div, DivAssign},
};

use num_traits::{One, Zero};

pub use crate::field::group::AdditiveGroup;
use crate::{bits::BitIteratorBE, error::InvariantError};

/// Defines an abstract field.
///
/// Types implementing [`Field`] support common field operations such as
/// addition, subtraction, multiplication, and inverses.
pub trait Field:
    'static
    + Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Zero
    + One
    + AdditiveGroup<Scalar = Self>
    + Div<Self, Output = Self>
    + DivAssign<Self>
    + for<'a> Div<&'a Self, Output = Self>
    + for<'a> DivAssign<&'a Self>
    + for<'a> Div<&'a mut Self, Output = Self>
    + for<'a> DivAssign<&'a mut Self>
    + Product<Self>
    + for<'a> Product<&'a Self>
{
    /// The multiplicative identity of the field.
    const ONE: Self;

    /// Returns `self * self`.
    #[must_use]
    fn square(&self) -> Self {
        let mut copy = *self;
        copy.square_in_place();
        copy
    }

    /// Squares `self` in place.
    fn square_in_place(&mut self) -> &mut Self;

    /// Computes the multiplicative inverse of `self`, mapping zero to zero.
    ///
    /// Constant-time with respect to `self`.
    #[must_use]
    fn inverse(&self) -> Self;

    /// Sets `self` to its multiplicative inverse, mapping zero to zero.
    fn inverse_in_place(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    /// Computes the multiplicative inverse of `self`, rejecting
    /// non-invertible elements.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::NotInvertible`] when `self` is zero.
    fn checked_inverse(&self) -> Result<Self, InvariantError> {
        if self.is_zero() {
            Err(InvariantError::NotInvertible)
        } else {
            Ok(self.inverse())
        }
    }

    /// Returns `self^exp`.
    ///
    /// The exponent is public: the square-and-multiply schedule depends on
    /// its bits, never on `self`.
    #[must_use]
    fn pow<S: BitIteratorBE>(&self, exp: S) -> Self {
        let mut res = Self::ONE;
        for bit in exp.bit_be_trimmed_iter() {
            res.square_in_place();
            if bit {
                res *= self;
            }
        }
        res
    }
}
