//! Quadratic extension field `Fp2 = Fp[u] / (u² - β)`.
//!
//! Elements are pairs `c0 + c1 * u` of base field elements. β is a small
//! quadratic non-residue supplied by [`Fp2Params`]; multiplication uses
//! Karatsuba over the base field and squaring the complex-squaring
//! identity. Every operation inherits constant-timeness from [`Fp`].

use core::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use educe::Educe;
use num_traits::{One, Zero};

use crate::{
    ct::{CtChoice, CtWord},
    field::{
        fp::{Fp, FpParams},
        group::AdditiveGroup,
        Field,
    },
};

/// Configuration of a quadratic extension over the prime field described
/// by the base [`FpParams`].
pub trait Fp2Params<const N: usize>: FpParams<N> {
    /// The quadratic non-residue β with `u² = β`.
    const NON_RESIDUE: Fp<Self, N>;
}

/// An element `c0 + c1 * u` of the quadratic extension field.
#[derive(Educe)]
#[educe(Default, Clone, Copy)]
pub struct Fp2<P: Fp2Params<N>, const N: usize> {
    c0: Fp<P, N>,
    c1: Fp<P, N>,
}

impl<P: Fp2Params<N>, const N: usize> Fp2<P, N> {
    /// Additive identity of the field.
    pub const ZERO: Self = Self::new(Fp::ZERO, Fp::ZERO);
    /// Multiplicative identity of the field.
    pub const ONE: Self = Self::new(Fp::ONE, Fp::ZERO);

    /// Construct an element from its coefficients.
    #[must_use]
    pub const fn new(c0: Fp<P, N>, c1: Fp<P, N>) -> Self {
        Self { c0, c1 }
    }

    /// The constant coefficient.
    #[must_use]
    pub const fn c0(&self) -> Fp<P, N> {
        self.c0
    }

    /// The coefficient of `u`.
    #[must_use]
    pub const fn c1(&self) -> Fp<P, N> {
        self.c1
    }

    /// The norm `c0² - β * c1²`, an element of the base field.
    ///
    /// Zero iff the element is zero, since β is a non-residue.
    #[must_use]
    pub fn norm(&self) -> Fp<P, N> {
        self.c0.square() - P::NON_RESIDUE * self.c1.square()
    }

    /// The conjugate `c0 - c1 * u`.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// The Frobenius endomorphism `x ↦ x^(p^power)`.
    ///
    /// In a quadratic extension this is conjugation for odd powers and
    /// the identity for even ones. The power is public.
    #[must_use]
    pub fn frobenius_map(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            *self
        }
    }

    /// Multiply both coefficients by a base field element.
    pub fn mul_assign_by_fp(&mut self, fe: &Fp<P, N>) {
        self.c0 *= fe;
        self.c1 *= fe;
    }

    // ------------------------------------------------------------------
    // Constant-time observers and conditional operations, lifted
    // component-wise from the base field.
    // ------------------------------------------------------------------

    /// `self == 0` as a secret choice.
    #[must_use]
    pub fn ct_is_zero(&self) -> CtChoice {
        self.c0.ct_is_zero().and(self.c1.ct_is_zero())
    }

    /// `self == other` as a secret choice.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> CtChoice {
        self.c0.ct_eq(&other.c0).and(self.c1.ct_eq(&other.c1))
    }

    /// Return `a` when `choice` is true, `b` otherwise.
    #[must_use]
    pub fn ct_select(a: &Self, b: &Self, choice: CtChoice) -> Self {
        Self::new(
            Fp::ct_select(&a.c0, &b.c0, choice),
            Fp::ct_select(&a.c1, &b.c1, choice),
        )
    }

    /// Replace `self` with `other` when `choice` is true.
    pub fn ct_assign(&mut self, other: &Self, choice: CtChoice) {
        self.c0.ct_assign(&other.c0, choice);
        self.c1.ct_assign(&other.c1, choice);
    }

    /// Negate `self` when `choice` is true.
    pub fn cneg_assign(&mut self, choice: CtChoice) {
        let negated = -*self;
        self.ct_assign(&negated, choice);
    }

    /// Fetch `table[index]` by scanning the whole table.
    ///
    /// The memory access pattern depends only on the table length, never
    /// on `index`. Out-of-range indices return zero.
    #[must_use]
    pub fn ct_lookup(table: &[Self], index: CtWord) -> Self {
        let mut acc = Self::ZERO;
        for (i, entry) in table.iter().enumerate() {
            let hit = index.ct_eq(CtWord::new(i as u64));
            acc.ct_assign(entry, hit);
        }
        acc
    }
}

impl<P: Fp2Params<N>, const N: usize> PartialEq for Fp2<P, N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<P: Fp2Params<N>, const N: usize> Eq for Fp2<P, N> {}

impl<P: Fp2Params<N>, const N: usize> Debug for Fp2<P, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Fp2({:?} + {:?} * u)", self.c0, self.c1)
    }
}

impl<P: Fp2Params<N>, const N: usize> Display for Fp2<P, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} + {} * u", self.c0, self.c1)
    }
}

/// Coefficient-wise lexicographic comparison, `c1` first.
///
/// Variable-time; reserved for public values.
impl<P: Fp2Params<N>, const N: usize> Ord for Fp2<P, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.c1.cmp(&other.c1).then_with(|| self.c0.cmp(&other.c0))
    }
}

impl<P: Fp2Params<N>, const N: usize> PartialOrd for Fp2<P, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Fp2Params<N>, const N: usize> Zero for Fp2<P, N> {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl<P: Fp2Params<N>, const N: usize> One for Fp2<P, N> {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl<P: Fp2Params<N>, const N: usize> AdditiveGroup for Fp2<P, N> {
    type Scalar = Self;

    const ZERO: Self = Self::ZERO;

    #[inline]
    fn double_in_place(&mut self) -> &mut Self {
        self.c0.double_in_place();
        self.c1.double_in_place();
        self
    }

    #[inline]
    fn neg_in_place(&mut self) -> &mut Self {
        self.c0.neg_in_place();
        self.c1.neg_in_place();
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> Field for Fp2<P, N> {
    const ONE: Self = Self::ONE;

    #[inline]
    fn square_in_place(&mut self) -> &mut Self {
        // Complex squaring: with v = c0 * c1,
        // (c0 + c1 u)² = (c0 - c1)(c0 - β c1) + v + β v + 2 v u.
        let v0 = self.c0 - self.c1;
        let v3 = self.c0 - P::NON_RESIDUE * self.c1;
        let v2 = self.c0 * self.c1;
        let v0 = v0 * v3 + v2;

        self.c1 = v2.double();
        self.c0 = v0 + P::NON_RESIDUE * v2;
        self
    }

    /// Inversion through the norm map: `(c0 - c1 u) / (c0² - β c1²)`.
    /// Zero maps to zero.
    #[inline]
    fn inverse(&self) -> Self {
        let norm_inv = self.norm().inverse();
        Self::new(self.c0 * norm_inv, -(self.c1 * norm_inv))
    }
}

macro_rules! impl_fp2_from_unsigned_int {
    ($int:ty) => {
        impl<P: Fp2Params<N>, const N: usize> From<$int> for Fp2<P, N> {
            fn from(other: $int) -> Self {
                Self::new(Fp::from(other), Fp::ZERO)
            }
        }
    };
}

impl_fp2_from_unsigned_int!(u64);
impl_fp2_from_unsigned_int!(u32);
impl_fp2_from_unsigned_int!(u16);
impl_fp2_from_unsigned_int!(u8);

impl<P: Fp2Params<N>, const N: usize> From<Fp<P, N>> for Fp2<P, N> {
    fn from(other: Fp<P, N>) -> Self {
        Self::new(other, Fp::ZERO)
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Neg for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        self.neg_in_place();
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::AddAssign<&Self>
    for Fp2<P, N>
{
    #[inline]
    fn add_assign(&mut self, other: &Self) {
        self.c0 += &other.c0;
        self.c1 += &other.c1;
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::SubAssign<&Self>
    for Fp2<P, N>
{
    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        self.c0 -= &other.c0;
        self.c1 -= &other.c1;
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::MulAssign<&Self>
    for Fp2<P, N>
{
    fn mul_assign(&mut self, other: &Self) {
        // Karatsuba: three base multiplications instead of four.
        let v0 = self.c0 * other.c0;
        let v1 = self.c1 * other.c1;

        self.c1 += &self.c0;
        self.c1 *= &(other.c0 + other.c1);
        self.c1 -= &v0;
        self.c1 -= &v1;
        self.c0 = v0 + P::NON_RESIDUE * v1;
    }
}

/// Computes `self *= other.inverse()`, panicking for a zero divisor.
impl<P: Fp2Params<N>, const N: usize> core::ops::DivAssign<&Self>
    for Fp2<P, N>
{
    #[inline]
    fn div_assign(&mut self, other: &Self) {
        use core::ops::MulAssign;
        self.mul_assign(
            &other.checked_inverse().expect("should not divide by zero"),
        );
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Add<&Fp2<P, N>>
    for Fp2<P, N>
{
    type Output = Self;

    #[inline]
    fn add(mut self, other: &Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(other);
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Sub<&Fp2<P, N>>
    for Fp2<P, N>
{
    type Output = Self;

    #[inline]
    fn sub(mut self, other: &Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(other);
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Mul<&Fp2<P, N>>
    for Fp2<P, N>
{
    type Output = Self;

    #[inline]
    fn mul(mut self, other: &Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(other);
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Div<&Fp2<P, N>>
    for Fp2<P, N>
{
    type Output = Self;

    #[inline]
    fn div(mut self, other: &Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(other);
        self
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Add<&Fp2<P, N>>
    for &Fp2<P, N>
{
    type Output = Fp2<P, N>;

    #[inline]
    fn add(self, other: &Fp2<P, N>) -> Fp2<P, N> {
        use core::ops::AddAssign;
        let mut result = *self;
        result.add_assign(other);
        result
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Sub<&Fp2<P, N>>
    for &Fp2<P, N>
{
    type Output = Fp2<P, N>;

    #[inline]
    fn sub(self, other: &Fp2<P, N>) -> Fp2<P, N> {
        use core::ops::SubAssign;
        let mut result = *self;
        result.sub_assign(other);
        result
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Mul<&Fp2<P, N>>
    for &Fp2<P, N>
{
    type Output = Fp2<P, N>;

    #[inline]
    fn mul(self, other: &Fp2<P, N>) -> Fp2<P, N> {
        use core::ops::MulAssign;
        let mut result = *self;
        result.mul_assign(other);
        result
    }
}

impl<P: Fp2Params<N>, const N: usize> core::ops::Div<&Fp2<P, N>>
    for &Fp2<P, N>
{
    type Output = Fp2<P, N>;

    #[inline]
    fn div(self, other: &Fp2<P, N>) -> Fp2<P, N> {
        use core::ops::DivAssign;
        let mut result = *self;
        result.div_assign(other);
        result
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Add<Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Add<&mut Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: &mut Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Sub<Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Sub<&mut Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: &mut Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::iter::Sum<Self> for Fp2<P, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: Fp2Params<N>, const N: usize> core::iter::Sum<&'a Self>
    for Fp2<P, N>
{
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::AddAssign<Self>
    for Fp2<P, N>
{
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.add_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::SubAssign<Self>
    for Fp2<P, N>
{
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.sub_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::AddAssign<&mut Self>
    for Fp2<P, N>
{
    #[inline]
    fn add_assign(&mut self, other: &mut Self) {
        self.add_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::SubAssign<&mut Self>
    for Fp2<P, N>
{
    #[inline]
    fn sub_assign(&mut self, other: &mut Self) {
        self.sub_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Mul<Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Div<Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Mul<&mut Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: &mut Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::Div<&mut Self> for Fp2<P, N> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: &mut Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::iter::Product<Self> for Fp2<P, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: Fp2Params<N>, const N: usize> core::iter::Product<&'a Self>
    for Fp2<P, N>
{
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::MulAssign<Self>
    for Fp2<P, N>
{
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        self.mul_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::DivAssign<Self>
    for Fp2<P, N>
{
    #[inline]
    fn div_assign(&mut self, other: Self) {
        self.div_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::MulAssign<&mut Self>
    for Fp2<P, N>
{
    #[inline]
    fn mul_assign(&mut self, other: &mut Self) {
        self.mul_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: Fp2Params<N>, const N: usize> core::ops::DivAssign<&mut Self>
    for Fp2<P, N>
{
    #[inline]
    fn div_assign(&mut self, other: &mut Self) {
        self.div_assign(&*other);
    }
}

impl<P: Fp2Params<N>, const N: usize> zeroize::Zeroize for Fp2<P, N> {
    fn zeroize(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.c0);
        zeroize::Zeroize::zeroize(&mut self.c1);
    }
}
