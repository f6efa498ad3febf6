//! Fixed-width big integers stored as little-endian limb arrays.
//!
//! [`Uint`] carries the raw limbs that field elements are built on. The
//! `const_*` family runs in const evaluation and is reserved for public
//! metadata (moduli, Montgomery constants); the `ct_*` family and the
//! conditional `c*_assign` operations are the constant-time paths that
//! may touch secret data.

use core::{
    borrow::Borrow,
    fmt::{Debug, Display, UpperHex},
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not,
        Shl, ShlAssign, Shr, ShrAssign,
    },
};

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroize;

use crate::{
    arithmetic::{
        limb,
        limb::{
            adc, adc_for_add_with_carry, sbb, sbb_for_sub_with_borrow, Limb,
            Limbs,
        },
        BigInteger,
    },
    bits::BitIteratorBE,
    const_for, const_modulo,
    const_helpers::{R2Buffer, RBuffer},
    ct::{CtChoice, CtWord},
    unroll6_for,
};

/// Unsigned integer with a compile-time number of limbs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Uint<const N: usize> {
    pub(crate) limbs: Limbs<N>,
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self { limbs: [0; N] }
    }
}

/// Declare [`Uint`] types for different bit sizes.
macro_rules! declare_num {
    ($num:ident, $bits:expr) => {
        #[doc = "Unsigned integer with "]
        #[doc = stringify!($bits)]
        #[doc = "bits size."]
        pub type $num = $crate::arithmetic::uint::Uint<
            { usize::div_ceil($bits, $crate::arithmetic::Limb::BITS as usize) },
        >;
    };
}

declare_num!(U64, 64);
declare_num!(U128, 128);
declare_num!(U192, 192);
declare_num!(U256, 256);
declare_num!(U320, 320);
declare_num!(U384, 384);
declare_num!(U448, 448);
declare_num!(U512, 512);
declare_num!(U576, 576);
declare_num!(U640, 640);
declare_num!(U768, 768);

impl<const N: usize> Uint<N> {
    /// Construct from raw little-endian limbs.
    #[must_use]
    pub const fn new(limbs: [Limb; N]) -> Self {
        Self { limbs }
    }

    /// Borrow the raw little-endian limbs.
    #[must_use]
    pub const fn as_limbs(&self) -> &[Limb; N] {
        &self.limbs
    }

    /// Construct from a `u32` value.
    #[must_use]
    pub const fn from_u32(val: u32) -> Self {
        let mut repr = Self::ZERO;
        repr.limbs[0] = val as Limb;
        repr
    }

    // ------------------------------------------------------------------
    // Const-evaluation helpers. Only ever run on public metadata, so the
    // data-dependent branches in here are fine.
    // ------------------------------------------------------------------

    #[doc(hidden)]
    #[must_use]
    pub const fn const_is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    #[doc(hidden)]
    #[must_use]
    pub const fn const_is_zero(&self) -> bool {
        let mut is_zero = true;
        const_for!((i in 0..N) {
            is_zero &= self.limbs[i] == 0;
        });
        is_zero
    }

    pub(crate) const fn const_geq(&self, other: &Self) -> bool {
        const_for!((i in 0..N) {
            let a = self.limbs[N - i - 1];
            let b = other.limbs[N - i - 1];
            if a < b {
                return false;
            } else if a > b {
                return true;
            }
        });
        true
    }

    /// Return the minimum number of bits needed to encode this number.
    #[doc(hidden)]
    #[must_use]
    pub const fn const_num_bits(&self) -> usize {
        // Total number of bits.
        let mut num_bits = 64 * N;

        // Start with the last (highest) limb.
        let mut index = N - 1;
        loop {
            // Subtract leading zeroes from the total number of bits.
            let leading = self.limbs[index].leading_zeros() as usize;
            num_bits -= leading;

            // If the limb is not empty, stop processing other limbs.
            if leading != 64 {
                break;
            }

            if index == 0 {
                break;
            }
            index -= 1;
        }

        num_bits
    }

    /// Find the `i`-th bit of `self`.
    #[must_use]
    pub const fn const_get_bit(&self, i: usize) -> bool {
        if i >= 64 * N {
            return false;
        }

        let bits_in_limb = Limb::BITS as usize;
        let limb = i / bits_in_limb;
        let bit = i - bits_in_limb * limb;
        let mask = 1 << bit;
        (self.limbs[limb] & mask) != 0
    }

    /// Number of trailing zero bits.
    pub(crate) const fn const_trailing_zeros(&self) -> u32 {
        let mut count = 0;
        const_for!((i in 0..N) {
            let tz = self.limbs[i].trailing_zeros();
            count += tz;
            if tz != 64 {
                return count;
            }
        });
        count
    }

    #[inline]
    pub(crate) const fn const_sub_with_borrow(
        mut self,
        other: &Self,
    ) -> (Self, bool) {
        let mut borrow = 0;

        const_for!((i in 0..N) {
            (self.limbs[i], borrow) = sbb(self.limbs[i], other.limbs[i], borrow);
        });

        (self, borrow != 0)
    }

    #[inline]
    pub(crate) const fn const_add_with_carry(
        mut self,
        other: &Self,
    ) -> (Self, bool) {
        let mut carry = 0;

        const_for!((i in 0..N) {
            (self.limbs[i], carry) = adc(self.limbs[i], other.limbs[i], carry);
        });

        (self, carry != 0)
    }

    pub(crate) const fn const_mul2_with_carry(mut self) -> (Self, bool) {
        let mut last = 0;
        const_for!((i in 0..N) {
            let a = self.limbs[i];
            let tmp = a >> 63;
            self.limbs[i] <<= 1;
            self.limbs[i] |= last;
            last = tmp;
        });
        (self, last != 0)
    }

    /// Shift right by a public amount, in const evaluation.
    pub(crate) const fn const_shr_by(&self, k: u32) -> Self {
        assert!((k as usize) < 64 * N, "shift amount exceeds the bit width");
        let words = (k / 64) as usize;
        let bits = k % 64;

        let mut out = [0; N];
        const_for!((i in 0..N) {
            let src = i + words;
            if src < N {
                let mut v = self.limbs[src] >> bits;
                if bits > 0 && src + 1 < N {
                    v |= self.limbs[src + 1] << (64 - bits);
                }
                out[i] = v;
            }
        });
        Self::new(out)
    }

    /// Add two numbers and panic on overflow.
    #[must_use]
    pub const fn const_add(&self, rhs: &Self) -> Self {
        let (low, carry) = self.const_add_with_carry(rhs);
        assert!(!carry, "overflow on addition");
        low
    }

    /// Multiply two numbers and panic on overflow.
    #[must_use]
    pub const fn const_mul(&self, rhs: &Self) -> Self {
        let (low, high) = self.mul_wide(rhs);
        assert!(high.const_is_zero(), "overflow on multiplication");
        low
    }

    /// `2^(64 * N) mod self`, the Montgomery constant `R`.
    ///
    /// # Panics
    ///
    /// Panics when `self` is zero.
    #[must_use]
    pub const fn montgomery_r(&self) -> Self {
        let two_pow_n_times_64 = RBuffer::<N>([0; N], 1);
        const_modulo!(two_pow_n_times_64, self)
    }

    /// `2^(128 * N) mod self`, the Montgomery constant `R²`.
    ///
    /// # Panics
    ///
    /// Panics when `self` is zero.
    #[must_use]
    pub const fn montgomery_r2(&self) -> Self {
        let two_pow_n_times_64_square = R2Buffer::<N>([0; N], [0; N], 1);
        const_modulo!(two_pow_n_times_64_square, self)
    }

    // ------------------------------------------------------------------
    // Carry-chain arithmetic. Fixed iteration counts, no data-dependent
    // control flow.
    // ------------------------------------------------------------------

    /// Sets `self = self + other`, returning the carry.
    #[inline(always)]
    pub fn add_with_carry(&mut self, other: &Self) -> bool {
        let mut carry = false;

        unroll6_for!((i in 0..N) {
            carry = adc_for_add_with_carry(&mut self.limbs[i], other.limbs[i], carry);
        });

        carry
    }

    /// Sets `self = self - other`, returning the borrow.
    #[inline(always)]
    pub fn sub_with_borrow(&mut self, other: &Self) -> bool {
        let mut borrow = false;

        unroll6_for!((i in 0..N) {
            borrow =
                sbb_for_sub_with_borrow(&mut self.limbs[i], other.limbs[i], borrow);
        });

        borrow
    }

    /// Sets `self = 2 * self`, returning the shifted-out bit.
    #[inline(always)]
    pub fn mul2(&mut self) -> bool {
        let mut last = 0;
        unroll6_for!((i in 0..N) {
            let a = &mut self.limbs[i];
            let tmp = *a >> 63;
            *a <<= 1;
            *a |= last;
            last = tmp;
        });
        last != 0
    }

    /// Sets `self = self / 2`, discarding the lowest bit.
    pub fn div2(&mut self) {
        let mut t = 0;
        for a in self.limbs.iter_mut().rev() {
            let t2 = *a << 63;
            *a >>= 1;
            *a |= t;
            t = t2;
        }
    }

    /// Compute "wide" multiplication, with a product twice the size of the
    /// input.
    ///
    /// Returns a tuple containing the `(lo, hi)` components of the product,
    /// computed with a schoolbook limb scan.
    #[inline(always)]
    #[must_use]
    pub const fn mul_wide(&self, rhs: &Self) -> (Self, Self) {
        let (mut lo, mut hi) = ([0; N], [0; N]);
        unroll6_for!((i in 0..N) {
            let mut carry = 0;
            unroll6_for!((j in 0..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) = limb::carrying_mac(
                        hi[k - N],
                        self.limbs[i],
                        rhs.limbs[j],
                        carry
                    );
                } else {
                    (lo[k], carry) = limb::carrying_mac(
                        lo[k],
                        self.limbs[i],
                        rhs.limbs[j],
                        carry
                    );
                }
            });
            hi[i] = carry;
        });

        (Self::new(lo), Self::new(hi))
    }

    /// Compute the "wide" square of `self`.
    ///
    /// Equivalent to `self.mul_wide(self)`; squaring-specific symmetry is
    /// left to the Montgomery kernel.
    #[inline(always)]
    #[must_use]
    pub const fn square_wide(&self) -> (Self, Self) {
        self.mul_wide(self)
    }

    // ------------------------------------------------------------------
    // Constant-time predicates and conditional operations. Safe on
    // secret data.
    // ------------------------------------------------------------------

    /// `self == 0` as a secret choice.
    #[inline(always)]
    #[must_use]
    pub fn ct_is_zero(&self) -> CtChoice {
        let mut acc = 0;
        unroll6_for!((i in 0..N) {
            acc |= self.limbs[i];
        });
        CtWord::new(acc).is_zero()
    }

    /// `self == other` as a secret choice.
    #[inline(always)]
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> CtChoice {
        let mut acc = 0;
        unroll6_for!((i in 0..N) {
            acc |= self.limbs[i] ^ other.limbs[i];
        });
        CtWord::new(acc).is_zero()
    }

    /// `self < other` as a secret choice, from the full borrow chain.
    #[inline(always)]
    #[must_use]
    pub fn ct_lt(&self, other: &Self) -> CtChoice {
        let mut borrow = 0;
        unroll6_for!((i in 0..N) {
            (_, borrow) = sbb(self.limbs[i], other.limbs[i], borrow);
        });
        CtChoice::from_word_lsb(borrow)
    }

    /// Return `a` when `choice` is true, `b` otherwise.
    #[inline(always)]
    #[must_use]
    pub fn ct_select(a: &Self, b: &Self, choice: CtChoice) -> Self {
        let mask = choice.mask();
        let mut limbs = [0; N];
        unroll6_for!((i in 0..N) {
            limbs[i] = b.limbs[i] ^ (mask & (a.limbs[i] ^ b.limbs[i]));
        });
        Self::new(limbs)
    }

    /// Replace `self` with `other` when `choice` is true.
    #[inline(always)]
    pub fn ct_assign(&mut self, other: &Self, choice: CtChoice) {
        let mask = choice.mask();
        unroll6_for!((i in 0..N) {
            self.limbs[i] ^= mask & (self.limbs[i] ^ other.limbs[i]);
        });
    }

    /// Sets `self = self + other` when `choice` is true, returning the
    /// carry. The carry chain runs either way.
    #[inline(always)]
    pub fn cadd_assign(&mut self, other: &Self, choice: CtChoice) -> CtChoice {
        let mask = choice.mask();
        let mut carry = 0;
        unroll6_for!((i in 0..N) {
            (self.limbs[i], carry) =
                adc(self.limbs[i], other.limbs[i] & mask, carry);
        });
        CtChoice::from_word_lsb(carry)
    }

    /// Sets `self = self - other` when `choice` is true, returning the
    /// borrow. The borrow chain runs either way.
    #[inline(always)]
    pub fn csub_assign(&mut self, other: &Self, choice: CtChoice) -> CtChoice {
        let mask = choice.mask();
        let mut borrow = 0;
        unroll6_for!((i in 0..N) {
            (self.limbs[i], borrow) =
                sbb(self.limbs[i], other.limbs[i] & mask, borrow);
        });
        CtChoice::from_word_lsb(borrow)
    }

    /// Two's-complement negation of `self` when `choice` is true.
    #[inline(always)]
    pub fn cneg_assign(&mut self, choice: CtChoice) {
        let mask = choice.mask();
        let mut carry = mask & 1;
        unroll6_for!((i in 0..N) {
            (self.limbs[i], carry) = adc(self.limbs[i] ^ mask, 0, carry);
        });
    }

    // ------------------------------------------------------------------
    // Byte conversions.
    // ------------------------------------------------------------------

    /// Create a new [`Uint`] from the provided little endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if the slice length is not exactly `8 * N`.
    #[must_use]
    pub const fn from_le_slice(bytes: &[u8]) -> Self {
        const LIMB_BYTES: usize = Limb::BITS as usize / 8;
        assert!(
            bytes.len() == LIMB_BYTES * N,
            "bytes are not the expected size"
        );

        let mut res = [0; N];
        let mut buf = [0u8; LIMB_BYTES];
        let mut i = 0;

        while i < N {
            let mut j = 0;
            while j < LIMB_BYTES {
                buf[j] = bytes[i * LIMB_BYTES + j];
                j += 1;
            }
            res[i] = Limb::from_le_bytes(buf);
            i += 1;
        }

        Self::new(res)
    }

    /// Create a new [`Uint`] from at most `8 * N` little endian bytes,
    /// zero-extending shorter inputs.
    ///
    /// # Panics
    ///
    /// Panics if the slice is longer than `8 * N` bytes.
    #[must_use]
    pub fn from_le_slice_padded(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= 8 * N, "bytes exceed the limb capacity");

        let mut res = Self::ZERO;
        for (i, &byte) in bytes.iter().enumerate() {
            res.limbs[i / 8] |= (byte as Limb) << (8 * (i % 8));
        }
        res
    }
}

// ----------- Traits Impls -----------

impl<const N: usize> UpperHex for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:016X}", BigUint::from(*self))
    }
}

impl<const N: usize> Debug for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", BigUint::from(*self))
    }
}

impl<const N: usize> Display for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", BigUint::from(*self))
    }
}

/// Lexicographic limb comparison, most significant limb first.
///
/// Variable-time; reserved for public values.
impl<const N: usize> Ord for Uint<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        unroll6_for!((i in 0..N) {
            let a = &self.limbs[N - i - 1];
            let b = &other.limbs[N - i - 1];
            match a.cmp(b) {
                Ordering::Equal => {}
                order => return order,
            };
        });

        Ordering::Equal
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> AsMut<[Limb]> for Uint<N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [Limb] {
        &mut self.limbs
    }
}

impl<const N: usize> AsRef<[Limb]> for Uint<N> {
    #[inline]
    fn as_ref(&self) -> &[Limb] {
        &self.limbs
    }
}

impl<const N: usize> From<u64> for Uint<N> {
    #[inline]
    fn from(val: u64) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val;
        repr
    }
}

impl<const N: usize> From<u32> for Uint<N> {
    #[inline]
    fn from(val: u32) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<u16> for Uint<N> {
    #[inline]
    fn from(val: u16) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<u8> for Uint<N> {
    #[inline]
    fn from(val: u8) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<Uint<N>> for BigUint {
    #[inline]
    fn from(val: Uint<N>) -> BigUint {
        BigUint::from_bytes_le(&val.into_bytes_le())
    }
}

impl<B: Borrow<Self>, const N: usize> BitXorAssign<B> for Uint<N> {
    fn bitxor_assign(&mut self, rhs: B) {
        (0..N).for_each(|i| self.limbs[i] ^= rhs.borrow().limbs[i]);
    }
}

impl<B: Borrow<Self>, const N: usize> BitXor<B> for Uint<N> {
    type Output = Self;

    fn bitxor(mut self, rhs: B) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl<B: Borrow<Self>, const N: usize> BitAndAssign<B> for Uint<N> {
    fn bitand_assign(&mut self, rhs: B) {
        (0..N).for_each(|i| self.limbs[i] &= rhs.borrow().limbs[i]);
    }
}

impl<B: Borrow<Self>, const N: usize> BitAnd<B> for Uint<N> {
    type Output = Self;

    fn bitand(mut self, rhs: B) -> Self::Output {
        self &= rhs;
        self
    }
}

impl<B: Borrow<Self>, const N: usize> BitOrAssign<B> for Uint<N> {
    fn bitor_assign(&mut self, rhs: B) {
        (0..N).for_each(|i| self.limbs[i] |= rhs.borrow().limbs[i]);
    }
}

impl<B: Borrow<Self>, const N: usize> BitOr<B> for Uint<N> {
    type Output = Self;

    fn bitor(mut self, rhs: B) -> Self::Output {
        self |= rhs;
        self
    }
}

impl<const N: usize> ShrAssign<u32> for Uint<N> {
    /// Computes the bitwise shift right operation in place.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an underflow error if the number of bits
    /// shifted is larger than N * 64. Instead the result will be saturated to
    /// zero. The shift amount is public.
    fn shr_assign(&mut self, mut rhs: u32) {
        if rhs >= (64 * N) as u32 {
            *self = Self::ZERO;
            return;
        }

        while rhs >= 64 {
            let mut t = 0;
            for limb in self.limbs.iter_mut().rev() {
                core::mem::swap(&mut t, limb);
            }
            rhs -= 64;
        }

        if rhs > 0 {
            let mut t = 0;
            for a in self.limbs.iter_mut().rev() {
                let t2 = *a << (64 - rhs);
                *a >>= rhs;
                *a |= t;
                t = t2;
            }
        }
    }
}

impl<const N: usize> Shr<u32> for Uint<N> {
    type Output = Self;

    /// Computes bitwise shift right operation.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an underflow error if the number of bits
    /// shifted is larger than N * 64. Instead the result will be saturated to
    /// zero. The shift amount is public.
    fn shr(mut self, rhs: u32) -> Self::Output {
        self >>= rhs;
        self
    }
}

impl<const N: usize> ShlAssign<u32> for Uint<N> {
    /// Computes the bitwise shift left operation in place.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an overflow error if the number of bits
    /// shifted is larger than N * 64. Instead, the overflow will be chopped
    /// off. The shift amount is public.
    fn shl_assign(&mut self, mut rhs: u32) {
        if rhs >= (64 * N) as u32 {
            *self = Self::ZERO;
            return;
        }

        while rhs >= 64 {
            let mut t = 0;
            for i in 0..N {
                core::mem::swap(&mut t, &mut self.limbs[i]);
            }
            rhs -= 64;
        }

        if rhs > 0 {
            let mut t = 0;
            for i in 0..N {
                let a = &mut self.limbs[i];
                let t2 = *a >> (64 - rhs);
                *a <<= rhs;
                *a |= t;
                t = t2;
            }
        }
    }
}

impl<const N: usize> Shl<u32> for Uint<N> {
    type Output = Self;

    /// Computes the bitwise shift left operation.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an overflow error if the number of bits
    /// shifted is larger than N * 64. Instead, the overflow will be chopped
    /// off. The shift amount is public.
    fn shl(mut self, rhs: u32) -> Self::Output {
        self <<= rhs;
        self
    }
}

impl<const N: usize> Not for Uint<N> {
    type Output = Self;

    fn not(self) -> Self::Output {
        let mut result = Self::ZERO;
        for i in 0..N {
            result.limbs[i] = !self.limbs[i];
        }
        result
    }
}

impl<const N: usize> BigInteger for Uint<N> {
    const BITS: usize = Self::NUM_LIMBS * (Limb::BITS as usize);
    const MAX: Self = Self { limbs: [Limb::MAX; N] };
    const NUM_LIMBS: usize = N;
    const ONE: Self = {
        let mut one = Self::ZERO;
        one.limbs[0] = 1;
        one
    };
    const ZERO: Self = Self { limbs: [0; N] };

    fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(Zero::is_zero)
    }

    fn num_bits(&self) -> usize {
        self.const_num_bits()
    }

    fn get_bit(&self, i: usize) -> bool {
        self.const_get_bit(i)
    }

    fn from_bytes_le(bytes: &[u8]) -> Self {
        Self::from_le_slice(bytes)
    }

    fn into_bytes_le(self) -> alloc::vec::Vec<u8> {
        self.limbs.iter().flat_map(|&limb| limb.to_le_bytes()).collect()
    }
}

impl<const N: usize> BitIteratorBE for Uint<N> {
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        self.as_limbs().iter().rev().flat_map(Limb::bit_be_iter)
    }
}

/// Parse a number from a string in a given radix.
///
/// This implementation can be slow on big numbers and possibly fail constant
/// compilation by timeout.
///
/// I.e., convert string encoded integer `s` to base-`radix` number.
#[must_use]
pub const fn from_str_radix<const LIMBS: usize>(
    s: &str,
    radix: u32,
) -> Uint<LIMBS> {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty string");

    // The lowest order number is at the end of the string.
    // Begin parsing from the last index of the string.
    let mut index = bytes.len() - 1;

    let mut uint = Uint::from_u32(0);
    let mut order = Uint::from_u32(1);
    let uint_radix = Uint::from_u32(radix);

    loop {
        let digit = Uint::from_u32(parse_digit(bytes[index], radix));

        // Add a digit multiplied by order.
        uint = uint.const_add(&digit.const_mul(&order));

        // If we reached the beginning of the string, return the number.
        if index == 0 {
            return uint;
        }

        // Increase the order of magnitude.
        order = uint_radix.const_mul(&order);

        // Move to the next digit.
        index -= 1;
    }
}

/// Parse a number from a hex string.
///
/// This implementation performs faster than [`from_str_radix`], since it
/// assumes the radix is already `16`.
///
/// If the string number is shorter than [`Uint`] can store, the result is
/// zero-extended.
#[must_use]
pub const fn from_str_hex<const LIMBS: usize>(s: &str) -> Uint<LIMBS> {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty string");

    // The lowest order number is at the end of the string.
    // Begin parsing from the last index of the string.
    let mut index = bytes.len() - 1;

    // The lowest order limb is at the beginning of the `num` array.
    // Begin indexing from `0`.
    let mut num = [0; LIMBS];
    let mut num_index = 0;

    let digit_radix = 16;
    let digit_size = 4; // Size of a hex digit in bits (2^4 = 16).
    let digits_in_limb = Limb::BITS / digit_size;

    loop {
        let digit = parse_digit(bytes[index], digit_radix) as Limb;

        // Since a base-16 digit can be represented with the same bits, we can
        // copy these bits.
        let digit_mask = digit << ((num_index % digits_in_limb) * digit_size);
        num[(num_index / digits_in_limb) as usize] |= digit_mask;

        // If we reached the beginning of the string, return the number.
        if index == 0 {
            return Uint::new(num);
        }

        // Move to the next digit.
        index -= 1;
        num_index += 1;
    }
}

// Try to parse a digit from utf-8 byte.
const fn parse_digit(utf8_digit: u8, digit_radix: u32) -> u32 {
    let ch = parse_utf8_byte(utf8_digit);
    match ch.to_digit(digit_radix) {
        None => {
            panic!("invalid digit");
        }
        Some(digit) => digit,
    }
}

/// Parse a single UTF-8 byte.
pub(crate) const fn parse_utf8_byte(byte: u8) -> char {
    match byte {
        0x00..=0x7F => byte as char,
        _ => panic!("non-ASCII character found"),
    }
}

/// This macro converts a string base-10 number to a big integer.
#[macro_export]
macro_rules! from_num {
    ($num:literal) => {
        $crate::arithmetic::uint::from_str_radix($num, 10)
    };
}

/// This macro converts a string hex number to a big integer.
#[macro_export]
macro_rules! from_hex {
    ($num:literal) => {
        $crate::arithmetic::uint::from_str_hex($num)
    };
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use num_bigint::BigUint;
    use proptest::prelude::*;

    use super::*;

    fn oracle(limbs: &[u64; 4]) -> BigUint {
        Uint::<4>::new(*limbs).into()
    }

    #[test]
    fn convert_from_str_radix() {
        let uint_from_base10: Uint<4> = from_str_radix(
            "28948022309329048855892746252171976963363056481941647379679742748393362948097",
            10,
        );
        #[allow(clippy::unreadable_literal)]
        let expected = Uint::<4>::new([
            10108024940646105089u64,
            2469829653919213789u64,
            0u64,
            4611686018427387904u64,
        ]);
        assert_eq!(uint_from_base10, expected);

        let uint_from_base10: Uint<1> =
            from_str_radix("18446744069414584321", 10);
        let uint_from_binary: Uint<1> = from_str_radix(
            "1111111111111111111111111111111100000000000000000000000000000001",
            2,
        );
        assert_eq!(uint_from_base10, uint_from_binary);
    }

    #[test]
    fn convert_from_str_hex() {
        // Test different implementations of hex parsing on random hex inputs.
        proptest!(|(s in "[0-9a-fA-F]{1,64}")| {
            let uint_from_hex: Uint<4> = from_str_hex(&s);
            let expected: Uint<4> = from_str_radix(&s, 16);
            assert_eq!(uint_from_hex, expected);
        });
    }

    #[test]
    fn uint_bit_iterator_be() {
        let words: [Limb; 4] = [0b1100, 0, 0, 0];
        let num = Uint::<4>::new(words);
        let bits: Vec<bool> = num.bit_be_trimmed_iter().collect();

        assert_eq!(bits.len(), 4);
        assert_eq!(bits, vec![true, true, false, false]);
    }

    #[test]
    fn num_bits() {
        let words: [Limb; 4] = [0b1100, 0, 0, 0];
        let num = Uint::<4>::new(words);
        assert_eq!(num.num_bits(), 4);

        let words: [Limb; 4] = [0, 0b1100, 0, 0];
        let num = Uint::<4>::new(words);
        assert_eq!(num.num_bits(), 64 + 4);

        let words: [Limb; 4] = [0b11, 0b11, 0b11, 0b11];
        let num = Uint::<4>::new(words);
        assert_eq!(num.num_bits(), 64 + 64 + 64 + 2);
    }

    #[test]
    fn trailing_zeros() {
        assert_eq!(Uint::<4>::new([0b100, 0, 0, 0]).const_trailing_zeros(), 2);
        assert_eq!(Uint::<4>::new([0, 1, 0, 0]).const_trailing_zeros(), 64);
        assert_eq!(Uint::<4>::ZERO.const_trailing_zeros(), 256);
    }

    #[test]
    fn montgomery_constants_small_modulus() {
        // 2^64 mod 5 = 1, 2^128 mod 5 = 1.
        let five = Uint::<1>::new([5]);
        assert_eq!(five.montgomery_r(), Uint::new([1]));
        assert_eq!(five.montgomery_r2(), Uint::new([1]));

        // Goldilocks: 2^64 mod (2^64 - 2^32 + 1) = 2^32 - 1.
        let p = Uint::<1>::new([0xFFFF_FFFF_0000_0001]);
        assert_eq!(p.montgomery_r(), Uint::new([0xFFFF_FFFF]));
    }

    proptest! {
        #[test]
        fn add_sub_round_trip(a: [u64; 4], b: [u64; 4]) {
            let (x, y) = (Uint::new(a), Uint::new(b));
            let mut sum = x;
            let carry = sum.add_with_carry(&y);
            let mut diff = sum;
            let borrow = diff.sub_with_borrow(&y);
            prop_assert_eq!(diff, x);
            prop_assert_eq!(carry, borrow);
        }

        #[test]
        fn mul_wide_matches_oracle(a: [u64; 4], b: [u64; 4]) {
            let (lo, hi) = Uint::new(a).mul_wide(&Uint::new(b));
            let got = oracle(&lo.limbs) + (oracle(&hi.limbs) << 256);
            prop_assert_eq!(got, oracle(&a) * oracle(&b));
        }

        #[test]
        fn ct_comparisons_match_ord(a: [u64; 4], b: [u64; 4]) {
            let (x, y) = (Uint::new(a), Uint::new(b));
            prop_assert_eq!(bool::from(x.ct_lt(&y)), x < y);
            prop_assert_eq!(bool::from(x.ct_eq(&y)), x == y);
            prop_assert_eq!(bool::from(x.ct_is_zero()), x == Uint::ZERO);
        }

        #[test]
        fn conditional_ops_match_branch(
            a: [u64; 4],
            b: [u64; 4],
            cond: bool,
        ) {
            let (x, y) = (Uint::new(a), Uint::new(b));
            let choice = CtChoice::from(cond);

            prop_assert_eq!(
                Uint::ct_select(&x, &y, choice),
                if cond { x } else { y }
            );

            let mut added = x;
            added.cadd_assign(&y, choice);
            let mut expected = x;
            if cond {
                expected.add_with_carry(&y);
            }
            prop_assert_eq!(added, expected);

            let mut subbed = x;
            subbed.csub_assign(&y, choice);
            let mut expected = x;
            if cond {
                expected.sub_with_borrow(&y);
            }
            prop_assert_eq!(subbed, expected);

            let mut negated = x;
            negated.cneg_assign(choice);
            let mut expected = Uint::<4>::ZERO;
            if cond {
                expected.sub_with_borrow(&x);
            } else {
                expected = x;
            }
            prop_assert_eq!(negated, expected);
        }

        #[test]
        fn shifts_match_oracle(a: [u64; 4], k in 0u32..256) {
            let x = Uint::new(a);
            prop_assert_eq!(
                BigUint::from(x >> k),
                oracle(&a) >> k as usize
            );
            let shifted = oracle(&a) << k as usize;
            let truncated = shifted % (BigUint::from(1u8) << 256);
            prop_assert_eq!(BigUint::from(x << k), truncated);
            prop_assert_eq!(x.const_shr_by(k), x >> k);
        }
    }
}
