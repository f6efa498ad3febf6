//! This module contains the implementation of a prime field element [`Fp`],
//! altogether with exact implementations [`Fp64`] for 64-bit, [`Fp128`] for
//! 128-bit elements and so on.
//!
//! Finite field element [`Fp`] wraps a biginteger element in [montgomery
//! form], which is used for efficient multiplication and division.
//!
//! Unless an operation carries the `_vartime` suffix, its execution time
//! depends only on the limb count `N`, never on operand values: reductions
//! go through masked conditional copies and data-dependent choices go
//! through [`crate::ct`].
//!
//! Note that implementation of `Ord` for [`Fp`] compares field elements
//! viewing them as integers in the range `0, 1, ..., P::MODULUS - 1`.
//! However, other implementations of `PrimeField` might choose a different
//! ordering, and as such, users should use this `Ord` for applications where
//! any ordering suffices (like in a `BTreeMap`), and not in applications
//! where a particular ordering is required.
//!
//! [montgomery form]: https://en.wikipedia.org/wiki/Montgomery_modular_multiplication
use alloc::string::ToString;
use core::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
};

use educe::Educe;
use num_traits::{One, Zero};

use crate::{
    arithmetic::{
        limb,
        limb::Limb,
        uint::Uint,
        BigInteger,
    },
    bits::BitIteratorBE,
    const_for,
    ct::{CtChoice, CtWord},
    error::ValueError,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
    unroll6_for,
};

/// A trait that specifies the configuration of a prime field.
/// Also specifies how to perform arithmetic on field elements.
///
/// An implementation provides the modulus and a multiplicative generator;
/// every other constant is derived in const evaluation. Invalid moduli
/// (even, or not greater than one) abort compilation.
pub trait FpParams<const N: usize>: Send + Sync + 'static + Sized {
    /// The modulus of the field.
    const MODULUS: Uint<N>;

    /// A multiplicative generator of the field.
    /// [`Self::GENERATOR`] is an element having multiplicative order
    /// `MODULUS - 1`.
    const GENERATOR: Fp<Self, N>;

    /// The size of the modulus in bits.
    const MODULUS_BIT_SIZE: usize = modulus_bit_size::<Self, N>();

    /// Bits between the modulus MSB and the top of the limb array.
    ///
    /// Decides at compile time which final-subtraction variant is sound:
    /// with at least one spare bit intermediate sums never overflow the
    /// limbs; with none the overflow carry takes part in the comparison.
    const NUM_SPARE_BITS: usize = 64 * N - Self::MODULUS_BIT_SIZE;

    /// Whether [`Self::NUM_SPARE_BITS`] is at least one.
    const MODULUS_HAS_SPARE_BIT: bool = Self::NUM_SPARE_BITS >= 1;

    /// `INV = -MODULUS^{-1} mod 2^64`.
    const INV: u64 = inv::<Self, N>();

    /// Let `M` be the power of 2^64 nearest to [`Self::MODULUS_BIT_SIZE`].
    /// Then `R = M % MODULUS`.
    const R: Uint<N> = Self::MODULUS.montgomery_r();

    /// `R2 = R^2 % MODULUS`.
    const R2: Uint<N> = Self::MODULUS.montgomery_r2();

    /// `R3 = R^3 % MODULUS`, used to lift double-width byte strings into
    /// Montgomery form.
    const R3: Uint<N> = {
        let r2 = Fp::<Self, N>::new_unchecked(Self::R2);
        r2.const_mul(&r2).montgomery_form
    };

    /// `MODULUS - 2`, the Fermat inversion exponent.
    #[doc(hidden)]
    const MODULUS_MINUS_TWO: Uint<N> =
        Self::MODULUS.const_sub_with_borrow(&Uint::from_u32(2)).0;

    /// `(MODULUS - 1) / 2`, the Euler criterion exponent.
    #[doc(hidden)]
    const MODULUS_MINUS_ONE_DIV_TWO: Uint<N> = Self::MODULUS
        .const_sub_with_borrow(&Uint::from_u32(1))
        .0
        .const_shr_by(1);

    /// The two-adicity `s` of `MODULUS - 1 = t * 2^s` with `t` odd.
    const TWO_ADICITY: u32 = Self::MODULUS
        .const_sub_with_borrow(&Uint::from_u32(1))
        .0
        .const_trailing_zeros();

    /// The odd part `t` of `MODULUS - 1`.
    const TRACE: Uint<N> = Self::MODULUS
        .const_sub_with_borrow(&Uint::from_u32(1))
        .0
        .const_shr_by(Self::TWO_ADICITY);

    /// `(TRACE - 1) / 2`.
    #[doc(hidden)]
    const TRACE_MINUS_ONE_DIV_TWO: Uint<N> =
        Self::TRACE.const_sub_with_borrow(&Uint::from_u32(1)).0.const_shr_by(1);

    /// `GENERATOR^TRACE`, an element of order `2^TWO_ADICITY`.
    const ROOT_OF_UNITY: Fp<Self, N> = Self::GENERATOR.const_pow(&Self::TRACE);

    /// Set `a += b`.
    #[inline(always)]
    fn add_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        // This cannot exceed the backing capacity by more than one bit.
        let carry = a.montgomery_form.add_with_carry(&b.montgomery_form);
        // However, it may need to be reduced.
        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(CtChoice::from(carry));
        }
    }

    /// Set `a -= b`.
    #[inline(always)]
    fn sub_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        // Subtract first; the modulus is added back exactly when the
        // subtraction borrowed. The addition chain runs either way.
        let borrow = a.montgomery_form.sub_with_borrow(&b.montgomery_form);
        a.montgomery_form.cadd_assign(&Self::MODULUS, CtChoice::from(borrow));
    }

    /// Set `a = a + a`.
    #[inline(always)]
    fn double_in_place(a: &mut Fp<Self, N>) {
        let carry = a.montgomery_form.mul2();
        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(CtChoice::from(carry));
        }
    }

    /// Set `a = -a`.
    #[inline(always)]
    fn neg_in_place(a: &mut Fp<Self, N>) {
        let was_zero = a.montgomery_form.ct_is_zero();
        let mut tmp = Self::MODULUS;
        tmp.sub_with_borrow(&a.montgomery_form);
        // Zero stays zero, anything else becomes `MODULUS - a`.
        a.montgomery_form = Uint::ct_select(&Uint::ZERO, &tmp, was_zero);
    }

    /// Set `a *= b`.
    ///
    /// This modular multiplication algorithm uses Montgomery reduction for
    /// efficient implementation, interleaving multiply and reduce steps
    /// over the operand limbs (CIOS).
    #[inline(always)]
    fn mul_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        let (carry, res) = a.mul_without_cond_subtract(b);
        *a = res;

        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(CtChoice::from_word_lsb(carry));
        }
    }

    /// Set `a *= a`.
    #[inline(always)]
    fn square_in_place(a: &mut Fp<Self, N>) {
        let b = *a;
        Self::mul_assign(a, &b);
    }

    /// Compute `a^{-1}`, mapping zero to zero.
    ///
    /// Fermat inversion: a square-and-multiply pass over the public
    /// exponent `MODULUS - 2`, so the schedule is independent of `a`.
    #[must_use]
    fn inverse(a: &Fp<Self, N>) -> Fp<Self, N> {
        a.pow(Self::MODULUS_MINUS_TWO)
    }

    /// Reduce a double-width integer `(lo, hi)` to `lo_hi * R^{-1} mod
    /// MODULUS`.
    ///
    /// This is the reduction half of the CIOS schedule, applied to an
    /// already-computed schoolbook product.
    #[must_use]
    fn montgomery_reduce(lo: &Uint<N>, hi: &Uint<N>) -> Fp<Self, N> {
        let mut lo = lo.limbs;
        let mut hi = hi.limbs;
        let mut carry2 = 0;
        unroll6_for!((i in 0..N) {
            let k = lo[i].wrapping_mul(Self::INV);
            let (_, mut carry) = limb::mac(lo[i], k, Self::MODULUS.limbs[0]);
            unroll6_for!((j in 1..N) {
                let t = i + j;
                if t >= N {
                    (hi[t - N], carry) = limb::carrying_mac(
                        hi[t - N],
                        k,
                        Self::MODULUS.limbs[j],
                        carry,
                    );
                } else {
                    (lo[t], carry) = limb::carrying_mac(
                        lo[t],
                        k,
                        Self::MODULUS.limbs[j],
                        carry,
                    );
                }
            });
            (hi[i], carry2) = limb::adc(hi[i], carry, carry2);
        });

        let mut res = Fp::new_unchecked(Uint::new(hi));
        if Self::MODULUS_HAS_SPARE_BIT {
            res.subtract_modulus();
        } else {
            res.subtract_modulus_with_carry(CtChoice::from_word_lsb(carry2));
        }
        res
    }

    /// Construct a field element from an integer.
    ///
    /// By the end element will be converted to a montgomery form and
    /// reduced.
    #[must_use]
    #[inline]
    fn from_bigint(r: Uint<N>) -> Fp<Self, N> {
        let mut r = Fp::new_unchecked(r);
        if r.is_zero() {
            r
        } else {
            r *= &Fp::new_unchecked(Self::R2);
            r
        }
    }

    /// Convert a field element to an integer less than [`Self::MODULUS`].
    #[must_use]
    #[inline(always)]
    fn into_bigint(a: Fp<Self, N>) -> Uint<N> {
        let mut r = a.montgomery_form.limbs;
        // Montgomery reduction of a reduced residue never needs the final
        // subtraction.
        unroll6_for!((i in 0..N) {
            let k = r[i].wrapping_mul(Self::INV);
            let (_, mut carry) = limb::mac(r[i], k, Self::MODULUS.limbs[0]);
            unroll6_for!((j in 1..N) {
                (r[(j + i) % N], carry) = limb::carrying_mac(
                    r[(j + i) % N],
                    k,
                    Self::MODULUS.limbs[j],
                    carry,
                );
            });
            r[i % N] = carry;
        });

        Uint::new(r)
    }
}

/// Compute the modulus bit size, validating the modulus on the way.
pub const fn modulus_bit_size<T: FpParams<N>, const N: usize>() -> usize {
    assert!(T::MODULUS.const_is_odd(), "modulus must be odd");
    let bits = T::MODULUS.const_num_bits();
    assert!(bits > 1, "modulus must be greater than one");
    bits
}

/// Compute `-M^{-1} mod 2^64`.
pub const fn inv<T: FpParams<N>, const N: usize>() -> u64 {
    // Hensel lifting from the trivial inverse modulo 2: every Newton step
    // `x <- x * (2 - m0 * x)` doubles the number of correct low bits, so
    // six steps reach the full 64-bit word.
    let m0 = T::MODULUS.limbs[0];
    assert!(m0 & 1 == 1, "modulus must be odd");
    let mut x = 1u64;
    const_for!((_i in 0..6) {
        x = x.wrapping_mul(2u64.wrapping_sub(m0.wrapping_mul(x)));
    });
    x.wrapping_neg()
}

/// Represents an element of the prime field `F_p`, where `p == P::MODULUS`.
///
/// This type can represent elements in any field of size at most N * 64
/// bits.
#[derive(Educe)]
#[educe(Default, Clone, Copy)]
pub struct Fp<P: FpParams<N>, const N: usize> {
    /// Contains the element in Montgomery form for efficient multiplication.
    /// To convert an element to a [`Uint`], use [`FpParams::into_bigint`]
    /// or `into`.
    montgomery_form: Uint<N>,
    #[doc(hidden)]
    phantom: PhantomData<P>,
}

/// Declare [`Fp`] types for different bit sizes.
macro_rules! declare_fp {
    ($fp:ident, $limbs:ident, $bits:expr) => {
        #[doc = "Finite field with max"]
        #[doc = stringify!($bits)]
        #[doc = "bits size element."]
        pub type $fp<P> = $crate::field::fp::Fp<
            P,
            {
                usize::div_ceil(
                    $bits,
                    $crate::arithmetic::limb::Limb::BITS as usize,
                )
            },
        >;

        #[doc = "Number of limbs in the field with"]
        #[doc = stringify!($bits)]
        #[doc = "bits size element."]
        pub const $limbs: usize = usize::div_ceil(
            $bits,
            $crate::arithmetic::limb::Limb::BITS as usize,
        );
    };
}

declare_fp!(Fp64, LIMBS_64, 64);
declare_fp!(Fp128, LIMBS_128, 128);
declare_fp!(Fp192, LIMBS_192, 192);
declare_fp!(Fp256, LIMBS_256, 256);
declare_fp!(Fp320, LIMBS_320, 320);
declare_fp!(Fp384, LIMBS_384, 384);
declare_fp!(Fp448, LIMBS_448, 448);
declare_fp!(Fp512, LIMBS_512, 512);
declare_fp!(Fp576, LIMBS_576, 576);
declare_fp!(Fp640, LIMBS_640, 640);
declare_fp!(Fp768, LIMBS_768, 768);

impl<P: FpParams<N>, const N: usize> Fp<P, N> {
    /// A multiplicative generator of the field.
    /// [`Self::GENERATOR`] is an element having multiplicative order
    /// `MODULUS - 1`.
    pub const GENERATOR: Fp<P, N> = P::GENERATOR;
    /// Multiplicative identity of the field, i.e., the element `e`
    /// such that, for all elements `f` of the field, `e * f = f`.
    pub const ONE: Fp<P, N> = Fp::new_unchecked(P::R);
    /// Additive identity of the field, i.e., the element `e`
    /// such that, for all elements `f` of the field, `e + f = f`.
    pub const ZERO: Fp<P, N> = Fp::new_unchecked(Uint::new([0; N]));

    /// Canonical serialized size in bytes, `⌈MODULUS_BIT_SIZE / 8⌉`.
    pub const BYTES: usize = (P::MODULUS_BIT_SIZE + 7) / 8;

    /// Construct a new field element from [`Uint`].
    ///
    /// Unlike [`Self::new`], this method does not perform Montgomery
    /// reduction. This method should be used only when constructing an
    /// element from an integer that has already been put in Montgomery
    /// form.
    #[must_use]
    #[inline(always)]
    pub const fn new_unchecked(element: Uint<N>) -> Self {
        Self { montgomery_form: element, phantom: PhantomData }
    }

    /// Construct a new field element from its underlying [`Uint`] data
    /// type, converting into Montgomery form.
    #[inline]
    #[must_use]
    pub const fn new(element: Uint<N>) -> Self {
        let r = Self::new_unchecked(element);
        if r.const_is_zero() {
            r
        } else {
            r.const_mul(&Self::new_unchecked(P::R2))
        }
    }

    /// Raw access to the Montgomery residue.
    #[must_use]
    pub const fn into_montgomery(self) -> Uint<N> {
        self.montgomery_form
    }

    // ------------------------------------------------------------------
    // Const-evaluation family, for building compile-time constants. The
    // branches in here never see runtime secrets.
    // ------------------------------------------------------------------

    const fn const_is_zero(&self) -> bool {
        self.montgomery_form.const_is_zero()
    }

    /// `montgomery_form < MODULUS`, in const evaluation.
    const fn const_is_valid(&self) -> bool {
        const_for!((i in 0..N) {
            let a = self.montgomery_form.limbs[N - i - 1];
            let m = P::MODULUS.limbs[N - i - 1];
            if a < m {
                return true;
            } else if a > m {
                return false;
            }
        });
        false
    }

    #[inline]
    const fn const_subtract_modulus(mut self) -> Self {
        if !self.const_is_valid() {
            self.montgomery_form =
                self.montgomery_form.const_sub_with_borrow(&P::MODULUS).0;
        }
        self
    }

    #[inline]
    const fn const_subtract_modulus_with_carry(mut self, carry: bool) -> Self {
        if carry || !self.const_is_valid() {
            self.montgomery_form =
                self.montgomery_form.const_sub_with_borrow(&P::MODULUS).0;
        }
        self
    }

    pub(crate) const fn const_mul(self, other: &Self) -> Self {
        let (carry, res) = self.mul_without_cond_subtract(other);
        if P::MODULUS_HAS_SPARE_BIT {
            res.const_subtract_modulus()
        } else {
            res.const_subtract_modulus_with_carry(carry != 0)
        }
    }

    /// Additive negation, in const evaluation.
    pub(crate) const fn const_neg(self) -> Self {
        if self.const_is_zero() {
            self
        } else {
            Self::new_unchecked(
                P::MODULUS.const_sub_with_borrow(&self.montgomery_form).0,
            )
        }
    }

    /// `self^exp` by square-and-multiply over the public exponent, in
    /// const evaluation.
    pub(crate) const fn const_pow(self, exp: &Uint<N>) -> Self {
        let mut res = Self::new_unchecked(P::R);
        let mut i = exp.const_num_bits();
        while i > 0 {
            i -= 1;
            res = res.const_mul(&res);
            if exp.const_get_bit(i) {
                res = res.const_mul(&self);
            }
        }
        res
    }

    // ------------------------------------------------------------------
    // The CIOS Montgomery kernel, shared by the const and runtime paths.
    // Loop indices are the only control flow; no operand-dependent
    // branches.
    // ------------------------------------------------------------------

    #[inline(always)]
    const fn mul_without_cond_subtract(mut self, other: &Self) -> (Limb, Self) {
        let (mut lo, mut hi) = ([0; N], [0; N]);
        unroll6_for!((i in 0..N) {
            let mut carry = 0;
            unroll6_for!((j in 0..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) = limb::carrying_mac(
                        hi[k - N],
                        self.montgomery_form.limbs[i],
                        other.montgomery_form.limbs[j],
                        carry
                    );
                } else {
                    (lo[k], carry) = limb::carrying_mac(
                        lo[k],
                        self.montgomery_form.limbs[i],
                        other.montgomery_form.limbs[j],
                        carry
                    );
                }
            });
            hi[i] = carry;
        });
        // Montgomery reduction
        let mut carry2 = 0;
        unroll6_for!((i in 0..N) {
            let tmp = lo[i].wrapping_mul(P::INV);

            let (_, mut carry) = limb::mac(lo[i], tmp, P::MODULUS.limbs[0]);

            unroll6_for!((j in 1..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) = limb::carrying_mac(
                        hi[k - N],
                        tmp,
                        P::MODULUS.limbs[j],
                        carry
                    );
                } else {
                    (lo[k], carry) = limb::carrying_mac(
                        lo[k],
                        tmp,
                        P::MODULUS.limbs[j],
                        carry
                    );
                }
            });
            (hi[i], carry2) = limb::adc(hi[i], carry, carry2);
        });

        unroll6_for!((i in 0..N) {
            self.montgomery_form.limbs[i] = hi[i];
        });
        (carry2, self)
    }

    // ------------------------------------------------------------------
    // Constant-time final subtraction, the runtime counterpart of the
    // `const_subtract_modulus*` pair. The subtraction always runs; the
    // result is committed through a masked copy.
    // ------------------------------------------------------------------

    #[inline(always)]
    fn subtract_modulus(&mut self) {
        let mut reduced = self.montgomery_form;
        let borrow = reduced.sub_with_borrow(&P::MODULUS);
        self.montgomery_form.ct_assign(&reduced, CtChoice::from(!borrow));
    }

    #[inline(always)]
    fn subtract_modulus_with_carry(&mut self, carry: CtChoice) {
        let mut reduced = self.montgomery_form;
        let borrow = reduced.sub_with_borrow(&P::MODULUS);
        // An overflow bit above the limbs means the value exceeds the
        // modulus even though the subtraction borrowed.
        let commit = carry.or(CtChoice::from(!borrow));
        self.montgomery_form.ct_assign(&reduced, commit);
    }

    // ------------------------------------------------------------------
    // Constant-time observers and conditional operations.
    // ------------------------------------------------------------------

    /// `self == 0` as a secret choice.
    #[inline(always)]
    #[must_use]
    pub fn ct_is_zero(&self) -> CtChoice {
        self.montgomery_form.ct_is_zero()
    }

    /// `self == other` as a secret choice.
    ///
    /// Montgomery residues of reduced elements are canonical, so limb
    /// equality is representative equality.
    #[inline(always)]
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> CtChoice {
        self.montgomery_form.ct_eq(&other.montgomery_form)
    }

    /// Return `a` when `choice` is true, `b` otherwise.
    #[inline(always)]
    #[must_use]
    pub fn ct_select(a: &Self, b: &Self, choice: CtChoice) -> Self {
        Self::new_unchecked(Uint::ct_select(
            &a.montgomery_form,
            &b.montgomery_form,
            choice,
        ))
    }

    /// Replace `self` with `other` when `choice` is true.
    #[inline(always)]
    pub fn ct_assign(&mut self, other: &Self, choice: CtChoice) {
        self.montgomery_form.ct_assign(&other.montgomery_form, choice);
    }

    /// Negate `self` when `choice` is true.
    #[inline(always)]
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
            let hit = index.ct_eq(CtWord::new(i as Limb));
            acc.ct_assign(entry, hit);
        }
        acc
    }

    // ------------------------------------------------------------------
    // Derived arithmetic.
    // ------------------------------------------------------------------

    /// `self^(2^num_times)`. The repetition count is public.
    #[must_use]
    pub fn square_repeated(&self, num_times: usize) -> Self {
        let mut result = *self;
        for _ in 0..num_times {
            result.square_in_place();
        }
        result
    }

    /// Multiply by a small public integer with double-and-add over its
    /// bits. Cheaper than a full field multiplication for sparse factors.
    #[must_use]
    pub fn scale(&self, factor: u64) -> Self {
        let mut acc = Self::ZERO;
        for bit in factor.bit_be_trimmed_iter() {
            acc.double_in_place();
            if bit {
                acc += self;
            }
        }
        acc
    }

    /// Variable-time inversion with the binary extended Euclidean
    /// algorithm, returning `None` for zero.
    ///
    /// Iteration count and branches depend on the value of `self`; use
    /// only where `self` is public.
    #[must_use]
    pub fn inverse_vartime(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        // Guajardo Kumar Paar Pelzl
        // Efficient Software-Implementation of Finite Fields with
        // Applications to Cryptography
        // Algorithm 16 (BEA for Inversion in Fp)

        let one = Uint::ONE;

        let mut u = self.montgomery_form;
        let mut v = P::MODULUS;
        let mut b = Fp::new_unchecked(P::R2); // Avoids unnecessary reduction step.
        let mut c = Fp::zero();

        while u != one && v != one {
            while u.is_even() {
                u.div2();

                if b.montgomery_form.is_even() {
                    b.montgomery_form.div2();
                } else {
                    let carry = b.montgomery_form.add_with_carry(&P::MODULUS);
                    b.montgomery_form.div2();
                    if !P::MODULUS_HAS_SPARE_BIT && carry {
                        b.montgomery_form.limbs[N - 1] |= 1 << 63;
                    }
                }
            }

            while v.is_even() {
                v.div2();

                if c.montgomery_form.is_even() {
                    c.montgomery_form.div2();
                } else {
                    let carry = c.montgomery_form.add_with_carry(&P::MODULUS);
                    c.montgomery_form.div2();
                    if !P::MODULUS_HAS_SPARE_BIT && carry {
                        c.montgomery_form.limbs[N - 1] |= 1 << 63;
                    }
                }
            }

            if v < u {
                u.sub_with_borrow(&v);
                b -= &c;
            } else {
                v.sub_with_borrow(&u);
                c -= &b;
            }
        }

        if u == one {
            Some(b)
        } else {
            Some(c)
        }
    }

    /// Whether `self` is a quadratic residue (zero included).
    #[must_use]
    pub fn is_square(&self) -> CtChoice {
        let euler = self.pow(P::MODULUS_MINUS_ONE_DIV_TWO);
        euler.ct_eq(&Self::ONE).or(euler.ct_is_zero())
    }

    /// Constant-time Tonelli-Shanks square root.
    ///
    /// Returns `(r, was_square)`. `r` satisfies `r * r == self` iff
    /// `was_square` is true; otherwise `r` carries no meaning. The loop
    /// structure depends only on the two-adicity of the modulus.
    #[must_use]
    pub fn sqrt(&self) -> (Self, CtChoice) {
        // https://eprint.iacr.org/2012/685.pdf (page 12, algorithm 5)
        // with constant-time modifications as in the `ff` crate.
        let w = self.pow(P::TRACE_MINUS_ONE_DIV_TWO);
        let mut v = P::TWO_ADICITY;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = P::ROOT_OF_UNITY;

        let mut max_v = P::TWO_ADICITY;
        while max_v >= 1 {
            let mut k = 1u32;
            let mut tmp = b.square();
            let mut j_less_than_v = CtChoice::TRUE;

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::ct_select(&z, &tmp, tmp_is_one).square();
                tmp = Self::ct_select(&tmp, &squared, tmp_is_one);
                let new_z = Self::ct_select(&squared, &z, tmp_is_one);
                j_less_than_v = j_less_than_v.and(
                    CtWord::new(j.into()).ct_eq(CtWord::new(v.into())).not(),
                );
                k = tmp_is_one.select_u32(k, j);
                z = Self::ct_select(&new_z, &z, j_less_than_v);
            }

            let result = x * z;
            x = Self::ct_select(&x, &result, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= z;
            v = k;
            max_v -= 1;
        }

        (x, (x * x).ct_eq(self))
    }

    /// Constant-time inverse square root.
    ///
    /// Returns `(r, valid)` with `r * r * self == 1` when `valid` is true.
    /// Zero and quadratic non-residues report `valid` false.
    #[must_use]
    pub fn invsqrt(&self) -> (Self, CtChoice) {
        let (root, was_square) = self.inverse().sqrt();
        (root, was_square.and(self.ct_is_zero().not()))
    }

    // ------------------------------------------------------------------
    // Canonical octet-string serialization. Buffers are caller-owned;
    // the canonical length is [`Self::BYTES`].
    // ------------------------------------------------------------------

    /// Parse a canonical big-endian encoding.
    ///
    /// # Errors
    ///
    /// Rejects inputs whose length differs from [`Self::BYTES`], with set
    /// bits above the declared bit width, or encoding a value not below
    /// the modulus.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::check_canonical(bytes, bytes.first().copied())?;
        let mut repr = Uint::<N>::ZERO;
        for (i, &byte) in bytes.iter().rev().enumerate() {
            repr.limbs[i / 8] |= Limb::from(byte) << (8 * (i % 8));
        }
        Self::reduce_checked(repr)
    }

    /// Parse a canonical little-endian encoding.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::from_be_bytes`].
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::check_canonical(bytes, bytes.last().copied())?;
        let mut repr = Uint::<N>::ZERO;
        for (i, &byte) in bytes.iter().enumerate() {
            repr.limbs[i / 8] |= Limb::from(byte) << (8 * (i % 8));
        }
        Self::reduce_checked(repr)
    }

    fn check_canonical(
        bytes: &[u8],
        top_byte: Option<u8>,
    ) -> Result<(), ValueError> {
        if bytes.len() != Self::BYTES {
            return Err(ValueError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        let spare_bits = Self::BYTES * 8 - P::MODULUS_BIT_SIZE;
        if spare_bits > 0 {
            let high_mask = !(0xFF_u8 >> spare_bits);
            if top_byte.unwrap_or(0) & high_mask != 0 {
                return Err(ValueError::ExcessBits);
            }
        }
        Ok(())
    }

    fn reduce_checked(repr: Uint<N>) -> Result<Self, ValueError> {
        if bool::from(repr.ct_lt(&P::MODULUS)) {
            Ok(Self::from_bigint(repr))
        } else {
            Err(ValueError::NonCanonical)
        }
    }

    /// Write the canonical big-endian encoding into `bytes`.
    ///
    /// # Errors
    ///
    /// Rejects buffers whose length differs from [`Self::BYTES`].
    pub fn to_be_bytes(&self, bytes: &mut [u8]) -> Result<(), ValueError> {
        if bytes.len() != Self::BYTES {
            return Err(ValueError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        let repr = self.into_bigint();
        for (i, byte) in bytes.iter_mut().rev().enumerate() {
            *byte = (repr.limbs[i / 8] >> (8 * (i % 8))) as u8;
        }
        Ok(())
    }

    /// Write the canonical little-endian encoding into `bytes`.
    ///
    /// # Errors
    ///
    /// Rejects buffers whose length differs from [`Self::BYTES`].
    pub fn to_le_bytes(&self, bytes: &mut [u8]) -> Result<(), ValueError> {
        if bytes.len() != Self::BYTES {
            return Err(ValueError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        let repr = self.into_bigint();
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (repr.limbs[i / 8] >> (8 * (i % 8))) as u8;
        }
        Ok(())
    }

    /// Interpret a big-endian byte string of up to twice the limb size as
    /// an integer and reduce it modulo the modulus.
    ///
    /// This is the lift used by hash-to-field: the high half is folded in
    /// through `R³`. The input length is public.
    ///
    /// # Panics
    ///
    /// Panics if the input exceeds `16 * N` bytes.
    #[must_use]
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= 16 * N, "input exceeds twice the limb size");
        let split = bytes.len().saturating_sub(8 * N);
        let (high, low) = bytes.split_at(split);

        let mut lo = Uint::<N>::ZERO;
        for (i, &byte) in low.iter().rev().enumerate() {
            lo.limbs[i / 8] |= Limb::from(byte) << (8 * (i % 8));
        }
        let mut hi = Uint::<N>::ZERO;
        for (i, &byte) in high.iter().rev().enumerate() {
            hi.limbs[i / 8] |= Limb::from(byte) << (8 * (i % 8));
        }

        // value = hi * 2^(64 * N) + lo, and 2^(64 * N) ≡ R, so the
        // Montgomery residues arrive as lo * R = mont(lo, R²) and
        // hi * R * R = mont(hi, R³).
        let lo = Fp::new_unchecked(lo) * Fp::new_unchecked(P::R2);
        let hi = Fp::new_unchecked(hi) * Fp::new_unchecked(P::R3);
        hi + lo
    }

    /// Little-endian variant of [`Self::from_be_bytes_mod_order`].
    ///
    /// # Panics
    ///
    /// Panics if the input exceeds `16 * N` bytes.
    #[must_use]
    pub fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= 16 * N, "input exceeds twice the limb size");
        let split = bytes.len().min(8 * N);
        let (low, high) = bytes.split_at(split);

        let lo = Uint::<N>::from_le_slice_padded(low);
        let hi = Uint::<N>::from_le_slice_padded(high);

        let lo = Fp::new_unchecked(lo) * Fp::new_unchecked(P::R2);
        let hi = Fp::new_unchecked(hi) * Fp::new_unchecked(P::R3);
        hi + lo
    }
}

impl<P: FpParams<N>, const N: usize> PartialEq for Fp<P, N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<P: FpParams<N>, const N: usize> Eq for Fp<P, N> {}

impl<P: FpParams<N>, const N: usize> Debug for Fp<P, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.into_bigint(), f)
    }
}

impl<P: FpParams<N>, const N: usize> Zero for Fp<P, N> {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl<P: FpParams<N>, const N: usize> One for Fp<P, N> {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl<P: FpParams<N>, const N: usize> AdditiveGroup for Fp<P, N> {
    type Scalar = Self;

    const ZERO: Self = Self::ZERO;

    #[inline]
    fn double(&self) -> Self {
        let mut temp = *self;
        temp.double_in_place();
        temp
    }

    #[inline]
    fn double_in_place(&mut self) -> &mut Self {
        P::double_in_place(self);
        self
    }

    #[inline]
    fn neg_in_place(&mut self) -> &mut Self {
        P::neg_in_place(self);
        self
    }
}

impl<P: FpParams<N>, const N: usize> Field for Fp<P, N> {
    const ONE: Self = Fp::new_unchecked(P::R);

    #[inline]
    fn square(&self) -> Self {
        let mut temp = *self;
        temp.square_in_place();
        temp
    }

    #[inline]
    fn square_in_place(&mut self) -> &mut Self {
        P::square_in_place(self);
        self
    }

    #[inline]
    fn inverse(&self) -> Self {
        P::inverse(self)
    }
}

impl<P: FpParams<N>, const N: usize> PrimeField for Fp<P, N> {
    type BigInt = Uint<N>;

    const MODULUS: Self::BigInt = P::MODULUS;
    const MODULUS_BIT_SIZE: usize = P::MODULUS_BIT_SIZE;

    #[inline]
    fn from_bigint(repr: Self::BigInt) -> Self {
        P::from_bigint(repr)
    }

    #[inline]
    fn into_bigint(self) -> Uint<N> {
        P::into_bigint(self)
    }
}

impl<P: FpParams<N>, const N: usize> Ord for Fp<P, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.into_bigint().cmp(&other.into_bigint())
    }
}

impl<P: FpParams<N>, const N: usize> PartialOrd for Fp<P, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Auto implements conversion from unsigned integer of type `$int` to
/// [`Fp`].
macro_rules! impl_fp_from_unsigned_int {
    ($int:ty) => {
        impl<P: FpParams<N>, const N: usize> From<$int> for Fp<P, N> {
            fn from(other: $int) -> Self {
                Fp::from_bigint(Uint::from(other))
            }
        }
    };
}

/// Auto implements conversion from signed integer of type `$int` to [`Fp`].
macro_rules! impl_fp_from_signed_int {
    ($int:ty) => {
        impl<P: FpParams<N>, const N: usize> From<$int> for Fp<P, N> {
            fn from(other: $int) -> Self {
                let abs = other.unsigned_abs().into();
                if other.is_positive() {
                    abs
                } else {
                    -abs
                }
            }
        }
    };
}

impl_fp_from_unsigned_int!(u64);
impl_fp_from_unsigned_int!(u32);
impl_fp_from_unsigned_int!(u16);
impl_fp_from_unsigned_int!(u8);

impl_fp_from_signed_int!(i64);
impl_fp_from_signed_int!(i32);
impl_fp_from_signed_int!(i16);
impl_fp_from_signed_int!(i8);

impl<P: FpParams<N>, const N: usize> From<bool> for Fp<P, N> {
    fn from(other: bool) -> Self {
        u8::from(other).into()
    }
}

/// Auto implements conversion from [`Fp`] to integer of type `$int`.
///
/// Conversion is available only for a single limb field elements,
/// i.e. `N = 1`.
macro_rules! impl_int_from_fp {
    ($int:ty) => {
        impl<P: FpParams<1>> From<Fp<P, 1>> for $int {
            fn from(other: Fp<P, 1>) -> Self {
                let uint = other.into_bigint();
                let words = uint.as_limbs();
                <$int>::try_from(words[0]).unwrap_or_else(|_| {
                    panic!("should convert to {}", stringify!($int))
                })
            }
        }
    };
}

impl_int_from_fp!(u128);
impl_int_from_fp!(u64);
impl_int_from_fp!(u32);
impl_int_from_fp!(u16);
impl_int_from_fp!(u8);
impl_int_from_fp!(i128);
impl_int_from_fp!(i64);
impl_int_from_fp!(i32);
impl_int_from_fp!(i16);
impl_int_from_fp!(i8);

/// Outputs a string containing the value of `self`,
/// represented as a decimal without leading zeroes.
impl<P: FpParams<N>, const N: usize> Display for Fp<P, N> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let str = self.into_bigint().to_string();
        write!(f, "{str}")
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Neg for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        P::neg_in_place(&mut self);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Add<&Fp<P, N>> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: &Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(other);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Sub<&Fp<P, N>> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: &Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(other);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Mul<&Fp<P, N>> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: &Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(other);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Div<&Fp<P, N>> for Fp<P, N> {
    type Output = Self;

    /// Returns `self * other.inverse()` if `other` is non-zero, and
    /// panics otherwise.
    #[inline]
    fn div(mut self, other: &Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(other);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Add<&Fp<P, N>> for &Fp<P, N> {
    type Output = Fp<P, N>;

    #[inline]
    fn add(self, other: &Fp<P, N>) -> Fp<P, N> {
        use core::ops::AddAssign;
        let mut result = *self;
        result.add_assign(other);
        result
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Sub<&Fp<P, N>> for &Fp<P, N> {
    type Output = Fp<P, N>;

    #[inline]
    fn sub(self, other: &Fp<P, N>) -> Fp<P, N> {
        use core::ops::SubAssign;
        let mut result = *self;
        result.sub_assign(other);
        result
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Mul<&Fp<P, N>> for &Fp<P, N> {
    type Output = Fp<P, N>;

    #[inline]
    fn mul(self, other: &Fp<P, N>) -> Fp<P, N> {
        use core::ops::MulAssign;
        let mut result = *self;
        result.mul_assign(other);
        result
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Div<&Fp<P, N>> for &Fp<P, N> {
    type Output = Fp<P, N>;

    #[inline]
    fn div(self, other: &Fp<P, N>) -> Fp<P, N> {
        use core::ops::DivAssign;
        let mut result = *self;
        result.div_assign(other);
        result
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::AddAssign<&Self> for Fp<P, N> {
    #[inline]
    fn add_assign(&mut self, other: &Self) {
        P::add_assign(self, other);
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::SubAssign<&Self> for Fp<P, N> {
    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        P::sub_assign(self, other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Add<Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Add<&mut Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: &mut Self) -> Self {
        use core::ops::AddAssign;
        self.add_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Sub<Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Sub<&mut Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: &mut Self) -> Self {
        use core::ops::SubAssign;
        self.sub_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::iter::Sum<Self> for Fp<P, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: FpParams<N>, const N: usize> core::iter::Sum<&'a Self>
    for Fp<P, N>
{
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::AddAssign<Self> for Fp<P, N> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.add_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::SubAssign<Self> for Fp<P, N> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.sub_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::AddAssign<&mut Self>
    for Fp<P, N>
{
    #[inline]
    fn add_assign(&mut self, other: &mut Self) {
        self.add_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::SubAssign<&mut Self>
    for Fp<P, N>
{
    #[inline]
    fn sub_assign(&mut self, other: &mut Self) {
        self.sub_assign(&*other);
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::MulAssign<&Self> for Fp<P, N> {
    fn mul_assign(&mut self, other: &Self) {
        P::mul_assign(self, other);
    }
}

/// Computes `self *= other.inverse()`, panicking for a zero divisor.
impl<P: FpParams<N>, const N: usize> core::ops::DivAssign<&Self> for Fp<P, N> {
    #[inline]
    fn div_assign(&mut self, other: &Self) {
        use core::ops::MulAssign;
        self.mul_assign(
            &other.checked_inverse().expect("should not divide by zero"),
        );
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Mul<Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Div<Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(&other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Mul<&mut Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: &mut Self) -> Self {
        use core::ops::MulAssign;
        self.mul_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::Div<&mut Self> for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: &mut Self) -> Self {
        use core::ops::DivAssign;
        self.div_assign(&*other);
        self
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::iter::Product<Self> for Fp<P, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: FpParams<N>, const N: usize> core::iter::Product<&'a Self>
    for Fp<P, N>
{
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::MulAssign<Self> for Fp<P, N> {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        self.mul_assign(&other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::DivAssign<&mut Self>
    for Fp<P, N>
{
    #[inline]
    fn div_assign(&mut self, other: &mut Self) {
        self.div_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::MulAssign<&mut Self>
    for Fp<P, N>
{
    #[inline]
    fn mul_assign(&mut self, other: &mut Self) {
        self.mul_assign(&*other);
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::ops::DivAssign<Self> for Fp<P, N> {
    #[inline]
    fn div_assign(&mut self, other: Self) {
        self.div_assign(&other);
    }
}

impl<P: FpParams<N>, const N: usize> zeroize::Zeroize for Fp<P, N> {
    // The phantom data does not contain element-specific data
    // and thus does not need to be zeroized.
    fn zeroize(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.montgomery_form);
    }
}

impl<P: FpParams<N>, const N: usize> From<Fp<P, N>> for Uint<N> {
    #[inline]
    fn from(fp: Fp<P, N>) -> Self {
        fp.into_bigint()
    }
}

impl<P: FpParams<N>, const N: usize> From<Uint<N>> for Fp<P, N> {
    #[inline]
    fn from(int: Uint<N>) -> Self {
        Self::from_bigint(int)
    }
}

/// This macro converts a string base-10 number to a field element.
#[macro_export]
macro_rules! fp_from_num {
    ($num:literal) => {
        $crate::field::fp::Fp::new($crate::arithmetic::uint::from_str_radix(
            $num, 10,
        ))
    };
}

/// This macro converts a string hex number to a field element.
#[macro_export]
macro_rules! fp_from_hex {
    ($num:literal) => {{
        $crate::field::fp::Fp::new($crate::arithmetic::uint::from_str_hex($num))
    }};
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use num_bigint::BigUint;
    use proptest::prelude::*;

    use super::*;
    use crate::{fp_from_num, from_num};

    type Field64 = Fp64<Fp64Param>;
    struct Fp64Param;
    impl FpParams<LIMBS_64> for Fp64Param {
        const GENERATOR: Fp64<Fp64Param> = fp_from_num!("3");
        const MODULUS: Uint<LIMBS_64> = from_num!("1000003"); // Prime number
    }

    const MODULUS: i128 = 1000003; // Prime number

    // F5 exercises a modulus small enough to verify by hand.
    type F5 = Fp64<F5Param>;
    struct F5Param;
    impl FpParams<LIMBS_64> for F5Param {
        const GENERATOR: Fp64<F5Param> = fp_from_num!("2");
        const MODULUS: Uint<LIMBS_64> = from_num!("5");
    }

    // F13 and F17 have two-adicity 2 and 4, exercising the deep
    // Tonelli-Shanks loop.
    type F13 = Fp64<F13Param>;
    struct F13Param;
    impl FpParams<LIMBS_64> for F13Param {
        const GENERATOR: Fp64<F13Param> = fp_from_num!("2");
        const MODULUS: Uint<LIMBS_64> = from_num!("13");
    }

    type F17 = Fp64<F17Param>;
    struct F17Param;
    impl FpParams<LIMBS_64> for F17Param {
        const GENERATOR: Fp64<F17Param> = fp_from_num!("3");
        const MODULUS: Uint<LIMBS_64> = from_num!("17");
    }

    proptest! {
        #[test]
        fn add(a: i64, b: i64) {
            let res = Field64::from(a) + Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a + b).rem_euclid(MODULUS));
        }

        #[test]
        fn double(a: i64) {
            let res = Field64::from(a).double();
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (a + a).rem_euclid(MODULUS));
        }

        #[test]
        fn sub(a: i64, b: i64) {
            let res = Field64::from(a) - Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a - b).rem_euclid(MODULUS));
        }

        #[test]
        fn mul(a: i64, b: i64) {
            let res = Field64::from(a) * Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a * b).rem_euclid(MODULUS));
        }

        #[test]
        fn square(a: i64) {
            let res = Field64::from(a).square();
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (a * a).rem_euclid(MODULUS));
        }

        #[test]
        fn div(a: i64, b: i64) {
            // Skip if `b` is zero.
            if i128::from(b) % MODULUS == 0 {
                return Ok(());
            }

            let res = Field64::from(a) / Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            // a / b = res mod M => res * b = a mod M
            prop_assert_eq!((res * b).rem_euclid(MODULUS), a.rem_euclid(MODULUS));
        }

        #[test]
        fn pow(a: i64, b in 0_u32..1000) {
            /// Compute a^b in an expensive and iterative way.
            fn dumb_pow(a: i128, b: i128) -> i128 {
                (0..b).fold(1, |acc, _| (acc * a).rem_euclid(MODULUS))
            }

            let res = Field64::from(a).pow(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, dumb_pow(a, b));
        }

        #[test]
        fn neg(a: i64) {
            let res = -Field64::from(a);
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (-a).rem_euclid(MODULUS));
        }

        #[test]
        fn one(a: i64) {
            let res = Field64::one();
            let res: i128 = res.into();
            prop_assert_eq!(res, 1);

            let res = Field64::one() * Field64::from(a);
            let res: i128 = res.into();
            let a: i128 = a.into();
            prop_assert_eq!(res, a.rem_euclid(MODULUS));
        }

        #[test]
        fn zero(a: i64) {
            let res = Field64::zero();
            let res: i128 = res.into();
            prop_assert_eq!(res, 0);

            let res = Field64::zero() + Field64::from(a);
            let res: i128 = res.into();
            let a: i128 = a.into();
            prop_assert_eq!(res, a.rem_euclid(MODULUS));
        }

        #[test]
        fn inverse_is_fermat(a: i64) {
            let a = Field64::from(a);
            let inv = a.inverse();
            if a.is_zero() {
                prop_assert!(inv.is_zero());
            } else {
                prop_assert_eq!(a * inv, Field64::ONE);
            }
            prop_assert_eq!(Some(inv).filter(|_| !a.is_zero()), a.inverse_vartime());
        }

        #[test]
        fn scale_matches_mul(a: i64, k: u64) {
            let a = Field64::from(a);
            prop_assert_eq!(a.scale(k), a * Field64::from(k));
        }

        #[test]
        fn square_repeated_matches_pow(a: i64, n in 0_usize..16) {
            let a = Field64::from(a);
            let mut expected = a;
            for _ in 0..n {
                expected = expected.square();
            }
            prop_assert_eq!(a.square_repeated(n), expected);
        }

        #[test]
        fn conditional_ops_match_branch(a: i64, b: i64, cond: bool) {
            let (x, y) = (Field64::from(a), Field64::from(b));
            let choice = CtChoice::from(cond);

            prop_assert_eq!(
                Field64::ct_select(&x, &y, choice),
                if cond { x } else { y }
            );

            let mut neg = x;
            neg.cneg_assign(choice);
            prop_assert_eq!(neg, if cond { -x } else { x });
        }
    }

    #[test]
    fn metadata_consistency() {
        // INV * M ≡ -1 (mod 2^64).
        let m0 = Fp64Param::MODULUS.as_limbs()[0];
        assert_eq!(Fp64Param::INV.wrapping_mul(m0), u64::MAX);

        // R and R2 against a straightforward oracle.
        let m = BigUint::from(1000003u64);
        let r = (BigUint::from(1u8) << 64) % &m;
        let r2 = (&r * &r) % &m;
        let r3 = (&r * &r2) % &m;
        assert_eq!(BigUint::from(Fp64Param::R), r);
        assert_eq!(BigUint::from(Fp64Param::R2), r2);
        assert_eq!(BigUint::from(Fp64Param::R3), r3);

        // 1000002 = 2 * 500001.
        assert_eq!(Fp64Param::TWO_ADICITY, 1);
        assert_eq!(Fp64Param::TRACE, Uint::from(500001u64));

        // The root of unity has order exactly 2^s.
        let root = Fp64Param::ROOT_OF_UNITY;
        assert_eq!(root.square(), Field64::ONE);
        assert_ne!(root, Field64::ONE);
    }

    #[test]
    fn spare_bits_found() {
        assert_eq!(Fp64Param::MODULUS_BIT_SIZE, 20);
        assert_eq!(Fp64Param::NUM_SPARE_BITS, 44);
        assert!(Fp64Param::MODULUS_HAS_SPARE_BIT);
    }

    #[test]
    fn f5_arithmetic() {
        let a = F5::from(3u8);
        let b = F5::from(4u8);

        assert_eq!(a + b, F5::from(2u8));
        assert_eq!(a * b, F5::from(2u8));
        assert_eq!(a.inverse(), F5::from(2u8));

        let (root, was_square) = F5::from(4u8).sqrt();
        assert!(bool::from(was_square));
        assert!(root == F5::from(2u8) || root == F5::from(3u8));

        let (_, was_square) = F5::from(2u8).sqrt();
        assert!(!bool::from(was_square));

        let (root, was_square) = F5::ZERO.sqrt();
        assert!(bool::from(was_square));
        assert!(root.is_zero());
    }

    #[test]
    fn sqrt_exhaustive_small_fields() {
        fn check<P: FpParams<1>>(p: u64) {
            let squares: std::collections::HashSet<u64> =
                (0..p).map(|a| a * a % p).collect();
            for a in 0..p {
                let x = Fp::<P, 1>::from(a);
                let (root, was_square) = x.sqrt();
                assert_eq!(
                    bool::from(was_square),
                    squares.contains(&a),
                    "sqrt flag mismatch for {a} mod {p}"
                );
                if bool::from(was_square) {
                    assert_eq!(root * root, x);
                }
                assert_eq!(bool::from(x.is_square()), squares.contains(&a));
            }
        }
        check::<F5Param>(5);
        check::<F13Param>(13);
        check::<F17Param>(17);
    }

    #[test]
    fn invsqrt_contract() {
        for a in 1..13u64 {
            let x = F13::from(a);
            let (r, valid) = x.invsqrt();
            if bool::from(valid) {
                assert_eq!(r * r * x, F13::ONE);
            }
        }
        let (_, valid) = F13::ZERO.invsqrt();
        assert!(!bool::from(valid));
    }

    #[test]
    fn serialization_round_trip() {
        let a = Field64::from(123456u64);
        let mut be = [0u8; 3];
        let mut le = [0u8; 3];
        a.to_be_bytes(&mut be).unwrap();
        a.to_le_bytes(&mut le).unwrap();

        assert_eq!(be, [0x01, 0xE2, 0x40]);
        assert_eq!(le, [0x40, 0xE2, 0x01]);
        assert_eq!(Field64::from_be_bytes(&be).unwrap(), a);
        assert_eq!(Field64::from_le_bytes(&le).unwrap(), a);
    }

    #[test]
    fn serialization_rejects_bad_input() {
        // Wrong lengths.
        assert_eq!(
            Field64::from_be_bytes(&[0; 4]),
            Err(ValueError::InvalidLength { expected: 3, actual: 4 })
        );
        let mut small = [0u8; 2];
        assert_eq!(
            Field64::ONE.to_be_bytes(&mut small),
            Err(ValueError::InvalidLength { expected: 3, actual: 2 })
        );

        // Bits above the 20-bit width.
        assert_eq!(
            Field64::from_be_bytes(&[0x10, 0, 0]),
            Err(ValueError::ExcessBits)
        );

        // The modulus itself (1000003 = 0x0F4243) is the smallest
        // non-canonical value.
        assert_eq!(
            Field64::from_be_bytes(&[0x0F, 0x42, 0x43]),
            Err(ValueError::NonCanonical)
        );
        assert_eq!(
            Field64::from_be_bytes(&[0x0F, 0x42, 0x44]),
            Err(ValueError::NonCanonical)
        );
        // The largest canonical value survives parsing.
        let p_minus_1 = Field64::from_be_bytes(&[0x0F, 0x42, 0x42]).unwrap();
        assert_eq!(p_minus_1, -Field64::ONE);
    }

    #[test]
    fn from_bytes_mod_order_matches_oracle() {
        let m = BigUint::from(1000003u64);
        let bytes: Vec<u8> = (0u8..16).map(|i| i.wrapping_mul(37) ^ 0xA5).collect();

        let expected = BigUint::from_bytes_be(&bytes) % &m;
        let got: BigUint =
            Field64::from_be_bytes_mod_order(&bytes).into_bigint().into();
        assert_eq!(got, expected);

        let expected = BigUint::from_bytes_le(&bytes) % &m;
        let got: BigUint =
            Field64::from_le_bytes_mod_order(&bytes).into_bigint().into();
        assert_eq!(got, expected);
    }

    #[test]
    fn montgomery_reduce_matches_mul() {
        let a = Field64::from(654321u64);
        let b = Field64::from(998877u64);
        let (lo, hi) =
            a.into_montgomery().mul_wide(&b.into_montgomery());
        assert_eq!(Fp64Param::montgomery_reduce(&lo, &hi), a * b);
    }

    #[test]
    fn lookup_scans_whole_table() {
        let table: Vec<Field64> =
            (0..8u64).map(Field64::from).collect();
        for i in 0..8u64 {
            let got = Field64::ct_lookup(&table, CtWord::new(i));
            assert_eq!(got, Field64::from(i));
        }
        assert!(Field64::ct_lookup(&table, CtWord::new(9)).is_zero());
    }
}
