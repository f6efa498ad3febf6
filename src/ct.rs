//! Constant-time selection primitives.
//!
//! Secret machine words are carried in [`CtWord`] and secret truth values
//! in [`CtChoice`]. The distinct types keep secret data from flowing into
//! ordinary comparisons, which the compiler is free to lower to branches.
//! Every choice made on secret data must go through [`CtChoice::select_word`],
//! [`CtWord::ccopy`] or one of the `ct_*` helpers built on them; those
//! compile to data-only mask sequences on every supported target.
//!
//! Shift amounts, loop bounds and table lengths are always public. None of
//! the operations here can fail.

use core::ops::{
    Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub,
};

use crate::arithmetic::limb::Limb;

/// A secret truth value, constrained to `{0, 1}`.
///
/// Constructed only from constant-time predicates; consumed by the
/// selection primitives. Converting to `bool` declassifies the value and
/// is reserved for public observations (test assertions, error reporting).
#[derive(Clone, Copy, Debug)]
pub struct CtChoice(Limb);

impl CtChoice {
    /// The false constant.
    pub const FALSE: Self = Self(0);
    /// The true constant.
    pub const TRUE: Self = Self(1);

    /// Build a choice from the least significant bit of `word`.
    ///
    /// Upper bits are ignored, so carry and borrow words coming out of the
    /// limb chain can be fed in directly.
    #[inline(always)]
    #[must_use]
    pub const fn from_word_lsb(word: Limb) -> Self {
        Self(word & 1)
    }

    /// All-ones when true, all-zeros when false.
    #[inline(always)]
    #[must_use]
    pub const fn mask(self) -> Limb {
        self.0.wrapping_neg()
    }

    /// Logical negation.
    #[inline(always)]
    #[must_use]
    pub const fn not(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Logical conjunction.
    #[inline(always)]
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Logical disjunction.
    #[inline(always)]
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Logical exclusive or.
    #[inline(always)]
    #[must_use]
    pub const fn xor(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Return `x` when true, `y` when false.
    #[inline(always)]
    #[must_use]
    pub const fn select_word(self, x: Limb, y: Limb) -> Limb {
        y ^ (self.mask() & (x ^ y))
    }

    /// Return `x` when true, `y` when false. The counter variant used by
    /// loop bookkeeping with public bounds.
    #[inline(always)]
    #[must_use]
    pub const fn select_u32(self, x: u32, y: u32) -> u32 {
        self.select_word(x as Limb, y as Limb) as u32
    }
}

impl From<bool> for CtChoice {
    #[inline(always)]
    fn from(b: bool) -> Self {
        Self(b as Limb)
    }
}

impl From<CtChoice> for bool {
    /// Declassifies the choice. Only meaningful once the value is public.
    #[inline(always)]
    fn from(choice: CtChoice) -> Self {
        choice.0 == 1
    }
}

impl Not for CtChoice {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        CtChoice::not(self)
    }
}

impl BitAnd for CtChoice {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitOr for CtChoice {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl BitXor for CtChoice {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

/// A secret machine word.
///
/// Arithmetic wraps modulo `2^64`; comparisons return [`CtChoice`] and are
/// built from the masked most-significant-bit idiom, never from a
/// compare-and-branch. Shift amounts are public.
#[derive(Clone, Copy, Debug, Default)]
pub struct CtWord(Limb);

impl CtWord {
    /// The zero word.
    pub const ZERO: Self = Self(0);

    /// Wrap a limb value.
    #[inline(always)]
    #[must_use]
    pub const fn new(value: Limb) -> Self {
        Self(value)
    }

    /// Declassify the word. Only meaningful once the value is public.
    #[inline(always)]
    #[must_use]
    pub const fn expose(self) -> Limb {
        self.0
    }

    /// Top bit of the word.
    #[inline(always)]
    #[must_use]
    pub const fn is_msb_set(self) -> CtChoice {
        CtChoice(self.0 >> (Limb::BITS - 1))
    }

    /// `self == 0`, via `!msb(x | -x)`.
    #[inline(always)]
    #[must_use]
    pub const fn is_zero(self) -> CtChoice {
        Self(self.0 | self.0.wrapping_neg()).is_msb_set().not()
    }

    /// `self == other`.
    #[inline(always)]
    #[must_use]
    pub const fn ct_eq(self, other: Self) -> CtChoice {
        Self(self.0 ^ other.0).is_zero()
    }

    /// `self < other`, unsigned.
    ///
    /// Borrow recovery from Hacker's Delight, expressed through the msb
    /// idiom: `msb((~a & b) | ((~a | b) & (a - b)))`.
    #[inline(always)]
    #[must_use]
    pub const fn ct_lt(self, other: Self) -> CtChoice {
        let (a, b) = (self.0, other.0);
        let diff = a.wrapping_sub(b);
        Self((!a & b) | ((!a | b) & diff)).is_msb_set()
    }

    /// Return `x` when `choice` is true, `y` otherwise.
    #[inline(always)]
    #[must_use]
    pub const fn select(choice: CtChoice, x: Self, y: Self) -> Self {
        Self(choice.select_word(x.0, y.0))
    }

    /// Replace `self` with `other` when `choice` is true.
    #[inline(always)]
    pub fn ccopy(&mut self, other: Self, choice: CtChoice) {
        self.0 = choice.select_word(other.0, self.0);
    }

    /// Fetch `table[index]` by scanning the whole table.
    ///
    /// The memory access pattern depends only on the table length, never
    /// on `index`. Out-of-range indices return zero.
    #[must_use]
    pub fn lookup(table: &[Self], index: Self) -> Self {
        let mut acc = Self::ZERO;
        for (i, entry) in table.iter().enumerate() {
            let hit = index.ct_eq(Self::new(i as Limb));
            acc.ccopy(*entry, hit);
        }
        acc
    }

    /// Shift left by a public amount.
    #[inline(always)]
    #[must_use]
    pub const fn shl(self, amount: u32) -> Self {
        Self(self.0 << amount)
    }

    /// Shift right by a public amount.
    #[inline(always)]
    #[must_use]
    pub const fn shr(self, amount: u32) -> Self {
        Self(self.0 >> amount)
    }
}

impl From<Limb> for CtWord {
    #[inline(always)]
    fn from(value: Limb) -> Self {
        Self(value)
    }
}

impl BitAnd for CtWord {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for CtWord {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for CtWord {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for CtWord {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl Add for CtWord {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for CtWord {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for CtWord {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0.wrapping_mul(rhs.0))
    }
}

impl Neg for CtWord {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Shl<u32> for CtWord {
    type Output = Self;

    /// The shift amount is public.
    #[inline(always)]
    fn shl(self, rhs: u32) -> Self {
        CtWord::shl(self, rhs)
    }
}

impl Shr<u32> for CtWord {
    type Output = Self;

    /// The shift amount is public.
    #[inline(always)]
    fn shr(self, rhs: u32) -> Self {
        CtWord::shr(self, rhs)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn choice_constants() {
        assert!(bool::from(CtChoice::TRUE));
        assert!(!bool::from(CtChoice::FALSE));
        assert_eq!(CtChoice::TRUE.mask(), u64::MAX);
        assert_eq!(CtChoice::FALSE.mask(), 0);
    }

    #[test]
    fn carry_words_build_choices() {
        assert!(bool::from(CtChoice::from_word_lsb(1)));
        assert!(!bool::from(CtChoice::from_word_lsb(0)));
        // Upper bits of a carry word are noise.
        assert!(bool::from(CtChoice::from_word_lsb(u64::MAX)));
    }

    #[test]
    fn word_boundaries() {
        let zero = CtWord::new(0);
        let max = CtWord::new(u64::MAX);
        let top = CtWord::new(1 << 63);

        assert!(bool::from(zero.is_zero()));
        assert!(!bool::from(max.is_zero()));
        assert!(bool::from(top.is_msb_set()));
        assert!(!bool::from(zero.is_msb_set()));
        assert!(bool::from(zero.ct_lt(max)));
        assert!(!bool::from(max.ct_lt(zero)));
        assert!(!bool::from(max.ct_lt(max)));
    }

    #[test]
    fn lookup_scans_whole_table() {
        let table: Vec<CtWord> =
            (0..8u64).map(|i| CtWord::new(100 + i)).collect();
        for i in 0..8u64 {
            let got = CtWord::lookup(&table, CtWord::new(i));
            assert_eq!(got.expose(), 100 + i);
        }
        // Out of range yields zero.
        let miss = CtWord::lookup(&table, CtWord::new(8));
        assert_eq!(miss.expose(), 0);
    }

    proptest! {
        #[test]
        fn select_matches_branch(cond: bool, x: u64, y: u64) {
            let choice = CtChoice::from(cond);
            let picked = choice.select_word(x, y);
            prop_assert_eq!(picked, if cond { x } else { y });
        }

        #[test]
        fn ccopy_matches_branch(cond: bool, x: u64, y: u64) {
            let mut word = CtWord::new(x);
            word.ccopy(CtWord::new(y), CtChoice::from(cond));
            prop_assert_eq!(word.expose(), if cond { y } else { x });
        }

        #[test]
        fn comparisons_match_native(a: u64, b: u64) {
            let (x, y) = (CtWord::new(a), CtWord::new(b));
            prop_assert_eq!(bool::from(x.ct_eq(y)), a == b);
            prop_assert_eq!(bool::from(x.ct_lt(y)), a < b);
            prop_assert_eq!(bool::from(x.is_zero()), a == 0);
        }

        #[test]
        fn arithmetic_wraps(a: u64, b: u64) {
            let (x, y) = (CtWord::new(a), CtWord::new(b));
            prop_assert_eq!((x + y).expose(), a.wrapping_add(b));
            prop_assert_eq!((x - y).expose(), a.wrapping_sub(b));
            prop_assert_eq!((x * y).expose(), a.wrapping_mul(b));
            prop_assert_eq!((-x).expose(), a.wrapping_neg());
        }
    }
}
