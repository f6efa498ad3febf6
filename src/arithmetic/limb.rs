//! Single-limb carry and borrow chains.
//!
//! Every helper here is a straight-line sequence over the portable
//! double-width integer; carries and borrows are recovered arithmetically
//! rather than through comparisons, so the chains stay constant-time on
//! every supported word size.

/// One machine-word digit of a multi-precision integer.
pub type Limb = u64;
/// A fixed-length little-endian limb array.
pub type Limbs<const N: usize> = [Limb; N];
/// Double-width limb holding a full product.
pub type WideLimb = u128;

/// Widening multiplication `a * b` to a double-width result.
///
/// The wasm path avoids the 128-bit multiply intrinsic, which wasm engines
/// lower to a call.
#[inline(always)]
#[must_use]
pub const fn widening_mul(a: Limb, b: Limb) -> WideLimb {
    #[cfg(not(target_family = "wasm"))]
    {
        a as WideLimb * b as WideLimb
    }
    #[cfg(target_family = "wasm")]
    {
        let a_lo = a as u32 as u64;
        let a_hi = a >> 32;
        let b_lo = b as u32 as u64;
        let b_hi = b >> 32;

        let lolo = (a_lo * b_lo) as WideLimb;
        let lohi = ((a_lo * b_hi) as WideLimb) << 32;
        let hilo = ((a_hi * b_lo) as WideLimb) << 32;
        let hihi = ((a_hi * b_hi) as WideLimb) << 64;
        (lolo | hihi) + (lohi + hilo)
    }
}

/// Calculate `a + b * c`, returning the lower limb of the result and the
/// upper limb as carry.
#[inline(always)]
#[must_use]
pub const fn mac(a: Limb, b: Limb, c: Limb) -> (Limb, Limb) {
    let tmp = (a as WideLimb) + widening_mul(b, c);
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Calculate `a + b * c + carry`, returning the lower limb of the result
/// and the upper limb as carry.
#[inline(always)]
#[must_use]
pub const fn carrying_mac(a: Limb, b: Limb, c: Limb, carry: Limb) -> (Limb, Limb) {
    let tmp = (a as WideLimb) + widening_mul(b, c) + (carry as WideLimb);
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Calculate `a + b * c`, discarding the lower limb of the result and
/// returning the upper limb as carry.
#[inline(always)]
#[must_use]
pub const fn mac_discard(a: Limb, b: Limb, c: Limb) -> Limb {
    let tmp = (a as WideLimb) + widening_mul(b, c);
    (tmp >> Limb::BITS) as Limb
}

/// Calculate `a + b + carry`, returning the sum and the new carry (0 or 1;
/// 0, 1, or 2 when `carry` exceeds 1).
#[inline(always)]
#[must_use]
pub const fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let tmp = a as WideLimb + b as WideLimb + carry as WideLimb;
    let carry = (tmp >> Limb::BITS) as Limb;
    (tmp as Limb, carry)
}

/// Sets `a = a + b + carry`, and returns the new carry.
#[inline(always)]
pub fn adc_for_add_with_carry(a: &mut Limb, b: Limb, carry: bool) -> bool {
    let (sum, carry1) = a.overflowing_add(b);
    let (sum, carry2) = sum.overflowing_add(carry as Limb);
    *a = sum;
    carry1 | carry2
}

/// Calculate `a - b - borrow`, returning the difference and the new
/// borrow (0 or 1).
#[inline(always)]
#[must_use]
pub const fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let tmp = (1u128 << Limb::BITS) + (a as WideLimb)
        - (b as WideLimb)
        - (borrow as WideLimb);
    let borrow = ((tmp >> Limb::BITS) as Limb) ^ 1;
    (tmp as Limb, borrow)
}

/// Sets `a = a - b - borrow`, and returns the new borrow.
#[inline(always)]
pub fn sbb_for_sub_with_borrow(a: &mut Limb, b: Limb, borrow: bool) -> bool {
    let (sub, borrow1) = a.overflowing_sub(b);
    let (sub, borrow2) = sub.overflowing_sub(borrow as Limb);
    *a = sub;
    borrow1 | borrow2
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn mac_chain_matches_wide(a: u64, b: u64, c: u64, carry: u64) {
            let wide = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
            let (lo, hi) = carrying_mac(a, b, c, carry);
            prop_assert_eq!(((hi as u128) << 64) | lo as u128, wide);
        }

        #[test]
        fn adc_sbb_round_trip(a: u64, b: u64) {
            let (sum, carry) = adc(a, b, 0);
            let (diff, borrow) = sbb(sum, b, 0);
            prop_assert_eq!(diff, a);
            // The subtraction borrows exactly when the addition carried.
            prop_assert_eq!(borrow, carry);
        }

        #[test]
        fn sbb_borrow_flags_ordering(a: u64, b: u64) {
            let (_, borrow) = sbb(a, b, 0);
            prop_assert_eq!(borrow == 1, a < b);
        }
    }
}
