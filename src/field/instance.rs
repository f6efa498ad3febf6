//! Concrete prime field instances.

use crate::{
    arithmetic::uint::{U256, U384, U64},
    field::{
        fp::{Fp256, Fp384, Fp64, FpParams, LIMBS_256, LIMBS_384, LIMBS_64},
        fp2::{Fp2, Fp2Params},
    },
    fp_from_num, from_num,
};

/// The secp256k1 base field, `p = 2^256 - 2^32 - 977`. No spare bits.
pub type FpSecp256k1 = Fp256<Secp256k1FpParam>;
/// Parameters of [`FpSecp256k1`].
pub struct Secp256k1FpParam;
impl FpParams<LIMBS_256> for Secp256k1FpParam {
    const GENERATOR: FpSecp256k1 = fp_from_num!("3");
    const MODULUS: U256 = from_num!("115792089237316195423570985008687907853269984665640564039457584007908834671663");
}

/// The BLS12-381 base field (381 bits, three spare bits).
pub type FpBls12381 = Fp384<Bls12381FpParam>;
/// Parameters of [`FpBls12381`].
pub struct Bls12381FpParam;
impl FpParams<LIMBS_384> for Bls12381FpParam {
    const GENERATOR: FpBls12381 = fp_from_num!("2");
    const MODULUS: U384 = from_num!("4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787");
}

/// The BLS12-381 scalar field (255 bits, one spare bit).
pub type FrBls12381 = Fp256<Bls12381FrParam>;
/// Parameters of [`FrBls12381`].
pub struct Bls12381FrParam;
impl FpParams<LIMBS_256> for Bls12381FrParam {
    const GENERATOR: FrBls12381 = fp_from_num!("7");
    const MODULUS: U256 = from_num!("52435875175126190479447740508185965837690552500527637822603658699938581184513");
}

/// The BN254 base field (254 bits).
pub type FpBn254 = Fp256<Bn254FpParam>;
/// Parameters of [`FpBn254`].
pub struct Bn254FpParam;
impl FpParams<LIMBS_256> for Bn254FpParam {
    const GENERATOR: FpBn254 = fp_from_num!("3");
    const MODULUS: U256 = from_num!("21888242871839275222246405745257275088696311157297823662689037894645226208583");
}

/// The BN254 scalar field (254 bits, two-adicity 28).
pub type FrBn254 = Fp256<Bn254FrParam>;
/// Parameters of [`FrBn254`].
pub struct Bn254FrParam;
impl FpParams<LIMBS_256> for Bn254FrParam {
    const GENERATOR: FrBn254 = fp_from_num!("7");
    const MODULUS: U256 = from_num!("21888242871839275222246405745257275088548364400416034343698204186575808495617");
}

/// The Goldilocks field, `p = 2^64 - 2^32 + 1`. A single limb with no
/// spare bits.
pub type FpGoldilocks = Fp64<GoldilocksParam>;
/// Parameters of [`FpGoldilocks`].
pub struct GoldilocksParam;
impl FpParams<LIMBS_64> for GoldilocksParam {
    const GENERATOR: FpGoldilocks = fp_from_num!("7");
    const MODULUS: U64 = from_num!("18446744069414584321");
}

impl Fp2Params<LIMBS_384> for Bls12381FpParam {
    // p ≡ 3 (mod 4), so -1 is a non-residue.
    const NON_RESIDUE: FpBls12381 = {
        let one: FpBls12381 = fp_from_num!("1");
        one.const_neg()
    };
}

/// The BLS12-381 quadratic extension field over [`FpBls12381`] with
/// `u² = -1`.
pub type Fp2Bls12381 = Fp2<Bls12381FpParam, LIMBS_384>;

#[cfg(all(test, feature = "std"))]
mod tests {
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        arithmetic::uint::Uint,
        field::{group::AdditiveGroup, prime::PrimeField, Field},
    };

    fn rand_fp<P: FpParams<4>>(rng: &mut StdRng) -> crate::field::fp::Fp<P, 4> {
        crate::field::fp::Fp::from_bigint(Uint::new([
            rng.gen(),
            rng.gen(),
            rng.gen(),
            rng.gen(),
        ]))
    }

    #[test]
    fn spare_bit_layout() {
        assert_eq!(Secp256k1FpParam::NUM_SPARE_BITS, 0);
        assert_eq!(Bls12381FpParam::NUM_SPARE_BITS, 3);
        assert_eq!(Bls12381FrParam::NUM_SPARE_BITS, 1);
        assert_eq!(Bn254FpParam::NUM_SPARE_BITS, 2);
        assert_eq!(GoldilocksParam::NUM_SPARE_BITS, 0);
    }

    // Montgomery constants of the BN254 scalar field, cross-checked
    // against the widely published values.
    #[test]
    fn bn254_fr_montgomery_constants() {
        assert_eq!(Bn254FrParam::INV, 0xc2e1_f593_efff_ffff);
        assert_eq!(
            Bn254FrParam::R,
            Uint::new([
                0xac96_341c_4fff_fffb,
                0x36fc_7695_9f60_cd29,
                0x666e_a36f_7879_462e,
                0x0e0a_77c1_9a07_df2f,
            ])
        );
        assert_eq!(
            Bn254FrParam::R2,
            Uint::new([
                0x1bb8_e645_ae21_6da7,
                0x53fe_3ab1_e35c_59e3,
                0x8c49_833d_53bb_8085,
                0x0216_d0b1_7f4e_44a5,
            ])
        );
        assert_eq!(
            Bn254FrParam::R3,
            Uint::new([
                0x5e94_d8e1_b4bf_0040,
                0x2a48_9cbe_1cfb_b6b8,
                0x893c_c664_a19f_cfed,
                0x0cf8_594b_7fcc_657c,
            ])
        );
        assert_eq!(Bn254FrParam::TWO_ADICITY, 28);
        assert_eq!(
            Bn254FrParam::ROOT_OF_UNITY.into_bigint(),
            Uint::new([
                0xd34f_1ed9_60c3_7c9c,
                0x3215_cf6d_d393_29c8,
                0x9886_5ea9_3dd3_1f74,
                0x03dd_b9f5_166d_18b7,
            ])
        );
    }

    #[test]
    fn bls12381_fp_inv_constant() {
        assert_eq!(Bls12381FpParam::INV, 0x89f3_fffc_fffc_fffd);
        assert_eq!(Bls12381FrParam::TWO_ADICITY, 32);
    }

    // Modulus with no spare bit: the overflow carry must take part in the
    // final subtraction.
    #[test]
    fn secp256k1_wraparound() {
        let one = FpSecp256k1::ONE;
        let p_minus_1 = -one;

        assert!((one + p_minus_1).is_zero());
        assert_eq!(one * p_minus_1, p_minus_1);
        assert_eq!(p_minus_1 * p_minus_1, one);
        assert_eq!(p_minus_1.inverse(), p_minus_1);
    }

    #[test]
    fn goldilocks_wraparound() {
        const P: u128 = 18_446_744_069_414_584_321;
        let oracle = |x: u128| FpGoldilocks::from((x % P) as u64);

        let a = FpGoldilocks::from(P as u64 - 1);
        let b = FpGoldilocks::from(P as u64 - 2);
        assert_eq!(a + b, oracle((P - 1) + (P - 2)));
        assert_eq!(a * b, oracle(((P - 1) * (P - 2)) % P));
        assert_eq!(a.double(), oracle(2 * (P - 1)));
        assert_eq!(a.square(), oracle(((P - 1) * (P - 1)) % P));
    }

    // Round-trip the canonical encoding of p - 1 and square it.
    #[test]
    fn bls12381_fp_serialization() {
        let p_minus_1_bytes = hex!(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f624
             1eabfffeb153ffffb9feffffffffaaaa"
        );
        let p_minus_1 = FpBls12381::from_be_bytes(&p_minus_1_bytes).unwrap();
        assert_eq!(p_minus_1, -FpBls12381::ONE);

        // (p - 1)² ≡ 1.
        assert!(p_minus_1.square().is_one());

        let mut out = [0u8; 48];
        p_minus_1.to_be_bytes(&mut out).unwrap();
        assert_eq!(out, p_minus_1_bytes);

        // The modulus itself must be rejected.
        let p_bytes = hex!(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f624
             1eabfffeb153ffffb9feffffffffaaab"
        );
        assert!(FpBls12381::from_be_bytes(&p_bytes).is_err());
    }

    #[test]
    fn bn254_product_identities() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let a = rand_fp::<Bn254FpParam>(&mut rng);
            let b = rand_fp::<Bn254FpParam>(&mut rng);

            assert_eq!((a + b) * (a - b), a.square() - b.square());
            if !b.is_zero() {
                assert_eq!(a * b * b.inverse(), a);
            }

            // Every result is fully reduced.
            for v in [a + b, a - b, a * b, a.square(), a.inverse()] {
                assert!(bool::from(
                    v.into_montgomery().ct_lt(&Bn254FpParam::MODULUS)
                ));
            }
        }
    }

    #[test]
    fn bn254_montgomery_consistency() {
        let p: BigUint = Bn254FpParam::MODULUS.into();
        let r = (BigUint::one() << 256) % &p;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let u: BigUint = BigUint::from(rng.gen::<u128>()) % &p;
            let fp = FpBn254::from_bigint(Uint::from_le_slice_padded(
                &u.to_bytes_le(),
            ));

            let mres: BigUint = fp.into_montgomery().into();
            assert_eq!(mres, (&u * &r) % &p);
            let round_trip: BigUint = fp.into_bigint().into();
            assert_eq!(round_trip, u);
        }
    }

    // Serialize the additive inverse and compare against p - a.
    #[test]
    fn bls12381_fr_negation_encoding() {
        let p: BigUint = Bls12381FrParam::MODULUS.into();

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let a = rand_fp::<Bls12381FrParam>(&mut rng);
            if a.is_zero() {
                continue;
            }

            let mut le = [0u8; 32];
            (-a).to_le_bytes(&mut le).unwrap();

            let a_int: BigUint = a.into_bigint().into();
            let mut expected = (&p - a_int).to_bytes_le();
            expected.resize(32, 0);
            assert_eq!(le.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn bls12381_fr_sqrt() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let a = rand_fp::<Bls12381FrParam>(&mut rng);
            let square = a.square();
            let (root, was_square) = square.sqrt();
            assert!(bool::from(was_square));
            assert_eq!(root * root, square);
        }
    }

    // With u² = -1: (1 + u)(1 - u) = 2, and (1 + u) is invertible.
    #[test]
    fn bls12381_fp2_identities() {
        let one_plus_u = Fp2Bls12381::new(FpBls12381::ONE, FpBls12381::ONE);
        let one_minus_u = Fp2Bls12381::new(FpBls12381::ONE, -FpBls12381::ONE);

        let two = Fp2Bls12381::from(2u8);
        assert_eq!(one_plus_u * one_minus_u, two);
        assert_eq!(one_plus_u.inverse() * one_plus_u, Fp2Bls12381::ONE);

        // u² = -1.
        let u = Fp2Bls12381::new(FpBls12381::ZERO, FpBls12381::ONE);
        assert_eq!(u.square(), -Fp2Bls12381::ONE);
    }
}
