//! NIST P-256 (secp256r1, prime256v1).
//!
//! Field elements are kept in Montgomery form, `x·R mod p` with `R = 2^256`,
//! since `-p^-1 ≡ 1 (mod 2^64)` makes word-by-word REDC unusually cheap.

use crate::{Curve, WeierstrassCurve, lookup_table, point_arithmetic::Jacobian};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use primemod::{
    Limb, Modulus,
    ct::cnd_add_n,
    invert_binary, invert_redc,
    limb::{self, adc, mac},
    reduce_fold,
};

/// `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`
const P: [Limb; 4] = [
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
    0x0000_0000_0000_0000,
    0xffff_ffff_0000_0001,
];

/// Group order.
const Q: [Limb; 4] = [
    0xf3b9_cac2_fc63_2551,
    0xbce6_faad_a717_9e84,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_0000_0000,
];

/// Field modulus, in Montgomery form.
pub const FIELD: Modulus = Modulus {
    bit_size: 256,
    size: 4,
    m: &P,
    b: &[
        0x0000_0000_0000_0001,
        0xffff_ffff_0000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_ffff_fffe,
    ],
    b_shifted: None,
    mp1h: &[
        0x0000_0000_0000_0000,
        0x0000_0000_8000_0000,
        0x8000_0000_0000_0000,
        0x7fff_ffff_8000_0000,
    ],
    r2: Some(&[
        0x0000_0000_0000_0003,
        0xffff_fffb_ffff_ffff,
        0xffff_ffff_ffff_fffe,
        0x0000_0004_ffff_fffd,
    ]),
    reduce: montgomery_reduce,
    invert: invert_redc,
    sqrt_ratio: None,
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 256,
    size: 4,
    m: &Q,
    b: &[
        0x0c46_353d_039c_daaf,
        0x4319_0552_58e8_617b,
        0x0000_0000_0000_0000,
        0x0000_0000_ffff_ffff,
    ],
    b_shifted: None,
    mp1h: &[
        0x79dc_e561_7e31_92a9,
        0xde73_7d56_d38b_cf42,
        0x7fff_ffff_ffff_ffff,
        0x7fff_ffff_8000_0000,
    ],
    r2: None,
    reduce: reduce_fold,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// NIST P-256 elliptic curve.
///
/// This curve is also known as prime256v1 (ANSI X9.62) and secp256r1 (SECG)
/// and is specified in [FIPS 186-4] § D.1.2.3.
///
/// [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP256;

impl Curve for NistP256 {
    type PointArithmetic = Jacobian;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;

    /// `b·R mod p`.
    const EQUATION_B: &'static [Limb] = &[
        0xd89c_df62_29c4_bddf,
        0xacf0_05cd_7884_3090,
        0xe5a2_20ab_f721_2ed6,
        0xdc30_061d_0487_4834,
    ];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[
            0xf4a1_3945_d898_c296,
            0x7703_7d81_2deb_33a0,
            0xf8bc_e6e5_63a4_40f2,
            0x6b17_d1f2_e12c_4247,
        ],
        &[
            0xcbb6_4068_37bf_51f5,
            0x2bce_3357_6b31_5ece,
            0x8ee7_eb4a_7c0f_9e16,
            0x4fe3_42e2_fe1a_7f9b,
        ],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl WeierstrassCurve for NistP256 {}

/// REDC: `x·2^-256 mod p` for an eight-limb `x`.
///
/// Four rounds each clear the lowest live limb by adding `u·p` shifted to
/// it. With `-p^-1 ≡ 1 (mod 2^64)` the multiplier `u` is that limb as is,
/// and since `p[0] = 2^64 - 1` the cleared limb carries exactly `u` upward.
/// The result is below `2^256 + p`, so subtracting `p` unless that
/// underflows fits it in four limbs.
fn montgomery_reduce(_m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let mut a: [Limb; 8] = core::array::from_fn(|i| xp[i]);
    let mut top = 0;
    for i in 0..4 {
        let u = a[i];
        let mut carry = u;
        for j in 1..4 {
            (a[i + j], carry) = mac(a[i + j], u, P[j], carry);
        }
        (a[i + 4], top) = adc(a[i + 4], top, carry);
    }

    let borrow = limb::sub_n(&mut rp[..4], &a[4..], &P);
    // A borrow the top bit cannot cover means `a < p`: add it back.
    cnd_add_n(borrow & !top, &mut rp[..4], &P);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::tests::{check_curve_constants, check_reduction};
    use hex_literal::hex;
    use primemod::limb;

    #[test]
    fn constants() {
        check_curve_constants::<NistP256>();
    }

    #[test]
    fn reductions() {
        check_reduction(&FIELD);
        check_reduction(&ORDER);
    }

    #[test]
    fn formulas() {
        crate::point_arithmetic::tests::check_formulas::<NistP256>();
    }

    #[test]
    fn montgomery_round_trip() {
        let mut x = [0; 4];
        limb::from_be_bytes(
            &mut x,
            &hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        );
        let mut internal = [0; 4];
        FIELD.to_internal(&mut internal, &x);
        assert_ne!(internal, x);

        let mut plain = [0; 4];
        FIELD.from_internal(&mut plain, &internal);
        FIELD.canonical(&mut plain);
        assert_eq!(plain, x);
    }

    #[test]
    fn montgomery_inverse() {
        let mut one = [0; 4];
        FIELD.unit(&mut one);
        let (x, mut inv, mut prod) = ([0x1234_5678_9abc_def0, 7, 0, 1 << 60], [0; 4], [0; 4]);
        let mut scratch = [0; 12];
        FIELD.invert(&mut inv, &x, &mut scratch);
        FIELD.mul(&mut prod, &x, &inv, &mut scratch);
        assert!(bool::from(FIELD.ct_eq(&prod, &one)));
    }
}
