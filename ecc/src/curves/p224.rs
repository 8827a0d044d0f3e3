//! NIST P-224 (secp224r1).

use crate::{Curve, WeierstrassCurve, lookup_table, point_arithmetic::Jacobian};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use crate::curves::{pack, propagate, word};
use primemod::{Limb, Modulus, invert_binary, reduce_fold};

/// `p = 2^224 - 2^96 + 1`
const P: [Limb; 4] = [
    0x0000_0000_0000_0001,
    0xffff_ffff_0000_0000,
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
];

/// Group order.
const Q: [Limb; 4] = [
    0x13dd_2945_5c5c_2a3d,
    0xffff_16a2_e0b8_f03e,
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
];

/// Field modulus.
pub const FIELD: Modulus = Modulus {
    bit_size: 224,
    size: 4,
    m: &P,
    b: &[
        0xffff_ffff_0000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x0000_0000_0000_0001,
        0xffff_ffff_8000_0000,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_7fff_ffff,
    ],
    r2: None,
    reduce: reduce_p224,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 224,
    size: 4,
    m: &Q,
    b: &[
        0xa3a3_d5c3_0000_0000,
        0x1f47_0fc1_ec22_d6ba,
        0x0000_0000_0000_e95d,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x09ee_94a2_ae2e_151f,
        0xffff_8b51_705c_781f,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_7fff_ffff,
    ],
    r2: None,
    reduce: reduce_fold,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// NIST P-224 elliptic curve, specified in [FIPS 186-4] § D.1.2.2.
///
/// [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP224;

impl Curve for NistP224 {
    type PointArithmetic = Jacobian;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;
    const EQUATION_B: &'static [Limb] = &[
        0x270b_3943_2355_ffb4,
        0x5044_b0b7_d7bf_d8ba,
        0x0c04_b3ab_f541_3256,
        0x0000_0000_b405_0a85,
    ];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[
            0x3432_80d6_115c_1d21,
            0x4a03_c1d3_56c2_1122,
            0x6bb4_bf7f_3213_90b9,
            0x0000_0000_b70e_0cbd,
        ],
        &[
            0x44d5_8199_8500_7e34,
            0xcd43_75a0_5a07_4764,
            0xb5f7_23fb_4c22_dfe6,
            0x0000_0000_bd37_6388,
        ],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl WeierstrassCurve for NistP224 {}

/// Reduction using `2^224 ≡ 2^96 - 1`, on 32-bit words.
///
/// From the top down, word `i ≥ 7` of the product is added to word `i - 4`
/// and subtracted from word `i - 7`. The folded value lies above `-p`, so
/// adding `p` makes it nonnegative and the carry out of word 6 is at most 3.
/// The top 32 bits of the result hold that carry unreduced.
fn reduce_p224(m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let mut w: [i64; 16] = core::array::from_fn(|i| word(xp, i));
    for i in (7..16).rev() {
        w[i - 4] += w[i];
        w[i - 7] -= w[i];
    }

    for (i, x) in w[..7].iter_mut().enumerate() {
        *x += word(m.m, i);
    }
    let carry = propagate(&mut w[..7]);
    debug_assert!((0..4).contains(&carry));
    w[7] = carry;

    pack(&mut rp[..4], &w[..8]);
}
