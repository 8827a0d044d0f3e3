//! NIST P-521 (secp521r1).

use crate::{Curve, WeierstrassCurve, lookup_table, point_arithmetic::Jacobian};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use primemod::{Limb, Modulus, invert_binary, limb, reduce_fold};

/// `p = 2^521 - 1`
const P: [Limb; 9] = [
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x0000_0000_0000_01ff,
];

/// Group order.
const Q: [Limb; 9] = [
    0xbb6f_b71e_9138_6409,
    0x3bb5_c9b8_899c_47ae,
    0x7fcc_0148_f709_a5d0,
    0x5186_8783_bf2f_966b,
    0xffff_ffff_ffff_fffa,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x0000_0000_0000_01ff,
];

/// Field modulus.
pub const FIELD: Modulus = Modulus {
    bit_size: 521,
    size: 9,
    m: &P,
    b: &[
        0x0080_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0100,
    ],
    r2: None,
    reduce: reduce_p521,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 521,
    size: 9,
    m: &Q,
    b: &[
        0xfb80_0000_0000_0000,
        0x28a2_4824_70b7_63cd,
        0x17e2_251b_23bb_31dc,
        0xca40_19ff_5b84_7b2d,
        0x02d7_3cbc_3e20_6834,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x5db7_db8f_489c_3205,
        0x1dda_e4dc_44ce_23d7,
        0xbfe6_00a4_7b84_d2e8,
        0x28c3_43c1_df97_cb35,
        0xffff_ffff_ffff_fffd,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x0000_0000_0000_00ff,
    ],
    r2: None,
    reduce: reduce_fold,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// NIST P-521 elliptic curve, specified in [FIPS 186-4] § D.1.2.5.
///
/// [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP521;

impl Curve for NistP521 {
    type PointArithmetic = Jacobian;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;
    const EQUATION_B: &'static [Limb] = &[
        0xef45_1fd4_6b50_3f00,
        0x3573_df88_3d2c_34f1,
        0x1652_c0bd_3bb1_bf07,
        0x5619_3951_ec7e_937b,
        0xb8b4_8991_8ef1_09e1,
        0xa2da_725b_99b3_15f3,
        0x929a_21a0_b685_40ee,
        0x953e_b961_8e1c_9a1f,
        0x0000_0000_0000_0051,
    ];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[
            0xf97e_7e31_c2e5_bd66,
            0x3348_b3c1_856a_429b,
            0xfe1d_c127_a2ff_a8de,
            0xa14b_5e77_efe7_5928,
            0xf828_af60_6b4d_3dba,
            0x9c64_8139_053f_b521,
            0x9e3e_cb66_2395_b442,
            0x858e_06b7_0404_e9cd,
            0x0000_0000_0000_00c6,
        ],
        &[
            0x88be_9476_9fd1_6650,
            0x353c_7086_a272_c240,
            0xc550_b901_3fad_0761,
            0x97ee_7299_5ef4_2640,
            0x17af_bd17_273e_662c,
            0x98f5_4449_579b_4468,
            0x5c8a_5fb4_2c7d_1bd9,
            0x3929_6a78_9a3b_c004,
            0x0000_0000_0000_0118,
        ],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl WeierstrassCurve for NistP521 {}

/// Reduction using `2^521 ≡ 1`.
///
/// The product is split at bit 521 and the halves added. The sum has at most
/// 632 bits, so a second fold of the bits above 521 (at most two limbs)
/// leaves a nine-limb value.
fn reduce_p521(_m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let mut hi = [0; 10];
    for (i, h) in hi.iter_mut().enumerate() {
        let above = xp.get(9 + i).copied().unwrap_or(0);
        *h = (xp[8 + i] >> 9) | (above << 55);
    }

    let mut lo = [0; 10];
    lo[..9].copy_from_slice(&xp[..9]);
    lo[8] &= 0x1ff;
    let _cy = limb::add_n_assign(&mut lo, &hi);
    debug_assert_eq!(_cy, 0);

    let hi = [(lo[8] >> 9) | (lo[9] << 55), lo[9] >> 9];
    lo[8] &= 0x1ff;
    let cy = limb::add_n_assign(&mut lo[..2], &hi);
    let _cy = limb::add_1_assign(&mut lo[2..9], cy);
    debug_assert_eq!(_cy, 0);

    rp[..9].copy_from_slice(&lo[..9]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::tests::{check_curve_constants, check_reduction};

    #[test]
    fn constants() {
        check_curve_constants::<NistP521>();
    }

    #[test]
    fn reductions() {
        check_reduction(&FIELD);
        check_reduction(&ORDER);
    }

    #[test]
    fn formulas() {
        crate::point_arithmetic::tests::check_formulas::<NistP521>();
    }

    #[test]
    fn top_bits_fold() {
        // 2^1041 = 2^(2*521 - 1) ≡ 2^520
        let mut x = [0; 18];
        x[16] = 1 << 17;
        let mut r = [0; 9];
        reduce_p521(&FIELD, &mut r, &mut x);
        let mut want = [0; 9];
        want[8] = 1 << 8;
        assert_eq!(r, want);
    }
}
