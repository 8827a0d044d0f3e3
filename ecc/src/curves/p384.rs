//! NIST P-384 (secp384r1).

use crate::{Curve, WeierstrassCurve, lookup_table, point_arithmetic::Jacobian};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use crate::curves::{pack, propagate, word};
use primemod::{Limb, Modulus, ct::cnd_add_n, invert_binary, reduce_fold};

/// `p = 2^384 - 2^128 - 2^96 + 2^32 - 1`
const P: [Limb; 6] = [
    0x0000_0000_ffff_ffff,
    0xffff_ffff_0000_0000,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
];

/// Group order.
const Q: [Limb; 6] = [
    0xecec_196a_ccc5_2973,
    0x581a_0db2_48b0_a77a,
    0xc763_4d81_f437_2ddf,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
];

/// Field modulus.
pub const FIELD: Modulus = Modulus {
    bit_size: 384,
    size: 6,
    m: &P,
    b: &[
        0xffff_ffff_0000_0001,
        0x0000_0000_ffff_ffff,
        0x0000_0000_0000_0001,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x0000_0000_8000_0000,
        0x7fff_ffff_8000_0000,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x7fff_ffff_ffff_ffff,
    ],
    r2: None,
    reduce: reduce_p384,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 384,
    size: 6,
    m: &Q,
    b: &[
        0x1313_e695_333a_d68d,
        0xa7e5_f24d_b74f_5885,
        0x389c_b27e_0bc8_d220,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0x7676_0cb5_6662_94ba,
        0xac0d_06d9_2458_53bd,
        0xe3b1_a6c0_fa1b_96ef,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x7fff_ffff_ffff_ffff,
    ],
    r2: None,
    reduce: reduce_fold,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// NIST P-384 elliptic curve, specified in [FIPS 186-4] § D.1.2.4.
///
/// [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP384;

impl Curve for NistP384 {
    type PointArithmetic = Jacobian;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;
    const EQUATION_B: &'static [Limb] = &[
        0x2a85_c8ed_d3ec_2aef,
        0xc656_398d_8a2e_d19d,
        0x0314_088f_5013_875a,
        0x181d_9c6e_fe81_4112,
        0x988e_056b_e3f8_2d19,
        0xb331_2fa7_e23e_e7e4,
    ];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[
            0x3a54_5e38_7276_0ab7,
            0x5502_f25d_bf55_296c,
            0x59f7_41e0_8254_2a38,
            0x6e1d_3b62_8ba7_9b98,
            0x8eb1_c71e_f320_ad74,
            0xaa87_ca22_be8b_0537,
        ],
        &[
            0x7a43_1d7c_90ea_0e5f,
            0x0a60_b1ce_1d7e_819d,
            0xe9da_3113_b5f0_b8c0,
            0xf8f4_1dbd_289a_147c,
            0x5d9e_98bf_9292_dc29,
            0x3617_de4a_9626_2c6f,
        ],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl WeierstrassCurve for NistP384 {}

/// Reduction using `2^384 ≡ 2^128 + 2^96 - 2^32 + 1`, on 32-bit words.
///
/// From the top down, word `i ≥ 12` of the product is added to words
/// `i - 8`, `i - 9` and `i - 12` and subtracted from word `i - 11`. The
/// folded value lies above `-p`, so adding `p` makes it nonnegative with a
/// carry of at most 4, which is folded once more. What is left is a single
/// bit, absorbed by a conditional addition of `2^384 mod p`.
fn reduce_p384(m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let mut w: [i64; 24] = core::array::from_fn(|i| word(xp, i));
    for i in (12..24).rev() {
        let j = i - 12;
        w[j + 4] += w[i];
        w[j + 3] += w[i];
        w[j + 1] -= w[i];
        w[j] += w[i];
    }

    for (i, x) in w[..12].iter_mut().enumerate() {
        *x += word(m.m, i);
    }
    let carry = propagate(&mut w[..12]);
    debug_assert!((0..5).contains(&carry));
    w[4] += carry;
    w[3] += carry;
    w[1] -= carry;
    w[0] += carry;

    let carry = propagate(&mut w[..12]);
    debug_assert!((0..2).contains(&carry));
    pack(&mut rp[..6], &w[..12]);
    let carry = cnd_add_n(carry as Limb, &mut rp[..6], m.b);
    debug_assert_eq!(carry, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::tests::{check_curve_constants, check_reduction, check_word_patterns};

    #[test]
    fn constants() {
        check_curve_constants::<NistP384>();
    }

    #[test]
    fn reductions() {
        check_reduction(&FIELD);
        check_reduction(&ORDER);
    }

    #[test]
    fn field_reduction_of_word_patterns() {
        // 0x60_0000 yields the most negative folded value, 0xff_ffff the
        // largest carry.
        check_word_patterns(&FIELD, [0, 0x60_0000, 0xff_ffff, 0x0f_ffff]);
        check_word_patterns(&FIELD, (0..1 << 24).step_by(4099));
    }

    #[test]
    fn formulas() {
        crate::point_arithmetic::tests::check_formulas::<NistP384>();
    }
}
