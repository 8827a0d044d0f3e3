//! Curve25519, in its twisted Edwards form (edwards25519).
//!
//! Points are kept on `-x² + y² = 1 + d·x²·y²` with `d = -121665/121666`,
//! which is birationally equivalent to the Montgomery curve
//! `v² = u³ + 486662·u² + u` used by X25519 through `u = (1 + y) / (1 - y)`.

use crate::{Curve, EdwardsCurve, lookup_table, point_arithmetic::HomogeneousEdwards};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use primemod::{
    Limb, Modulus, invert_binary,
    ct::{cnd_add_n, cnd_copy},
    limb::{self, carve},
    subtle::Choice,
};

/// `p = 2^255 - 19`
const P: [Limb; 4] = [
    0xffff_ffff_ffff_ffed,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
];

/// `q = 2^252 + 27742317777372353535851937790883648493`
const Q: [Limb; 4] = [
    0x5812_631a_5cf5_d3ed,
    0x14de_f9de_a2f7_9cd6,
    0x0000_0000_0000_0000,
    0x1000_0000_0000_0000,
];

/// `16·(q - 2^252) = 16·q - 2^256`, so that `2^256 ≡ -Q16D (mod q)`.
const Q16D: [Limb; 4] = [
    0x8126_31a5_cf5d_3ed0,
    0x4def_9dea_2f79_cd65,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0000,
];

/// `(p - 5) / 8 = 2^252 - 3`
const P_MINUS_5_DIV_8: [Limb; 4] = [
    0xffff_ffff_ffff_fffd,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x0fff_ffff_ffff_ffff,
];

/// `sqrt(-1) = 2^((p - 1) / 4)`
const SQRT_M1: [Limb; 4] = [
    0xc4ee_1b27_4a0e_a0b0,
    0x2f43_1806_ad2f_e478,
    0x2b4d_0099_3dfb_d7a7,
    0x2b83_2480_4fc1_df0b,
];

/// Field modulus.
pub const FIELD: Modulus = Modulus {
    bit_size: 255,
    size: 4,
    m: &P,
    b: &[
        0x0000_0000_0000_0026,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
    b_shifted: None,
    mp1h: &[
        0xffff_ffff_ffff_fff7,
        0xffff_ffff_ffff_ffff,
        0xffff_ffff_ffff_ffff,
        0x3fff_ffff_ffff_ffff,
    ],
    r2: None,
    reduce: reduce_p25519,
    invert: invert_binary,
    sqrt_ratio: Some(sqrt_ratio),
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 253,
    size: 4,
    m: &Q,
    b: &[
        0xd6ec_3174_8d98_951d,
        0xc6ef_5bf4_737d_cf70,
        0xffff_ffff_ffff_fffe,
        0x0fff_ffff_ffff_ffff,
    ],
    b_shifted: Some(&Q16D),
    mp1h: &[
        0x2c09_318d_2e7a_e9f7,
        0x0a6f_7cef_517b_ce6b,
        0x0000_0000_0000_0000,
        0x0800_0000_0000_0000,
    ],
    r2: None,
    reduce: reduce_q25519,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// Curve25519 as specified in [RFC 7748], with arithmetic on the twisted
/// Edwards curve of [RFC 8032] § 5.1.
///
/// [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
/// [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Curve25519;

impl Curve for Curve25519 {
    type PointArithmetic = HomogeneousEdwards;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;

    /// `d = -121665/121666`.
    const EQUATION_B: &'static [Limb] = &[
        0x75eb_4dca_1359_78a3,
        0x0070_0a4d_4141_d8ab,
        0x8cc7_4079_7779_e898,
        0x5203_6cee_2b6f_fe73,
    ];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[
            0xc956_2d60_8f25_d51a,
            0x692c_c760_9525_a7b2,
            0xc0a4_e231_fdd6_dc5c,
            0x2169_36d3_cd6e_53fe,
        ],
        &[
            0x6666_6666_6666_6658,
            0x6666_6666_6666_6666,
            0x6666_6666_6666_6666,
            0x6666_6666_6666_6666,
        ],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl EdwardsCurve for Curve25519 {}

/// Reduction using `2^256 ≡ 38`.
fn reduce_p25519(_m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let (lo, hi) = xp.split_at_mut(4);
    let cy = limb::addmul_1(lo, hi, 38);
    let cy = limb::add_1_assign(lo, 38 * cy);
    let _cy = limb::add_1_assign(lo, 38 * cy);
    debug_assert_eq!(_cy, 0);
    rp[..4].copy_from_slice(lo);
}

/// Reduction modulo the group order, one limb at a time from the top.
///
/// Each step replaces the top limb `t` at position `i + 4` by subtracting
/// `t·Q16D` at position `i`, adding `q` back on borrow. A last step clears
/// the bits above 252.
fn reduce_q25519(m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    for i in (0..4).rev() {
        let top = xp[i + 4];
        let window = &mut xp[i..i + 4];
        let cy = limb::submul_1(window, &Q16D, top);
        debug_assert!(cy <= 1);
        cnd_add_n(cy, window, m.m);
    }

    let top = xp[3] >> 60;
    let cy = limb::submul_1(&mut xp[..4], m.m, top);
    debug_assert!(cy <= 1);
    cnd_add_n(cy, &mut xp[..4], m.m);

    rp[..4].copy_from_slice(&xp[..4]);
}

/// `sqrt(u / v)` for `p ≡ 5 (mod 8)`.
///
/// Computes the candidate `x = u·v³·(u·v⁷)^((p-5)/8)`. It is the root if
/// `v·x² = u`, and `x·sqrt(-1)` is if `v·x² = -u`. Otherwise there is no
/// root and `rp` is left holding garbage.
fn sqrt_ratio(
    m: &Modulus,
    rp: &mut [Limb],
    up: &[Limb],
    vp: &[Limb],
    scratch: &mut [Limb],
) -> Choice {
    let n = m.size;
    let ([v3, uv7, x], tp) = carve::<3>(scratch, n);

    // v3 = v³, uv7 = u·v⁷
    m.sqr(v3, vp, tp);
    m.mul_assign(v3, vp, tp);
    m.sqr(uv7, v3, tp);
    m.mul_assign(uv7, vp, tp);
    m.mul_assign(uv7, up, tp);

    // x = u·v³·(u·v⁷)^((p-5)/8)
    m.pow_public(x, uv7, &P_MINUS_5_DIV_8, tp);
    m.mul_assign(x, v3, tp);
    m.mul_assign(x, up, tp);

    // v3 = v·x²
    m.sqr(v3, x, tp);
    m.mul_assign(v3, vp, tp);
    let positive = m.ct_eq(v3, up);
    m.add(uv7, v3, up);
    let negative = m.is_zero(uv7);

    m.mul(uv7, x, &SQRT_M1, tp);
    cnd_copy(negative, x, uv7);
    rp.copy_from_slice(x);

    positive | negative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::tests::{check_curve_constants, check_reduction, to_biguint};
    use num_bigint::BigUint;

    #[test]
    fn constants() {
        check_curve_constants::<Curve25519>();

        let p = to_biguint(&P);
        let q = to_biguint(&Q);
        assert_eq!(to_biguint(&Q16D), (&q << 4u32) - (BigUint::from(1u8) << 256u32));
        assert_eq!(to_biguint(&P_MINUS_5_DIV_8), (&p - 5u8) >> 3);
        let i = to_biguint(&SQRT_M1);
        assert_eq!(&i * &i % &p, &p - 1u8);
    }

    #[test]
    fn reductions() {
        check_reduction(&FIELD);
        check_reduction(&ORDER);
    }

    #[test]
    fn wide_reduction_mod_q() {
        // A 512-bit digest reduced modulo q.
        let x = [Limb::MAX; 8];
        let mut xp = x;
        let mut r = [0; 4];
        ORDER.reduce(&mut r, &mut xp);
        assert_eq!(to_biguint(&r) % to_biguint(&Q), to_biguint(&x) % to_biguint(&Q));
    }

    #[test]
    fn formulas() {
        crate::point_arithmetic::tests::check_formulas::<Curve25519>();
    }

    #[test]
    fn square_roots() {
        let mut scratch = [0; 24];
        let mut r = [0; 4];

        // sqrt(4 / 1) = ±2
        assert!(bool::from(FIELD.sqrt_ratio(&mut r, &[4, 0, 0, 0], &[1, 0, 0, 0], &mut scratch)));
        let mut sq = [0; 4];
        FIELD.sqr(&mut sq, &r, &mut scratch);
        assert!(bool::from(FIELD.ct_eq(&sq, &[4, 0, 0, 0])));

        // -1 = sqrt(-1)² goes through the sqrt(-1) correction.
        let mut minus_one = P;
        minus_one[0] -= 1;
        assert!(bool::from(FIELD.sqrt_ratio(&mut r, &minus_one, &[1, 0, 0, 0], &mut scratch)));
        FIELD.sqr(&mut sq, &r, &mut scratch);
        assert!(bool::from(FIELD.ct_eq(&sq, &minus_one)));

        // 2 is a non-residue modulo p.
        assert!(!bool::from(FIELD.sqrt_ratio(&mut r, &[2, 0, 0, 0], &[1, 0, 0, 0], &mut scratch)));

        // sqrt(u / v) for v != 1.
        let (u, v) = ([9, 0, 0, 0], [4, 0, 0, 0]);
        assert!(bool::from(FIELD.sqrt_ratio(&mut r, &u, &v, &mut scratch)));
        FIELD.sqr(&mut sq, &r, &mut scratch);
        FIELD.mul_assign(&mut sq, &v, &mut scratch);
        assert!(bool::from(FIELD.ct_eq(&sq, &u)));
    }
}
