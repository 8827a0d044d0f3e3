//! NIST P-192 (secp192r1).

use crate::{Curve, WeierstrassCurve, lookup_table, point_arithmetic::Jacobian};
use alloc::vec::Vec;
use once_cell::race::OnceBox;
use primemod::{Limb, Modulus, WideLimb, invert_binary, limb::adc, reduce_fold};

/// `p = 2^192 - 2^64 - 1`
const P: [Limb; 3] = [0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_fffe, 0xffff_ffff_ffff_ffff];

/// Group order.
const Q: [Limb; 3] = [0x146b_c9b1_b4d2_2831, 0xffff_ffff_99de_f836, 0xffff_ffff_ffff_ffff];

/// Field modulus.
pub const FIELD: Modulus = Modulus {
    bit_size: 192,
    size: 3,
    m: &P,
    b: &[0x0000_0000_0000_0001, 0x0000_0000_0000_0001, 0x0000_0000_0000_0000],
    b_shifted: None,
    mp1h: &[0x8000_0000_0000_0000, 0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff],
    r2: None,
    reduce: reduce_p192,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// Group-order modulus.
pub const ORDER: Modulus = Modulus {
    bit_size: 192,
    size: 3,
    m: &Q,
    b: &[0xeb94_364e_4b2d_d7cf, 0x0000_0000_6621_07c9, 0x0000_0000_0000_0000],
    b_shifted: None,
    mp1h: &[0x0a35_e4d8_da69_1419, 0xffff_ffff_ccef_7c1b, 0x7fff_ffff_ffff_ffff],
    r2: None,
    reduce: reduce_fold,
    invert: invert_binary,
    sqrt_ratio: None,
};

/// NIST P-192 elliptic curve, specified in [FIPS 186-4] § D.1.2.1.
///
/// [FIPS 186-4]: https://csrc.nist.gov/publications/detail/fips/186/4/final
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP192;

impl Curve for NistP192 {
    type PointArithmetic = Jacobian;

    const FIELD: Modulus = FIELD;
    const ORDER: Modulus = ORDER;
    const EQUATION_B: &'static [Limb] =
        &[0xfeb8_deec_c146_b9b1, 0x0fa7_e9ab_7224_3049, 0x6421_0519_e59c_80e7];
    const GENERATOR: (&'static [Limb], &'static [Limb]) = (
        &[0xf4ff_0afd_82ff_1012, 0x7cbf_20eb_43a1_8800, 0x188d_a80e_b030_90f6],
        &[0x73f9_77a1_1e79_4811, 0x6310_11ed_6b24_cdd5, 0x0719_2b95_ffc8_da78],
    );
    const PIPPENGER_K: usize = 4;
    const PIPPENGER_C: usize = 4;

    fn basepoint_table() -> &'static [Limb] {
        static TABLE: OnceBox<Vec<Limb>> = OnceBox::new();
        lookup_table::cached::<Self>(&TABLE)
    }
}

impl WeierstrassCurve for NistP192 {}

/// Reduction using `2^192 ≡ 2^64 + 1`.
///
/// Limbs 3 to 5 of the product land on limbs `0, 1`, `1, 2` and `0, 1, 2`.
/// The carry out of the sum is folded in twice the same way.
fn reduce_p192(_m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let x: [WideLimb; 6] = core::array::from_fn(|i| WideLimb::from(xp[i]));

    let t = x[0] + x[3] + x[5];
    let mut r0 = t as Limb;
    let t = x[1] + x[3] + x[4] + x[5] + (t >> 64);
    let mut r1 = t as Limb;
    let t = x[2] + x[4] + x[5] + (t >> 64);
    let mut r2 = t as Limb;
    let mut carry = (t >> 64) as Limb;

    for _ in 0..2 {
        let (s0, c0) = adc(r0, carry, 0);
        let (s1, c1) = adc(r1, carry, c0);
        let (s2, c2) = adc(r2, 0, c1);
        (r0, r1, r2, carry) = (s0, s1, s2, c2);
    }
    debug_assert_eq!(carry, 0);

    rp[..3].copy_from_slice(&[r0, r1, r2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::tests::{check_curve_constants, check_reduction};

    #[test]
    fn constants() {
        check_curve_constants::<NistP192>();
    }

    #[test]
    fn field_reduction() {
        check_reduction(&FIELD);
        check_reduction(&ORDER);
    }

    #[test]
    fn formulas() {
        crate::point_arithmetic::tests::check_formulas::<NistP192>();
    }
}
