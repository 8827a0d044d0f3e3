//! Generic reduction of double-width products.

use crate::{
    MAX_LIMBS, Modulus,
    ct::cnd_add_n,
    limb::{self, LIMB_BITS, Limb},
};

/// Reduces the `2 * size`-limb `xp` by repeatedly folding everything above
/// limb `size` back in as `high * B`.
///
/// A public bound on the bit length of the intermediate value decides the
/// number of passes: each pass maps a `bits`-bit value to at most
/// `max(64 * size, bits - 64 * size + bits(B)) + 1` bits. Once the value
/// fits in `size` limbs plus one bit, two conditional additions of `B`
/// absorb the last carry. Requires `bits(B) + 2 < 64 * size`.
pub fn reduce_fold(m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]) {
    let n = m.size;
    let b_limbs = significant_limbs(m.b);
    let b_bits = bit_length(m.b);
    let b = &m.b[..b_limbs];
    debug_assert!(b_bits + 2 < LIMB_BITS * n);

    let mut x = [0; 2 * MAX_LIMBS + 1];
    let mut t = [0; 2 * MAX_LIMBS + 1];
    let mut len = 2 * n;
    x[..len].copy_from_slice(&xp[..len]);

    let mut bits = LIMB_BITS * len;
    while bits > LIMB_BITS * n + 1 {
        let high = len - n;
        let next_len = n.max(high + b_limbs) + 1;
        t[..next_len].fill(0);
        limb::mul(&mut t[..high + b_limbs], &x[n..len], b);
        let cy = limb::add_n_assign(&mut t[..n], &x[..n]);
        let cy = limb::add_1_assign(&mut t[n..next_len], cy);
        debug_assert_eq!(cy, 0);

        x[..next_len].copy_from_slice(&t[..next_len]);
        len = next_len;
        bits = (LIMB_BITS * n).max(bits - LIMB_BITS * n + b_bits) + 1;
    }

    let hi = x[n];
    debug_assert!(hi <= 1);
    let cy = cnd_add_n(hi, &mut x[..n], m.b);
    let cy = cnd_add_n(cy, &mut x[..n], m.b);
    debug_assert_eq!(cy, 0);
    rp.copy_from_slice(&x[..n]);
}

/// Number of limbs up to and including the most significant non-zero one.
fn significant_limbs(ap: &[Limb]) -> usize {
    ap.iter().rposition(|&a| a != 0).map_or(1, |i| i + 1)
}

fn bit_length(ap: &[Limb]) -> usize {
    ap.iter().rposition(|&a| a != 0).map_or(0, |i| {
        LIMB_BITS * i + (LIMB_BITS - ap[i].leading_zeros() as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        invert_binary,
        limb::tests::to_biguint,
    };
    use proptest::prelude::*;

    /// `2^127 - 1`: a single short fold constant.
    const M127: Modulus = Modulus {
        bit_size: 127,
        size: 2,
        m: &[Limb::MAX, Limb::MAX >> 1],
        b: &[2, 0],
        b_shifted: None,
        mp1h: &[0, 1 << 62],
        r2: None,
        reduce: reduce_fold,
        invert: invert_binary,
        sqrt_ratio: None,
    };

    /// `2^128 - 2^96 + 1`: `B` spans both limbs.
    const M128: Modulus = Modulus {
        bit_size: 128,
        size: 2,
        m: &[1, 0xffff_ffff_0000_0000],
        b: &[Limb::MAX, 0x0000_0000_ffff_ffff],
        b_shifted: None,
        mp1h: &[1, 0x7fff_ffff_8000_0000],
        r2: None,
        reduce: reduce_fold,
        invert: invert_binary,
        sqrt_ratio: None,
    };

    #[test]
    fn constants_are_consistent() {
        for m in [&M127, &M128] {
            let p = to_biguint(m.m);
            let r = num_bigint::BigUint::from(1u8) << (LIMB_BITS * m.size);
            assert_eq!(to_biguint(m.b), &r % &p);
            assert_eq!(to_biguint(m.mp1h), (&p + 1u8) >> 1);
        }
    }

    #[test]
    fn helpers() {
        assert_eq!(significant_limbs(&[5, 0, 0]), 1);
        assert_eq!(significant_limbs(&[0, 0, 1]), 3);
        assert_eq!(bit_length(&[0, 0]), 0);
        assert_eq!(bit_length(&[0, 0x10]), 69);
    }

    #[test]
    fn all_ones_input() {
        for m in [&M127, &M128] {
            let mut x = [Limb::MAX; 4];
            let want = to_biguint(&x) % to_biguint(m.m);
            let mut r = [0; 2];
            reduce_fold(m, &mut r, &mut x);
            let mut canonical = r;
            m.canonical(&mut canonical);
            assert_eq!(to_biguint(&canonical), want);
        }
    }

    proptest! {
        #[test]
        fn fold_matches_biguint(x in any::<[Limb; 4]>()) {
            for m in [&M127, &M128] {
                let p = to_biguint(m.m);
                let mut xp = x;
                let mut r = [0; 2];
                reduce_fold(m, &mut r, &mut xp);
                prop_assert_eq!(to_biguint(&r) % &p, to_biguint(&x) % &p);
            }
        }
    }
}
