//! Constant-time modular inversion.

use crate::{
    Modulus,
    ct::{cnd_add_n, cnd_neg, cnd_sub_n, cnd_swap},
    limb::{LIMB_BITS, Limb, carve, rshift1_assign},
};
use subtle::Choice;

/// Binary extended-gcd inversion with a fixed iteration count.
///
/// Keeps `a` and `b = m` with cofactors `u` and `v` such that `a ≡ u·x` and
/// `b ≡ v·x`. Each step subtracts `b` from an odd `a` (swapping when that
/// goes negative) and halves `a`. After `bit_size + 64 * size` steps `a` is
/// zero and `v = x^-1`, or zero when `x ≡ 0`. The input need not be
/// canonical. The output is canonical.
///
/// Needs [`Modulus::invert_itch`] scratch limbs.
pub fn invert_binary(m: &Modulus, vp: &mut [Limb], ap_in: &[Limb], scratch: &mut [Limb]) {
    let n = m.size;
    let ([ap, bp, up], _) = carve::<3>(scratch, n);

    ap.copy_from_slice(ap_in);
    bp.copy_from_slice(m.m);
    up.fill(0);
    up[0] = 1;
    vp.fill(0);

    for _ in 0..(m.bit_size + LIMB_BITS * n) {
        debug_assert_eq!(bp[0] & 1, 1);
        let odd = ap[0] & 1;

        let swap = cnd_sub_n(odd, ap, bp);
        cnd_add_n(swap, bp, ap);
        cnd_neg(swap, ap);
        cnd_swap(Choice::from(swap as u8), up, vp);

        let cy = cnd_sub_n(odd, up, vp);
        let _cy = cnd_add_n(cy, up, m.m);
        debug_assert_eq!(_cy, cy);

        let _cy = rshift1_assign(ap);
        debug_assert_eq!(_cy, 0);

        let cy = rshift1_assign(up);
        let _cy = cnd_add_n(cy, up, m.mp1h);
        debug_assert_eq!(_cy, 0);
    }
    debug_assert!(ap.iter().all(|&a| a == 0));
}

/// Inversion for moduli kept in Montgomery form.
///
/// The binary inversion of `x·R` yields `x^-1·R^-1`; two Montgomery
/// multiplications by `R^2` bring it back to `x^-1·R`.
pub fn invert_redc(m: &Modulus, rp: &mut [Limb], ap: &[Limb], scratch: &mut [Limb]) {
    invert_binary(m, rp, ap, scratch);
    if let Some(r2) = m.r2 {
        m.mul_assign(rp, r2, scratch);
        m.mul_assign(rp, r2, scratch);
    }
}
