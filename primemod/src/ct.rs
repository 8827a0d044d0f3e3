//! Constant-time selection primitives.
//!
//! Every function here has a running time and memory access pattern that
//! depends only on slice lengths, never on limb values, flags or indices.

use crate::limb::{LIMB_BITS, Limb, adc, sbb};
use subtle::{Choice, ConstantTimeEq};

/// Returns `Limb::MAX` if `x != 0`, else `0`.
#[inline(always)]
pub const fn nonzero_mask(x: Limb) -> Limb {
    ((x | x.wrapping_neg()) >> (LIMB_BITS - 1)).wrapping_neg()
}

/// Expands a [`Choice`] into an all-ones or all-zeros limb.
#[inline(always)]
pub fn choice_mask(flag: Choice) -> Limb {
    Limb::from(flag.unwrap_u8()).wrapping_neg()
}

/// Copies `src` into `dst` iff `flag` is set.
pub fn cnd_copy(flag: Choice, dst: &mut [Limb], src: &[Limb]) {
    debug_assert_eq!(dst.len(), src.len());
    let mask = choice_mask(flag);
    for (d, &s) in dst.iter_mut().zip(src) {
        *d ^= (*d ^ s) & mask;
    }
}

/// Swaps `a` and `b` iff `flag` is set.
pub fn cnd_swap(flag: Choice, a: &mut [Limb], b: &mut [Limb]) {
    debug_assert_eq!(a.len(), b.len());
    let mask = choice_mask(flag);
    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        let t = (*x ^ *y) & mask;
        *x ^= t;
        *y ^= t;
    }
}

/// `rp += ap` iff `cnd != 0`, returning the carry out.
pub fn cnd_add_n(cnd: Limb, rp: &mut [Limb], ap: &[Limb]) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mask = nonzero_mask(cnd);
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        (*r, carry) = adc(*r, a & mask, carry);
    }
    carry
}

/// `rp -= ap` iff `cnd != 0`, returning the borrow out (0 or 1).
pub fn cnd_sub_n(cnd: Limb, rp: &mut [Limb], ap: &[Limb]) -> Limb {
    debug_assert_eq!(rp.len(), ap.len());
    let mask = nonzero_mask(cnd);
    let mut borrow = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        (*r, borrow) = sbb(*r, a & mask, borrow);
    }
    borrow >> (LIMB_BITS - 1)
}

/// Replaces `rp` by its two's complement negation iff `cnd != 0`.
pub fn cnd_neg(cnd: Limb, rp: &mut [Limb]) {
    let mask = nonzero_mask(cnd);
    let mut carry = mask & 1;
    for r in rp.iter_mut() {
        (*r, carry) = adc(*r ^ mask, 0, carry);
    }
}

/// Returns whether every limb of `ap` is zero.
pub fn is_zero(ap: &[Limb]) -> Choice {
    ap.iter().fold(0, |acc, &a| acc | a).ct_eq(&0)
}

/// Returns whether `ap == bp` limb for limb.
pub fn limbs_eq(ap: &[Limb], bp: &[Limb]) -> Choice {
    debug_assert_eq!(ap.len(), bp.len());
    ap.iter().zip(bp).fold(0, |acc, (&a, &b)| acc | (a ^ b)).ct_eq(&0)
}

/// Copies entry `index` of `table` into `rp`.
///
/// `table` is a concatenation of `rp.len()`-limb entries. Every entry is read,
/// so neither timing nor the memory access pattern depends on `index`.
pub fn sec_tabselect(rp: &mut [Limb], table: &[Limb], index: Limb) {
    let width = rp.len();
    debug_assert_eq!(table.len() % width, 0);
    rp.fill(0);
    for (k, entry) in table.chunks_exact(width).enumerate() {
        let mask = choice_mask((k as Limb).ct_eq(&index));
        for (r, &e) in rp.iter_mut().zip(entry) {
            *r |= e & mask;
        }
    }
}
