//! Constant-time scalar multiplication.
//!
//! [`mul_g`] multiplies the generator using the precomputed table from
//! [`Curve::basepoint_table`]. [`mul_a`] multiplies an arbitrary point using
//! a fixed 4-bit window. Both take the scalar as `size` little-endian limbs
//! and write a projective point; neither branches on the scalar.

use crate::{Curve, lookup_table, point_arithmetic::PointArithmetic};
use core::ops::{Deref, DerefMut};
use primemod::{
    Limb, MAX_LIMBS,
    ct::{cnd_copy, sec_tabselect},
    limb::LIMB_BITS,
    subtle::{Choice, ConstantTimeEq},
};
use zeroize::Zeroize;

/// Window width of [`mul_a`].
const WINDOW: usize = 4;

/// Entries in the per-point table of [`mul_a`].
const TABLE_SIZE: usize = 1 << WINDOW;

/// Scratch limbs needed by [`mul_g`].
pub fn mul_g_itch<C: Curve>() -> usize {
    5 * C::FIELD.size + formula_itch::<C>()
}

/// Scratch limbs needed by [`mul_a`].
pub fn mul_a_itch<C: Curve>() -> usize {
    (3 * TABLE_SIZE + 8) * C::FIELD.size + formula_itch::<C>()
}

fn formula_itch<C: Curve>() -> usize {
    C::PointArithmetic::ADD_ITCH.max(C::PointArithmetic::DUP_ITCH)
}

/// `r = k G`.
///
/// Pippenger-style comb over the generator table: bit `i + k (c j + t)` of
/// the scalar selects point `t` of block `j` during round `i`. Scalar bits
/// beyond what the table covers are ignored.
pub fn mul_g<C: Curve>(r: &mut [Limb], k: &[Limb], scratch: &mut [Limb]) {
    let m = &C::FIELD;
    let n = m.size;
    let (stride, c) = (C::PIPPENGER_K, C::PIPPENGER_C);
    let table = C::basepoint_table();

    let (entry, rest) = scratch.split_at_mut(2 * n);
    let (tmp, rest) = rest.split_at_mut(3 * n);
    let mut unit = [0; MAX_LIMBS];
    m.unit(&mut unit[..n]);

    C::PointArithmetic::identity(r);
    let mut is_zero = Choice::from(1);

    for i in (0..stride).rev() {
        tmp.copy_from_slice(r);
        C::PointArithmetic::dup(r, tmp, rest);

        for (j, block) in table
            .chunks_exact(lookup_table::block_limbs::<C>())
            .enumerate()
        {
            let mut bits: Limb = 0;
            for t in (0..c).rev() {
                bits = (bits << 1) | bit(k, i + stride * (c * j + t));
            }
            sec_tabselect(entry, block, bits);

            if C::PointArithmetic::COMPLETE {
                C::PointArithmetic::add_mixed(tmp, r, entry, rest);
                r.copy_from_slice(tmp);
            } else {
                let nonzero = !bits.ct_eq(&0);

                // The first nonzero entry becomes the accumulator.
                let first = is_zero & nonzero;
                cnd_copy(first, &mut r[..2 * n], entry);
                cnd_copy(first, &mut r[2 * n..], &unit[..n]);

                C::PointArithmetic::add_mixed(tmp, r, entry, rest);
                cnd_copy(nonzero & !is_zero, r, tmp);
                is_zero &= !nonzero;
            }
        }
    }
}

/// `r = k P` for a plain affine point `P` (`x ‖ y`) that is on the curve and
/// is not the identity.
///
/// Scalars must be below `2^FIELD.bit_size`, which every reduced scalar is.
pub fn mul_a<C: Curve>(r: &mut [Limb], k: &[Limb], p: &[Limb], scratch: &mut [Limb]) {
    let m = &C::FIELD;
    let n = m.size;
    let width = 3 * n;

    let (table, rest) = scratch.split_at_mut(TABLE_SIZE * width);
    let (q, rest) = rest.split_at_mut(2 * n);
    let (entry, rest) = rest.split_at_mut(width);
    let (tmp, rest) = rest.split_at_mut(width);

    // table[i] = i P
    m.to_internal(&mut q[..n], &p[..n]);
    m.to_internal(&mut q[n..], &p[n..2 * n]);
    C::PointArithmetic::identity(&mut table[..width]);
    C::PointArithmetic::from_affine(&mut table[width..2 * width], p);
    for i in 2..TABLE_SIZE {
        let (lower, upper) = table.split_at_mut(i * width);
        let dst = &mut upper[..width];
        if i % 2 == 0 {
            C::PointArithmetic::dup(dst, &lower[i / 2 * width..][..width], rest);
        } else {
            C::PointArithmetic::add_mixed(dst, &lower[(i - 1) * width..], q, rest);
        }
    }

    let windows = m.bit_size.div_ceil(WINDOW);
    let top = window(k, (windows - 1) * WINDOW);
    sec_tabselect(r, table, top);
    let mut is_zero = top.ct_eq(&0);

    for w in (0..windows - 1).rev() {
        for _ in 0..WINDOW {
            tmp.copy_from_slice(r);
            C::PointArithmetic::dup(r, tmp, rest);
        }

        let bits = window(k, w * WINDOW);
        sec_tabselect(entry, table, bits);

        if C::PointArithmetic::COMPLETE {
            C::PointArithmetic::add(tmp, r, entry, rest);
            r.copy_from_slice(tmp);
        } else {
            let nonzero = !bits.ct_eq(&0);
            cnd_copy(is_zero & nonzero, r, entry);
            C::PointArithmetic::add(tmp, r, entry, rest);
            cnd_copy(nonzero & !is_zero, r, tmp);
            is_zero &= !nonzero;
        }
    }
}

/// Bit `pos` of `k`, or zero past its end.
#[inline]
fn bit(k: &[Limb], pos: usize) -> Limb {
    k.get(pos / LIMB_BITS)
        .map_or(0, |limb| (limb >> (pos % LIMB_BITS)) & 1)
}

/// The `WINDOW` bits of `k` starting at `pos`.
fn window(k: &[Limb], pos: usize) -> Limb {
    (0..WINDOW).rev().fold(0, |acc, t| (acc << 1) | bit(k, pos + t))
}

/// Stack scratch space large enough for any single high-level operation,
/// wiped when dropped.
pub(crate) struct Scratch([Limb; 72 * MAX_LIMBS]);

impl Scratch {
    pub(crate) fn new() -> Self {
        Self([0; 72 * MAX_LIMBS])
    }
}

impl Deref for Scratch {
    type Target = [Limb];

    fn deref(&self) -> &[Limb] {
        &self.0
    }
}

impl DerefMut for Scratch {
    fn deref_mut(&mut self) -> &mut [Limb] {
        &mut self.0
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
