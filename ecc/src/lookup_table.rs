//! Fixed-base tables for [`mul_g`](crate::scalar_mul::mul_g).
//!
//! With row stride `k` and `c` bits per block, block `j` holds the `2^c`
//! points `Σ_{t : bit t of i} 2^(k (c j + t)) G` for `i < 2^c`, each stored
//! as an internal affine point `x ‖ y`. Entry 0 is the identity: `(0, 1)` on
//! Edwards curves and `(0, 0)` on Weierstrass curves, where it is never used
//! as a point.
//!
//! Tables are computed from the generator on first use and cached for the
//! life of the program. All of it is public data, so generation uses
//! variable-time additions.

use crate::{Curve, point_arithmetic::PointArithmetic};
use alloc::{boxed::Box, vec, vec::Vec};
use once_cell::race::OnceBox;
use primemod::Limb;

/// Number of blocks in the table of `C`.
pub(crate) const fn blocks<C: Curve>() -> usize {
    C::FIELD
        .bit_size
        .div_ceil(C::PIPPENGER_K)
        .div_ceil(C::PIPPENGER_C)
}

/// Limbs per block.
pub(crate) const fn block_limbs<C: Curve>() -> usize {
    (1 << C::PIPPENGER_C) * 2 * C::FIELD.size
}

/// Returns the table held by `cell`, computing it on first use.
pub(crate) fn cached<C: Curve>(cell: &'static OnceBox<Vec<Limb>>) -> &'static [Limb] {
    cell.get_or_init(|| Box::new(generate::<C>()))
}

/// Computes the table of `C` from its generator.
pub(crate) fn generate<C: Curve>() -> Vec<Limb> {
    let n = C::FIELD.size;
    let (k, c) = (C::PIPPENGER_K, C::PIPPENGER_C);
    let width = 3 * n;

    let mut table = vec![0; blocks::<C>() * block_limbs::<C>()];
    let mut points = vec![0; (1 << c) * width];
    let mut base = vec![0; width];
    let mut tmp = vec![0; width];
    let mut scratch = vec![
        0;
        C::PointArithmetic::ADD_ITCH
            .max(C::PointArithmetic::DUP_ITCH)
            .max(C::PointArithmetic::TO_AFFINE_ITCH)
    ];

    let mut g = vec![0; 2 * n];
    g[..n].copy_from_slice(C::GENERATOR.0);
    g[n..].copy_from_slice(C::GENERATOR.1);
    C::PointArithmetic::from_affine(&mut base, &g);

    for block in table.chunks_exact_mut(block_limbs::<C>()) {
        C::PointArithmetic::identity(&mut points[..width]);

        // `base` runs through 2^(k (c j + t)) G.
        for t in 0..c {
            for i in (1 << t)..(1 << (t + 1)) {
                let (lower, upper) = points.split_at_mut(i * width);
                let prev = &lower[(i - (1 << t)) * width..][..width];
                C::PointArithmetic::add_vartime(&mut upper[..width], prev, &base, &mut scratch);
            }
            for _ in 0..k {
                tmp.copy_from_slice(&base);
                C::PointArithmetic::dup(&mut base, &tmp, &mut scratch);
            }
        }

        for (entry, point) in block.chunks_exact_mut(2 * n).zip(points.chunks_exact(width)) {
            C::PointArithmetic::to_affine(&mut tmp[..2 * n], point, &mut scratch);
            C::FIELD.to_internal(&mut entry[..n], &tmp[..n]);
            C::FIELD.to_internal(&mut entry[n..], &tmp[n..2 * n]);
        }
    }

    table
}
