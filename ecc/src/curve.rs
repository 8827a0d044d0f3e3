//! Curve descriptors.

use crate::point_arithmetic::{HomogeneousEdwards, Jacobian, PointArithmetic};
use core::fmt::Debug;
use primemod::{Limb, Modulus};

/// Parameters of an elliptic curve group.
///
/// Implemented by one zero-sized marker type per curve. The set of curves is
/// closed: point arithmetic is selected statically through
/// [`Curve::PointArithmetic`], so no code path depends at runtime on which
/// curve is in use.
pub trait Curve: 'static + Copy + Clone + Debug + Default + Eq + PartialEq + Send + Sync {
    /// Formulas used for point arithmetic on this curve.
    type PointArithmetic: PointArithmetic<Self>;

    /// Base field prime `p`.
    const FIELD: Modulus;

    /// Prime order `q` of the generator.
    const ORDER: Modulus;

    /// Curve constant in internal representation: `b` in `y² = x³ - 3x + b`,
    /// or `d` in `-x² + y² = 1 + d·x²·y²`.
    const EQUATION_B: &'static [Limb];

    /// Affine coordinates of the generator, canonical and in plain form.
    const GENERATOR: (&'static [Limb], &'static [Limb]);

    /// Row stride `k` of the fixed-base table.
    const PIPPENGER_K: usize;

    /// Bits per table block `c`: each block holds `2^c` entries.
    const PIPPENGER_C: usize;

    /// Whether field elements are kept in Montgomery form.
    const USE_REDC: bool = Self::FIELD.use_redc();

    /// Precomputed multiples of the generator for [`scalar_mul::mul_g`],
    /// as internal affine points.
    ///
    /// [`scalar_mul::mul_g`]: crate::scalar_mul::mul_g
    fn basepoint_table() -> &'static [Limb];
}

/// Short Weierstrass curves with `a = -3`, on which ECDSA and ECDH are
/// defined.
pub trait WeierstrassCurve: Curve<PointArithmetic = Jacobian> {}

/// Twisted Edwards curves with `a = -1`, on which EdDSA is defined.
pub trait EdwardsCurve: Curve<PointArithmetic = HomogeneousEdwards> {}
