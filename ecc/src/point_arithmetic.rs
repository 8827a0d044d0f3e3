//! Point arithmetic on projective coordinates.
//!
//! Points are `3 * size`-limb buffers `X ‖ Y ‖ Z` whose coordinates are in
//! the field's internal representation. Affine inputs to mixed additions are
//! `2 * size`-limb buffers `x ‖ y`, also internal. Results of
//! [`PointArithmetic::to_affine`] are canonical and in plain form.

mod homogeneous;
mod jacobian;

pub use self::{homogeneous::HomogeneousEdwards, jacobian::Jacobian};

use crate::Curve;
use primemod::{Limb, limb::carve, subtle::Choice};

/// Formulas for one coordinate system.
///
/// Every operation runs in constant time unless its name says otherwise.
/// Scratch sizes are given by the `*_ITCH` constants, in limbs.
pub trait PointArithmetic<C: Curve>: sealed::Sealed {
    /// Whether the addition law is complete, i.e. the additions below are
    /// correct for every pair of inputs, including equal points and the
    /// identity.
    const COMPLETE: bool;

    /// Scratch needed by [`PointArithmetic::dup`].
    const DUP_ITCH: usize;

    /// Scratch needed by [`PointArithmetic::add`],
    /// [`PointArithmetic::add_mixed`] and [`PointArithmetic::add_vartime`].
    const ADD_ITCH: usize;

    /// Scratch needed by [`PointArithmetic::to_affine`].
    const TO_AFFINE_ITCH: usize;

    /// Scratch needed by [`PointArithmetic::on_curve`] and
    /// [`PointArithmetic::eq_projective`].
    const CHECK_ITCH: usize;

    /// Writes the identity.
    fn identity(r: &mut [Limb]);

    /// Loads a plain affine point `x ‖ y` into projective coordinates.
    fn from_affine(r: &mut [Limb], p: &[Limb]);

    /// `r = 2p`.
    fn dup(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]);

    /// `r = p + q` for an internal affine `q`.
    ///
    /// For incomplete formulas the result is unspecified when `p = q` or when
    /// either operand is the identity.
    fn add_mixed(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]);

    /// `r = p + q`, with the same precondition as
    /// [`PointArithmetic::add_mixed`].
    fn add(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]);

    /// `r = p + q` for any public `p` and `q`.
    ///
    /// Branches on the operands to handle the degenerate cases, so it must
    /// only ever see public data.
    fn add_vartime(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]);

    /// Converts to canonical plain affine coordinates `x ‖ y`.
    fn to_affine(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]);

    /// Whether the internal affine point `(x, y)` satisfies the curve
    /// equation.
    fn on_curve(x: &[Limb], y: &[Limb], scratch: &mut [Limb]) -> Choice;

    /// Whether `p` and `q` represent the same point.
    fn eq_projective(p: &[Limb], q: &[Limb], scratch: &mut [Limb]) -> Choice;

    /// Scratch needed by [`PointArithmetic::x_mod_order`].
    fn x_mod_order_itch() -> usize {
        2 * C::FIELD.size + Self::TO_AFFINE_ITCH
    }

    /// Writes the affine `x` coordinate of `p`, reduced to canonical form
    /// modulo the group order.
    fn x_mod_order(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]) {
        let n = C::FIELD.size;
        debug_assert_eq!(C::ORDER.size, n);
        let (xy, scratch) = scratch.split_at_mut(2 * n);
        Self::to_affine(xy, p, scratch);
        r.copy_from_slice(&xy[..n]);
        C::ORDER.canonical(r);
    }
}

/// Splits a projective point into its coordinates.
pub(crate) fn coords(p: &[Limb], n: usize) -> (&[Limb], &[Limb], &[Limb]) {
    let (x, rest) = p.split_at(n);
    let (y, z) = rest.split_at(n);
    (x, y, &z[..n])
}

/// Splits a projective point into its mutable coordinates.
pub(crate) fn coords_mut(p: &mut [Limb], n: usize) -> [&mut [Limb]; 3] {
    let (xyz, _) = carve::<3>(p, n);
    xyz
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::HomogeneousEdwards {}
    impl Sealed for super::Jacobian {}
}
