//! Homogeneous coordinates on twisted Edwards curves with `a = -1`.
//!
//! `(X, Y, Z)` represents the affine point `(X / Z, Y / Z)`. The identity is
//! `(0, 1, 1)`.

use super::{PointArithmetic, coords, coords_mut};
use crate::Curve;
use primemod::{Limb, limb::carve, subtle::Choice};

/// Projective twisted Edwards coordinates. The addition law is complete: it
/// is correct for doubling and for the identity.
#[derive(Clone, Copy, Debug)]
pub struct HomogeneousEdwards;

impl<C: Curve> PointArithmetic<C> for HomogeneousEdwards {
    const COMPLETE: bool = true;
    const DUP_ITCH: usize = 8 * C::FIELD.size;
    const ADD_ITCH: usize = 11 * C::FIELD.size;
    const TO_AFFINE_ITCH: usize = 5 * C::FIELD.size;
    const CHECK_ITCH: usize = 6 * C::FIELD.size;

    fn identity(r: &mut [Limb]) {
        let m = &C::FIELD;
        let [x, y, z] = coords_mut(r, m.size);
        x.fill(0);
        m.unit(y);
        m.unit(z);
    }

    fn from_affine(r: &mut [Limb], p: &[Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let [x, y, z] = coords_mut(r, n);
        m.to_internal(x, &p[..n]);
        m.to_internal(y, &p[n..2 * n]);
        m.unit(z);
    }

    /// `dbl-2008-bbjlp`.
    fn dup(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let [x3, y3, z3] = coords_mut(r, n);
        let ([b, c, d, f, h, t], tp) = carve::<6>(scratch, n);

        // B = (X1 + Y1)², C = X1², D = Y1², H = Z1²
        m.add(t, x1, y1);
        m.sqr(b, t, tp);
        m.sqr(c, x1, tp);
        m.sqr(d, y1, tp);
        m.sqr(h, z1, tp);

        // F = D - C
        m.sub(f, d, c);

        // Y3 = F (-C - D) = (C - D) (C + D)
        m.sub(t, c, d);
        m.add_assign(c, d);
        m.mul(y3, t, c, tp);

        // J = F - 2 H
        m.sub(t, f, h);
        m.sub_assign(t, h);

        // X3 = (B - C - D) J
        m.sub_assign(b, c);
        m.mul(x3, b, t, tp);

        // Z3 = F J
        m.mul(z3, f, t, tp);
    }

    fn add_mixed(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        let n = C::FIELD.size;
        add::<C>(r, p, &q[..n], &q[n..2 * n], None, scratch);
    }

    fn add(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        let (x2, y2, z2) = coords(q, C::FIELD.size);
        add::<C>(r, p, x2, y2, Some(z2), scratch);
    }

    fn add_vartime(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        <Self as PointArithmetic<C>>::add(r, p, q, scratch);
    }

    fn to_affine(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x, y, z) = coords(p, n);
        let (rx, ry) = r.split_at_mut(n);
        let ([iz, t], rest) = carve::<2>(scratch, n);

        m.invert(iz, z, rest);
        m.mul(t, x, iz, rest);
        m.from_internal(rx, t);
        m.canonical(rx);
        m.mul(t, y, iz, rest);
        m.from_internal(ry, t);
        m.canonical(ry);
    }

    /// `-x² + y² = 1 + d x² y²`.
    fn on_curve(x: &[Limb], y: &[Limb], scratch: &mut [Limb]) -> Choice {
        let m = &C::FIELD;
        let n = m.size;
        let ([xx, yy, lhs, rhs], tp) = carve::<4>(scratch, n);

        m.sqr(xx, x, tp);
        m.sqr(yy, y, tp);
        m.sub(lhs, yy, xx);

        m.mul(rhs, xx, yy, tp);
        m.mul_assign(rhs, C::EQUATION_B, tp);
        m.unit(xx);
        m.add_assign(rhs, xx);
        m.ct_eq(lhs, rhs)
    }

    /// Compares `X1 Z2` with `X2 Z1` and `Y1 Z2` with `Y2 Z1`.
    fn eq_projective(p: &[Limb], q: &[Limb], scratch: &mut [Limb]) -> Choice {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let (x2, y2, z2) = coords(q, n);
        let ([a, b], tp) = carve::<2>(scratch, n);

        m.mul(a, x1, z2, tp);
        m.mul(b, x2, z1, tp);
        let same_x = m.ct_eq(a, b);

        m.mul(a, y1, z2, tp);
        m.mul(b, y2, z1, tp);
        same_x & m.ct_eq(a, b)
    }
}

/// `add-2008-bbjlp` with `a = -1`. A missing `z2` means `Z2 = 1`.
fn add<C: Curve>(
    r: &mut [Limb],
    p: &[Limb],
    x2: &[Limb],
    y2: &[Limb],
    z2: Option<&[Limb]>,
    scratch: &mut [Limb],
) {
    let m = &C::FIELD;
    let n = m.size;
    let (x1, y1, z1) = coords(p, n);
    let [x3, y3, z3] = coords_mut(r, n);
    let ([a, b, c, d, e, f, g, t, u], tp) = carve::<9>(scratch, n);

    // A = Z1 Z2, B = A²
    match z2 {
        Some(z2) => m.mul(a, z1, z2, tp),
        None => a.copy_from_slice(z1),
    }
    m.sqr(b, a, tp);

    // C = X1 X2, D = Y1 Y2, E = d C D
    m.mul(c, x1, x2, tp);
    m.mul(d, y1, y2, tp);
    m.mul(e, c, d, tp);
    m.mul_assign(e, C::EQUATION_B, tp);

    // F = B - E, G = B + E
    m.sub(f, b, e);
    m.add(g, b, e);

    // X3 = A F ((X1 + Y1) (X2 + Y2) - C - D)
    m.add(t, x1, y1);
    m.add(u, x2, y2);
    m.mul(b, t, u, tp);
    m.sub_assign(b, c);
    m.sub_assign(b, d);
    m.mul(x3, b, f, tp);
    m.mul_assign(x3, a, tp);

    // Y3 = A G (D + C)
    m.add_assign(c, d);
    m.mul(y3, c, g, tp);
    m.mul_assign(y3, a, tp);

    // Z3 = F G
    m.mul(z3, f, g, tp);
}
