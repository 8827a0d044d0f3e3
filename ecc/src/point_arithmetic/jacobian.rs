//! Jacobian coordinates for short Weierstrass curves with `a = -3`.
//!
//! `(X, Y, Z)` represents the affine point `(X / Z², Y / Z³)`. The identity is
//! any point with `Z = 0` and is written as all zeros.

use super::{PointArithmetic, coords, coords_mut};
use crate::Curve;
use primemod::{Limb, limb::carve, subtle::Choice};

/// Jacobian coordinates with the `a = -3` doubling and addition formulas from
/// the Explicit-Formulas Database.
#[derive(Clone, Copy, Debug)]
pub struct Jacobian;

impl<C: Curve> PointArithmetic<C> for Jacobian {
    const COMPLETE: bool = false;
    const DUP_ITCH: usize = 7 * C::FIELD.size;
    const ADD_ITCH: usize = 11 * C::FIELD.size;
    const TO_AFFINE_ITCH: usize = 5 * C::FIELD.size;
    const CHECK_ITCH: usize = 6 * C::FIELD.size;

    fn identity(r: &mut [Limb]) {
        r.fill(0);
    }

    fn from_affine(r: &mut [Limb], p: &[Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let [x, y, z] = coords_mut(r, n);
        m.to_internal(x, &p[..n]);
        m.to_internal(y, &p[n..2 * n]);
        m.unit(z);
    }

    /// `dbl-2001-b`. Maps the identity to itself.
    fn dup(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let [x3, y3, z3] = coords_mut(r, n);
        let ([delta, gamma, beta, alpha, t], tp) = carve::<5>(scratch, n);

        // delta = Z1², gamma = Y1²
        m.sqr(delta, z1, tp);
        m.sqr(gamma, y1, tp);

        // Z3 = (Y1 + Z1)² - gamma - delta
        m.add(t, y1, z1);
        m.sqr(z3, t, tp);
        m.sub_assign(z3, gamma);
        m.sub_assign(z3, delta);

        // alpha = 3 (X1 - delta) (X1 + delta)
        m.sub(alpha, x1, delta);
        m.add(t, x1, delta);
        m.mul_assign(alpha, t, tp);
        m.mul_1_assign(alpha, 3);

        // beta = X1 gamma
        m.mul(beta, x1, gamma, tp);

        // X3 = alpha² - 8 beta
        m.sqr(x3, alpha, tp);
        m.submul_1(x3, beta, 8);

        // Y3 = alpha (4 beta - X3) - 8 gamma²
        m.mul_1(t, beta, 4);
        m.sub_assign(t, x3);
        m.mul(y3, alpha, t, tp);
        m.sqr(t, gamma, tp);
        m.submul_1(y3, t, 8);
    }

    /// `madd-2007-bl`.
    fn add_mixed(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let (x2, y2) = (&q[..n], &q[n..2 * n]);
        let [x3, y3, z3] = coords_mut(r, n);
        let ([zz, h, hh, w, j, v, t], tp) = carve::<7>(scratch, n);

        // ZZ = Z1², H = X2 ZZ - X1, HH = H²
        m.sqr(zz, z1, tp);
        m.mul(h, x2, zz, tp);
        m.sub_assign(h, x1);
        m.sqr(hh, h, tp);

        // Z3 = (Z1 + H)² - ZZ - HH
        m.add(t, z1, h);
        m.sqr(z3, t, tp);
        m.sub_assign(z3, zz);
        m.sub_assign(z3, hh);

        // W = 2 (Y2 Z1 ZZ - Y1)
        m.mul_assign(zz, z1, tp);
        m.mul(w, y2, zz, tp);
        m.sub_assign(w, y1);
        m.mul_1_assign(w, 2);

        // I = 4 HH, J = H I, V = X1 I
        m.mul_1_assign(hh, 4);
        m.mul(j, h, hh, tp);
        m.mul(v, x1, hh, tp);

        // X3 = W² - J - 2 V
        m.sqr(x3, w, tp);
        m.sub_assign(x3, j);
        m.submul_1(x3, v, 2);

        // Y3 = W (V - X3) - 2 Y1 J
        m.sub(t, v, x3);
        m.mul(y3, w, t, tp);
        m.mul(t, y1, j, tp);
        m.submul_1(y3, t, 2);
    }

    /// `add-2007-bl`.
    fn add(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let (x2, y2, z2) = coords(q, n);
        let [x3, y3, z3] = coords_mut(r, n);
        let ([z1z1, z2z2, u1, h, s1, rr, i, j, t], tp) = carve::<9>(scratch, n);

        // Z1Z1 = Z1², Z2Z2 = Z2²
        m.sqr(z1z1, z1, tp);
        m.sqr(z2z2, z2, tp);

        // Z3 = (Z1 + Z2)² - Z1Z1 - Z2Z2, times H below
        m.add(t, z1, z2);
        m.sqr(z3, t, tp);
        m.sub_assign(z3, z1z1);
        m.sub_assign(z3, z2z2);

        // U1 = X1 Z2Z2, H = X2 Z1Z1 - U1
        m.mul(u1, x1, z2z2, tp);
        m.mul(h, x2, z1z1, tp);
        m.sub_assign(h, u1);
        m.mul_assign(z3, h, tp);

        // S1 = Y1 Z2 Z2Z2, r = 2 (Y2 Z1 Z1Z1 - S1)
        m.mul(s1, y1, z2, tp);
        m.mul_assign(s1, z2z2, tp);
        m.mul(rr, y2, z1, tp);
        m.mul_assign(rr, z1z1, tp);
        m.sub_assign(rr, s1);
        m.mul_1_assign(rr, 2);

        // I = (2 H)², J = H I, V = U1 I
        m.mul_1(t, h, 2);
        m.sqr(i, t, tp);
        m.mul(j, h, i, tp);
        m.mul(t, u1, i, tp);

        // X3 = r² - J - 2 V
        m.sqr(x3, rr, tp);
        m.sub_assign(x3, j);
        m.submul_1(x3, t, 2);

        // Y3 = r (V - X3) - 2 S1 J
        m.sub_assign(t, x3);
        m.mul(y3, rr, t, tp);
        m.mul(t, s1, j, tp);
        m.submul_1(y3, t, 2);
    }

    fn add_vartime(r: &mut [Limb], p: &[Limb], q: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let (x2, y2, z2) = coords(q, n);

        if bool::from(m.is_zero(z1)) {
            r.copy_from_slice(q);
            return;
        }
        if bool::from(m.is_zero(z2)) {
            r.copy_from_slice(p);
            return;
        }

        // Compare X1 Z2² with X2 Z1², then Y1 Z2³ with Y2 Z1³.
        let (same_x, same_y) = {
            let ([u1, u2, s1, s2], tp) = carve::<4>(scratch, n);
            m.sqr(s1, z2, tp);
            m.mul(u1, x1, s1, tp);
            m.mul_assign(s1, z2, tp);
            m.mul_assign(s1, y1, tp);
            m.sqr(s2, z1, tp);
            m.mul(u2, x2, s2, tp);
            m.mul_assign(s2, z1, tp);
            m.mul_assign(s2, y2, tp);
            (bool::from(m.ct_eq(u1, u2)), bool::from(m.ct_eq(s1, s2)))
        };

        match (same_x, same_y) {
            (true, true) => <Self as PointArithmetic<C>>::dup(r, p, scratch),
            (true, false) => r.fill(0),
            _ => <Self as PointArithmetic<C>>::add(r, p, q, scratch),
        }
    }

    /// Maps the identity to `(0, 0)`.
    fn to_affine(r: &mut [Limb], p: &[Limb], scratch: &mut [Limb]) {
        let m = &C::FIELD;
        let n = m.size;
        let (x, y, z) = coords(p, n);
        let (rx, ry) = r.split_at_mut(n);
        let ([iz, iz2], rest) = carve::<2>(scratch, n);

        // x = X / Z², y = Y / Z³
        m.invert(iz, z, rest);
        m.sqr(iz2, iz, rest);
        m.mul(rx, x, iz2, rest);
        m.mul_assign(iz2, iz, rest);
        m.mul(ry, y, iz2, rest);

        iz.copy_from_slice(rx);
        m.from_internal(rx, iz);
        m.canonical(rx);
        iz.copy_from_slice(ry);
        m.from_internal(ry, iz);
        m.canonical(ry);
    }

    /// `y² = x³ - 3x + b`.
    fn on_curve(x: &[Limb], y: &[Limb], scratch: &mut [Limb]) -> Choice {
        let m = &C::FIELD;
        let n = m.size;
        let ([lhs, rhs, t], tp) = carve::<3>(scratch, n);

        m.sqr(lhs, y, tp);
        m.sqr(t, x, tp);
        m.mul(rhs, t, x, tp);
        m.submul_1(rhs, x, 3);
        m.add_assign(rhs, C::EQUATION_B);
        m.ct_eq(lhs, rhs)
    }

    /// Compares `X1 Z2²` with `X2 Z1²` and `Y1 Z2³` with `Y2 Z1³`. Two
    /// identities are equal, and the identity equals nothing else.
    fn eq_projective(p: &[Limb], q: &[Limb], scratch: &mut [Limb]) -> Choice {
        let m = &C::FIELD;
        let n = m.size;
        let (x1, y1, z1) = coords(p, n);
        let (x2, y2, z2) = coords(q, n);
        let ([a, b, zz1, zz2], tp) = carve::<4>(scratch, n);

        let p_zero = m.is_zero(z1);
        let q_zero = m.is_zero(z2);

        m.sqr(zz1, z1, tp);
        m.sqr(zz2, z2, tp);
        m.mul(a, x1, zz2, tp);
        m.mul(b, x2, zz1, tp);
        let same_x = m.ct_eq(a, b);

        m.mul_assign(zz1, z1, tp);
        m.mul_assign(zz2, z2, tp);
        m.mul(a, y1, zz2, tp);
        m.mul(b, y2, zz1, tp);
        let same_y = m.ct_eq(a, b);

        (p_zero & q_zero) | (!p_zero & !q_zero & same_x & same_y)
    }
}
