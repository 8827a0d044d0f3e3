//! Affine points.

use crate::{
    Curve, Error, Result, Scalar, WeierstrassCurve,
    point_arithmetic::PointArithmetic,
    scalar_mul::{Scratch, mul_a, mul_g},
};
use alloc::vec::Vec;
use core::marker::PhantomData;
use primemod::{
    Limb, MAX_LIMBS,
    ct::limbs_eq,
    limb::{from_be_bytes, to_be_bytes},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Tag of an uncompressed SEC1 point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Point on the curve `C` in affine coordinates.
///
/// Coordinates are canonical residues in plain form. Every value of this
/// type satisfies the curve equation.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint<C: Curve> {
    x: [Limb; MAX_LIMBS],
    y: [Limb; MAX_LIMBS],
    curve: PhantomData<C>,
}

impl<C: Curve> AffinePoint<C> {
    /// Size of one encoded coordinate in bytes.
    pub const COORDINATE_BYTES: usize = C::FIELD.byte_size();

    /// The generator of the prime-order group.
    pub fn generator() -> Self {
        let n = C::FIELD.size;
        let mut point = Self::zero();
        point.x[..n].copy_from_slice(C::GENERATOR.0);
        point.y[..n].copy_from_slice(C::GENERATOR.1);
        point
    }

    /// Builds a point from big-endian coordinates of exactly
    /// [`Self::COORDINATE_BYTES`] bytes each.
    ///
    /// Fails unless both coordinates are below `p` and satisfy the curve
    /// equation.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> CtOption<Self> {
        let len = Self::COORDINATE_BYTES;
        if x.len() != len || y.len() != len {
            return CtOption::new(Self::generator(), Choice::from(0));
        }

        let n = C::FIELD.size;
        let mut point = Self::zero();
        from_be_bytes(&mut point.x[..n], x);
        from_be_bytes(&mut point.y[..n], y);
        let valid = point.is_valid();
        CtOption::new(point, valid)
    }

    /// Big-endian `x` coordinate.
    pub fn x(&self) -> Vec<u8> {
        encode::<C>(&self.x)
    }

    /// Big-endian `y` coordinate.
    pub fn y(&self) -> Vec<u8> {
        encode::<C>(&self.y)
    }

    /// Big-endian `(x, y)`.
    pub fn to_coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        (self.x(), self.y())
    }

    /// `k · self`.
    pub fn mul(&self, k: &Scalar<C>) -> Self {
        let n = C::FIELD.size;
        let mut scratch = Scratch::new();
        let (r, rest) = scratch.split_at_mut(3 * n);
        let mut p = [0; 2 * MAX_LIMBS];
        self.write_plain(&mut p[..2 * n]);
        mul_a::<C>(r, k.as_limbs(), &p[..2 * n], rest);
        Self::from_projective(r, rest)
    }

    /// `k · G`.
    pub fn mul_by_generator(k: &Scalar<C>) -> Self {
        let n = C::FIELD.size;
        let mut scratch = Scratch::new();
        let (r, rest) = scratch.split_at_mut(3 * n);
        mul_g::<C>(r, k.as_limbs(), rest);
        Self::from_projective(r, rest)
    }

    /// Converts a projective point, which must not be the identity of a
    /// Weierstrass curve.
    pub(crate) fn from_projective(p: &[Limb], scratch: &mut [Limb]) -> Self {
        let n = C::FIELD.size;
        let mut xy = [0; 2 * MAX_LIMBS];
        C::PointArithmetic::to_affine(&mut xy[..2 * n], p, scratch);

        let mut point = Self::zero();
        point.x[..n].copy_from_slice(&xy[..n]);
        point.y[..n].copy_from_slice(&xy[n..2 * n]);
        point
    }

    /// Writes the plain affine `x ‖ y`.
    pub(crate) fn write_plain(&self, out: &mut [Limb]) {
        let n = C::FIELD.size;
        out[..n].copy_from_slice(&self.x[..n]);
        out[n..2 * n].copy_from_slice(&self.y[..n]);
    }

    /// The `x` coordinate as `size` limbs.
    pub(crate) fn x_limbs(&self) -> &[Limb] {
        &self.x[..C::FIELD.size]
    }

    /// The `y` coordinate as `size` limbs.
    pub(crate) fn y_limbs(&self) -> &[Limb] {
        &self.y[..C::FIELD.size]
    }

    /// Builds a point from plain coordinates, checking range and the curve
    /// equation.
    pub(crate) fn from_limbs(x: &[Limb], y: &[Limb]) -> CtOption<Self> {
        let n = C::FIELD.size;
        let mut point = Self::zero();
        point.x[..n].copy_from_slice(x);
        point.y[..n].copy_from_slice(y);
        let valid = point.is_valid();
        CtOption::new(point, valid)
    }

    fn zero() -> Self {
        Self {
            x: [0; MAX_LIMBS],
            y: [0; MAX_LIMBS],
            curve: PhantomData,
        }
    }

    fn is_valid(&self) -> Choice {
        let m = &C::FIELD;
        let n = m.size;
        let (x, y) = (&self.x[..n], &self.y[..n]);

        let mut internal = [0; 2 * MAX_LIMBS];
        let (ix, iy) = internal.split_at_mut(n);
        m.to_internal(ix, x);
        m.to_internal(&mut iy[..n], y);

        let mut scratch = [0; 8 * MAX_LIMBS];
        m.is_canonical(x)
            & m.is_canonical(y)
            & C::PointArithmetic::on_curve(ix, &iy[..n], &mut scratch)
    }
}

impl<C: WeierstrassCurve> AffinePoint<C> {
    /// Size of the uncompressed SEC1 encoding in bytes.
    pub const SEC1_BYTES: usize = 1 + 2 * C::FIELD.byte_size();

    /// Decodes an uncompressed SEC1 point `0x04 ‖ X ‖ Y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let len = Self::COORDINATE_BYTES;
        match bytes.split_first() {
            Some((&SEC1_UNCOMPRESSED, xy)) if xy.len() == 2 * len => {
                let (x, y) = xy.split_at(len);
                Option::from(Self::from_coordinates(x, y)).ok_or(Error)
            }
            _ => Err(Error),
        }
    }

    /// Encodes the point as uncompressed SEC1 `0x04 ‖ X ‖ Y`.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SEC1_BYTES);
        out.push(SEC1_UNCOMPRESSED);
        out.extend_from_slice(&self.x());
        out.extend_from_slice(&self.y());
        out
    }
}

impl<C: Curve> ConditionallySelectable for AffinePoint<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut point = *a;
        primemod::ct::cnd_copy(choice, &mut point.x, &b.x);
        primemod::ct::cnd_copy(choice, &mut point.y, &b.y);
        point
    }
}

impl<C: Curve> ConstantTimeEq for AffinePoint<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs_eq(&self.x, &other.x) & limbs_eq(&self.y, &other.y)
    }
}

impl<C: Curve> PartialEq for AffinePoint<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Curve> Eq for AffinePoint<C> {}

fn encode<C: Curve>(coordinate: &[Limb]) -> Vec<u8> {
    let mut out = alloc::vec![0; C::FIELD.byte_size()];
    to_be_bytes(&mut out, &coordinate[..C::FIELD.size]);
    out
}
