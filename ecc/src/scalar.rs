//! Secret scalars modulo the group order.

use crate::Curve;
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use primemod::{
    Limb, MAX_LIMBS,
    limb::{self, LIMB_BITS},
};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq, CtOption};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Largest encoded scalar, in bytes.
const MAX_BYTES: usize = MAX_LIMBS * LIMB_BITS / 8;

/// Integer in `[1, q)`, where `q` is the order of the curve's generator.
///
/// The value is wiped when dropped and never printed.
pub struct Scalar<C: Curve> {
    limbs: [Limb; MAX_LIMBS],
    curve: PhantomData<C>,
}

impl<C: Curve> Scalar<C> {
    /// Size of the big-endian encoding in bytes.
    pub const BYTES: usize = C::ORDER.byte_size();

    /// Decodes a big-endian integer of exactly [`Self::BYTES`] bytes,
    /// which must lie in `[1, q)`.
    pub fn from_be_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != Self::BYTES {
            return CtOption::new(Self::zero(), Choice::from(0));
        }

        let mut scalar = Self::zero();
        limb::from_be_bytes(&mut scalar.limbs[..C::ORDER.size], bytes);
        let valid = scalar.is_in_range();
        CtOption::new(scalar, valid)
    }

    /// Encodes the scalar as [`Self::BYTES`] big-endian bytes.
    pub fn to_be_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(alloc::vec![0; Self::BYTES]);
        limb::to_be_bytes(&mut out, self.as_limbs());
        out
    }

    /// Draws a uniformly random scalar.
    ///
    /// Candidates are masked to the bit length of `q` and rejected until one
    /// falls in `[1, q)`, so fewer than two draws are expected.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let len = Self::BYTES;
        let excess = 8 * len - C::ORDER.bit_size;
        let mut buf = Zeroizing::new([0u8; MAX_BYTES]);

        loop {
            rng.fill_bytes(&mut buf[..len]);
            buf[0] &= 0xff >> excess;

            let mut scalar = Self::zero();
            limb::from_be_bytes(&mut scalar.limbs[..C::ORDER.size], &buf[..len]);
            if bool::from(scalar.is_in_range()) {
                return scalar;
            }
        }
    }

    /// Builds a scalar from `size` little-endian limbs already known to be
    /// reduced, returning `None` for zero or out-of-range values.
    pub(crate) fn from_limbs(limbs: &[Limb]) -> CtOption<Self> {
        let mut scalar = Self::zero();
        scalar.limbs[..C::ORDER.size].copy_from_slice(limbs);
        let valid = scalar.is_in_range();
        CtOption::new(scalar, valid)
    }

    /// The value as `size` little-endian limbs.
    pub(crate) fn as_limbs(&self) -> &[Limb] {
        &self.limbs[..C::ORDER.size]
    }

    fn zero() -> Self {
        Self {
            limbs: [0; MAX_LIMBS],
            curve: PhantomData,
        }
    }

    fn is_in_range(&self) -> Choice {
        let q = &C::ORDER;
        q.is_canonical(self.as_limbs()) & !primemod::ct::is_zero(self.as_limbs())
    }
}

impl<C: Curve> Clone for Scalar<C> {
    fn clone(&self) -> Self {
        Self {
            limbs: self.limbs,
            curve: PhantomData,
        }
    }
}

impl<C: Curve> ConstantTimeEq for Scalar<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        primemod::ct::limbs_eq(&self.limbs, &other.limbs)
    }
}

impl<C: Curve> PartialEq for Scalar<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: Curve> Eq for Scalar<C> {}

impl<C: Curve> fmt::Debug for Scalar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar").finish_non_exhaustive()
    }
}

impl<C: Curve> Zeroize for Scalar<C> {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

impl<C: Curve> Drop for Scalar<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: Curve> ZeroizeOnDrop for Scalar<C> {}
