//! Elliptic Curve Diffie-Hellman over the short Weierstrass curves.
//!
//! The shared secret is the big-endian `x` coordinate of `d · Q`, as in
//! SEC1 § 3.3.1. It should be fed through a KDF before use as a key.

use crate::{AffinePoint, Scalar, WeierstrassCurve};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Computes the shared secret of `secret` and the peer's `public` point.
///
/// `public` is a validated curve point and `secret` is nonzero, so the
/// product is never the identity on a prime-order group.
pub fn diffie_hellman<C: WeierstrassCurve>(
    secret: &Scalar<C>,
    public: &AffinePoint<C>,
) -> SharedSecret<C> {
    SharedSecret::new(public.mul(secret))
}

/// Single-use secret for one key agreement.
pub struct EphemeralSecret<C: WeierstrassCurve> {
    scalar: Scalar<C>,
}

impl<C: WeierstrassCurve> EphemeralSecret<C> {
    /// Draws a fresh secret.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            scalar: Scalar::random(rng),
        }
    }

    /// The public point to send to the peer.
    pub fn public_key(&self) -> AffinePoint<C> {
        AffinePoint::mul_by_generator(&self.scalar)
    }

    /// Agrees on a shared secret with the peer's public point.
    pub fn diffie_hellman(&self, public: &AffinePoint<C>) -> SharedSecret<C> {
        diffie_hellman(&self.scalar, public)
    }
}

impl<C: WeierstrassCurve> fmt::Debug for EphemeralSecret<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralSecret").finish_non_exhaustive()
    }
}

impl<C: WeierstrassCurve> ZeroizeOnDrop for EphemeralSecret<C> {}

/// Result of a key agreement.
pub struct SharedSecret<C: WeierstrassCurve> {
    x: Zeroizing<Vec<u8>>,
    curve: PhantomData<C>,
}

impl<C: WeierstrassCurve> SharedSecret<C> {
    fn new(point: AffinePoint<C>) -> Self {
        Self {
            x: Zeroizing::new(point.x()),
            curve: PhantomData,
        }
    }

    /// The big-endian `x` coordinate of the shared point.
    ///
    /// These bytes are not uniformly random and must not be used directly
    /// as a symmetric key.
    pub fn raw_secret_bytes(&self) -> &[u8] {
        &self.x
    }
}

impl<C: WeierstrassCurve> fmt::Debug for SharedSecret<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

impl<C: WeierstrassCurve> Zeroize for SharedSecret<C> {
    fn zeroize(&mut self) {
        self.x.zeroize();
    }
}

impl<C: WeierstrassCurve> ZeroizeOnDrop for SharedSecret<C> {}
