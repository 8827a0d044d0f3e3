//! Elliptic Curve Digital Signature Algorithm (ECDSA) as specified in
//! [FIPS 186-4][1] (Digital Signature Standard).
//!
//! Signing takes a prehashed message. Nonces are drawn from a caller-supplied
//! CSPRNG; deterministic RFC 6979 nonces are left to higher layers, which can
//! pass their own nonce to [`sign_prehashed`].
//!
//! [1]: https://csrc.nist.gov/publications/detail/fips/186/4/final

use crate::{
    AffinePoint, Error, Result, Scalar, WeierstrassCurve,
    point_arithmetic::PointArithmetic,
    scalar_mul::{Scratch, mul_a, mul_g},
};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use primemod::{
    Limb, MAX_LIMBS,
    limb::{self, carve},
};
use rand_core::CryptoRngCore;
use sha2::digest::Digest;
use zeroize::Zeroizing;

/// ECDSA signature `(r, s)`, both in `[1, q)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature<C: WeierstrassCurve> {
    r: [Limb; MAX_LIMBS],
    s: [Limb; MAX_LIMBS],
    curve: PhantomData<C>,
}

impl<C: WeierstrassCurve> Signature<C> {
    /// Size of the fixed-width `r ‖ s` encoding in bytes.
    pub const BYTES: usize = 2 * C::ORDER.byte_size();

    /// Parses the fixed-width big-endian encoding `r ‖ s`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error);
        }

        let (r, s) = bytes.split_at(Self::BYTES / 2);
        let n = C::ORDER.size;
        let mut sig = Self::zero();
        limb::from_be_bytes(&mut sig.r[..n], r);
        limb::from_be_bytes(&mut sig.s[..n], s);

        if sig.is_in_range() {
            Ok(sig)
        } else {
            Err(Error)
        }
    }

    /// Serializes as fixed-width big-endian `r ‖ s`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.r();
        out.extend_from_slice(&self.s());
        out
    }

    /// Big-endian `r` component.
    pub fn r(&self) -> Vec<u8> {
        encode::<C>(&self.r)
    }

    /// Big-endian `s` component.
    pub fn s(&self) -> Vec<u8> {
        encode::<C>(&self.s)
    }

    fn zero() -> Self {
        Self {
            r: [0; MAX_LIMBS],
            s: [0; MAX_LIMBS],
            curve: PhantomData,
        }
    }

    fn is_in_range(&self) -> bool {
        let q = &C::ORDER;
        let n = q.size;
        [&self.r[..n], &self.s[..n]]
            .into_iter()
            .all(|x| bool::from(q.is_canonical(x) & !primemod::ct::is_zero(x)))
    }
}

/// Converts a message digest into an integer modulo `q`: its leftmost
/// `bits(q)` bits, as `size` little-endian limbs.
///
/// The result is below `2^bits(q)` but may exceed `q`.
pub(crate) fn hash_to_residue<C: WeierstrassCurve>(rp: &mut [Limb], digest: &[u8]) {
    let q = &C::ORDER;
    let len = digest.len().min(q.byte_size());
    limb::from_be_bytes(&mut rp[..q.size], &digest[..len]);

    for _ in q.bit_size..8 * len {
        limb::rshift1_assign(&mut rp[..q.size]);
    }
}

/// Signs `digest` with secret key `z` and nonce `k`.
///
/// Returns `None` when `r` or `s` comes out zero; callers retry with a fresh
/// nonce.
pub fn sign_prehashed<C: WeierstrassCurve>(
    z: &Scalar<C>,
    k: &Scalar<C>,
    digest: &[u8],
) -> Option<Signature<C>> {
    let q = &C::ORDER;
    let n = q.size;
    let mut scratch = Scratch::new();
    let (point, rest) = scratch.split_at_mut(3 * n);

    let mut sig = Signature::<C>::zero();

    // r = x(k G) mod q
    mul_g::<C>(point, k.as_limbs(), rest);
    <C::PointArithmetic as PointArithmetic<C>>::x_mod_order(&mut sig.r[..n], point, rest);
    if bool::from(primemod::ct::is_zero(&sig.r[..n])) {
        return None;
    }

    // s = k^-1 (h + z r)
    let ([h, t, kinv], tp) = carve::<3>(rest, n);
    hash_to_residue::<C>(h, digest);
    q.mul(t, z.as_limbs(), &sig.r[..n], tp);
    q.add_assign(t, h);
    q.invert(kinv, k.as_limbs(), tp);
    q.mul(&mut sig.s[..n], kinv, t, tp);
    q.canonical(&mut sig.s[..n]);

    if bool::from(primemod::ct::is_zero(&sig.s[..n])) {
        return None;
    }
    Some(sig)
}

/// Signs `digest` with secret key `z`, drawing nonces from `rng`.
pub fn sign_prehash<C: WeierstrassCurve>(
    z: &Scalar<C>,
    rng: &mut impl CryptoRngCore,
    digest: &[u8],
) -> Signature<C> {
    loop {
        let k = Scalar::<C>::random(rng);
        if let Some(sig) = sign_prehashed(z, &k, digest) {
            return sig;
        }
    }
}

/// Verifies `sig` over `digest` against public key `y`.
///
/// The two products are combined with
/// [`add_vartime`](PointArithmetic::add_vartime) rather than the incomplete
/// constant-time addition. When `u1 G = u2 Y` the sum is a doubling and when
/// `u1 G = -u2 Y` it is the identity, which then fails the `x = r` check.
/// All inputs are public, so branching on these cases leaks nothing.
pub fn verify_prehash<C: WeierstrassCurve>(
    y: &AffinePoint<C>,
    digest: &[u8],
    sig: &Signature<C>,
) -> Result<()> {
    if !sig.is_in_range() {
        return Err(Error);
    }

    let q = &C::ORDER;
    let n = q.size;
    let (r, s) = (&sig.r[..n], &sig.s[..n]);
    let mut tp = [0; 3 * MAX_LIMBS];
    let mut w = [0; MAX_LIMBS];
    let mut h = [0; MAX_LIMBS];
    let mut u1 = [0; MAX_LIMBS];
    let mut u2 = [0; MAX_LIMBS];

    // w = s^-1, u1 = h w, u2 = r w
    q.invert(&mut w[..n], s, &mut tp);
    hash_to_residue::<C>(&mut h, digest);
    q.mul(&mut u1[..n], &h[..n], &w[..n], &mut tp);
    q.canonical(&mut u1[..n]);
    q.mul(&mut u2[..n], r, &w[..n], &mut tp);
    q.canonical(&mut u2[..n]);

    let mut scratch = Scratch::new();
    let (sum, rest) = scratch.split_at_mut(3 * n);

    // u2 Y
    let mut y_plain = [0; 2 * MAX_LIMBS];
    y.write_plain(&mut y_plain[..2 * n]);
    mul_a::<C>(sum, &u2[..n], &y_plain[..2 * n], rest);

    // + u1 G, unless u1 = 0
    if !bool::from(primemod::ct::is_zero(&u1[..n])) {
        let ([p1, p2], rest) = carve::<2>(rest, 3 * n);
        mul_g::<C>(p1, &u1[..n], rest);
        p2.copy_from_slice(sum);
        <C::PointArithmetic as PointArithmetic<C>>::add_vartime(sum, p1, p2, rest);
    }

    // The identity maps to x = 0, which never equals r.
    let mut x = [0; MAX_LIMBS];
    <C::PointArithmetic as PointArithmetic<C>>::x_mod_order(&mut x[..n], sum, rest);
    if x[..n] == *r { Ok(()) } else { Err(Error) }
}

/// ECDSA signing key.
pub struct SigningKey<C: WeierstrassCurve> {
    secret: Scalar<C>,
    verifying_key: VerifyingKey<C>,
}

impl<C: WeierstrassCurve> SigningKey<C> {
    /// Generates a random signing key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self::from_scalar(Scalar::random(rng))
    }

    /// Decodes a big-endian secret scalar in `[1, q)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Option::<Scalar<C>>::from(Scalar::from_be_bytes(bytes))
            .map(Self::from_scalar)
            .ok_or(Error)
    }

    /// Wraps a secret scalar.
    pub fn from_scalar(secret: Scalar<C>) -> Self {
        let verifying_key = VerifyingKey {
            point: AffinePoint::mul_by_generator(&secret),
        };
        Self {
            secret,
            verifying_key,
        }
    }

    /// Encodes the secret scalar as big-endian bytes.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.secret.to_be_bytes()
    }

    /// The secret scalar.
    pub fn as_scalar(&self) -> &Scalar<C> {
        &self.secret
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<C> {
        &self.verifying_key
    }

    /// Signs a message digest with a nonce drawn from `rng`.
    pub fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> Signature<C> {
        sign_prehash(&self.secret, rng, prehash)
    }

    /// Hashes `msg` with `D`, then signs the digest.
    pub fn sign_digest_with_rng<D: Digest>(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Signature<C> {
        self.sign_prehash_with_rng(rng, &D::digest(msg))
    }
}

impl<C: WeierstrassCurve> fmt::Debug for SigningKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// ECDSA verifying key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey<C: WeierstrassCurve> {
    point: AffinePoint<C>,
}

impl<C: WeierstrassCurve> VerifyingKey<C> {
    /// Wraps a public point.
    pub fn from_affine(point: AffinePoint<C>) -> Self {
        Self { point }
    }

    /// Decodes an uncompressed SEC1 public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        AffinePoint::from_sec1_bytes(bytes).map(Self::from_affine)
    }

    /// Encodes the key as uncompressed SEC1.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.point.to_sec1_bytes()
    }

    /// The public point.
    pub fn as_affine(&self) -> &AffinePoint<C> {
        &self.point
    }

    /// Verifies a signature over a message digest.
    pub fn verify_prehash(&self, prehash: &[u8], sig: &Signature<C>) -> Result<()> {
        verify_prehash(&self.point, prehash, sig)
    }

    /// Hashes `msg` with `D`, then verifies the signature over the digest.
    pub fn verify_digest<D: Digest>(&self, msg: &[u8], sig: &Signature<C>) -> Result<()> {
        self.verify_prehash(&D::digest(msg), sig)
    }
}

fn encode<C: WeierstrassCurve>(x: &[Limb]) -> Vec<u8> {
    let q = &C::ORDER;
    let mut out = alloc::vec![0; q.byte_size()];
    limb::to_be_bytes(&mut out, &x[..q.size]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NistP192, NistP224, NistP256, NistP384, NistP521};
    use hex_literal::hex;
    use proptest::prelude::*;
    use rand_core::OsRng;
    use sha2::{Sha256, Sha384, Sha512};

    #[test]
    fn hash_truncation() {
        // P-521: a 64-byte digest is shorter than q and is taken whole.
        let digest = [0xff; 64];
        let mut h = [0; MAX_LIMBS];
        hash_to_residue::<NistP521>(&mut h, &digest);
        assert_eq!(&h[..8], &[Limb::MAX; 8]);
        assert_eq!(h[8], 0);

        // P-192: a 32-byte digest keeps its leftmost 192 bits.
        let digest: [u8; 32] = core::array::from_fn(|i| i as u8);
        let mut h = [0; MAX_LIMBS];
        hash_to_residue::<NistP192>(&mut h, &digest);
        let mut want = [0; 3];
        limb::from_be_bytes(&mut want, &digest[..24]);
        assert_eq!(&h[..3], &want);
    }

    #[test]
    fn hash_truncation_shifts_odd_sizes() {
        // A 66-byte digest for P-521 drops the 7 surplus bits.
        let mut digest = [0; 66];
        digest[0] = 0x80;
        let mut h = [0; MAX_LIMBS];
        hash_to_residue::<NistP521>(&mut h, &digest);
        assert_eq!(h[8], 1 << 8);
    }

    #[test]
    fn rfc6979_p256_sample() {
        // RFC 6979 § A.2.5, SHA-256, message "sample".
        let z = Scalar::<NistP256>::from_be_bytes(&hex!(
            "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721"
        ))
        .unwrap();
        let k = Scalar::<NistP256>::from_be_bytes(&hex!(
            "a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60"
        ))
        .unwrap();

        let sig = sign_prehashed(&z, &k, &Sha256::digest(b"sample")).unwrap();
        assert_eq!(
            sig.to_bytes(),
            hex!(
                "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716"
                "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8"
            )
        );

        let key = SigningKey::from_scalar(z);
        assert_eq!(
            key.verifying_key().to_sec1_bytes(),
            hex!(
                "04"
                "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6"
                "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299"
            )
        );
        assert!(key.verifying_key().verify_digest::<Sha256>(b"sample", &sig).is_ok());
        assert!(key.verifying_key().verify_digest::<Sha256>(b"test", &sig).is_err());
    }

    #[test]
    fn verify_when_both_products_coincide() {
        // Y = G and h = r make u1 = u2, so the final addition doubles.
        let one = Scalar::<NistP256>::from_be_bytes(&{
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        })
        .unwrap();
        let k = Scalar::<NistP256>::from_be_bytes(&{
            let mut b = [0u8; 32];
            b[31] = 2;
            b
        })
        .unwrap();
        let digest = AffinePoint::mul_by_generator(&k).x();
        let sig = sign_prehashed(&one, &k, &digest).unwrap();
        assert_eq!(&sig.to_bytes()[..32], &digest[..]);

        let g = AffinePoint::<NistP256>::generator();
        assert!(verify_prehash(&g, &digest, &sig).is_ok());

        let mut other = digest.clone();
        other[31] ^= 1;
        assert!(verify_prehash(&g, &other, &sig).is_err());
    }

    #[test]
    fn signature_range_checks() {
        let q = hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
        let one = {
            let mut b = [0; 32];
            b[31] = 1;
            b
        };
        let zero = [0; 32];

        let parse = |r: &[u8], s: &[u8]| {
            let mut bytes = r.to_vec();
            bytes.extend_from_slice(s);
            Signature::<NistP256>::from_slice(&bytes)
        };
        assert!(parse(&one, &one).is_ok());
        assert!(parse(&zero, &one).is_err());
        assert!(parse(&one, &zero).is_err());
        assert!(parse(&q, &one).is_err());
        assert!(parse(&one, &q).is_err());
        assert!(Signature::<NistP256>::from_slice(&[1; 63]).is_err());
    }

    fn check_round_trip<C: WeierstrassCurve, D: Digest>() {
        let key = SigningKey::<C>::random(&mut OsRng);
        let sig = key.sign_digest_with_rng::<D>(&mut OsRng, b"round trip");
        let vk = key.verifying_key();
        assert!(vk.verify_digest::<D>(b"round trip", &sig).is_ok());
        assert!(vk.verify_digest::<D>(b"round trap", &sig).is_err());

        let parsed = Signature::<C>::from_slice(&sig.to_bytes()).unwrap();
        assert_eq!(parsed, sig);

        let other = SigningKey::<C>::random(&mut OsRng);
        assert!(other.verifying_key().verify_digest::<D>(b"round trip", &sig).is_err());

        let restored = SigningKey::<C>::from_bytes(&key.to_bytes()).unwrap();
        assert_eq!(restored.verifying_key(), vk);
    }

    #[test]
    fn round_trip_every_curve() {
        check_round_trip::<NistP192, Sha256>();
        check_round_trip::<NistP224, Sha256>();
        check_round_trip::<NistP256, Sha256>();
        check_round_trip::<NistP384, Sha384>();
        check_round_trip::<NistP521, Sha512>();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn bit_flips_are_rejected(byte in 0usize..64, bit in 0u8..8) {
            let key = SigningKey::<NistP256>::random(&mut OsRng);
            let digest = Sha256::digest(b"bit flips");
            let sig = key.sign_prehash_with_rng(&mut OsRng, &digest);

            let mut bytes = sig.to_bytes();
            bytes[byte] ^= 1 << bit;
            if let Ok(bad) = Signature::<NistP256>::from_slice(&bytes) {
                prop_assert!(key.verifying_key().verify_prehash(&digest, &bad).is_err());
            }

            let mut digest = digest;
            digest[byte % 32] ^= 1 << bit;
            prop_assert!(key.verifying_key().verify_prehash(&digest, &sig).is_err());
        }
    }
}
