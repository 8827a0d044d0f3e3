//! Edwards-curve Digital Signature Algorithm (EdDSA) as specified in
//! [RFC 8032], generic over the curve and over a hash with 64-byte output.
//!
//! Points are encoded as the little-endian `y` coordinate with the parity of
//! `x` in the top bit. Signatures are `R ‖ s`, with `s` little-endian.
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

use crate::{
    AffinePoint, EdwardsCurve, Error, Result,
    point_arithmetic::PointArithmetic,
    scalar_mul::{Scratch, mul_a, mul_g},
};
use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};
use primemod::{
    Limb, MAX_LIMBS,
    limb::{self, carve},
};
use sha2::digest::{Digest, consts::U64};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the hash output.
const HASH_BYTES: usize = 64;

/// Size of the nonce prefix: the high half of the expanded seed.
pub const PREFIX_BYTES: usize = HASH_BYTES / 2;

/// Secret key material derived from a seed: the clamped scalar `k2` and the
/// nonce prefix.
pub struct ExpandedSecretKey<C: EdwardsCurve> {
    k2: [Limb; MAX_LIMBS],
    prefix: [u8; PREFIX_BYTES],
    curve: PhantomData<C>,
}

impl<C: EdwardsCurve> ExpandedSecretKey<C> {
    /// The public point `k2 G`.
    pub fn public_point(&self) -> AffinePoint<C> {
        let n = C::FIELD.size;
        let mut scratch = Scratch::new();
        let (point, rest) = scratch.split_at_mut(3 * n);
        mul_g::<C>(point, &self.k2[..n], rest);
        AffinePoint::from_projective(point, rest)
    }

    /// The encoded public key `compress(k2 G)`.
    pub fn public_key(&self) -> Vec<u8> {
        compress(&self.public_point())
    }
}

impl<C: EdwardsCurve> fmt::Debug for ExpandedSecretKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandedSecretKey").finish_non_exhaustive()
    }
}

impl<C: EdwardsCurve> Zeroize for ExpandedSecretKey<C> {
    fn zeroize(&mut self) {
        self.k2.zeroize();
        self.prefix.zeroize();
    }
}

impl<C: EdwardsCurve> Drop for ExpandedSecretKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: EdwardsCurve> ZeroizeOnDrop for ExpandedSecretKey<C> {}

/// Size of an encoded point, and of each half of a signature.
pub const fn encoded_len<C: EdwardsCurve>() -> usize {
    C::FIELD.byte_size()
}

/// Hashes `seed` and splits the digest into the clamped scalar and the
/// prefix.
///
/// Clamping clears the three low bits and every bit from `bits(p)` up, then
/// sets bit `bits(p) - 1`.
pub fn expand_key<C: EdwardsCurve, D: Digest<OutputSize = U64>>(
    seed: &[u8],
) -> ExpandedSecretKey<C> {
    let m = &C::FIELD;
    let n = m.size;
    let mut h = D::digest(seed);
    let (low, high) = h.split_at(HASH_BYTES / 2);

    let mut key = ExpandedSecretKey {
        k2: [0; MAX_LIMBS],
        prefix: [0; PREFIX_BYTES],
        curve: PhantomData,
    };
    limb::from_le_bytes(&mut key.k2[..n], &low[..m.byte_size()]);
    key.prefix.copy_from_slice(high);

    let top = m.bit_size - 1;
    key.k2[0] &= !7;
    key.k2[top / 64] &= (1 << (top % 64)) - 1;
    key.k2[top / 64] |= 1 << (top % 64);

    h.as_mut_slice().zeroize();
    key
}

/// Signs `msg`. `public` must be the encoding of `expanded`'s public key.
pub fn sign<C: EdwardsCurve, D: Digest<OutputSize = U64>>(
    expanded: &ExpandedSecretKey<C>,
    public: &[u8],
    msg: &[u8],
) -> Vec<u8> {
    let q = &C::ORDER;
    let n = q.size;
    let mut scratch = Scratch::new();
    let ([r, h, s], rest) = carve::<3>(&mut scratch, n);

    // r = H(prefix ‖ msg) mod q
    let mut hash = D::new().chain_update(expanded.prefix).chain_update(msg).finalize();
    hash_to_scalar::<C>(r, &hash, rest);
    hash.as_mut_slice().zeroize();

    // R = compress(r G)
    let (point, rest) = rest.split_at_mut(3 * n);
    mul_g::<C>(point, r, rest);
    let mut sig = compress(&AffinePoint::<C>::from_projective(point, rest));

    // h = H(R ‖ A ‖ msg) mod q
    let hash = D::new()
        .chain_update(&sig)
        .chain_update(public)
        .chain_update(msg)
        .finalize();
    hash_to_scalar::<C>(h, &hash, rest);

    // s = r + h k2 mod q
    q.mul(s, h, &expanded.k2[..n], rest);
    q.add_assign(s, r);
    q.canonical(s);

    let start = sig.len();
    sig.resize(2 * start, 0);
    limb::to_le_bytes(&mut sig[start..], s);
    sig
}

/// Verifies `sig` over `msg` against the encoded public key `public`.
///
/// Accepts iff `h A + R = s G`, compared projectively.
pub fn verify<C: EdwardsCurve, D: Digest<OutputSize = U64>>(
    public: &[u8],
    msg: &[u8],
    sig: &[u8],
) -> Result<()> {
    let len = encoded_len::<C>();
    if sig.len() != 2 * len {
        return Err(Error);
    }
    let (r_bytes, s_bytes) = sig.split_at(len);
    let a = decompress::<C>(public)?;
    let r_point = decompress::<C>(r_bytes)?;

    let q = &C::ORDER;
    let n = q.size;
    let mut s = [0; MAX_LIMBS];
    limb::from_le_bytes(&mut s[..n], s_bytes);
    if !bool::from(q.is_canonical(&s[..n])) {
        return Err(Error);
    }

    let mut scratch = Scratch::new();
    let ([h], rest) = carve::<1>(&mut scratch, n);
    let ([lhs, rhs, tmp], rest) = carve::<3>(rest, 3 * n);

    let hash = D::new()
        .chain_update(r_bytes)
        .chain_update(public)
        .chain_update(msg)
        .finalize();
    hash_to_scalar::<C>(h, &hash, rest);

    // h A + R
    let mut plain = [0; 2 * MAX_LIMBS];
    a.write_plain(&mut plain[..2 * n]);
    mul_a::<C>(tmp, h, &plain[..2 * n], rest);
    r_point.write_plain(&mut plain[..2 * n]);
    <C::PointArithmetic as PointArithmetic<C>>::from_affine(rhs, &plain[..2 * n]);
    <C::PointArithmetic as PointArithmetic<C>>::add(lhs, tmp, rhs, rest);

    // s G
    mul_g::<C>(rhs, &s[..n], rest);

    if bool::from(<C::PointArithmetic as PointArithmetic<C>>::eq_projective(lhs, rhs, rest)) {
        Ok(())
    } else {
        Err(Error)
    }
}

/// Encodes a point as little-endian `y` with the parity of `x` in the top
/// bit.
pub fn compress<C: EdwardsCurve>(point: &AffinePoint<C>) -> Vec<u8> {
    let mut out = alloc::vec![0; encoded_len::<C>()];
    limb::to_le_bytes(&mut out, point.y_limbs());
    let last = out.len() - 1;
    out[last] |= ((point.x_limbs()[0] & 1) as u8) << 7;
    out
}

/// Decodes a point, rejecting non-canonical `y`, `y` values with no
/// matching `x`, and the negative zero `x`.
pub fn decompress<C: EdwardsCurve>(bytes: &[u8]) -> Result<AffinePoint<C>> {
    let m = &C::FIELD;
    let n = m.size;
    let len = encoded_len::<C>();
    if bytes.len() != len {
        return Err(Error);
    }

    let mut buf = [0; MAX_LIMBS * 8];
    buf[..len].copy_from_slice(bytes);
    let sign = Limb::from(buf[len - 1] >> 7);
    buf[len - 1] &= 0x7f;

    let mut y = [0; MAX_LIMBS];
    limb::from_le_bytes(&mut y[..n], &buf[..len]);
    if !bool::from(m.is_canonical(&y[..n])) {
        return Err(Error);
    }

    // x² = (y² - 1) / (d y² + 1)
    let mut scratch = [0; 16 * MAX_LIMBS];
    let ([iy, u, v, x], rest) = carve::<4>(&mut scratch, n);
    m.to_internal(iy, &y[..n]);
    m.sqr(u, iy, rest);
    m.mul(v, u, C::EQUATION_B, rest);
    m.unit(x);
    m.sub_assign(u, x);
    m.add_assign(v, x);
    if !bool::from(m.sqrt_ratio(iy, u, v, rest)) {
        return Err(Error);
    }
    m.from_internal(x, iy);
    m.canonical(x);

    if bool::from(primemod::ct::is_zero(x)) {
        if sign == 1 {
            return Err(Error);
        }
    } else if x[0] & 1 != sign {
        u.fill(0);
        m.sub(iy, u, x);
        x.copy_from_slice(iy);
        m.canonical(x);
    }

    Option::from(AffinePoint::from_limbs(x, &y[..n])).ok_or(Error)
}

/// Reduces a little-endian hash modulo `q`.
fn hash_to_scalar<C: EdwardsCurve>(rp: &mut [Limb], hash: &[u8], scratch: &mut [Limb]) {
    let q = &C::ORDER;
    debug_assert_eq!(hash.len(), 2 * q.size * 8);
    let wide = &mut scratch[..2 * q.size];
    limb::from_le_bytes(wide, hash);
    q.reduce(rp, wide);
    q.canonical(rp);
    wide.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve25519;
    use hex_literal::hex;
    use sha2::Sha512;

    #[test]
    fn clamping() {
        let key = expand_key::<Curve25519, Sha512>(&[0; 32]);
        assert_eq!(key.k2[0] & 7, 0);
        assert_eq!(key.k2[3] >> 62, 1);
    }

    #[test]
    fn basepoint_encoding() {
        // The generator encodes as y = 4/5 with an even x.
        assert_eq!(
            compress(&AffinePoint::<Curve25519>::generator()),
            hex!("5866666666666666666666666666666666666666666666666666666666666666")
        );
        let g = decompress::<Curve25519>(&hex!(
            "5866666666666666666666666666666666666666666666666666666666666666"
        ))
        .unwrap();
        assert_eq!(g, AffinePoint::generator());
    }

    #[test]
    fn decompress_rejections() {
        // y = p is not canonical.
        let p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(decompress::<Curve25519>(&p).is_err());

        // y = 1 gives x = 0, which must not carry the sign bit.
        let mut one = [0; 32];
        one[0] = 1;
        assert!(decompress::<Curve25519>(&one).is_ok());
        one[31] |= 0x80;
        assert!(decompress::<Curve25519>(&one).is_err());

        // y = 2 has no matching x.
        let mut two = [0; 32];
        two[0] = 2;
        assert!(decompress::<Curve25519>(&two).is_err());

        assert!(decompress::<Curve25519>(&[0; 31]).is_err());
    }

    #[test]
    fn verify_rejects_non_canonical_s() {
        let seed = [7; 32];
        let key = expand_key::<Curve25519, Sha512>(&seed);
        let public = key.public_key();
        let mut sig = sign::<Curve25519, Sha512>(&key, &public, b"msg");
        assert!(verify::<Curve25519, Sha512>(&public, b"msg", &sig).is_ok());

        // s + q encodes the same residue but must be rejected.
        let q = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
        let mut carry = 0u16;
        for (b, &qb) in sig[32..].iter_mut().zip(&q) {
            let t = u16::from(*b) + u16::from(qb) + carry;
            *b = t as u8;
            carry = t >> 8;
        }
        if carry == 0 {
            assert!(verify::<Curve25519, Sha512>(&public, b"msg", &sig).is_err());
        }
    }
}
