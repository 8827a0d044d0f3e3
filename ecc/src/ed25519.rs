//! Ed25519: EdDSA over Curve25519 with SHA-512, as specified in
//! [RFC 8032] § 5.1.
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

use crate::{AffinePoint, Curve25519, Result, eddsa};
use core::fmt;
use rand_core::CryptoRngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Size of a secret seed in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Size of an encoded public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Size of a signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Derives the public key of `seed`.
pub fn public_key(seed: &[u8; SECRET_KEY_LENGTH]) -> [u8; PUBLIC_KEY_LENGTH] {
    let expanded = eddsa::expand_key::<Curve25519, Sha512>(seed);
    to_array(&expanded.public_key())
}

/// Signs `msg` with `seed`.
pub fn sign(seed: &[u8; SECRET_KEY_LENGTH], msg: &[u8]) -> [u8; SIGNATURE_LENGTH] {
    SigningKey::from_bytes(seed).sign(msg)
}

/// Verifies `sig` over `msg` against the encoded public key.
pub fn verify(
    public: &[u8; PUBLIC_KEY_LENGTH],
    msg: &[u8],
    sig: &[u8; SIGNATURE_LENGTH],
) -> Result<()> {
    eddsa::verify::<Curve25519, Sha512>(public, msg, sig)
}

/// Ed25519 signing key: the seed and its expansion.
pub struct SigningKey {
    seed: Zeroizing<[u8; SECRET_KEY_LENGTH]>,
    expanded: eddsa::ExpandedSecretKey<Curve25519>,
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Builds a signing key from its 32-byte seed.
    pub fn from_bytes(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let expanded = eddsa::expand_key::<Curve25519, Sha512>(seed);
        let point = expanded.public_point();
        let verifying_key = VerifyingKey {
            bytes: to_array(&eddsa::compress(&point)),
            point,
        };
        Self {
            seed: Zeroizing::new(*seed),
            expanded,
            verifying_key,
        }
    }

    /// Generates a signing key from a random seed.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        let mut seed = Zeroizing::new([0; SECRET_KEY_LENGTH]);
        rng.fill_bytes(&mut seed[..]);
        Self::from_bytes(&seed)
    }

    /// The seed.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        self.seed.clone()
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Signs `msg`.
    pub fn sign(&self, msg: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let sig = eddsa::sign::<Curve25519, Sha512>(&self.expanded, &self.verifying_key.bytes, msg);
        to_array(&sig)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
    point: AffinePoint<Curve25519>,
}

impl VerifyingKey {
    /// Decodes a public key, checking that it encodes a curve point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        let point = eddsa::decompress(bytes)?;
        Ok(Self {
            bytes: *bytes,
            point,
        })
    }

    /// The encoded key.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.bytes
    }

    /// The decoded public point.
    pub fn as_affine(&self) -> &AffinePoint<Curve25519> {
        &self.point
    }

    /// Verifies `sig` over `msg`.
    pub fn verify(&self, msg: &[u8], sig: &[u8; SIGNATURE_LENGTH]) -> Result<()> {
        verify(&self.bytes, msg, sig)
    }
}

fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn rfc8032_test_1() {
        let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let public = hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        let sig = hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );

        assert_eq!(public_key(&seed), public);
        assert_eq!(sign(&seed, b""), sig);
        assert!(verify(&public, b"", &sig).is_ok());
    }

    #[test]
    fn key_wrappers() {
        let key = SigningKey::from_bytes(&[0x11; SECRET_KEY_LENGTH]);
        let vk = VerifyingKey::from_bytes(&key.verifying_key().to_bytes()).unwrap();
        assert_eq!(&vk, key.verifying_key());
        assert_eq!(*key.to_bytes(), [0x11; SECRET_KEY_LENGTH]);

        let sig = key.sign(b"wrapped");
        assert!(vk.verify(b"wrapped", &sig).is_ok());
        assert!(vk.verify(b"wrapper", &sig).is_err());
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn generated_keys_differ() {
        let a = SigningKey::generate(&mut rand_core::OsRng);
        let b = SigningKey::generate(&mut rand_core::OsRng);
        assert_ne!(a.verifying_key(), b.verifying_key());
    }
}
