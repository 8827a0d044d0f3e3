//! Ed25519 known-answer tests from RFC 8032 § 7.1.

use ecc::{
    Curve25519,
    ed25519::{self, SIGNATURE_LENGTH, SigningKey, VerifyingKey},
    eddsa,
};
use hex_literal::hex;
use proptest::prelude::*;
use sha2::Sha512;

struct TestVector {
    seed: [u8; 32],
    public: [u8; 32],
    msg: &'static [u8],
    sig: [u8; 64],
}

const VECTORS: &[TestVector] = &[
    TestVector {
        seed: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        public: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        msg: b"",
        sig: hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    },
    TestVector {
        seed: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        public: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        msg: &hex!("72"),
        sig: hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    },
    TestVector {
        seed: hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
        public: hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        msg: &hex!("af82"),
        sig: hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        ),
    },
];

#[test]
fn rfc8032_vectors() {
    for v in VECTORS {
        assert_eq!(ed25519::public_key(&v.seed), v.public);
        assert_eq!(ed25519::sign(&v.seed, v.msg), v.sig);
        assert!(ed25519::verify(&v.public, v.msg, &v.sig).is_ok());

        let key = SigningKey::from_bytes(&v.seed);
        assert_eq!(key.verifying_key().to_bytes(), v.public);
        assert_eq!(key.sign(v.msg), v.sig);
    }
}

#[test]
fn generic_eddsa_matches() {
    for v in VECTORS {
        let expanded = eddsa::expand_key::<Curve25519, Sha512>(&v.seed);
        assert_eq!(expanded.public_key(), v.public);
        assert_eq!(eddsa::sign::<Curve25519, Sha512>(&expanded, &v.public, v.msg), v.sig);
        assert!(eddsa::verify::<Curve25519, Sha512>(&v.public, v.msg, &v.sig).is_ok());
    }
}

#[test]
fn rejects_tampering() {
    for v in VECTORS {
        let mut msg = v.msg.to_vec();
        msg.push(0);
        assert!(ed25519::verify(&v.public, &msg, &v.sig).is_err());

        for i in [0, 31, 32, 63] {
            let mut sig = v.sig;
            sig[i] ^= 0x01;
            assert!(ed25519::verify(&v.public, v.msg, &sig).is_err());
        }
    }

    // A signature from one key must not verify under another.
    let (a, b) = (&VECTORS[1], &VECTORS[2]);
    assert!(ed25519::verify(&b.public, a.msg, &a.sig).is_err());
}

#[test]
fn rejects_invalid_public_key() {
    // y = 2 has no matching x.
    let mut bad = [0; 32];
    bad[0] = 2;
    assert!(VerifyingKey::from_bytes(&bad).is_err());
    assert!(ed25519::verify(&bad, b"", &VECTORS[0].sig).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_verify(
        seed in any::<[u8; 32]>(),
        msg in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let key = SigningKey::from_bytes(&seed);
        let sig: [u8; SIGNATURE_LENGTH] = key.sign(&msg);
        prop_assert!(key.verifying_key().verify(&msg, &sig).is_ok());

        let vk = VerifyingKey::from_bytes(&key.verifying_key().to_bytes()).unwrap();
        prop_assert_eq!(&vk, key.verifying_key());
    }
}
