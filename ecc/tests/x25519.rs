//! X25519 known-answer tests from RFC 7748.

use ecc::x25519::{BASEPOINT, x25519, x25519_base};
use hex_literal::hex;

const ALICE_PRIVATE: [u8; 32] =
    hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
const ALICE_PUBLIC: [u8; 32] =
    hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
const BOB_PRIVATE: [u8; 32] =
    hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
const BOB_PUBLIC: [u8; 32] =
    hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
const SHARED: [u8; 32] = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

#[test]
fn diffie_hellman() {
    assert_eq!(x25519(&ALICE_PRIVATE, &BASEPOINT), ALICE_PUBLIC);
    assert_eq!(x25519(&BOB_PRIVATE, &BASEPOINT), BOB_PUBLIC);
    assert_eq!(x25519_base(&ALICE_PRIVATE), ALICE_PUBLIC);
    assert_eq!(x25519_base(&BOB_PRIVATE), BOB_PUBLIC);

    assert_eq!(x25519(&ALICE_PRIVATE, &BOB_PUBLIC), SHARED);
    assert_eq!(x25519(&BOB_PRIVATE, &ALICE_PUBLIC), SHARED);
}

#[test]
fn rfc7748_high_bit_input() {
    // The last byte of u has its top bit set, which must be masked.
    let k = hex!("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
    let u = hex!("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493");
    assert_eq!(
        x25519(&k, &u),
        hex!("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957")
    );
}
