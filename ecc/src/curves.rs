//! Supported curves.
//!
//! Each module defines the curve's marker type together with the field and
//! group-order moduli and the reductions specialized to them.

pub mod curve25519;
pub mod p192;
pub mod p224;
pub mod p256;
pub mod p384;
pub mod p521;

pub use self::{
    curve25519::Curve25519, p192::NistP192, p224::NistP224, p256::NistP256, p384::NistP384,
    p521::NistP521,
};

use primemod::Limb;

/// Word `i` of `ap` in 32-bit words, widened for signed accumulation.
pub(crate) fn word(ap: &[Limb], i: usize) -> i64 {
    i64::from((ap[i / 2] >> (32 * (i % 2))) as u32)
}

/// Propagates signed carries through `w`, leaving every word in
/// `[0, 2^32)`. Returns the carry out of the top word.
pub(crate) fn propagate(w: &mut [i64]) -> i64 {
    let mut acc = 0;
    for x in w {
        acc += *x;
        *x = acc & 0xffff_ffff;
        acc >>= 32;
    }
    acc
}

/// Packs normalized 32-bit words into limbs.
pub(crate) fn pack(rp: &mut [Limb], w: &[i64]) {
    for (r, pair) in rp.iter_mut().zip(w.chunks_exact(2)) {
        *r = pair[0] as Limb | (pair[1] as Limb) << 32;
    }
}
