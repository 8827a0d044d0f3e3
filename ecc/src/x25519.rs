//! X25519 Diffie-Hellman as specified in [RFC 7748].
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

use crate::{
    Curve25519,
    curves::curve25519::FIELD,
    scalar_mul::{Scratch, mul_g},
};
use primemod::{
    Limb,
    ct::cnd_swap,
    limb::{self, carve},
    subtle::Choice,
};
use zeroize::Zeroizing;

/// Size of scalars and `u` coordinates in bytes.
pub const KEY_SIZE: usize = 32;

/// The `u` coordinate of the base point, 9.
pub const BASEPOINT: [u8; KEY_SIZE] = {
    let mut u = [0; KEY_SIZE];
    u[0] = 9;
    u
};

/// `(A - 2) / 4` for `A = 486662`.
const A24: Limb = 121_665;

/// Clamps a scalar: clears bits 0 to 2 and 255, sets bit 254.
fn clamp(k: &[u8; KEY_SIZE]) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut k = Zeroizing::new(*k);
    k[0] &= 248;
    k[31] &= 127;
    k[31] |= 64;
    k
}

/// The X25519 function: `u` coordinate of `k · (u, ·)` on Curve25519.
///
/// Runs the Montgomery ladder over the clamped scalar. Points of small
/// order produce the all-zero output, which callers checking for
/// contributory behaviour should reject.
pub fn x25519(k: &[u8; KEY_SIZE], u: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let m = &FIELD;
    let n = m.size;
    let k = clamp(k);
    let mut u = *u;
    u[31] &= 0x7f;

    let mut scratch = Scratch::new();
    let ([x1, x2, z2, x3, z3], rest) = carve::<5>(&mut scratch, n);
    limb::from_le_bytes(x1, &u);
    m.unit(x2);
    z2.fill(0);
    x3.copy_from_slice(x1);
    m.unit(z3);

    let mut swap = Choice::from(0);
    for t in (3..=254).rev() {
        let bit = Choice::from((k[t / 8] >> (t % 8)) & 1);
        swap ^= bit;
        cnd_swap(swap, x2, x3);
        cnd_swap(swap, z2, z3);
        swap = bit;

        ladder_step(x1, x2, z2, x3, z3, rest);
    }
    cnd_swap(swap, x2, x3);
    cnd_swap(swap, z2, z3);

    // Bits 0 to 2 are clear.
    for _ in 0..3 {
        double(x2, z2, rest);
    }

    to_u_bytes(x2, z2, rest)
}

/// `x25519(k, BASEPOINT)`, computed with the fixed-base Edwards table.
pub fn x25519_base(k: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let m = &FIELD;
    let n = m.size;
    let k = clamp(k);

    let mut scratch = Scratch::new();
    let ([scalar], rest) = carve::<1>(&mut scratch, n);
    let (point, rest) = rest.split_at_mut(3 * n);
    limb::from_le_bytes(scalar, &k[..]);
    mul_g::<Curve25519>(point, scalar, rest);

    // u = (1 + y) / (1 - y) = (Z + Y) / (Z - Y)
    let (y, z) = (&point[n..2 * n], &point[2 * n..]);
    let ([num, den], rest) = carve::<2>(rest, n);
    m.add(num, z, y);
    m.sub(den, z, y);
    to_u_bytes(num, den, rest)
}

/// One ladder step: `(x2, z2) = 2 P2` and `(x3, z3) = P2 + P3`, where
/// `P3 - P2` has `u` coordinate `x1`.
fn ladder_step(
    x1: &[Limb],
    x2: &mut [Limb],
    z2: &mut [Limb],
    x3: &mut [Limb],
    z3: &mut [Limb],
    scratch: &mut [Limb],
) {
    let m = &FIELD;
    let ([a, b, c, d, e, t], tp) = carve::<6>(scratch, m.size);

    m.add(a, x2, z2);
    m.sub(b, x2, z2);
    m.add(c, x3, z3);
    m.sub(d, x3, z3);

    // DA, CB
    m.mul_assign(d, a, tp);
    m.mul_assign(c, b, tp);

    // AA, BB, E = AA - BB
    m.sqr_assign(a, tp);
    m.sqr_assign(b, tp);
    m.sub(e, a, b);

    // x3 = (DA + CB)², z3 = x1 (DA - CB)²
    m.add(t, d, c);
    m.sqr(x3, t, tp);
    m.sub(t, d, c);
    m.sqr_assign(t, tp);
    m.mul(z3, t, x1, tp);

    // x2 = AA BB, z2 = E (AA + a24 E)
    m.mul(x2, a, b, tp);
    m.mul_1(t, e, A24);
    m.add_assign(t, a);
    m.mul(z2, e, t, tp);
}

/// `(x, z) = 2 (x, z)`.
fn double(x: &mut [Limb], z: &mut [Limb], scratch: &mut [Limb]) {
    let m = &FIELD;
    let ([a, b, e], tp) = carve::<3>(scratch, m.size);

    m.add(a, x, z);
    m.sqr_assign(a, tp);
    m.sub(b, x, z);
    m.sqr_assign(b, tp);
    m.sub(e, a, b);

    m.mul(x, a, b, tp);
    m.mul_1(b, e, A24);
    m.add_assign(b, a);
    m.mul(z, e, b, tp);
}

/// Encodes `x / z`, which is zero when `z` is.
fn to_u_bytes(x: &[Limb], z: &[Limb], scratch: &mut [Limb]) -> [u8; KEY_SIZE] {
    let m = &FIELD;
    let ([iz, u], rest) = carve::<2>(scratch, m.size);
    m.invert(iz, z, rest);
    m.mul(u, x, iz, rest);
    m.canonical(u);

    let mut out = [0; KEY_SIZE];
    limb::to_le_bytes(&mut out, u);
    out
}
