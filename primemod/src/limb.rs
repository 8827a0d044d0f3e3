//! Multi-precision kernels over little-endian limb slices.
//!
//! These are the `mpn`-style building blocks the modular layer is made of.
//! None of them branch on limb values; loop bounds depend only on slice
//! lengths, which are public.

/// Machine word the arithmetic is performed on.
pub type Limb = u64;

/// Double-width word used for carries and products.
pub type WideLimb = u128;

/// Size of a [`Limb`] in bits.
pub const LIMB_BITS: usize = 64;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let ret = (a as WideLimb) + (b as WideLimb) + (carry as WideLimb);
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The borrow is a mask: `0` or `Limb::MAX`.
#[inline(always)]
pub const fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let ret =
        (a as WideLimb).wrapping_sub((b as WideLimb) + ((borrow >> (LIMB_BITS - 1)) as WideLimb));
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn mac(a: Limb, b: Limb, c: Limb, carry: Limb) -> (Limb, Limb) {
    let ret = (a as WideLimb) + ((b as WideLimb) * (c as WideLimb)) + (carry as WideLimb);
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// `rp = ap + bp`, returning the carry (0 or 1).
pub fn add_n(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) -> Limb {
    debug_assert!(ap.len() == rp.len() && bp.len() == rp.len());
    let mut carry = 0;
    for ((r, &a), &b) in rp.iter_mut().zip(ap).zip(bp) {
        (*r, carry) = adc(a, b, carry);
    }
    carry
}

/// `rp += bp`, returning the carry (0 or 1).
pub fn add_n_assign(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert_eq!(bp.len(), rp.len());
    let mut carry = 0;
    for (r, &b) in rp.iter_mut().zip(bp) {
        (*r, carry) = adc(*r, b, carry);
    }
    carry
}

/// `rp = ap - bp`, returning the borrow (0 or 1).
pub fn sub_n(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) -> Limb {
    debug_assert!(ap.len() == rp.len() && bp.len() == rp.len());
    let mut borrow = 0;
    for ((r, &a), &b) in rp.iter_mut().zip(ap).zip(bp) {
        (*r, borrow) = sbb(a, b, borrow);
    }
    borrow >> (LIMB_BITS - 1)
}

/// `rp -= bp`, returning the borrow (0 or 1).
pub fn sub_n_assign(rp: &mut [Limb], bp: &[Limb]) -> Limb {
    debug_assert_eq!(bp.len(), rp.len());
    let mut borrow = 0;
    for (r, &b) in rp.iter_mut().zip(bp) {
        (*r, borrow) = sbb(*r, b, borrow);
    }
    borrow >> (LIMB_BITS - 1)
}

/// `rp += b`, propagating the carry through every limb. Returns the carry out.
pub fn add_1_assign(rp: &mut [Limb], b: Limb) -> Limb {
    let mut carry = b;
    for r in rp.iter_mut() {
        (*r, carry) = adc(*r, 0, carry);
    }
    carry
}

/// `rp = ap * b`, returning the high limb.
pub fn mul_1(rp: &mut [Limb], ap: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(ap.len(), rp.len());
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        (*r, carry) = mac(0, a, b, carry);
    }
    carry
}

/// `rp += ap * b`, returning the high limb.
pub fn addmul_1(rp: &mut [Limb], ap: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(ap.len(), rp.len());
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        (*r, carry) = mac(*r, a, b, carry);
    }
    carry
}

/// `rp -= ap * b`, returning the amount borrowed from above the top limb.
pub fn submul_1(rp: &mut [Limb], ap: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(ap.len(), rp.len());
    let mut carry = 0;
    for (r, &a) in rp.iter_mut().zip(ap) {
        let (lo, hi) = mac(0, a, b, carry);
        let (diff, borrow) = sbb(*r, lo, 0);
        *r = diff;
        // a * b + carry < 2^128 - 2^64, so `hi + 1` cannot overflow.
        carry = hi + (borrow >> (LIMB_BITS - 1));
    }
    carry
}

/// Schoolbook product `rp = ap * bp`, where `rp.len() == ap.len() + bp.len()`.
pub fn mul(rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) {
    let an = ap.len();
    debug_assert!(an > 0 && !bp.is_empty());
    debug_assert_eq!(rp.len(), an + bp.len());

    rp[an] = mul_1(&mut rp[..an], ap, bp[0]);
    for (j, &b) in bp.iter().enumerate().skip(1) {
        rp[j + an] = addmul_1(&mut rp[j..j + an], ap, b);
    }
}

/// `rp = ap^2`, where `rp.len() == 2 * ap.len()`.
#[inline]
pub fn sqr(rp: &mut [Limb], ap: &[Limb]) {
    mul(rp, ap, ap);
}

/// Shifts `rp` right by one bit, returning the bit shifted out (0 or 1).
pub fn rshift1_assign(rp: &mut [Limb]) -> Limb {
    let mut carry = 0;
    for r in rp.iter_mut().rev() {
        let low = *r & 1;
        *r = (*r >> 1) | (carry << (LIMB_BITS - 1));
        carry = low;
    }
    carry
}

/// Loads a big-endian byte string into `rp`, zero-filling the high limbs.
///
/// `bytes` must not be longer than `rp` can hold.
pub fn from_be_bytes(rp: &mut [Limb], bytes: &[u8]) {
    debug_assert!(bytes.len() <= rp.len() * 8);
    rp.fill(0);
    for (i, &byte) in bytes.iter().rev().enumerate() {
        rp[i / 8] |= Limb::from(byte) << (8 * (i % 8));
    }
}

/// Writes the low `out.len()` bytes of `ap` big-endian.
pub fn to_be_bytes(out: &mut [u8], ap: &[Limb]) {
    debug_assert!(out.len() <= ap.len() * 8);
    for (i, byte) in out.iter_mut().rev().enumerate() {
        *byte = (ap[i / 8] >> (8 * (i % 8))) as u8;
    }
}

/// Loads a little-endian byte string into `rp`, zero-filling the high limbs.
pub fn from_le_bytes(rp: &mut [Limb], bytes: &[u8]) {
    debug_assert!(bytes.len() <= rp.len() * 8);
    rp.fill(0);
    for (i, &byte) in bytes.iter().enumerate() {
        rp[i / 8] |= Limb::from(byte) << (8 * (i % 8));
    }
}

/// Writes the low `out.len()` bytes of `ap` little-endian.
pub fn to_le_bytes(out: &mut [u8], ap: &[Limb]) {
    debug_assert!(out.len() <= ap.len() * 8);
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (ap[i / 8] >> (8 * (i % 8))) as u8;
    }
}

/// Splits a scratch buffer into `K` disjoint sub-slices of `n` limbs each,
/// returning them along with the unused remainder.
///
/// Panics if `buf` is shorter than `K * n`; callers size scratch with the
/// `*_itch` functions.
#[inline]
pub fn carve<const K: usize>(buf: &mut [Limb], n: usize) -> ([&mut [Limb]; K], &mut [Limb]) {
    let mut rest = buf;
    let parts = core::array::from_fn(|_| {
        let (head, tail) = core::mem::take(&mut rest).split_at_mut(n);
        rest = tail;
        head
    });
    (parts, rest)
}
