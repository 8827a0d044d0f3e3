//! Modulus descriptor and the arithmetic derived from its reduction.

use crate::{
    MAX_LIMBS,
    ct::{cnd_add_n, cnd_copy, cnd_sub_n, limbs_eq},
    limb::{self, LIMB_BITS, Limb},
};
use subtle::{Choice, ConstantTimeEq};

/// Reduces the `2 * size`-limb value in `xp` (clobbered) into `rp`.
pub type ReduceFn = fn(m: &Modulus, rp: &mut [Limb], xp: &mut [Limb]);

/// Writes `ap^-1` into `rp`, or zero when `ap ≡ 0`.
pub type InvertFn = fn(m: &Modulus, rp: &mut [Limb], ap: &[Limb], scratch: &mut [Limb]);

/// Writes `sqrt(u / v)` into `rp`, returning whether the square root exists.
pub type SqrtRatioFn =
    fn(m: &Modulus, rp: &mut [Limb], up: &[Limb], vp: &[Limb], scratch: &mut [Limb]) -> Choice;

/// Description of an odd modulus `m` together with the routines specialized
/// to its bit pattern.
///
/// Residues are `size`-limb values congruent to the value they represent.
/// Unless stated otherwise, operations accept any such value and produce one;
/// only [`Modulus::canonical`] returns values in `[0, m)`.
#[derive(Clone, Copy, Debug)]
pub struct Modulus {
    /// Bit length of `m`.
    pub bit_size: usize,

    /// Number of limbs in a residue.
    pub size: usize,

    /// The modulus.
    pub m: &'static [Limb],

    /// `2^(64 * size) mod m`.
    pub b: &'static [Limb],

    /// Shifted complement for reductions that peel one limb at a time.
    pub b_shifted: Option<&'static [Limb]>,

    /// `(m + 1) / 2`.
    pub mp1h: &'static [Limb],

    /// `2^(128 * size) mod m` when residues are kept in Montgomery form.
    pub r2: Option<&'static [Limb]>,

    /// Reduction of double-width products.
    pub reduce: ReduceFn,

    /// Constant-time inversion.
    pub invert: InvertFn,

    /// Constant-time square root of a ratio, where supported.
    pub sqrt_ratio: Option<SqrtRatioFn>,
}

impl Modulus {
    /// Size of a canonical residue in bytes.
    pub const fn byte_size(&self) -> usize {
        self.bit_size.div_ceil(8)
    }

    /// Whether residues are kept in Montgomery form.
    pub const fn use_redc(&self) -> bool {
        self.r2.is_some()
    }

    /// Scratch limbs needed by [`Modulus::mul`] and [`Modulus::sqr`].
    pub const fn mul_itch(&self) -> usize {
        2 * self.size
    }

    /// Scratch limbs needed by [`Modulus::invert`].
    pub const fn invert_itch(&self) -> usize {
        3 * self.size
    }

    /// Scratch limbs needed by [`Modulus::sqrt_ratio`].
    pub const fn sqrt_itch(&self) -> usize {
        6 * self.size
    }

    /// `rp = ap + bp`.
    pub fn add(&self, rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) {
        let cy = limb::add_n(rp, ap, bp);
        self.fold_carry(cy, rp);
    }

    /// `rp += bp`.
    pub fn add_assign(&self, rp: &mut [Limb], bp: &[Limb]) {
        let cy = limb::add_n_assign(rp, bp);
        self.fold_carry(cy, rp);
    }

    /// `rp = ap - bp`.
    pub fn sub(&self, rp: &mut [Limb], ap: &[Limb], bp: &[Limb]) {
        let cy = limb::sub_n(rp, ap, bp);
        self.fold_borrow(cy, rp);
    }

    /// `rp -= bp`.
    pub fn sub_assign(&self, rp: &mut [Limb], bp: &[Limb]) {
        let cy = limb::sub_n_assign(rp, bp);
        self.fold_borrow(cy, rp);
    }

    /// `rp = ap * b` for a small constant with `b * B < 2^(64 * size)`.
    pub fn mul_1(&self, rp: &mut [Limb], ap: &[Limb], b: Limb) {
        let hi = limb::mul_1(rp, ap, b);
        self.fold_high(hi, rp);
    }

    /// `rp *= b` for a small constant with `b * B < 2^(64 * size)`.
    pub fn mul_1_assign(&self, rp: &mut [Limb], b: Limb) {
        let mut hi = 0;
        for r in rp.iter_mut() {
            (*r, hi) = limb::mac(0, *r, b, hi);
        }
        self.fold_high(hi, rp);
    }

    /// `rp += ap * b` for a small constant with `b * B < 2^(64 * size)`.
    pub fn addmul_1(&self, rp: &mut [Limb], ap: &[Limb], b: Limb) {
        let hi = limb::addmul_1(rp, ap, b);
        self.fold_high(hi, rp);
    }

    /// `rp -= ap * b` for a small constant with `b * B < 2^(64 * size)`.
    pub fn submul_1(&self, rp: &mut [Limb], ap: &[Limb], b: Limb) {
        let hi = limb::submul_1(rp, ap, b);
        let hi = limb::submul_1(rp, self.b, hi);
        debug_assert!(hi <= 1);
        self.fold_borrow(hi, rp);
    }

    /// `rp = ap * bp`, using `tp` (at least [`Modulus::mul_itch`] limbs) for
    /// the double-width product.
    pub fn mul(&self, rp: &mut [Limb], ap: &[Limb], bp: &[Limb], tp: &mut [Limb]) {
        let tp = &mut tp[..2 * self.size];
        limb::mul(tp, ap, bp);
        (self.reduce)(self, rp, tp);
    }

    /// `rp *= bp`.
    pub fn mul_assign(&self, rp: &mut [Limb], bp: &[Limb], tp: &mut [Limb]) {
        let tp = &mut tp[..2 * self.size];
        limb::mul(tp, rp, bp);
        (self.reduce)(self, rp, tp);
    }

    /// `rp = ap^2`.
    pub fn sqr(&self, rp: &mut [Limb], ap: &[Limb], tp: &mut [Limb]) {
        let tp = &mut tp[..2 * self.size];
        limb::sqr(tp, ap);
        (self.reduce)(self, rp, tp);
    }

    /// `rp = rp^2`.
    pub fn sqr_assign(&self, rp: &mut [Limb], tp: &mut [Limb]) {
        let tp = &mut tp[..2 * self.size];
        limb::sqr(tp, rp);
        (self.reduce)(self, rp, tp);
    }

    /// Reduces the `2 * size`-limb `xp` (clobbered) into `rp`.
    pub fn reduce(&self, rp: &mut [Limb], xp: &mut [Limb]) {
        (self.reduce)(self, rp, xp);
    }

    /// `rp = ap^-1`, or zero if `ap ≡ 0`. Needs [`Modulus::invert_itch`]
    /// scratch limbs.
    pub fn invert(&self, rp: &mut [Limb], ap: &[Limb], scratch: &mut [Limb]) {
        (self.invert)(self, rp, ap, scratch);
    }

    /// `rp = sqrt(up / vp)`, returning whether the square root exists.
    ///
    /// Moduli without a square-root routine always report failure.
    pub fn sqrt_ratio(
        &self,
        rp: &mut [Limb],
        up: &[Limb],
        vp: &[Limb],
        scratch: &mut [Limb],
    ) -> Choice {
        match self.sqrt_ratio {
            Some(sqrt_ratio) => sqrt_ratio(self, rp, up, vp, scratch),
            None => Choice::from(0),
        }
    }

    /// Reduces `rp` to its canonical representative in `[0, m)`.
    ///
    /// Subtracts `m << j` for `j` from `64 * size - bit_size` down to zero
    /// whenever that does not borrow.
    pub fn canonical(&self, rp: &mut [Limb]) {
        let n = self.size;
        let mut shifted = [0; MAX_LIMBS];
        let mut diff = [0; MAX_LIMBS];
        for j in (0..=(LIMB_BITS * n - self.bit_size)).rev() {
            shift_left(&mut shifted[..n], self.m, j);
            let borrow = limb::sub_n(&mut diff[..n], rp, &shifted[..n]);
            cnd_copy(borrow.ct_eq(&0), rp, &diff[..n]);
        }
    }

    /// Whether two residues represent the same value.
    pub fn ct_eq(&self, ap: &[Limb], bp: &[Limb]) -> Choice {
        let n = self.size;
        let (mut a, mut b) = ([0; MAX_LIMBS], [0; MAX_LIMBS]);
        a[..n].copy_from_slice(ap);
        b[..n].copy_from_slice(bp);
        self.canonical(&mut a[..n]);
        self.canonical(&mut b[..n]);
        limbs_eq(&a[..n], &b[..n])
    }

    /// Whether a residue represents zero.
    pub fn is_zero(&self, ap: &[Limb]) -> Choice {
        let n = self.size;
        let mut a = [0; MAX_LIMBS];
        a[..n].copy_from_slice(ap);
        self.canonical(&mut a[..n]);
        crate::ct::is_zero(&a[..n])
    }

    /// Whether `ap < m`, i.e. `ap` is already canonical.
    pub fn is_canonical(&self, ap: &[Limb]) -> Choice {
        let mut diff = [0; MAX_LIMBS];
        limb::sub_n(&mut diff[..self.size], ap, self.m).ct_eq(&1)
    }

    /// `rp = ap^exp` for a public exponent, using `tp` (at least
    /// [`Modulus::mul_itch`] limbs).
    ///
    /// Runs in time dependent on `exp`, never on `ap`.
    pub fn pow_public(&self, rp: &mut [Limb], ap: &[Limb], exp: &[Limb], tp: &mut [Limb]) {
        self.unit(rp);
        let bits = exp.len() * LIMB_BITS;
        let top = (0..bits).rev().find(|&i| (exp[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1 == 1);
        let Some(top) = top else {
            return;
        };
        for i in (0..=top).rev() {
            self.sqr_assign(rp, tp);
            if (exp[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1 == 1 {
                self.mul_assign(rp, ap, tp);
            }
        }
    }

    /// Writes the internal representation of one.
    pub fn unit(&self, rp: &mut [Limb]) {
        let mut one = [0; MAX_LIMBS];
        one[0] = 1;
        self.to_internal(rp, &one[..self.size]);
    }

    /// Converts a plain residue into internal representation.
    pub fn to_internal(&self, rp: &mut [Limb], ap: &[Limb]) {
        match self.r2 {
            Some(r2) => {
                let mut tp = [0; 2 * MAX_LIMBS];
                self.mul(rp, ap, r2, &mut tp);
            }
            None => rp.copy_from_slice(ap),
        }
    }

    /// Converts an internal residue back into a plain one (not canonical).
    pub fn from_internal(&self, rp: &mut [Limb], ap: &[Limb]) {
        let n = self.size;
        match self.r2 {
            Some(_) => {
                let mut tp = [0; 2 * MAX_LIMBS];
                tp[..n].copy_from_slice(ap);
                (self.reduce)(self, rp, &mut tp[..2 * n]);
            }
            None => rp.copy_from_slice(ap),
        }
    }

    /// Absorbs a carry out of the top limb: `2^(64 * size) ≡ B`.
    fn fold_carry(&self, cy: Limb, rp: &mut [Limb]) {
        let cy = cnd_add_n(cy, rp, self.b);
        let cy = cnd_add_n(cy, rp, self.b);
        debug_assert_eq!(cy, 0);
    }

    /// Absorbs a borrow out of the top limb.
    fn fold_borrow(&self, cy: Limb, rp: &mut [Limb]) {
        let cy = cnd_sub_n(cy, rp, self.b);
        let cy = cnd_sub_n(cy, rp, self.b);
        debug_assert_eq!(cy, 0);
    }

    /// Absorbs a whole high limb `hi * 2^(64 * size)`.
    fn fold_high(&self, hi: Limb, rp: &mut [Limb]) {
        let hi = limb::addmul_1(rp, self.b, hi);
        debug_assert!(hi <= 1);
        self.fold_carry(hi, rp);
    }
}

/// `rp = ap << shift`, truncated to `rp.len()` limbs.
fn shift_left(rp: &mut [Limb], ap: &[Limb], shift: usize) {
    let (words, bits) = (shift / LIMB_BITS, shift % LIMB_BITS);
    for (i, r) in rp.iter_mut().enumerate() {
        let lo = i.checked_sub(words).and_then(|k| ap.get(k)).copied().unwrap_or(0);
        let below = i
            .checked_sub(words + 1)
            .and_then(|k| ap.get(k))
            .copied()
            .unwrap_or(0);
        *r = if bits == 0 {
            lo
        } else {
            (lo << bits) | (below >> (LIMB_BITS - bits))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::shift_left;
    use crate::{
        invert_binary,
        limb::{
            Limb,
            tests::{from_biguint, to_biguint},
        },
        reduce_fold,
        Modulus,
    };
    use num_bigint::BigUint;
    use proptest::prelude::*;
    use std::vec;

    /// P-256 group order.
    const ORDER: Modulus = Modulus {
        bit_size: 256,
        size: 4,
        m: &[
            0xf3b9_cac2_fc63_2551, 0xbce6_faad_a717_9e84, 0xffff_ffff_ffff_ffff,
            0xffff_ffff_0000_0000,
        ],
        b: &[
            0x0c46_353d_039c_daaf, 0x4319_0552_58e8_617b, 0x0000_0000_0000_0000,
            0x0000_0000_ffff_ffff,
        ],
        b_shifted: None,
        mp1h: &[
            0x79dc_e561_7e31_92a9, 0xde73_7d56_d38b_cf42, 0x7fff_ffff_ffff_ffff,
            0x7fff_ffff_8000_0000,
        ],
        r2: None,
        reduce: reduce_fold,
        invert: invert_binary,
        sqrt_ratio: None,
    };

    /// P-224 field prime, which does not fill its top limb.
    const P224: Modulus = Modulus {
        bit_size: 224,
        size: 4,
        m: &[
            0x0000_0000_0000_0001, 0xffff_ffff_0000_0000, 0xffff_ffff_ffff_ffff,
            0x0000_0000_ffff_ffff,
        ],
        b: &[
            0xffff_ffff_0000_0000, 0xffff_ffff_ffff_ffff, 0x0000_0000_0000_0000,
            0x0000_0000_0000_0000,
        ],
        b_shifted: None,
        mp1h: &[
            0x0000_0000_0000_0001, 0xffff_ffff_8000_0000, 0xffff_ffff_ffff_ffff,
            0x0000_0000_7fff_ffff,
        ],
        r2: None,
        reduce: reduce_fold,
        invert: invert_binary,
        sqrt_ratio: None,
    };

    fn modulus(m: &Modulus) -> BigUint {
        to_biguint(m.m)
    }

    #[test]
    fn shift_left_crosses_limbs() {
        let mut r = [0; 3];
        shift_left(&mut r, &[0x8000_0000_0000_0001, 0x1, 0], 1);
        assert_eq!(r, [0x2, 0x3, 0]);
        shift_left(&mut r, &[0x1, 0x2, 0], 64);
        assert_eq!(r, [0, 0x1, 0x2]);
    }

    #[test]
    fn canonical_of_all_ones() {
        for m in [&ORDER, &P224] {
            let mut r = vec![Limb::MAX; m.size];
            let want = to_biguint(&r) % modulus(m);
            m.canonical(&mut r);
            assert_eq!(to_biguint(&r), want);
        }
    }

    #[test]
    fn invert_zero_is_zero() {
        let mut r = [1; 4];
        let mut scratch = [0; 12];
        ORDER.invert(&mut r, &[0; 4], &mut scratch);
        assert_eq!(r, [0; 4]);

        // A non-canonical zero.
        r = [1; 4];
        ORDER.invert(&mut r, ORDER.m, &mut scratch);
        assert_eq!(r, [0; 4]);
    }

    #[test]
    fn pow_public_fermat() {
        let m = &P224;
        let a = [0x1234_5678, 0x9abc, 0xdef0, 0x42];
        let exp = from_biguint(&(modulus(m) - 2u8), 4);
        let mut r = [0; 4];
        let mut tp = [0; 8];
        m.pow_public(&mut r, &a, &exp, &mut tp);
        let mut inv = [0; 4];
        let mut scratch = [0; 12];
        m.invert(&mut inv, &a, &mut scratch);
        assert!(bool::from(m.ct_eq(&r, &inv)));
    }

    prop_compose! {
        fn residue()(limbs in any::<[Limb; 4]>()) -> [Limb; 4] {
            limbs
        }
    }

    proptest! {
        #[test]
        fn arithmetic_matches_biguint(a in residue(), b in residue()) {
            for m in [&ORDER, &P224] {
                let p = modulus(m);
                let (ba, bb) = (to_biguint(&a), to_biguint(&b));
                let mut r = [0; 4];
                let mut tp = [0; 8];

                m.add(&mut r, &a, &b);
                prop_assert_eq!(to_biguint(&r) % &p, (&ba + &bb) % &p);

                m.sub(&mut r, &a, &b);
                prop_assert_eq!(to_biguint(&r) % &p, (&ba + &p * 2u8 - &bb % &p) % &p);

                m.mul(&mut r, &a, &b, &mut tp);
                prop_assert_eq!(to_biguint(&r) % &p, (&ba * &bb) % &p);

                m.sqr(&mut r, &a, &mut tp);
                prop_assert_eq!(to_biguint(&r) % &p, (&ba * &ba) % &p);

                m.mul_1(&mut r, &a, 8);
                prop_assert_eq!(to_biguint(&r) % &p, (&ba * 8u8) % &p);

                r = b;
                m.submul_1(&mut r, &a, 3);
                prop_assert_eq!(to_biguint(&r) % &p, (&bb + &p * 3u8 - (&ba % &p) * 3u8) % &p);

                r = a;
                m.canonical(&mut r);
                prop_assert_eq!(to_biguint(&r), &ba % &p);
                prop_assert!(bool::from(m.is_canonical(&r)));
            }
        }

        #[test]
        fn invert_times_input_is_one(a in residue()) {
            for m in [&ORDER, &P224] {
                let p = modulus(m);
                let ba = to_biguint(&a) % &p;
                prop_assume!(ba != BigUint::from(0u8));
                let mut inv = [0; 4];
                let mut scratch = [0; 12];
                m.invert(&mut inv, &a, &mut scratch);
                prop_assert!(to_biguint(&inv) < p);
                prop_assert_eq!(to_biguint(&inv) * ba % &p, BigUint::from(1u8));
            }
        }
    }
}
