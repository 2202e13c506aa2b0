//! Montgomery (REDC) modular multiplication for 4-limb prime moduli
//!
//! The engine is generic over a [`FieldParams`] type carrying the modulus
//! and its derived constants. All routines take canonical inputs (< q) and
//! produce canonical outputs; the interleaved CIOS loop performs one REDC
//! step per product limb, so the 512-bit intermediate never materialises.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::limbs::{self, adc, mac, Limbs};

/// Compile-time parameters of a 4-limb prime field.
///
/// `INV` is -q^-1 mod 2^64, the per-limb REDC multiplier. `R` and `R2`
/// are 2^256 mod q and (2^256)^2 mod q, used for Montgomery conversion.
/// `MODULUS_BITS` is the bit length of q; random sampling masks draws
/// down to it before the rejection test.
pub trait FieldParams: Copy + Clone + Debug + Send + Sync + 'static {
    const MODULUS: Limbs;
    const R: Limbs;
    const R2: Limbs;
    const INV: u64;
    const MODULUS_BITS: u32;
}

/// Conditionally subtract the modulus so the value lands in [0, q).
///
/// `hi` is the carry limb above bit 256; CIOS guarantees hi <= 1 and
/// hi * 2^256 + t < 2q, so a single subtraction suffices.
#[inline]
fn reduce_once<P: FieldParams>(t: Limbs, hi: u64) -> Limbs {
    if hi != 0 || limbs::cmp(&t, &P::MODULUS) != Ordering::Less {
        let (r, _) = limbs::sub(&t, &P::MODULUS);
        r
    } else {
        t
    }
}

/// Montgomery product: a * b * R^-1 mod q, inputs and output in
/// Montgomery form. Single-pass CIOS: each of the four outer iterations
/// accumulates one limb of the schoolbook product and immediately folds
/// in one REDC step.
pub fn mont_mul<P: FieldParams>(a: &Limbs, b: &Limbs) -> Limbs {
    let mut t = [0u64; 4];
    let mut t4 = 0u64;

    for i in 0..4 {
        // t += a[i] * b
        let mut carry = 0u64;
        for j in 0..4 {
            let (lo, c) = mac(t[j], a[i], b[j], carry);
            t[j] = lo;
            carry = c;
        }
        let (s, t5) = adc(t4, carry, 0);
        t4 = s;

        // REDC: add m * q so the low limb cancels, then shift down 64 bits
        let m = t[0].wrapping_mul(P::INV);
        let (_, mut carry) = mac(t[0], m, P::MODULUS[0], 0);
        for j in 1..4 {
            let (lo, c) = mac(t[j], m, P::MODULUS[j], carry);
            t[j - 1] = lo;
            carry = c;
        }
        let (s, c) = adc(t4, carry, 0);
        t[3] = s;
        t4 = t5 + c;
    }

    reduce_once::<P>(t, t4)
}

/// Montgomery squaring. A dedicated doubling-based squaring is an
/// optimisation, not a correctness requirement; the product path is reused.
#[inline]
pub fn mont_sqr<P: FieldParams>(a: &Limbs) -> Limbs {
    mont_mul::<P>(a, a)
}

/// Montgomery product by a single word: a * w * R^-1 mod q.
///
/// With `a` in Montgomery form this yields `a * w` in *normal* form,
/// which is the fast path the field facade uses for small-constant
/// multiplication. One multiply pass plus four REDC steps.
pub fn mont_mul_by_word<P: FieldParams>(a: &Limbs, w: u64) -> Limbs {
    let mut t = [0u64; 5];
    let mut carry = 0u64;
    for j in 0..4 {
        let (lo, c) = mac(0, a[j], w, carry);
        t[j] = lo;
        carry = c;
    }
    t[4] = carry;

    for _ in 0..4 {
        let m = t[0].wrapping_mul(P::INV);
        let (_, mut carry) = mac(t[0], m, P::MODULUS[0], 0);
        for j in 1..4 {
            let (lo, c) = mac(t[j], m, P::MODULUS[j], carry);
            t[j - 1] = lo;
            carry = c;
        }
        let (s, c) = adc(t[4], carry, 0);
        t[3] = s;
        t[4] = c;
    }

    reduce_once::<P>([t[0], t[1], t[2], t[3]], t[4])
}

/// Convert a canonical residue into Montgomery form: a * R mod q.
#[inline]
pub fn to_montgomery<P: FieldParams>(a: &Limbs) -> Limbs {
    mont_mul::<P>(a, &P::R2)
}

/// Convert out of Montgomery form: a * R^-1 mod q.
#[inline]
pub fn from_montgomery<P: FieldParams>(a: &Limbs) -> Limbs {
    mont_mul::<P>(a, &[1, 0, 0, 0])
}

/// Modular addition on raw residues (works identically in normal and
/// Montgomery encoding since both are plain residues mod q).
#[inline]
pub fn mod_add<P: FieldParams>(a: &Limbs, b: &Limbs) -> Limbs {
    let (r, carry) = limbs::add(a, b);
    reduce_once::<P>(r, carry)
}

/// Modular subtraction on raw residues; adds q back on borrow.
#[inline]
pub fn mod_sub<P: FieldParams>(a: &Limbs, b: &Limbs) -> Limbs {
    let (r, borrow) = limbs::sub(a, b);
    if borrow != 0 {
        let (r, _) = limbs::add(&r, &P::MODULUS);
        r
    } else {
        r
    }
}

/// Modular negation: q - a, with 0 fixed.
#[inline]
pub fn mod_neg<P: FieldParams>(a: &Limbs) -> Limbs {
    if limbs::is_zero(a) {
        [0; 4]
    } else {
        let (r, _) = limbs::sub(&P::MODULUS, a);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fp::{FqParams, FrParams};

    #[test]
    fn montgomery_round_trip() {
        let a = [5u64, 0, 0, 0];
        let m = to_montgomery::<FrParams>(&a);
        assert_ne!(m, a);
        assert_eq!(from_montgomery::<FrParams>(&m), a);
    }

    #[test]
    fn one_in_montgomery_form_is_r() {
        let one = [1u64, 0, 0, 0];
        assert_eq!(to_montgomery::<FrParams>(&one), FrParams::R);
        assert_eq!(to_montgomery::<FqParams>(&one), FqParams::R);
    }

    #[test]
    fn square_of_five_is_twenty_five() {
        let five = to_montgomery::<FrParams>(&[5, 0, 0, 0]);
        let sq = mont_sqr::<FrParams>(&five);
        assert_eq!(from_montgomery::<FrParams>(&sq), [25, 0, 0, 0]);
    }

    #[test]
    fn mul_by_word_yields_normal_form() {
        // (a in Montgomery form) * w via the word path == a * w canonical
        let a_mont = to_montgomery::<FrParams>(&[7, 0, 0, 0]);
        let r = mont_mul_by_word::<FrParams>(&a_mont, 9);
        assert_eq!(r, [63, 0, 0, 0]);
    }

    #[test]
    fn mod_sub_wraps_through_modulus() {
        let two = [2u64, 0, 0, 0];
        let five = [5u64, 0, 0, 0];
        let r = mod_sub::<FrParams>(&two, &five);
        // q - 3
        let (expect, _) = crate::arithmetic::limbs::sub(&FrParams::MODULUS, &[3, 0, 0, 0]);
        assert_eq!(r, expect);
        // (2 - 5) + 3 wraps back to zero
        assert_eq!(mod_add::<FrParams>(&r, &[3, 0, 0, 0]), [0; 4]);
        // adding the subtrahend back restores the minuend
        assert_eq!(mod_add::<FrParams>(&r, &[5, 0, 0, 0]), [2, 0, 0, 0]);
    }

    #[test]
    fn neg_zero_is_zero() {
        assert_eq!(mod_neg::<FrParams>(&[0; 4]), [0; 4]);
    }
}
