//! Fixed-width limb vector primitives
//!
//! All field arithmetic in this crate bottoms out in these operations on
//! little-endian `[u64; 4]` arrays (256 bits). Everything here is pure,
//! allocation-free and never reduces modulo anything; modular correction
//! is the Montgomery layer's job.

use std::cmp::Ordering;

/// Number of 64-bit limbs in a field element.
pub const NLIMBS: usize = 4;

/// A 256-bit unsigned integer as little-endian 64-bit limbs.
pub type Limbs = [u64; NLIMBS];

/// Add with carry: a + b + carry_in -> (sum, carry_out).
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = a as u128 + b as u128 + carry as u128;
    (t as u64, (t >> 64) as u64)
}

/// Subtract with borrow: a - b - borrow_in -> (diff, borrow_out).
/// `borrow_out` is 0 or 1.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (t as u64, ((t >> 64) as u64) & 1)
}

/// Multiply-accumulate: acc + a * b + carry_in -> (lo, carry_out).
/// The full 128-bit intermediate cannot overflow: max is
/// (2^64-1)^2 + 2*(2^64-1) = 2^128 - 1.
#[inline(always)]
pub const fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = acc as u128 + (a as u128) * (b as u128) + carry as u128;
    (t as u64, (t >> 64) as u64)
}

/// r = a + b mod 2^256, returning the carry-out bit.
#[inline]
pub const fn add(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let (r0, c) = adc(a[0], b[0], 0);
    let (r1, c) = adc(a[1], b[1], c);
    let (r2, c) = adc(a[2], b[2], c);
    let (r3, c) = adc(a[3], b[3], c);
    ([r0, r1, r2, r3], c)
}

/// r = a - b mod 2^256, returning the borrow-out bit.
#[inline]
pub const fn sub(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let (r0, bw) = sbb(a[0], b[0], 0);
    let (r1, bw) = sbb(a[1], b[1], bw);
    let (r2, bw) = sbb(a[2], b[2], bw);
    let (r3, bw) = sbb(a[3], b[3], bw);
    ([r0, r1, r2, r3], bw)
}

/// Unsigned comparison, most significant limb first.
#[inline]
pub fn cmp(a: &Limbs, b: &Limbs) -> Ordering {
    for i in (0..NLIMBS).rev() {
        if a[i] != b[i] {
            return if a[i] < b[i] {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
    }
    Ordering::Equal
}

#[inline]
pub const fn is_zero(a: &Limbs) -> bool {
    (a[0] | a[1] | a[2] | a[3]) == 0
}

/// Logical left shift by an arbitrary bit count; shifted-in bits are zero.
pub const fn shl(a: &Limbs, bits: u32) -> Limbs {
    if bits >= 256 {
        return [0; NLIMBS];
    }
    let word = (bits / 64) as usize;
    let rem = bits % 64;
    let mut r = [0u64; NLIMBS];
    let mut i = NLIMBS;
    while i > word {
        i -= 1;
        let lo = a[i - word] << rem;
        // rem == 0 would shift by 64, which is UB; guard it.
        let hi = if rem != 0 && i - word >= 1 {
            a[i - word - 1] >> (64 - rem)
        } else {
            0
        };
        r[i] = lo | hi;
    }
    r
}

/// Logical right shift by an arbitrary bit count; shifted-in bits are zero.
pub const fn shr(a: &Limbs, bits: u32) -> Limbs {
    if bits >= 256 {
        return [0; NLIMBS];
    }
    let word = (bits / 64) as usize;
    let rem = bits % 64;
    let mut r = [0u64; NLIMBS];
    let mut i = 0;
    while i + word < NLIMBS {
        let lo = a[i + word] >> rem;
        let hi = if rem != 0 && i + word + 1 < NLIMBS {
            a[i + word + 1] << (64 - rem)
        } else {
            0
        };
        r[i] = lo | hi;
        i += 1;
    }
    r
}

#[inline]
pub const fn and(a: &Limbs, b: &Limbs) -> Limbs {
    [a[0] & b[0], a[1] & b[1], a[2] & b[2], a[3] & b[3]]
}

#[inline]
pub const fn or(a: &Limbs, b: &Limbs) -> Limbs {
    [a[0] | b[0], a[1] | b[1], a[2] | b[2], a[3] | b[3]]
}

#[inline]
pub const fn xor(a: &Limbs, b: &Limbs) -> Limbs {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

#[inline]
pub const fn not(a: &Limbs) -> Limbs {
    [!a[0], !a[1], !a[2], !a[3]]
}
