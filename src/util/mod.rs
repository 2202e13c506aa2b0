//! Conversions between limb arrays, byte strings and arbitrary-precision
//! integers. Only the slow field paths (parsing, inversion, exponentiation)
//! cross the `BigUint` boundary.

use num_bigint::BigUint;

use crate::arithmetic::limbs::{Limbs, NLIMBS};

/// Serialize limbs as 32 little-endian bytes.
pub fn limbs_to_le_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

/// Deserialize 32 little-endian bytes into limbs.
pub fn le_bytes_to_limbs(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = [0u64; NLIMBS];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        limbs[i] = u64::from_le_bytes(buf);
    }
    limbs
}

/// Export a limb array to an arbitrary-precision integer.
pub fn limbs_to_biguint(limbs: &Limbs) -> BigUint {
    BigUint::from_bytes_le(&limbs_to_le_bytes(limbs))
}

/// Import an arbitrary-precision integer (< 2^256) into a limb array.
/// Values at or above 2^256 are truncated by the caller's reduction step,
/// so this asserts rather than silently wrapping.
pub fn biguint_to_limbs(value: &BigUint) -> Limbs {
    let bytes = value.to_bytes_le();
    assert!(bytes.len() <= 32, "value does not fit in 4 limbs");
    let mut buf = [0u8; 32];
    buf[..bytes.len()].copy_from_slice(&bytes);
    le_bytes_to_limbs(&buf)
}
