//! Prime field facade over the Montgomery engine
//!
//! [`Fp`] keeps one of three representations of the same residue:
//!
//! - `Short(i32)`: small literal constants; comparisons and zero checks
//!   never touch the Montgomery engine.
//! - `Long(limbs)`: canonical residue in normal (direct) encoding.
//! - `Mont(limbs)`: canonical residue times R, the encoding the hot
//!   multiplication paths operate in.
//!
//! Exactly one encoding is authoritative at a time; promotion is lazy and
//! happens the first time an operation needs limb arithmetic. Rare paths
//! (inversion, big exponents, string parsing/formatting) go through the
//! `num-bigint` collaborator on the canonical encoding.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{thread_rng, Rng};

use crate::arithmetic::limbs::{self, Limbs};
use crate::arithmetic::montgomery::{
    from_montgomery, mod_add, mod_neg, mod_sub, mont_mul, mont_mul_by_word, mont_sqr,
    to_montgomery, FieldParams,
};
use crate::field::{Field, FieldError, FieldResult};
use crate::util::{biguint_to_limbs, le_bytes_to_limbs, limbs_to_biguint, limbs_to_le_bytes};

/// Parameters of the BN254 base field Fq.
///
/// q = 21888242871839275222246405745257275088696311157297823662689037894645226208583
#[derive(Clone, Copy, Debug)]
pub struct FqParams;

impl FieldParams for FqParams {
    const MODULUS: Limbs = [
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R: Limbs = [
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ];
    const R2: Limbs = [
        0xf32cfc5b538afa89,
        0xb5e71911d44501fb,
        0x47ab1eff0a417ff6,
        0x06d89f71cab8351f,
    ];
    const INV: u64 = 0x87d20782e4866389;
    const MODULUS_BITS: u32 = 254;
}

/// Parameters of the BN254 scalar field Fr.
///
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
#[derive(Clone, Copy, Debug)]
pub struct FrParams;

impl FieldParams for FrParams {
    const MODULUS: Limbs = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R: Limbs = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];
    const R2: Limbs = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];
    const INV: u64 = 0xc2e1f593efffffff;
    const MODULUS_BITS: u32 = 254;
}

/// BN254 base field element.
pub type Fq = Fp<FqParams>;
/// BN254 scalar field element.
pub type Fr = Fp<FrParams>;

#[derive(Clone, Copy, Debug)]
enum Repr {
    /// Small signed constant; negative values mean q - |v|.
    Short(i32),
    /// Canonical residue, normal encoding.
    Long(Limbs),
    /// Canonical residue, Montgomery encoding (value * R mod q).
    Mont(Limbs),
}

/// A prime field element, generic over the modulus parameters `P`.
pub struct Fp<P: FieldParams> {
    repr: Repr,
    _marker: PhantomData<P>,
}

impl<P: FieldParams> Clone for Fp<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Fp<P> {}

impl<P: FieldParams> Fp<P> {
    #[inline]
    const fn with_repr(repr: Repr) -> Self {
        Self {
            repr,
            _marker: PhantomData,
        }
    }

    /// The field modulus as an arbitrary-precision integer.
    pub fn modulus() -> BigUint {
        limbs_to_biguint(&P::MODULUS)
    }

    #[inline]
    pub const fn from_i32(value: i32) -> Self {
        Self::with_repr(Repr::Short(value))
    }

    #[inline]
    pub fn from_u64(value: u64) -> Self {
        if value <= i32::MAX as u64 {
            Self::with_repr(Repr::Short(value as i32))
        } else {
            Self::with_repr(Repr::Long([value, 0, 0, 0]))
        }
    }

    /// Wrap canonical normal-form limbs. Debug-asserts the residue is
    /// already reduced below the modulus.
    #[inline]
    pub fn from_limbs(value: Limbs) -> Self {
        debug_assert!(limbs::cmp(&value, &P::MODULUS) == std::cmp::Ordering::Less);
        Self::with_repr(Repr::Long(value))
    }

    /// Wrap limbs that are already in Montgomery encoding.
    #[inline]
    pub fn from_mont_limbs(value: Limbs) -> Self {
        Self::with_repr(Repr::Mont(value))
    }

    /// Build an element from an arbitrary-precision integer, reducing mod q.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % Self::modulus();
        Self::with_repr(Repr::Long(biguint_to_limbs(&reduced)))
    }

    /// Canonical residue in normal encoding.
    pub fn to_limbs(&self) -> Limbs {
        match self.repr {
            Repr::Short(v) => {
                if v >= 0 {
                    [v as u64, 0, 0, 0]
                } else {
                    mod_neg::<P>(&[v.unsigned_abs() as u64, 0, 0, 0])
                }
            }
            Repr::Long(l) => l,
            Repr::Mont(l) => from_montgomery::<P>(&l),
        }
    }

    /// Residue in Montgomery encoding, promoting lazily.
    pub fn to_mont_limbs(&self) -> Limbs {
        match self.repr {
            Repr::Short(v) => {
                if v == 0 {
                    [0; 4]
                } else if v > 0 {
                    to_montgomery::<P>(&[v as u64, 0, 0, 0])
                } else {
                    mod_neg::<P>(&to_montgomery::<P>(&[v.unsigned_abs() as u64, 0, 0, 0]))
                }
            }
            Repr::Long(l) => to_montgomery::<P>(&l),
            Repr::Mont(l) => l,
        }
    }

    /// Canonical value as an arbitrary-precision integer.
    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.to_limbs())
    }

    /// Canonical value as a u64 when it fits in one limb.
    pub fn to_u64(&self) -> Option<u64> {
        let l = self.to_limbs();
        if l[1] | l[2] | l[3] == 0 {
            Some(l[0])
        } else {
            None
        }
    }

    /// Serialize the canonical residue as 32 little-endian bytes.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.to_limbs())
    }

    /// Deserialize from 32 little-endian bytes, reducing mod q.
    pub fn from_le_bytes(bytes: &[u8; 32]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Exponentiation by an arbitrary-precision exponent (slow path,
    /// delegated to `BigUint::modpow`).
    pub fn pow_big(&self, exp: &BigUint) -> Self {
        let base = self.to_biguint();
        Self::from_biguint(&base.modpow(exp, &Self::modulus()))
    }

    /// Integer quotient of the canonical residues. Not a field operation;
    /// like the other rare paths it goes through the arbitrary-precision
    /// collaborator.
    pub fn idiv(&self, rhs: &Self) -> FieldResult<Self> {
        if rhs.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(Self::from_biguint(&(self.to_biguint() / rhs.to_biguint())))
    }

    /// Integer remainder of the canonical residues.
    pub fn rem(&self, rhs: &Self) -> FieldResult<Self> {
        if rhs.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(Self::from_biguint(&(self.to_biguint() % rhs.to_biguint())))
    }

    /// Parse a decimal (or, with a `0x` prefix, hexadecimal) string.
    pub fn from_str_inner(s: &str) -> FieldResult<Self> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let parsed = if let Some(hex) = body.strip_prefix("0x") {
            BigUint::parse_bytes(hex.as_bytes(), 16)
        } else {
            BigUint::parse_bytes(body.as_bytes(), 10)
        };
        let value = parsed.ok_or_else(|| FieldError::ParseError(s.to_string()))?;
        let elem = Self::from_biguint(&value);
        Ok(if negative { -elem } else { elem })
    }
}

impl<P: FieldParams> Field for Fp<P> {
    #[inline]
    fn zero() -> Self {
        Self::from_i32(0)
    }

    #[inline]
    fn one() -> Self {
        Self::from_i32(1)
    }

    /// Uniform sampling by rejection: mask the draw down to MODULUS_BITS
    /// so nearly every attempt already lands below the modulus.
    fn random() -> Self {
        let mut rng = thread_rng();
        let mask = u64::MAX >> (256 - P::MODULUS_BITS);
        loop {
            let mut buf = [0u8; 32];
            rng.fill(&mut buf[..]);
            let mut draw = le_bytes_to_limbs(&buf);
            draw[3] &= mask;
            if limbs::cmp(&draw, &P::MODULUS) == std::cmp::Ordering::Less {
                return Self::from_limbs(draw);
            }
        }
    }

    fn is_zero(&self) -> bool {
        match self.repr {
            Repr::Short(v) => v == 0,
            _ => limbs::is_zero(&self.to_limbs()),
        }
    }

    fn is_one(&self) -> bool {
        match self.repr {
            Repr::Short(v) => v == 1,
            _ => self.to_limbs() == [1, 0, 0, 0],
        }
    }

    /// Extended binary GCD on the canonical value; rare path, so the
    /// arbitrary-precision collaborator does the work.
    fn inverse(&self) -> FieldResult<Self> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }

        let modulus = Self::modulus();
        let mut u = self.to_biguint();
        let mut v = modulus.clone();
        let mut b = BigUint::one();
        let mut c = BigUint::zero();

        while !u.is_zero() {
            while u.is_even() {
                u >>= 1;
                if b.is_even() {
                    b >>= 1;
                } else {
                    b = (b + &modulus) >> 1;
                }
            }

            while v.is_even() {
                v >>= 1;
                if c.is_even() {
                    c >>= 1;
                } else {
                    c = (c + &modulus) >> 1;
                }
            }

            if u >= v {
                u -= &v;
                if b >= c {
                    b -= &c;
                } else {
                    b = &modulus - (&c - &b);
                }
            } else {
                v -= &u;
                if c >= b {
                    c -= &b;
                } else {
                    c = &modulus - (&b - &c);
                }
            }
        }

        if !v.is_one() {
            return Err(FieldError::InvalidElement);
        }

        Ok(Self::from_biguint(&c))
    }

    fn square(&self) -> Self {
        if let Repr::Short(v) = self.repr {
            let sq = (v as i64) * (v as i64);
            if let Ok(small) = i32::try_from(sq) {
                return Self::from_i32(small);
            }
        }
        Self::from_mont_limbs(mont_sqr::<P>(&self.to_mont_limbs()))
    }
}

impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        if let (Repr::Short(a), Repr::Short(b)) = (self.repr, rhs.repr) {
            let sum = a as i64 + b as i64;
            if let Ok(small) = i32::try_from(sum) {
                return Self::from_i32(small);
            }
        }
        Self::from_mont_limbs(mod_add::<P>(&self.to_mont_limbs(), &rhs.to_mont_limbs()))
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if let (Repr::Short(a), Repr::Short(b)) = (self.repr, rhs.repr) {
            let diff = a as i64 - b as i64;
            if let Ok(small) = i32::try_from(diff) {
                return Self::from_i32(small);
            }
        }
        Self::from_mont_limbs(mod_sub::<P>(&self.to_mont_limbs(), &rhs.to_mont_limbs()))
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        match self.repr {
            // i32::MIN has no short negation; fall through to limbs.
            Repr::Short(v) if v != i32::MIN => Self::from_i32(-v),
            Repr::Mont(l) => Self::from_mont_limbs(mod_neg::<P>(&l)),
            _ => Self::from_limbs(mod_neg::<P>(&self.to_limbs())),
        }
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        match (self.repr, rhs.repr) {
            (Repr::Short(a), Repr::Short(b)) => {
                let prod = a as i64 * b as i64;
                if let Ok(small) = i32::try_from(prod) {
                    return Self::from_i32(small);
                }
                Self::from_mont_limbs(mont_mul::<P>(&self.to_mont_limbs(), &rhs.to_mont_limbs()))
            }
            // Montgomery * short word: one single-word REDC pass lands the
            // product directly in normal encoding, no conversion needed.
            (Repr::Mont(l), Repr::Short(w)) | (Repr::Short(w), Repr::Mont(l)) => {
                if w == 0 {
                    return Self::zero();
                }
                let raw = mont_mul_by_word::<P>(&l, w.unsigned_abs() as u64);
                if w < 0 {
                    Self::from_limbs(mod_neg::<P>(&raw))
                } else {
                    Self::from_limbs(raw)
                }
            }
            _ => Self::from_mont_limbs(mont_mul::<P>(&self.to_mont_limbs(), &rhs.to_mont_limbs())),
        }
    }
}

impl<P: FieldParams> Div for Fp<P> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let inverse = rhs.inverse().expect("Division by zero");
        self * inverse
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> DivAssign for Fp<P> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<P: FieldParams> PartialEq for Fp<P> {
    fn eq(&self, other: &Self) -> bool {
        match (self.repr, other.repr) {
            (Repr::Short(a), Repr::Short(b)) => {
                if a == b {
                    return true;
                }
                // Signs differ: compare through the canonical encoding.
                if (a >= 0) == (b >= 0) {
                    return false;
                }
                self.to_limbs() == other.to_limbs()
            }
            _ => self.to_limbs() == other.to_limbs(),
        }
    }
}

impl<P: FieldParams> Eq for Fp<P> {}

impl<P: FieldParams> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = self.to_limbs();
        write!(
            f,
            "Fp(0x{:016x}{:016x}{:016x}{:016x})",
            l[3], l[2], l[1], l[0]
        )
    }
}

impl<P: FieldParams> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl<P: FieldParams> fmt::LowerHex for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = self.to_limbs();
        write!(f, "{:016x}{:016x}{:016x}{:016x}", l[3], l[2], l[1], l[0])
    }
}

impl<P: FieldParams> FromStr for Fp<P> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_inner(s)
    }
}

impl<P: FieldParams> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}
