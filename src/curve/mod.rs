//! Short Weierstrass curve groups y^2 = x^3 + b (a = 0)
//!
//! One generic group-law implementation instantiated twice: G1 over the
//! base field Fq and G2 over the twist field Fq2. Affine points carry an
//! explicit infinity flag (affine coordinates cannot encode infinity);
//! chains of group operations run in Jacobian coordinates so only the
//! final conversion back to affine pays a field inversion.
//!
//! Points are values: operations return new points and never alias their
//! inputs. Validation (`is_on_curve`) is the deserializer's job; the group
//! law assumes its inputs are valid curve points.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Neg};

use crate::field::Field;

pub mod bn254;
pub mod msm;

pub use bn254::{G1Affine, G1Projective, G2Affine, G2Projective};

/// Parameters of a b-only short Weierstrass curve over `Base`.
pub trait CurveParams: Copy + Clone + Debug + Send + Sync + 'static {
    type Base: Field;

    /// The constant b in y^2 = x^3 + b.
    fn coeff_b() -> Self::Base;

    fn generator_x() -> Self::Base;
    fn generator_y() -> Self::Base;
}

/// A curve point in affine coordinates with an explicit infinity flag.
pub struct Affine<C: CurveParams> {
    pub x: C::Base,
    pub y: C::Base,
    infinity: bool,
}

/// A curve point in Jacobian coordinates: x = X/Z^2, y = Y/Z^3, Z = 0
/// encodes the point at infinity.
pub struct Projective<C: CurveParams> {
    pub x: C::Base,
    pub y: C::Base,
    pub z: C::Base,
}

impl<C: CurveParams> Clone for Affine<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: CurveParams> Copy for Affine<C> {}

impl<C: CurveParams> Clone for Projective<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: CurveParams> Copy for Projective<C> {}

impl<C: CurveParams> Affine<C> {
    #[inline]
    pub const fn new(x: C::Base, y: C::Base) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            x: C::Base::zero(),
            y: C::Base::zero(),
            infinity: true,
        }
    }

    #[inline]
    pub fn generator() -> Self {
        Self::new(C::generator_x(), C::generator_y())
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Curve membership check: y^2 == x^3 + b. The group law does not
    /// re-validate; call this once at deserialization.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        self.y.square() == self.x.square() * self.x + C::coeff_b()
    }

    #[inline]
    pub fn to_projective(&self) -> Projective<C> {
        Projective::from_affine(self)
    }
}

impl<C: CurveParams> Projective<C> {
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: C::Base::one(),
            y: C::Base::one(),
            z: C::Base::zero(),
        }
    }

    #[inline]
    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    #[inline]
    pub fn from_affine(p: &Affine<C>) -> Self {
        if p.infinity {
            Self::identity()
        } else {
            Self {
                x: p.x,
                y: p.y,
                z: C::Base::one(),
            }
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Point doubling, Jacobian dbl-2009-l (a = 0).
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        // Doubling a point with y = 0 yields infinity (its own negation).
        if self.y.is_zero() {
            return Self::identity();
        }

        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Full Jacobian addition, add-2007-bl, with explicit dispatch for the
    /// degenerate cases: either side infinity, P == Q (doubling) and
    /// P == -Q (infinity).
    pub fn add(&self, rhs: &Self) -> Self {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition (rhs affine, Z2 = 1), madd-2007-bl. This is the
    /// inner loop of MSM bucket accumulation.
    pub fn add_mixed(&self, rhs: &Affine<C>) -> Self {
        if rhs.is_identity() {
            return *self;
        }
        if self.is_identity() {
            return Self::from_affine(rhs);
        }

        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;

        if self.x == u2 {
            return if self.y == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Scalar multiplication by a little-endian byte string.
    ///
    /// Bit order is fixed as: bytes consumed from the most significant
    /// byte down, bits within each byte MSB first; each step doubles the
    /// accumulator and then conditionally adds the base ("double, then
    /// add"). Cross-checked against small-multiple vectors in the tests.
    pub fn mul_scalar(&self, scalar_le: &[u8]) -> Self {
        let mut acc = Self::identity();
        for &byte in scalar_le.iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = Projective::add(&acc, self);
                }
            }
        }
        acc
    }

    /// Convert to affine; one field inversion.
    pub fn to_affine(&self) -> Affine<C> {
        if self.is_identity() {
            return Affine::identity();
        }
        let zinv = self
            .z
            .inverse()
            .expect("non-identity point has invertible Z");
        let zinv2 = zinv.square();
        Affine::new(self.x * zinv2, self.y * zinv2 * zinv)
    }

    /// Convert a batch to affine with a single inversion (Montgomery trick).
    pub fn batch_to_affine(points: &[Self]) -> Vec<Affine<C>> {
        let mut zs: Vec<C::Base> = points
            .iter()
            .map(|p| if p.is_identity() { C::Base::one() } else { p.z })
            .collect();
        C::Base::batch_invert(&mut zs).expect("batch Z inversion");

        points
            .iter()
            .zip(zs.iter())
            .map(|(p, zinv)| {
                if p.is_identity() {
                    Affine::identity()
                } else {
                    let zinv2 = zinv.square();
                    Affine::new(p.x * zinv2, p.y * zinv2 * *zinv)
                }
            })
            .collect()
    }
}

impl<C: CurveParams> Add for Projective<C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Projective::add(&self, &rhs)
    }
}

impl<C: CurveParams> AddAssign for Projective<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Projective::add(self, &rhs);
    }
}

impl<C: CurveParams> Neg for Projective<C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.is_identity() {
            self
        } else {
            Self {
                x: self.x,
                y: -self.y,
                z: self.z,
            }
        }
    }
}

impl<C: CurveParams> Neg for Affine<C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.infinity {
            self
        } else {
            Self::new(self.x, -self.y)
        }
    }
}

impl<C: CurveParams> PartialEq for Affine<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.infinity || other.infinity {
            return self.infinity == other.infinity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl<C: CurveParams> Eq for Affine<C> {}

impl<C: CurveParams> PartialEq for Projective<C> {
    /// Cross-multiplied comparison: (X1/Z1^2, Y1/Z1^3) == (X2/Z2^2, Y2/Z2^3)
    /// without inverting either Z.
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return self.is_identity() == other.is_identity();
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1
            && self.y * other.z * z2z2 == other.y * self.z * z1z1
    }
}

impl<C: CurveParams> Eq for Projective<C> {}

impl<C: CurveParams> Debug for Affine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.infinity {
            write!(f, "Affine(infinity)")
        } else {
            write!(f, "Affine({:?}, {:?})", self.x, self.y)
        }
    }
}

impl<C: CurveParams> Debug for Projective<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identity() {
            write!(f, "Projective(infinity)")
        } else {
            write!(f, "Projective({:?}, {:?}, {:?})", self.x, self.y, self.z)
        }
    }
}

impl<C: CurveParams> From<Affine<C>> for Projective<C> {
    fn from(p: Affine<C>) -> Self {
        Self::from_affine(&p)
    }
}

impl<C: CurveParams> From<Projective<C>> for Affine<C> {
    fn from(p: Projective<C>) -> Self {
        p.to_affine()
    }
}
