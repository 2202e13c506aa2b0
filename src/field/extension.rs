//! Quadratic extension field Fp^2 = Fp[x] / (x^2 - beta)
//!
//! The non-residue beta is fixed by the parameter type and classified once
//! into [`NonResidue`], which selects the cheapest multiply-by-beta routine.
//! For the BN254 base field beta = -1, so squaring uses the complex-squaring
//! identity.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::arithmetic::montgomery::FieldParams;
use crate::field::fp::{Fp, FqParams};
use crate::field::{Field, FieldError, FieldResult};

/// Classification of the quadratic non-residue used to build the extension.
/// Fixed at parameter definition time; immutable for the lifetime of the
/// field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonResidue {
    Zero,
    One,
    NegOne,
    Other,
}

/// Parameters of a quadratic extension over the base field `Self`.
pub trait ExtensionParams: FieldParams {
    /// Classification of [`ExtensionParams::non_residue`]; must agree with
    /// the value it returns (checked in tests via [`classify`]).
    const NON_RESIDUE_KIND: NonResidue;

    /// beta, with x^2 = beta.
    fn non_residue() -> Fp<Self>;
}

/// Derive the classification from an actual non-residue value.
pub fn classify<P: FieldParams>(beta: &Fp<P>) -> NonResidue {
    if beta.is_zero() {
        NonResidue::Zero
    } else if beta.is_one() {
        NonResidue::One
    } else if *beta == -Fp::<P>::one() {
        NonResidue::NegOne
    } else {
        NonResidue::Other
    }
}

impl ExtensionParams for FqParams {
    const NON_RESIDUE_KIND: NonResidue = NonResidue::NegOne;

    fn non_residue() -> Fp<Self> {
        Fp::from_i32(-1)
    }
}

/// Element c0 + c1 * x of the quadratic extension.
pub struct Fp2<P: ExtensionParams> {
    pub c0: Fp<P>,
    pub c1: Fp<P>,
}

/// BN254 twist field Fq2 = Fq[x] / (x^2 + 1).
pub type Fq2 = Fp2<FqParams>;

impl<P: ExtensionParams> Clone for Fp2<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ExtensionParams> Copy for Fp2<P> {}

impl<P: ExtensionParams> Fp2<P> {
    #[inline]
    pub const fn new(c0: Fp<P>, c1: Fp<P>) -> Self {
        Self { c0, c1 }
    }

    /// Multiply a base-field element by beta using the classified formula.
    #[inline]
    fn mul_by_nonresidue(a: Fp<P>) -> Fp<P> {
        match P::NON_RESIDUE_KIND {
            NonResidue::Zero => Fp::zero(),
            NonResidue::One => a,
            NonResidue::NegOne => -a,
            NonResidue::Other => a * P::non_residue(),
        }
    }
}

impl<P: ExtensionParams> Field for Fp2<P> {
    #[inline]
    fn zero() -> Self {
        Self::new(Fp::zero(), Fp::zero())
    }

    #[inline]
    fn one() -> Self {
        Self::new(Fp::one(), Fp::zero())
    }

    fn random() -> Self {
        Self::new(Fp::random(), Fp::random())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero()
    }

    /// (a0 + a1 x)^-1 = (a0 - a1 x) / (a0^2 - beta a1^2)
    fn inverse(&self) -> FieldResult<Self> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }

        let norm = self.c0.square() - Self::mul_by_nonresidue(self.c1.square());
        let inv_norm = norm.inverse()?;

        Ok(Self::new(self.c0 * inv_norm, -self.c1 * inv_norm))
    }

    fn square(&self) -> Self {
        match P::NON_RESIDUE_KIND {
            // Complex squaring: (a0 + a1 x)^2 = (a0+a1)(a0-a1) + 2 a0 a1 x
            // when x^2 = -1. Two base multiplications.
            NonResidue::NegOne => {
                let real = (self.c0 + self.c1) * (self.c0 - self.c1);
                let imag = (self.c0 * self.c1).double();
                Self::new(real, imag)
            }
            _ => {
                let aa = self.c0.square();
                let bb = self.c1.square();
                let cross = (self.c0 * self.c1).double();
                Self::new(aa + Self::mul_by_nonresidue(bb), cross)
            }
        }
    }
}

impl<P: ExtensionParams> Add for Fp2<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: ExtensionParams> Sub for Fp2<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: ExtensionParams> Neg for Fp2<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: ExtensionParams> Mul for Fp2<P> {
    type Output = Self;

    /// Karatsuba: three base multiplications instead of four.
    ///
    /// aa = a0 b0, bb = a1 b1, cross = (a0+a1)(b0+b1);
    /// result = (aa + beta bb) + (cross - aa - bb) x.
    fn mul(self, rhs: Self) -> Self {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let cross = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);

        Self::new(aa + Self::mul_by_nonresidue(bb), cross - aa - bb)
    }
}

impl<P: ExtensionParams> Div for Fp2<P> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let inverse = rhs.inverse().expect("Division by zero");
        self * inverse
    }
}

impl<P: ExtensionParams> AddAssign for Fp2<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: ExtensionParams> SubAssign for Fp2<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: ExtensionParams> MulAssign for Fp2<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: ExtensionParams> DivAssign for Fp2<P> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<P: ExtensionParams> PartialEq for Fp2<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: ExtensionParams> Eq for Fp2<P> {}

impl<P: ExtensionParams> fmt::Debug for Fp2<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp2({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: ExtensionParams> fmt::Display for Fp2<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}*x)", self.c0, self.c1)
    }
}
