//! Finite field types: the prime-field facade and its quadratic extension.
//!
//! The [`Field`] trait is the seam the curve group and FFT layers are
//! written against; it is implemented by [`fp::Fp`] (Fq, Fr) and
//! [`extension::Fp2`] (Fq2).

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub mod extension;
pub mod fp;

/// Error types for field operations
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid field element")]
    InvalidElement,

    #[error("Cannot parse field element: {0}")]
    ParseError(String),
}

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Field element trait providing the interface for finite field arithmetic
pub trait Field:
    Sized
    + Clone
    + Copy
    + Debug
    + Display
    + PartialEq
    + Eq
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
    + Neg<Output = Self>
{
    /// Returns the zero element of the field
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) of the field
    fn one() -> Self;

    /// Generates a uniformly random element of the field
    fn random() -> Self;

    /// Checks if this element is zero
    fn is_zero(&self) -> bool;

    /// Checks if this element is one
    fn is_one(&self) -> bool;

    /// Computes the multiplicative inverse of this element if it exists
    fn inverse(&self) -> FieldResult<Self>;

    /// Computes the square of this element
    fn square(&self) -> Self {
        *self * *self
    }

    /// Computes the double of this element
    fn double(&self) -> Self {
        *self + *self
    }

    /// Computes this element raised to the given power
    fn pow(&self, exp: u64) -> Self {
        if exp == 0 {
            return Self::one();
        }

        let mut base = *self;
        let mut result = Self::one();
        let mut exp = exp;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            base = base.square();
            exp >>= 1;
        }

        result
    }

    /// Batch inversion of multiple field elements using Montgomery's trick:
    /// one field inversion plus 3(n-1) multiplications.
    fn batch_invert(elements: &mut [Self]) -> FieldResult<()> {
        if elements.is_empty() {
            return Ok(());
        }

        let n = elements.len();
        let mut products = Vec::with_capacity(n);
        let mut acc = Self::one();

        for element in elements.iter() {
            if element.is_zero() {
                return Err(FieldError::DivisionByZero);
            }
            products.push(acc);
            acc = acc * *element;
        }

        let mut inv = acc.inverse()?;

        for i in (0..n).rev() {
            let tmp = elements[i] * inv;
            elements[i] = products[i] * inv;
            inv = tmp;
        }

        Ok(())
    }
}
