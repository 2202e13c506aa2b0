//! Dense univariate polynomials over a field
//!
//! Coefficients are stored in ascending degree order with trailing zeros
//! trimmed on construction. Multiplication is schoolbook; the transform
//! pipeline in [`crate::fft`] is the fast path for large products, and the
//! naive product here serves as its oracle in tests.

use std::ops::{Add, Mul};

use crate::field::Field;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<F: Field> {
    coefficients: Vec<F>,
}

impl<F: Field> Polynomial<F> {
    /// Build from coefficients in ascending degree order, trimming trailing
    /// zeros. The zero polynomial keeps a single zero coefficient.
    pub fn new(mut coefficients: Vec<F>) -> Self {
        while coefficients.len() > 1 && coefficients.last().map_or(false, F::is_zero) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(F::zero());
        }
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self::new(vec![F::zero()])
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_zero()
    }

    /// Degree, with the convention that the zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: &F) -> F {
        let mut acc = F::zero();
        for coeff in self.coefficients.iter().rev() {
            acc = acc * *x + *coeff;
        }
        acc
    }
}

impl<F: Field> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: Self) -> Polynomial<F> {
        let max_len = self.coefficients.len().max(other.coefficients.len());
        let mut result = vec![F::zero(); max_len];
        for (i, c) in self.coefficients.iter().enumerate() {
            result[i] = *c;
        }
        for (i, c) in other.coefficients.iter().enumerate() {
            result[i] += *c;
        }
        Polynomial::new(result)
    }
}

impl<F: Field> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    /// Schoolbook product.
    fn mul(self, other: Self) -> Polynomial<F> {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }

        let mut result = vec![F::zero(); self.degree() + other.degree() + 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                result[i + j] += *a * *b;
            }
        }
        Polynomial::new(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fp::Fr;

    fn poly(coeffs: &[u64]) -> Polynomial<Fr> {
        Polynomial::new(coeffs.iter().map(|&c| Fr::from_u64(c)).collect())
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        let p = Polynomial::new(vec![Fr::from_u64(1), Fr::zero(), Fr::zero()]);
        assert_eq!(p.degree(), 0);
        assert!(Polynomial::<Fr>::new(vec![]).is_zero());
    }

    #[test]
    fn evaluate_horner() {
        // 1 + 2x + 3x^2 at x = 5: 1 + 10 + 75 = 86
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.evaluate(&Fr::from_u64(5)), Fr::from_u64(86));
        assert_eq!(p.evaluate(&Fr::zero()), Fr::one());
    }

    #[test]
    fn add_and_mul() {
        let a = poly(&[1, 2]);
        let b = poly(&[3, 4, 5]);

        assert_eq!(&a + &b, poly(&[4, 6, 5]));
        // (1 + 2x)(3 + 4x + 5x^2) = 3 + 10x + 13x^2 + 10x^3
        assert_eq!(&a * &b, poly(&[3, 10, 13, 10]));
        assert_eq!(&a * &Polynomial::zero(), Polynomial::zero());
    }

    #[test]
    fn product_degree_adds() {
        let a = poly(&[7, 0, 0, 1]);
        let b = poly(&[2, 1]);
        assert_eq!((&a * &b).degree(), 4);
    }
}
