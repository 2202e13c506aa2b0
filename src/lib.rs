//! Numeric core for pairing-based proof systems over BN254
//!
//! Four layers, each built on the one below:
//!
//! - [`arithmetic`]: fixed 4-limb integers and the Montgomery reduction
//!   engine, generic over the modulus.
//! - [`field`]: the prime fields Fq and Fr behind a lazy multi-encoding
//!   facade, plus the quadratic extension Fq2.
//! - [`curve`]: the groups G1 and G2 in Jacobian coordinates, with
//!   Pippenger multi-scalar multiplication.
//! - [`fft`]: radix-2 transforms over Fr with precomputed root tables.

pub mod arithmetic;
pub mod curve;
pub mod fft;
pub mod field;
pub mod polynomial;
pub mod util;

pub use curve::bn254::{G1Affine, G1Projective, G2Affine, G2Projective};
pub use curve::msm::msm;
pub use fft::FftDomain;
pub use field::extension::Fq2;
pub use field::fp::{Fq, Fr};
pub use field::{Field, FieldError, FieldResult};
pub use polynomial::Polynomial;

#[cfg(feature = "parallel")]
pub use rayon;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
