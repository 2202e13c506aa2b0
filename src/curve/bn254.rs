//! BN254 (alt_bn128) curve parameters
//!
//! G1: y^2 = x^3 + 3 over Fq, generator (1, 2).
//! G2: y^2 = x^3 + 3/(9 + x) over Fq2 (the sextic twist), with the
//! standard generator from the EIP-197 specification.

use lazy_static::lazy_static;

use crate::arithmetic::limbs::Limbs;
use crate::arithmetic::montgomery::to_montgomery;
use crate::curve::{Affine, CurveParams, Projective};
use crate::field::extension::Fq2;
use crate::field::fp::{Fq, FqParams};
use crate::field::Field;

/// BN254 G1: curve over the base field.
#[derive(Clone, Copy, Debug)]
pub struct G1Params;

impl CurveParams for G1Params {
    type Base = Fq;

    #[inline]
    fn coeff_b() -> Fq {
        Fq::from_i32(3)
    }

    #[inline]
    fn generator_x() -> Fq {
        Fq::from_i32(1)
    }

    #[inline]
    fn generator_y() -> Fq {
        Fq::from_i32(2)
    }
}

/// BN254 G2: curve over the twist field Fq2.
#[derive(Clone, Copy, Debug)]
pub struct G2Params;

// Canonical (normal-form) limbs of the G2 constants. Converted to
// Montgomery encoding once, on first use.
const G2_GEN_X_C0: Limbs = [
    0x46debd5cd992f6ed,
    0x674322d4f75edadd,
    0x426a00665e5c4479,
    0x1800deef121f1e76,
];
const G2_GEN_X_C1: Limbs = [
    0x97e485b7aef312c2,
    0xf1aa493335a9e712,
    0x7260bfb731fb5d25,
    0x198e9393920d483a,
];
const G2_GEN_Y_C0: Limbs = [
    0x4ce6cc0166fa7daa,
    0xe3d1e7690c43d37b,
    0x4aab71808dcb408f,
    0x12c85ea5db8c6deb,
];
const G2_GEN_Y_C1: Limbs = [
    0x55acdadcd122975b,
    0xbc4b313370b38ef3,
    0xec9e99ad690c3395,
    0x090689d0585ff075,
];
const G2_COEFF_B_C0: Limbs = [
    0x3267e6dc24a138e5,
    0xb5b4c5e559dbefa3,
    0x81be18991be06ac3,
    0x2b149d40ceb8aaae,
];
const G2_COEFF_B_C1: Limbs = [
    0xe4a2bd0685c315d2,
    0xa74fa084e52d1852,
    0xcd2cafadeed8fdf4,
    0x009713b03af0fed4,
];

fn fq_mont(limbs: Limbs) -> Fq {
    Fq::from_mont_limbs(to_montgomery::<FqParams>(&limbs))
}

lazy_static! {
    static ref G2_GENERATOR_X: Fq2 = Fq2::new(fq_mont(G2_GEN_X_C0), fq_mont(G2_GEN_X_C1));
    static ref G2_GENERATOR_Y: Fq2 = Fq2::new(fq_mont(G2_GEN_Y_C0), fq_mont(G2_GEN_Y_C1));
    static ref G2_COEFF_B: Fq2 = Fq2::new(fq_mont(G2_COEFF_B_C0), fq_mont(G2_COEFF_B_C1));
}

impl CurveParams for G2Params {
    type Base = Fq2;

    #[inline]
    fn coeff_b() -> Fq2 {
        *G2_COEFF_B
    }

    #[inline]
    fn generator_x() -> Fq2 {
        *G2_GENERATOR_X
    }

    #[inline]
    fn generator_y() -> Fq2 {
        *G2_GENERATOR_Y
    }
}

pub type G1Affine = Affine<G1Params>;
pub type G1Projective = Projective<G1Params>;
pub type G2Affine = Affine<G2Params>;
pub type G2Projective = Projective<G2Params>;
