use proptest::prelude::*;
use snarkfield::{Field, Fr, Polynomial};

fn poly(coeffs: &[u64]) -> Polynomial<Fr> {
    Polynomial::new(coeffs.iter().map(|&c| Fr::from_u64(c)).collect())
}

#[test]
fn degree_ignores_trailing_zeros() {
    let p = Polynomial::new(vec![
        Fr::from_u64(1),
        Fr::zero(),
        Fr::zero(),
        Fr::from_u64(4),
    ]);
    assert_eq!(p.degree(), 3);

    let trimmed = Polynomial::new(vec![Fr::from_u64(2), Fr::zero(), Fr::zero()]);
    assert_eq!(trimmed.degree(), 0);
}

#[test]
fn evaluation_wraps_at_modulus() {
    // 3x^2 + 2x + 1 at x = 2 is 17
    let p = poly(&[1, 2, 3]);
    assert_eq!(p.evaluate(&Fr::from_u64(2)), Fr::from_u64(17));
}

#[test]
fn known_product() {
    let a = poly(&[1, 1]);
    let b = poly(&[5, 0, 1]);
    // (1 + x)(5 + x^2) = 5 + 5x + x^2 + x^3
    assert_eq!(&a * &b, poly(&[5, 5, 1, 1]));
}

proptest! {
    #[test]
    fn evaluation_is_a_ring_homomorphism(
        a in prop::collection::vec(0u64..1000, 1..8),
        b in prop::collection::vec(0u64..1000, 1..8),
        x in 0u64..1000,
    ) {
        let pa = poly(&a);
        let pb = poly(&b);
        let x = Fr::from_u64(x);

        prop_assert_eq!((&pa + &pb).evaluate(&x), pa.evaluate(&x) + pb.evaluate(&x));
        prop_assert_eq!((&pa * &pb).evaluate(&x), pa.evaluate(&x) * pb.evaluate(&x));
    }

    #[test]
    fn product_degree_is_sum_of_degrees(
        a in prop::collection::vec(1u64..1000, 1..8),
        b in prop::collection::vec(1u64..1000, 1..8),
    ) {
        let pa = poly(&a);
        let pb = poly(&b);
        // leading coefficients are non-zero, so no cancellation
        prop_assert_eq!((&pa * &pb).degree(), pa.degree() + pb.degree());
    }
}
