use snarkfield::fft::{bit_reverse, FftDomain};
use snarkfield::field::fp::FrParams;
use snarkfield::{Field, Fr, Polynomial};

fn random_coeffs(n: usize) -> Vec<Fr> {
    (0..n).map(|_| Fr::random()).collect()
}

#[test]
fn ifft_inverts_fft() {
    let domain = FftDomain::<FrParams>::new(10);
    for log2_n in [0usize, 1, 2, 5, 10] {
        let original = random_coeffs(1 << log2_n);

        let mut a = original.clone();
        domain.fft(&mut a, 1);
        domain.ifft(&mut a, 1);

        assert_eq!(a, original, "log2_n = {log2_n}");
    }
}

#[test]
fn fft_evaluates_the_polynomial() {
    // Forward transform of the coefficients equals pointwise evaluation at
    // the powers of the domain generator.
    let log2_n = 4usize;
    let domain = FftDomain::<FrParams>::new(log2_n);
    let coeffs = random_coeffs(1 << log2_n);
    let poly = Polynomial::new(coeffs.clone());

    let mut evals = coeffs;
    domain.fft(&mut evals, 1);

    let mut x = Fr::one();
    for (i, eval) in evals.iter().enumerate() {
        assert_eq!(*eval, poly.evaluate(&x), "index {i}");
        x *= domain.generator();
    }
}

#[test]
fn convolution_theorem() {
    // Multiply two polynomials by transforming, pointwise-multiplying and
    // transforming back; the schoolbook product is the oracle.
    let domain = FftDomain::<FrParams>::new(6);
    let a = random_coeffs(13);
    let b = random_coeffs(17);

    let n = 64usize; // next power of two above deg(a) + deg(b) + 1
    let mut fa: Vec<Fr> = a.iter().copied().chain(std::iter::repeat(Fr::zero())).take(n).collect();
    let mut fb: Vec<Fr> = b.iter().copied().chain(std::iter::repeat(Fr::zero())).take(n).collect();

    domain.fft(&mut fa, 1);
    domain.fft(&mut fb, 1);
    for (x, y) in fa.iter_mut().zip(fb.iter()) {
        *x *= *y;
    }
    domain.ifft(&mut fa, 1);

    let product = &Polynomial::new(a) * &Polynomial::new(b);
    assert_eq!(&fa[..=product.degree()], product.coefficients());
    assert!(fa[product.degree() + 1..].iter().all(Fr::is_zero));
}

#[test]
fn thread_count_does_not_change_the_result() {
    let domain = FftDomain::<FrParams>::new(14);
    let original = random_coeffs(1 << 14);

    let mut expected = original.clone();
    domain.fft(&mut expected, 1);

    for n_threads in [2usize, 3, 8] {
        let mut a = original.clone();
        domain.fft(&mut a, n_threads);
        assert_eq!(a, expected, "n_threads = {n_threads}");

        domain.ifft(&mut a, n_threads);
        assert_eq!(a, original, "n_threads = {n_threads}");
    }
}

#[test]
fn parallel_bit_reversal_matches_sequential() {
    let original = random_coeffs(1 << 15);

    let mut seq = original.clone();
    bit_reverse(&mut seq, 1);

    for n_threads in [2usize, 5, 16] {
        let mut par = original.clone();
        bit_reverse(&mut par, n_threads);
        assert_eq!(seq, par, "n_threads = {n_threads}");
    }
}

#[test]
fn domain_is_reusable_across_sizes() {
    let domain = FftDomain::<FrParams>::new(8);
    for log2_n in [3usize, 6, 8] {
        let original = random_coeffs(1 << log2_n);
        let mut a = original.clone();
        domain.fft(&mut a, 1);
        domain.ifft(&mut a, 1);
        assert_eq!(a, original);
    }
}
