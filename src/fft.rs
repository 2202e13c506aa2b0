//! Radix-2 FFT over a prime field with precomputed root tables
//!
//! [`FftDomain`] is built once for a maximum transform size and owns
//! per-stage twiddle tables for both directions. The generator of the
//! 2^k-th roots of unity is derived from the smallest quadratic
//! non-residue of the field, found by trial at construction time; all
//! later work is pure limb arithmetic.
//!
//! Transforms run in place. Each butterfly stage is embarrassingly
//! parallel and is split across scoped threads on contiguous block-aligned
//! chunks; the end of the scope is the barrier between stages.

use num_bigint::BigUint;
use num_traits::One;

use crate::arithmetic::montgomery::FieldParams;
use crate::field::fp::Fp;
use crate::field::Field;

/// Arrays shorter than this are processed on one thread; the per-element
/// work is too cheap to amortize a spawn.
const PARALLEL_MIN: usize = 1 << 14;

/// Precomputed evaluation domain for radix-2 transforms of size up to
/// `2^max_log2`.
pub struct FftDomain<P: FieldParams> {
    max_log2: usize,
    root: Fp<P>,
    root_inverse: Fp<P>,
    /// `round_roots[i]` holds the 2^i twiddles of the stage whose
    /// half-block length is 2^i: successive powers of the primitive
    /// 2^(i+1)-th root of unity.
    round_roots: Vec<Vec<Fp<P>>>,
    inverse_round_roots: Vec<Vec<Fp<P>>>,
}

impl<P: FieldParams> FftDomain<P> {
    /// Build a domain supporting transforms up to size `2^max_log2`.
    ///
    /// Panics if the field's multiplicative group does not contain a
    /// subgroup of that order (i.e. `max_log2` exceeds the 2-adicity of
    /// q - 1).
    pub fn new(max_log2: usize) -> Self {
        let modulus = Fp::<P>::modulus();
        let order = &modulus - BigUint::one();

        let two_adicity = order.trailing_zeros().unwrap_or(0);
        assert!(
            max_log2 as u64 <= two_adicity,
            "field supports transforms up to 2^{two_adicity}, requested 2^{max_log2}"
        );

        // g^((q-1)/2^max_log2) generates the 2^max_log2-th roots of unity
        // whenever g is a non-residue.
        let g = Self::find_non_residue(&order);
        let root = g.pow_big(&(&order >> max_log2));
        let root_inverse = root.inverse().expect("root of unity is invertible");

        let round_roots = Self::build_tables(root, max_log2);
        let inverse_round_roots = Self::build_tables(root_inverse, max_log2);

        Self {
            max_log2,
            root,
            root_inverse,
            round_roots,
            inverse_round_roots,
        }
    }

    /// Smallest g with g^((q-1)/2) != 1, found by trial from 2 upward.
    fn find_non_residue(order: &BigUint) -> Fp<P> {
        let half = order >> 1;
        let mut g = 2u64;
        loop {
            let candidate = Fp::<P>::from_u64(g);
            if !candidate.pow_big(&half).is_one() {
                return candidate;
            }
            g += 1;
        }
    }

    /// One table per stage: level i holds w^0 .. w^(2^i - 1) for w the
    /// primitive 2^(i+1)-th root derived from `root` by repeated squaring.
    fn build_tables(root: Fp<P>, max_log2: usize) -> Vec<Vec<Fp<P>>> {
        let mut tables = Vec::with_capacity(max_log2);
        for level in 0..max_log2 {
            let mut w = root;
            for _ in 0..(max_log2 - level - 1) {
                w = w.square();
            }

            let size = 1usize << level;
            let mut table = Vec::with_capacity(size);
            let mut acc = Fp::<P>::one();
            for _ in 0..size {
                table.push(acc);
                acc *= w;
            }
            tables.push(table);
        }
        tables
    }

    #[inline]
    pub fn max_log2(&self) -> usize {
        self.max_log2
    }

    /// Primitive 2^max_log2-th root of unity.
    #[inline]
    pub fn generator(&self) -> Fp<P> {
        self.root
    }

    #[inline]
    pub fn generator_inverse(&self) -> Fp<P> {
        self.root_inverse
    }

    /// In-place forward transform: coefficients to evaluations over the
    /// 2^k-th roots of unity, in bit-reversed-input DIT order.
    ///
    /// Panics if the length is not a power of two or exceeds the domain.
    pub fn fft(&self, a: &mut [Fp<P>], n_threads: usize) {
        self.transform(a, n_threads, &self.round_roots);
    }

    /// In-place inverse transform, including the final scale by n^-1.
    pub fn ifft(&self, a: &mut [Fp<P>], n_threads: usize) {
        self.transform(a, n_threads, &self.inverse_round_roots);

        let n_inv = Fp::<P>::from_u64(a.len() as u64)
            .inverse()
            .expect("transform size is non-zero mod q");
        scale(a, n_inv, n_threads);
    }

    fn transform(&self, a: &mut [Fp<P>], n_threads: usize, tables: &[Vec<Fp<P>>]) {
        let n = a.len();
        if n <= 1 {
            assert_eq!(n, 1, "transform size must be a power of two");
            return;
        }
        assert!(n.is_power_of_two(), "transform size must be a power of two");
        let log2_n = n.trailing_zeros() as usize;
        assert!(
            log2_n <= self.max_log2,
            "transform size 2^{log2_n} exceeds domain size 2^{}",
            self.max_log2
        );
        let n_threads = if n < PARALLEL_MIN { 1 } else { n_threads.max(1) };

        bit_reverse(a, n_threads);

        for (level, twiddles) in tables.iter().enumerate().take(log2_n) {
            let half = 1usize << level;
            let block = half << 1;
            let blocks = n / block;

            if n_threads == 1 {
                for blk in a.chunks_mut(block) {
                    butterfly_block(blk, half, twiddles);
                }
            } else if blocks >= n_threads {
                // Early stages: many narrow blocks, hand each thread a
                // contiguous block-aligned run. Joining the scope is the
                // barrier before the next stage.
                let per_thread = blocks.div_ceil(n_threads);
                std::thread::scope(|s| {
                    for chunk in a.chunks_mut(block * per_thread) {
                        s.spawn(move || {
                            for blk in chunk.chunks_mut(block) {
                                butterfly_block(blk, half, twiddles);
                            }
                        });
                    }
                });
            } else {
                // Late stages: a few wide blocks, so split the butterfly
                // range inside each block instead. The two halves and the
                // twiddle table are chunked in lock-step.
                let span = half.div_ceil(n_threads);
                std::thread::scope(|s| {
                    for blk in a.chunks_mut(block) {
                        let (lo, hi) = blk.split_at_mut(half);
                        for ((lo_c, hi_c), tw_c) in lo
                            .chunks_mut(span)
                            .zip(hi.chunks_mut(span))
                            .zip(twiddles.chunks(span))
                        {
                            s.spawn(move || {
                                for j in 0..lo_c.len() {
                                    let t = hi_c[j] * tw_c[j];
                                    hi_c[j] = lo_c[j] - t;
                                    lo_c[j] += t;
                                }
                            });
                        }
                    }
                });
            }
        }
    }
}

/// All butterflies of one stage within a single 2*half block.
#[inline]
fn butterfly_block<P: FieldParams>(blk: &mut [Fp<P>], half: usize, twiddles: &[Fp<P>]) {
    let (lo, hi) = blk.split_at_mut(half);
    for j in 0..half {
        let t = hi[j] * twiddles[j];
        hi[j] = lo[j] - t;
        lo[j] += t;
    }
}

fn scale<P: FieldParams>(a: &mut [Fp<P>], factor: Fp<P>, n_threads: usize) {
    let n = a.len();
    if n_threads <= 1 || n < PARALLEL_MIN {
        for v in a.iter_mut() {
            *v *= factor;
        }
        return;
    }
    let chunk_len = n.div_ceil(n_threads);
    std::thread::scope(|s| {
        for chunk in a.chunks_mut(chunk_len) {
            s.spawn(move || {
                for v in chunk.iter_mut() {
                    *v *= factor;
                }
            });
        }
    });
}

/// Raw pointer handed across scoped threads during parallel bit-reversal.
/// Swap partners can land in another thread's index range, so the slice
/// cannot be partitioned; instead every pair (i, rev(i)) is swapped only
/// by the thread owning the smaller index, which makes all writes disjoint.
struct SharedSlice<T>(*mut T);

unsafe impl<T> Sync for SharedSlice<T> {}

/// In-place bit-reversal permutation of a power-of-two-length slice.
pub fn bit_reverse<P: FieldParams>(a: &mut [Fp<P>], n_threads: usize) {
    let n = a.len();
    debug_assert!(n.is_power_of_two());
    let bits = n.trailing_zeros();
    if bits == 0 {
        return;
    }
    let shift = usize::BITS - bits;

    if n_threads <= 1 || n < PARALLEL_MIN {
        for i in 0..n {
            let j = i.reverse_bits() >> shift;
            if i < j {
                a.swap(i, j);
            }
        }
        return;
    }

    let shared = SharedSlice(a.as_mut_ptr());
    std::thread::scope(|s| {
        for t in 0..n_threads {
            let shared = &shared;
            s.spawn(move || {
                let start = t * n / n_threads;
                let end = (t + 1) * n / n_threads;
                for i in start..end {
                    let j = i.reverse_bits() >> shift;
                    if i < j {
                        // i < j and i is in this thread's range, so no other
                        // thread touches either slot.
                        unsafe { std::ptr::swap(shared.0.add(i), shared.0.add(j)) };
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::fp::{Fr, FrParams};

    fn domain(max_log2: usize) -> FftDomain<FrParams> {
        FftDomain::new(max_log2)
    }

    /// O(n^2) evaluation at the powers of the primitive root.
    fn naive_dft(coeffs: &[Fr], root: Fr) -> Vec<Fr> {
        let n = coeffs.len();
        (0..n)
            .map(|i| {
                let x = root.pow(i as u64);
                let mut acc = Fr::zero();
                let mut xp = Fr::one();
                for &c in coeffs {
                    acc += c * xp;
                    xp *= x;
                }
                acc
            })
            .collect()
    }

    #[test]
    fn fr_two_adicity_is_28() {
        // 2^28 divides r - 1 for the BN254 scalar field; 2^29 does not.
        let order = Fr::modulus() - BigUint::one();
        assert_eq!(order.trailing_zeros(), Some(28));
    }

    #[test]
    #[should_panic(expected = "requested 2^29")]
    fn oversized_domain_panics() {
        domain(29);
    }

    #[test]
    fn generator_has_exact_order() {
        let d = domain(10);
        assert!(d.generator().pow(1 << 9) != Fr::one());
        assert_eq!(d.generator().pow(1 << 10), Fr::one());
    }

    #[test]
    fn generator_inverse_cancels() {
        let d = domain(10);
        assert_eq!(d.generator() * d.generator_inverse(), Fr::one());
    }

    #[test]
    fn fft_matches_naive_dft() {
        let d = domain(4);
        for log2_n in 0..=4usize {
            let n = 1usize << log2_n;
            let coeffs: Vec<Fr> = (0..n).map(|i| Fr::from_u64(i as u64 * 3 + 1)).collect();

            let root = if log2_n == 0 {
                Fr::one()
            } else {
                // primitive 2^log2_n-th root
                let mut w = d.generator();
                for _ in 0..(d.max_log2() - log2_n) {
                    w = w.square();
                }
                w
            };

            let mut a = coeffs.clone();
            d.fft(&mut a, 1);
            assert_eq!(a, naive_dft(&coeffs, root), "n = {n}");
        }
    }

    #[test]
    fn ifft_undoes_fft() {
        let d = domain(10);
        for log2_n in [0usize, 1, 2, 10] {
            let n = 1usize << log2_n;
            let original: Vec<Fr> = (0..n).map(|_| Fr::random()).collect();
            let mut a = original.clone();
            d.fft(&mut a, 1);
            d.ifft(&mut a, 1);
            assert_eq!(a, original, "n = {n}");
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        // PARALLEL_MIN elements, so the thread count is actually honoured
        let d = domain(14);
        let original: Vec<Fr> = (0..PARALLEL_MIN).map(|_| Fr::random()).collect();

        let mut seq = original.clone();
        d.fft(&mut seq, 1);

        let mut par = original;
        d.fft(&mut par, 4);

        assert_eq!(seq, par);
    }

    #[test]
    fn bit_reverse_is_an_involution() {
        let original: Vec<Fr> = (0..64u64).map(Fr::from_u64).collect();
        let mut a = original.clone();
        bit_reverse(&mut a, 1);
        assert_ne!(a, original);
        bit_reverse(&mut a, 1);
        assert_eq!(a, original);
    }

    #[test]
    fn parallel_bit_reverse_matches_sequential() {
        let n = PARALLEL_MIN;
        let original: Vec<Fr> = (0..n as u64).map(Fr::from_u64).collect();

        let mut seq = original.clone();
        bit_reverse(&mut seq, 1);

        let mut par = original;
        bit_reverse(&mut par, 4);

        assert_eq!(seq, par);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn non_power_of_two_panics() {
        let d = domain(4);
        let mut a = vec![Fr::one(); 3];
        d.fft(&mut a, 1);
    }

    #[test]
    #[should_panic(expected = "exceeds domain size")]
    fn oversized_transform_panics() {
        let d = domain(2);
        let mut a = vec![Fr::one(); 8];
        d.fft(&mut a, 1);
    }
}
