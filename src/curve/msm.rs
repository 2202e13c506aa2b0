//! Multi-scalar multiplication via Pippenger's bucket method
//!
//! Computes sum(scalar_i * point_i) by slicing every scalar into c-bit
//! windows. Each window position gets 2^c - 1 buckets; every point is
//! dropped into the bucket named by its scalar chunk, buckets are folded
//! with a weighted running sum, and window results are combined from the
//! most significant window down with c doublings in between.
//!
//! Window sums are independent and computed in parallel under the
//! `parallel` feature; the final combine is inherently sequential.

use bitvec::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::curve::{Affine, CurveParams, Projective};

/// Scalars are consumed as 256-bit little-endian byte strings, matching
/// the serialized form of an Fr element.
pub const SCALAR_BYTES: usize = 32;

/// Window width in bits as a function of the input size.
fn window_bits(n: usize) -> usize {
    if n < 32 {
        3
    } else {
        // ~0.69 * log2(n) + 2 balances bucket count against addition count
        (n.ilog2() as usize * 69) / 100 + 2
    }
}

/// Extract the c-bit chunk of `scalar` starting at `bit_offset`.
fn scalar_chunk(scalar: &[u8; SCALAR_BYTES], bit_offset: usize, c: usize) -> usize {
    let mut chunk = 0usize;
    for i in 0..c {
        let bit = bit_offset + i;
        if bit >= SCALAR_BYTES * 8 {
            break;
        }
        chunk |= (((scalar[bit / 8] >> (bit % 8)) & 1) as usize) << i;
    }
    chunk
}

/// Accumulate one window position: bucket each point by its scalar chunk,
/// then fold buckets by weight.
///
/// The weighted sum sum(k * bucket_k) is computed as a running suffix sum:
/// walking k from the top bucket down, `running` accumulates the buckets
/// seen so far and is added into the total once per step, so bucket k is
/// counted exactly k times without any scalar multiplication.
fn window_sum<C: CurveParams>(
    points: &[Affine<C>],
    scalars: &[[u8; SCALAR_BYTES]],
    bit_offset: usize,
    c: usize,
) -> Projective<C> {
    let n_buckets = (1usize << c) - 1;
    let mut buckets = vec![Projective::<C>::identity(); n_buckets];
    let mut occupied = bitvec![0; n_buckets];

    for (point, scalar) in points.iter().zip(scalars.iter()) {
        let chunk = scalar_chunk(scalar, bit_offset, c);
        // A zero chunk contributes to no bucket.
        if chunk == 0 {
            continue;
        }
        let idx = chunk - 1;
        buckets[idx] = buckets[idx].add_mixed(point);
        occupied.set(idx, true);
    }

    let mut running = Projective::<C>::identity();
    let mut total = Projective::<C>::identity();
    for k in (0..n_buckets).rev() {
        if occupied[k] {
            running += buckets[k];
        }
        total += running;
    }
    total
}

/// Multi-scalar multiplication: sum(scalar_i * point_i).
///
/// Empty input yields the point at infinity; a single pair degenerates to
/// one scalar multiplication.
pub fn msm<C: CurveParams>(
    points: &[Affine<C>],
    scalars: &[[u8; SCALAR_BYTES]],
) -> Projective<C> {
    assert_eq!(
        points.len(),
        scalars.len(),
        "points and scalars must pair up"
    );

    let n = points.len();
    if n == 0 {
        return Projective::identity();
    }
    if n == 1 {
        return Projective::from_affine(&points[0]).mul_scalar(&scalars[0]);
    }

    let c = window_bits(n);
    let n_windows = (SCALAR_BYTES * 8 + c - 1) / c;

    #[cfg(feature = "parallel")]
    let window_sums: Vec<Projective<C>> = (0..n_windows)
        .into_par_iter()
        .map(|w| window_sum(points, scalars, w * c, c))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let window_sums: Vec<Projective<C>> = (0..n_windows)
        .map(|w| window_sum(points, scalars, w * c, c))
        .collect();

    // Combine MSB-first: c doublings shift the accumulator one window.
    // Strictly sequential; each window depends on the one above it.
    let mut acc = Projective::<C>::identity();
    for sum in window_sums.iter().rev() {
        for _ in 0..c {
            acc = acc.double();
        }
        acc += *sum;
    }
    acc
}
