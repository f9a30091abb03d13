//! All-pairs cosine similarity over fixed-dimension vectors.
//!
//! Each vector is scaled to unit length, then every cell is the dot product
//! of two scaled vectors. A vector with zero norm is left unscaled (its norm
//! is taken as 1), so its similarity to anything is 0 rather than NaN.

use rayon::prelude::*;

/// Dense, row-major N×N similarity matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
}

/// Scale a vector to unit Euclidean length. Zero vectors come back unchanged.
pub fn unit_scaled<const D: usize>(v: &[f64; D]) -> [f64; D] {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm = if norm == 0.0 { 1.0 } else { norm };
    let mut out = [0.0; D];
    for (o, x) in out.iter_mut().zip(v.iter()) {
        *o = x / norm;
    }
    out
}

fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity of two vectors under the zero-norm rule above.
pub fn cosine_similarity<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    dot(&unit_scaled(a), &unit_scaled(b))
}

/// Compute the full similarity matrix.
///
/// Rows are filled in parallel. Every cell is computed on its own with the
/// same summation order, so `sim[i][j] == sim[j][i]` exactly and the result
/// does not depend on the number of workers. Values are not clamped.
pub fn cosine_similarity_matrix<const D: usize>(vectors: &[[f64; D]]) -> SimilarityMatrix {
    let n = vectors.len();
    if n == 0 {
        return SimilarityMatrix { n, values: Vec::new() };
    }

    let scaled: Vec<[f64; D]> = vectors.par_iter().map(|v| unit_scaled(v)).collect();

    let mut values = vec![0.0; n * n];
    values.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        let a = &scaled[i];
        for (cell, b) in row.iter_mut().zip(scaled.iter()) {
            *cell = dot(a, b);
        }
    });

    SimilarityMatrix { n, values }
}
