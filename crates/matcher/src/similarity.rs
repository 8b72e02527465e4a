//! Vector math for cosine scoring. All accumulation is in `f64`.

use crate::types::MatchError;

/// Chunk width for the dot/norm loops; keeps the inner loop auto-vectorizable.
const CHUNK: usize = 8;

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    let mut chunks_a = a.chunks_exact(CHUNK);
    let mut chunks_b = b.chunks_exact(CHUNK);
    let mut acc = [0.0f64; CHUNK];
    for (ca, cb) in (&mut chunks_a).zip(&mut chunks_b) {
        for i in 0..CHUNK {
            acc[i] += ca[i] * cb[i];
        }
    }
    let tail: f64 = chunks_a
        .remainder()
        .iter()
        .zip(chunks_b.remainder())
        .map(|(x, y)| x * y)
        .sum();
    acc.iter().sum::<f64>() + tail
}

/// Norms inside this range square and multiply without overflow or underflow.
const SAFE_NORM: std::ops::RangeInclusive<f64> = 1e-140..=1e140;

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

/// Euclidean norm. Vectors with very large or very small components are
/// rescaled by their largest component before squaring.
#[inline]
pub fn magnitude(v: &[f64]) -> f64 {
    let norm = dot(v, v).sqrt();
    if SAFE_NORM.contains(&norm) {
        return norm;
    }
    let scale = max_abs(v);
    if scale == 0.0 {
        return 0.0;
    }
    let sum: f64 = v.iter().map(|x| (x / scale) * (x / scale)).sum();
    scale * sum.sqrt()
}

/// Cosine of the vectors after scaling each to a largest component of 1.
fn scaled_cosine(a: &[f64], b: &[f64]) -> f64 {
    let (sa, sb) = (max_abs(a), max_abs(b));
    let (mut ab, mut aa, mut bb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / sa, y / sb);
        ab += x * y;
        aa += x * x;
        bb += y * y;
    }
    ab / (aa.sqrt() * bb.sqrt())
}

/// `dot(a, b) / (|a| * |b|)`, or `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(cosine_with_norm(a, magnitude(a), b))
}

/// Cosine against a query whose magnitude is already known. Lengths must match.
#[inline]
pub(crate) fn cosine_with_norm(query: &[f64], query_norm: f64, candidate: &[f64]) -> f64 {
    let candidate_norm = magnitude(candidate);
    if query_norm == 0.0 || candidate_norm == 0.0 {
        return 0.0;
    }
    if SAFE_NORM.contains(&query_norm) && SAFE_NORM.contains(&candidate_norm) {
        return dot(query, candidate) / (query_norm * candidate_norm);
    }
    scaled_cosine(query, candidate)
}
