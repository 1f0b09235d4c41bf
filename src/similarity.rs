use crate::embedding::SparseVector;

/// Scores how close two vectors are. Higher means more similar.
pub trait Similarity: Send + Sync {
    fn similarity(&self, query: &SparseVector, document: &SparseVector) -> f32;
}

/// Cosine similarity over cached vector norms.
///
/// A zero vector on either side scores 0 against everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Similarity for Cosine {
    fn similarity(&self, query: &SparseVector, document: &SparseVector) -> f32 {
        cosine(query, document)
    }
}

/// Compute the cosine of the angle between `a` and `b`, clamped to [-1, 1].
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}
