/// A fixed-dimension vector stored as sorted `(dimension, weight)` pairs.
///
/// The L2 norm is computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dimension: usize,
    entries: Vec<(u32, f32)>,
    norm: f32,
}

impl SparseVector {
    /// Build a vector from `(dimension, weight)` pairs.
    ///
    /// Entries are sorted by dimension, duplicate dimensions are summed, zero
    /// weights are dropped, and entries outside `dimension` are discarded.
    pub fn new(dimension: usize, mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(idx, weight)| {
            (idx as usize) < dimension && weight != 0.0
        });
        entries.sort_by_key(|&(idx, _)| idx);

        let mut merged: Vec<(u32, f32)> = Vec::with_capacity(entries.len());
        for (idx, weight) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == idx => *acc += weight,
                _ => merged.push((idx, weight)),
            }
        }

        let norm = merged
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt();

        Self {
            dimension,
            entries: merged,
            norm,
        }
    }

    /// The all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
            norm: 0.0,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn norm(&self) -> f32 {
        self.norm
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight stored at `idx`, or 0 when absent.
    pub fn get(&self, idx: u32) -> f32 {
        self.entries
            .binary_search_by_key(&idx, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product of two sparse vectors via a merge over sorted entries.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let (a, b) = (&self.entries, &other.entries);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Maps text into a fixed-length vector space.
///
/// Implementations must be pure: embedding the same text twice yields the
/// same vector, and embedding never changes the embedder.
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed `text`. Terms the embedder does not know contribute nothing.
    fn embed(&self, text: &str) -> SparseVector;
}
