use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use crate::{
    embedding::{Embedder, SparseVector},
    error::{Error, Result},
    text_util::analyze,
};

/// A fitted TF-IDF term-weighting model.
///
/// Dimensions are assigned to terms in lexicographic order, so fitting the
/// same corpus always yields the same vector space. Weights are raw term
/// counts scaled by the smoothed inverse document frequency
/// `ln((1 + n) / (1 + df)) + 1`.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, u32>,
    terms: Vec<String>,
    idf: Vec<f32>,
    num_documents: usize,
}

impl TfidfModel {
    /// Fit the model over a corpus of texts.
    pub fn fit<S: AsRef<str> + Sync>(texts: &[S]) -> Result<Self> {
        let analyzed: Vec<Vec<String>> =
            texts.par_iter().map(|t| analyze(t.as_ref())).collect();
        Self::fit_analyzed(&analyzed)
    }

    /// Fit the model and embed every text in one pass over the tokens.
    ///
    /// Returns the model and one vector per input text, in input order.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        texts: &[S],
    ) -> Result<(Self, Vec<SparseVector>)> {
        let analyzed: Vec<Vec<String>> =
            texts.par_iter().map(|t| analyze(t.as_ref())).collect();
        let model = Self::fit_analyzed(&analyzed)?;
        let vectors = analyzed
            .par_iter()
            .map(|tokens| model.vectorize_tokens(tokens))
            .collect();
        Ok((model, vectors))
    }

    fn fit_analyzed(analyzed: &[Vec<String>]) -> Result<Self> {
        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in analyzed {
            let mut seen: Vec<&str> =
                tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = analyzed.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut terms = Vec::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());

        for (dim, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), dim as u32);
            terms.push(term.to_string());
            idf.push(smoothed_idf(n, df as f64) as f32);
        }

        Ok(Self {
            vocabulary,
            terms,
            idf,
            num_documents: analyzed.len(),
        })
    }

    /// Number of distinct terms; the dimension of every vector.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents the model was fitted on.
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// Vocabulary terms in dimension order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_index(term).map(|dim| self.idf[dim as usize])
    }

    fn vectorize_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokens {
            if let Some(&dim) = self.vocabulary.get(token) {
                *counts.entry(dim).or_insert(0) += 1;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf as f32 * self.idf[dim as usize]))
            .collect();
        SparseVector::new(self.vocabulary_size(), entries)
    }
}

impl Embedder for TfidfModel {
    fn dimension(&self) -> usize {
        self.vocabulary_size()
    }

    fn embed(&self, text: &str) -> SparseVector {
        self.vectorize_tokens(&analyze(text))
    }
}

fn smoothed_idf(num_documents: f64, doc_freq: f64) -> f64 {
    ((1.0 + num_documents) / (1.0 + doc_freq)).ln() + 1.0
}
