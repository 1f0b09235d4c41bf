use rayon::prelude::*;

use crate::{
    corpus::Document,
    embedding::{Embedder, SparseVector},
    error::{Error, Result},
    tfidf::TfidfModel,
};

/// The immutable corpus index: documents, the fitted embedder, and one
/// vector per document.
///
/// Built once before serving and only read afterwards. Share it across
/// threads behind an `Arc`; no locking is needed.
#[derive(Debug)]
pub struct CorpusIndex<E: Embedder = TfidfModel> {
    documents: Vec<Document>,
    embedder: E,
    vectors: Vec<SparseVector>,
}

impl CorpusIndex<TfidfModel> {
    /// Fit a TF-IDF model over the documents' combined text and vectorize
    /// every document.
    pub fn build(documents: Vec<Document>) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let texts: Vec<String> =
            documents.par_iter().map(Document::text).collect();
        let (model, vectors) = TfidfModel::fit_transform(&texts)?;

        tracing::info!(
            documents = documents.len(),
            vocabulary = model.vocabulary_size(),
            "built corpus index"
        );

        Ok(Self {
            documents,
            embedder: model,
            vectors,
        })
    }
}

impl<E: Embedder> CorpusIndex<E> {
    /// Vectorize the documents with an already-configured embedder.
    pub fn with_embedder(documents: Vec<Document>, embedder: E) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let vectors = documents
            .par_iter()
            .map(|doc| embedder.embed(&doc.text()))
            .collect();

        Ok(Self {
            documents,
            embedder,
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Dimension of the shared vector space.
    pub fn dimension(&self) -> usize {
        self.embedder.dimension()
    }
}
