//! docrec - recommend related documents from a fixed corpus by TF-IDF
//! cosine similarity.
//!
//! A corpus CSV (`titles`, `summaries`, `terms`) is loaded once, a TF-IDF
//! model is fitted over each row's title and summary, and queries are ranked
//! against the resulting document vectors. The index is immutable after it
//! is built and can be shared across threads without locking.
//!
//! # Quick start
//!
//! ```
//! use docrec::{CorpusIndex, Document};
//! use docrec::recommend::{self, RecommendParams};
//!
//! let index = CorpusIndex::build(vec![
//!     Document::new("Neural Nets", "deep learning basics", "cs.LG"),
//!     Document::new("Ocean Tides", "tidal patterns", "physics.ao-ph"),
//! ])
//! .unwrap();
//!
//! let params = RecommendParams::new("deep learning", 1);
//! let results = recommend::recommend(&index, &params).unwrap();
//! assert_eq!(results[0].title, "Neural Nets");
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod recommend;
pub mod server;
pub mod similarity;
pub mod stopwords;
pub mod text_util;
pub mod tfidf;

pub use corpus::Document;
pub use embedding::{Embedder, SparseVector};
pub use error::{Error, Result};
pub use index::CorpusIndex;
pub use similarity::{Cosine, Similarity};
pub use tfidf::TfidfModel;
