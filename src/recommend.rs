use rayon::prelude::*;
use serde::Serialize;

use crate::{
    embedding::Embedder,
    error::{Error, Result},
    index::CorpusIndex,
    similarity::{Cosine, Similarity},
};

/// Default number of recommendations when the caller does not ask for one.
pub const DEFAULT_TOP_N: usize = 5;

/// A recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendParams {
    pub query: String,
    pub top_n: usize,
}

impl RecommendParams {
    pub fn new(query: impl Into<String>, top_n: usize) -> Self {
        Self {
            query: query.into(),
            top_n,
        }
    }
}

/// One ranked document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub score: f32,
    pub index: usize,
    pub title: String,
    pub summary: String,
    pub terms: String,
}

/// Rank the corpus against a query by cosine similarity.
pub fn recommend<E: Embedder>(
    index: &CorpusIndex<E>,
    params: &RecommendParams,
) -> Result<Vec<Recommendation>> {
    recommend_with(index, &Cosine, params)
}

/// Rank the corpus against a query.
///
/// 1. Embed the query with the index's fitted embedder
/// 2. Score every document vector
/// 3. Sort by score descending, breaking ties by corpus position
/// 4. Keep the first `top_n`, or the whole corpus if it is smaller
///
/// `top_n` of zero is rejected. An empty query is valid and scores 0
/// against every document.
pub fn recommend_with<E: Embedder, S: Similarity>(
    index: &CorpusIndex<E>,
    similarity: &S,
    params: &RecommendParams,
) -> Result<Vec<Recommendation>> {
    if params.top_n == 0 {
        return Err(Error::InvalidTopN(0));
    }

    let query_vec = index.embedder().embed(&params.query);
    tracing::debug!(
        query = %params.query,
        query_terms = query_vec.entries().len(),
        top_n = params.top_n,
        "ranking corpus"
    );

    let mut scored: Vec<(usize, f32)> = index
        .vectors()
        .par_iter()
        .map(|doc_vec| similarity.similarity(&query_vec, doc_vec))
        .enumerate()
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(scored
        .into_iter()
        .take(params.top_n)
        .enumerate()
        .filter_map(|(rank, (doc_idx, score))| {
            index.document(doc_idx).map(|doc| Recommendation {
                rank: rank + 1,
                score,
                index: doc_idx,
                title: doc.title.clone(),
                summary: doc.summary.clone(),
                terms: doc.terms.clone(),
            })
        })
        .collect())
}

/// Format results for human-readable terminal output.
pub fn format_human(results: &[Recommendation]) {
    if results.is_empty() {
        println!("No recommendations.");
        return;
    }

    for r in results {
        println!("{:>3}. [{:.3}] {}", r.rank, r.score, r.title);
        if !r.terms.is_empty() {
            println!("     {}", r.terms);
        }
    }
    println!("\n{} result(s)", results.len());
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    result_count: usize,
    results: &'a [Recommendation],
}

/// Format results as JSON output.
pub fn format_json(results: &[Recommendation], query: &str) -> Result<()> {
    let output = JsonOutput {
        query,
        result_count: results.len(),
        results,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
