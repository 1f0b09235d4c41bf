use std::{io::Read, path::Path};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    text_util::combined_text,
};

/// Column names the corpus table must provide.
pub mod columns {
    pub const TITLES: &str = "titles";
    pub const SUMMARIES: &str = "summaries";
    pub const TERMS: &str = "terms";
}

/// One row of the corpus. Its identity is its position in the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub summary: String,
    pub terms: String,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        terms: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            terms: terms.into(),
        }
    }

    /// Title and summary joined; the text that gets vectorized.
    pub fn text(&self) -> String {
        combined_text(&self.title, &self.summary)
    }
}

/// Load the corpus from a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Vec<Document>> {
    let file =
        std::fs::File::open(path).map_err(|source| Error::CorpusFile {
            path: path.to_path_buf(),
            source,
        })?;
    let documents = read_csv(file)?;
    tracing::debug!(
        path = %path.display(),
        documents = documents.len(),
        "loaded corpus"
    );
    Ok(documents)
}

/// Read the corpus from any CSV source.
///
/// The `titles`, `summaries` and `terms` columns are required; other columns
/// are ignored. Short rows and empty cells become empty strings so that no
/// row is dropped.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Document>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let position = |column: &'static str| {
        headers.iter().position(|h| h.trim() == column).ok_or_else(|| {
            Error::MissingColumn {
                column,
                found: headers.iter().collect::<Vec<_>>().join(", "),
            }
        })
    };
    let title_idx = position(columns::TITLES)?;
    let summary_idx = position(columns::SUMMARIES)?;
    let terms_idx = position(columns::TERMS)?;

    let mut documents = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        documents.push(Document {
            title: field(title_idx),
            summary: field(summary_idx),
            terms: field(terms_idx),
        });
    }

    if documents.is_empty() {
        return Err(Error::EmptyCorpus);
    }

    Ok(documents)
}
