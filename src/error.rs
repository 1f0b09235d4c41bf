pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot open corpus file {}: {source}", .path.display())]
    CorpusFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("corpus is missing required column '{column}' (found: {found})")]
    MissingColumn { column: &'static str, found: String },

    #[error("corpus contains no documents")]
    EmptyCorpus,

    #[error(
        "corpus vocabulary is empty; every document consists of stop words or no tokens"
    )]
    EmptyVocabulary,

    #[error("top_n must be a positive integer, got {0}")]
    InvalidTopN(i64),
}
