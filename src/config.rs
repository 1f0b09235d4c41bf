use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use axum::http::HeaderValue;

use crate::error::{Error, Result};

pub const CORPUS_ENV_VAR: &str = "DOCREC_CORPUS";
pub const BIND_ENV_VAR: &str = "DOCREC_BIND";
pub const ORIGIN_ENV_VAR: &str = "DOCREC_ALLOW_ORIGIN";

pub const DEFAULT_CORPUS: &str = "arxiv_data.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Resolve the corpus path from, in order of priority:
/// 1. An explicit path (from --corpus)
/// 2. The DOCREC_CORPUS environment variable
/// 3. `arxiv_data.csv` in the working directory
pub fn resolve_corpus(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Ok(val) = std::env::var(CORPUS_ENV_VAR) {
        PathBuf::from(val)
    } else {
        PathBuf::from(DEFAULT_CORPUS)
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub corpus: PathBuf,
    pub bind: SocketAddr,
    pub allow_origin: HeaderValue,
}

impl ServeConfig {
    /// Resolve each setting from an explicit value, then its environment
    /// variable, then the built-in default.
    pub fn resolve(
        corpus: Option<&Path>,
        bind: Option<&str>,
        allow_origin: Option<&str>,
    ) -> Result<Self> {
        let corpus = resolve_corpus(corpus);
        let bind = resolve_setting(bind, BIND_ENV_VAR, DEFAULT_BIND);
        let allow_origin =
            resolve_setting(allow_origin, ORIGIN_ENV_VAR, DEFAULT_ORIGIN);

        Ok(Self {
            corpus,
            bind: parse_bind(&bind)?,
            allow_origin: parse_origin(&allow_origin)?,
        })
    }
}

fn resolve_setting(explicit: Option<&str>, env_var: &str, default: &str) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bind(value: &str) -> Result<SocketAddr> {
    value.parse().map_err(|e| {
        Error::Config(format!("invalid bind address '{value}': {e}"))
    })
}

fn parse_origin(value: &str) -> Result<HeaderValue> {
    if value.trim().is_empty() || value == "*" {
        return Err(Error::Config(format!(
            "allowed origin must be a single concrete origin, got '{value}'"
        )));
    }
    HeaderValue::from_str(value).map_err(|e| {
        Error::Config(format!("invalid allowed origin '{value}': {e}"))
    })
}
