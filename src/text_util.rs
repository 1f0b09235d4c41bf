use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::is_stop_word;

/// Tokens are maximal runs of two or more letters, digits or underscores.
///
/// Combining marks are not word characters here, so a decomposed accent
/// (`e` followed by U+0301) ends the token instead of extending it.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}_]{2,}").expect("token pattern is a valid regex")
});

/// Lowercase `text` and split it into word tokens, keeping stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenize `text` and drop English stop words.
///
/// This is the single analysis step shared by corpus documents at build
/// time and queries at request time.
pub fn analyze(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// Join a document's title and summary into the text that gets vectorized.
pub fn combined_text(title: &str, summary: &str) -> String {
    format!("{title} {summary}")
}
