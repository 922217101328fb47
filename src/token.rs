//! Word tokenization shared by the fingerprint layer.
//!
//! The tokenizer is a pure function of `(text, options)`: no I/O, no locale
//! dependence, no global state. Fingerprints are only reproducible if the
//! token stream is, so any change to splitting or filtering behavior here is
//! a fingerprint-breaking change.

use serde::{Deserialize, Serialize};

/// A small English stopword set for callers that want topical tokens only.
///
/// Fingerprinting does **not** filter stopwords by default; stopword removal
/// is opt-in for consumers such as keyword extraction.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "if", "in", "is", "it", "its", "not", "of", "on", "or", "she", "that", "the",
    "their", "they", "this", "to", "was", "were", "will", "with",
];

/// Options controlling tokenization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Minimum token length in characters; shorter tokens are dropped.
    pub min_length: usize,
    /// Drop tokens found in the built-in English stopword set.
    pub remove_stopwords: bool,
    /// Lowercase tokens before filtering.
    pub lowercase: bool,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            min_length: 2,
            remove_stopwords: false,
            lowercase: true,
        }
    }
}

impl TokenizeOptions {
    /// Set the minimum token length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Enable or disable stopword removal.
    pub fn with_stopwords_removed(mut self, remove_stopwords: bool) -> Self {
        self.remove_stopwords = remove_stopwords;
        self
    }
}

/// Split `text` into word tokens at non-alphanumeric boundaries.
///
/// Tokens are emitted in their original order. With default options the
/// output is lowercase words of at least two characters, which is the token
/// contract the fingerprint generator relies on.
pub fn tokenize(text: &str, opts: &TokenizeOptions) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if opts.lowercase {
                current.extend(ch.to_lowercase());
            } else {
                current.push(ch);
            }
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current), opts);
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current, opts);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String, opts: &TokenizeOptions) {
    if token.chars().count() < opts.min_length {
        return;
    }
    if opts.remove_stopwords && STOPWORDS.contains(&token.as_str()) {
        return;
    }
    tokens.push(token);
}
