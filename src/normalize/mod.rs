//! Text normalization: the canonical token sequence every comparison works on.
//!
//! Pipeline: lowercase → split on non-word characters → drop stopwords → lemma table →
//! Porter stem. Output depends only on the input and [`LANGUAGE_RESOURCE_VERSION`].

pub mod resources;
pub mod stemmer;


pub use resources::{LANGUAGE_RESOURCE_VERSION, Language, UnsupportedLanguage};
pub use stemmer::stem;

use std::collections::HashSet;

/// Normalized tokens plus the text they came from (kept for quoting in feedback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    original: String,
    tokens: Vec<String>,
}

impl NormalizedText {
    /// Builds a value from already-normalized tokens.
    pub fn from_tokens<S: Into<String>>(original: S, tokens: Vec<String>) -> Self {
        Self {
            original: original.into(),
            tokens,
        }
    }

    /// Returns the text as it was submitted.
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the ordered normalized tokens.
    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns `true` if nothing survived normalization.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the set of distinct tokens.
    pub fn unique_tokens(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

/// Language-aware text normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    language: Language,
}

impl Normalizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Normalizes `text`. Empty or all-stopword input yields an empty token sequence.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let tokens = self.tokenize(text).collect();
        NormalizedText::from_tokens(text, tokens)
    }

    /// Yields normalized tokens without keeping the original text.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        split_words(text)
            .into_iter()
            .filter_map(move |word| self.normalize_word(&word))
    }

    fn normalize_word(&self, word: &str) -> Option<String> {
        if self.language.is_stopword(word) {
            return None;
        }

        let word = word.replace('\'', "");
        if word.is_empty() {
            return None;
        }

        let stemmed = stem(self.language.lemma(&word));
        (!stemmed.is_empty()).then_some(stemmed)
    }
}

/// Normalizes with the default (English) resources.
pub fn normalize(text: &str) -> NormalizedText {
    Normalizer::default().normalize(text)
}

fn split_words(text: &str) -> Vec<String> {
    let lowered: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect();

    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
