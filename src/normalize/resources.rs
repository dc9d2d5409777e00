//! Language resources (stopwords + lemma tables) used by the normalizer.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;

/// Bumped whenever a stopword list or lemma table changes, since normalization output
/// (and therefore every derived score) depends on it.
pub const LANGUAGE_RESOURCE_VERSION: u32 = 1;

/// Languages with bundled normalization resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
}

impl Language {
    /// Short code used in configuration.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
        }
    }

    pub(crate) fn is_stopword(&self, word: &str) -> bool {
        match self {
            Language::English => ENGLISH_STOPWORD_SET.contains(word),
        }
    }

    pub(crate) fn lemma<'a>(&self, word: &'a str) -> &'a str {
        match self {
            Language::English => ENGLISH_LEMMA_MAP.get(word).copied().unwrap_or(word),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Returned when a language code has no bundled resources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

static ENGLISH_STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

static ENGLISH_LEMMA_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENGLISH_LEMMAS.iter().copied().collect());

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

// Irregular inflections and nominalizations the stemmer cannot unify on its own.
const ENGLISH_LEMMAS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("analyses", "analysis"),
    ("hypotheses", "hypothesis"),
    ("theses", "thesis"),
    ("phenomena", "phenomenon"),
    ("criteria", "criterion"),
    ("nuclei", "nucleus"),
    ("bacteria", "bacterium"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("began", "begin"),
    ("begun", "begin"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("made", "make"),
    ("wrote", "write"),
    ("written", "write"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("saw", "see"),
    ("seen", "see"),
    ("knew", "know"),
    ("known", "know"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("thought", "think"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("caught", "catch"),
    ("taught", "teach"),
    ("found", "find"),
    ("held", "hold"),
    ("kept", "keep"),
    ("led", "lead"),
    ("paid", "pay"),
    ("said", "say"),
    ("sold", "sell"),
    ("told", "tell"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("division", "divide"),
    ("divisions", "divide"),
    ("decision", "decide"),
    ("decisions", "decide"),
    ("collision", "collide"),
    ("collisions", "collide"),
    ("production", "produce"),
    ("reproduction", "reproduce"),
    ("absorption", "absorb"),
    ("description", "describe"),
    ("solution", "solve"),
    ("solutions", "solve"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>(), Ok(Language::English));
        assert_eq!(" English ".parse::<Language>(), Ok(Language::English));
        assert_eq!(
            "klingon".parse::<Language>(),
            Err(UnsupportedLanguage("klingon".to_string()))
        );
    }

    #[test]
    fn test_stopwords_and_lemmas() {
        let lang = Language::English;
        assert!(lang.is_stopword("the"));
        assert!(lang.is_stopword("don't"));
        assert!(!lang.is_stopword("cell"));
        assert_eq!(lang.lemma("children"), "child");
        assert_eq!(lang.lemma("division"), "divide");
        assert_eq!(lang.lemma("mitosis"), "mitosis");
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Language::English.to_string(), "en");
    }
}
