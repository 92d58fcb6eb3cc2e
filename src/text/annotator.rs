//! Linguistic annotation: per-token base forms and stop-word flags.
//!
//! Wraps the Snowball stemming pipeline and the per-language stop-word
//! lists behind one annotation pass. Tokens are whitespace-separated;
//! surrounding punctuation is ignored for stemming and stop-word lookup but
//! preserved in the surface form.

use crate::error::{EscribaError, Result};
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// One annotated token. Ephemeral: produced per transcript string and only
/// aggregated back into space-joined views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appeared in the input.
    pub text: String,
    /// Base form of the word.
    pub lemma: String,
    /// Whether the word is a stop word in the configured language.
    pub is_stop: bool,
}

/// Language-keyed annotation pipeline.
///
/// Deterministic: identical input text yields identical tokens.
pub struct Annotator {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
    language: String,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("language", &self.language)
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

impl Annotator {
    /// Create an annotator for a language code.
    ///
    /// Supported: es, en, de, fr, it, pt, ru. Anything else (including
    /// "auto") is a configuration error; annotation always needs a
    /// concrete language.
    pub fn new(language: &str) -> Result<Self> {
        let (algorithm, list) = match language {
            "es" => (Algorithm::Spanish, stop_words::LANGUAGE::Spanish),
            "en" => (Algorithm::English, stop_words::LANGUAGE::English),
            "de" => (Algorithm::German, stop_words::LANGUAGE::German),
            "fr" => (Algorithm::French, stop_words::LANGUAGE::French),
            "it" => (Algorithm::Italian, stop_words::LANGUAGE::Italian),
            "pt" => (Algorithm::Portuguese, stop_words::LANGUAGE::Portuguese),
            "ru" => (Algorithm::Russian, stop_words::LANGUAGE::Russian),
            other => {
                return Err(EscribaError::UnsupportedLanguage {
                    language: other.to_string(),
                });
            }
        };

        Ok(Self {
            stemmer: Stemmer::create(algorithm),
            stop_words: stop_words::get(list).into_iter().collect(),
            language: language.to_string(),
        })
    }

    /// The configured language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Annotate `text`: one token per whitespace-separated word, in order,
    /// none dropped.
    pub fn annotate(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .map(|word| {
                let core = word
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                let (lemma, is_stop) = if core.is_empty() {
                    // Pure punctuation token; nothing to stem or match
                    (word.to_string(), false)
                } else {
                    (
                        self.stemmer.stem(&core).into_owned(),
                        self.stop_words.contains(&core),
                    )
                };
                Token {
                    text: word.to_string(),
                    lemma,
                    is_stop,
                }
            })
            .collect()
    }
}

/// Space-joined base forms of all tokens, in order, none dropped.
pub fn lemma_view(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-joined surface forms of the non-stop tokens, in original order.
pub fn content_word_view(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_stop)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-joined base forms of the non-stop tokens, in original order.
pub fn filtered_lemma_view(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_stop)
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
