//! Dictionary-based spelling correction.
//!
//! The `SpellChecker` trait is the seam the normalizer corrects tokens
//! through; the SymSpell implementation loads a frequency dictionary at
//! startup and does edit-distance lookup per token.

use crate::error::Result;

#[cfg(feature = "symspell")]
use crate::error::EscribaError;
#[cfg(feature = "symspell")]
use std::path::Path;
#[cfg(feature = "symspell")]
use symspell::{SymSpell, UnicodeStringStrategy, Verbosity};

/// Trait for per-token spelling correction.
///
/// `suggest` returns the best correction for a single token, or `None` when
/// the checker has nothing to offer. Correction is best-effort; callers fall
/// back to the original token.
pub trait SpellChecker: Send + 'static {
    /// Best correction for `word`, or `None` when no suggestion exists.
    fn suggest(&self, word: &str) -> Option<String>;

    /// Return the name of this checker for logging.
    fn name(&self) -> &str;
}

/// Checker that never suggests anything.
///
/// Used when no dictionary is configured; every token passes through
/// unchanged.
pub struct NullSpellChecker;

impl SpellChecker for NullSpellChecker {
    fn suggest(&self, _word: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// SymSpell checker backed by a frequency dictionary.
#[cfg(feature = "symspell")]
pub struct SymSpellChecker {
    symspell: SymSpell<UnicodeStringStrategy>,
    language: String,
}

#[cfg(feature = "symspell")]
impl std::fmt::Debug for SymSpellChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymSpellChecker")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "symspell")]
impl SymSpellChecker {
    /// Create a new SymSpellChecker by loading a dictionary from file.
    ///
    /// The file should contain one entry per line: `word frequency`
    /// (whitespace-separated). Malformed lines are skipped.
    pub fn from_file(path: &Path, language: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EscribaError::Dictionary {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut symspell: SymSpell<UnicodeStringStrategy> = SymSpell::default();

        for line in content.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2
                && let Ok(freq) = parts[1].parse::<i64>()
            {
                symspell.load_dictionary_line(&format!("{} {}", parts[0], freq), 0, 1, " ");
            }
        }

        Ok(Self {
            symspell,
            language: language.to_string(),
        })
    }
}

#[cfg(feature = "symspell")]
impl SpellChecker for SymSpellChecker {
    fn suggest(&self, word: &str) -> Option<String> {
        let suggestions = self.symspell.lookup(word, Verbosity::Top, 2);
        suggestions.first().map(|s| s.term.clone())
    }

    fn name(&self) -> &str {
        match self.language.as_str() {
            "en" => "symspell-en",
            "de" => "symspell-de",
            "es" => "symspell-es",
            "fr" => "symspell-fr",
            "it" => "symspell-it",
            "pt" => "symspell-pt",
            "ru" => "symspell-ru",
            _ => "symspell",
        }
    }
}
