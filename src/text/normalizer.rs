//! Transcript normalization.
//!
//! Lowercases the text, runs each whitespace-separated token through the
//! spell checker, rejoins with single spaces, collapses leftover double
//! spaces, and trims. Correction is best-effort: a token the checker has no
//! suggestion for passes through unchanged.

use crate::text::speller::SpellChecker;

/// Applies the fixed normalization sequence to raw transcript text.
pub struct Normalizer {
    speller: Box<dyn SpellChecker>,
}

impl Normalizer {
    pub fn new(speller: Box<dyn SpellChecker>) -> Self {
        Self { speller }
    }

    /// Name of the underlying spell checker, for logging.
    pub fn speller_name(&self) -> &str {
        self.speller.name()
    }

    /// Normalize `text`: lowercase, correct spelling per token, single-space.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        let corrected: Vec<String> = lowered
            .split_whitespace()
            .map(|token| self.correct_token(token))
            .collect();

        let mut joined = corrected.join(" ");
        // Suggestions may themselves contain whitespace; collapse any
        // double-space artifacts before trimming.
        while joined.contains("  ") {
            joined = joined.replace("  ", " ");
        }
        joined.trim().to_string()
    }

    /// Correction with an explicit fallback: `None` and empty suggestions
    /// both keep the original token.
    fn correct_token(&self, token: &str) -> String {
        match self.speller.suggest(token) {
            Some(suggestion) if !suggestion.is_empty() => suggestion,
            Some(_) | None => token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::speller::NullSpellChecker;
    use std::collections::HashMap;

    /// Table-driven checker for tests.
    struct TableSpellChecker {
        table: HashMap<String, String>,
    }

    impl TableSpellChecker {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }
    }

    impl SpellChecker for TableSpellChecker {
        fn suggest(&self, word: &str) -> Option<String> {
            self.table.get(word).cloned()
        }

        fn name(&self) -> &str {
            "table"
        }
    }

    fn passthrough_normalizer() -> Normalizer {
        Normalizer::new(Box::new(NullSpellChecker))
    }

    #[test]
    fn lowercases_text() {
        let normalizer = passthrough_normalizer();
        assert_eq!(normalizer.normalize("Hola Mundo"), "hola mundo");
    }

    #[test]
    fn collapses_extra_whitespace() {
        let normalizer = passthrough_normalizer();
        assert_eq!(normalizer.normalize("hola   mundo  otra\tvez"), "hola mundo otra vez");
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        let normalizer = passthrough_normalizer();
        assert_eq!(normalizer.normalize("  hola mundo  "), "hola mundo");
    }

    #[test]
    fn corrects_misspelled_tokens_from_dictionary() {
        let normalizer =
            Normalizer::new(Box::new(TableSpellChecker::new(&[("hóla", "hola")])));
        // Accent corrected, double space collapsed, case folded
        assert_eq!(normalizer.normalize("Hóla  mundo"), "hola mundo");
    }

    #[test]
    fn tokens_without_suggestions_pass_through() {
        let normalizer =
            Normalizer::new(Box::new(TableSpellChecker::new(&[("hóla", "hola")])));
        assert_eq!(
            normalizer.normalize("hóla tensorflow"),
            "hola tensorflow",
            "Unknown tokens (proper nouns, domain terms) must survive"
        );
    }

    #[test]
    fn empty_suggestion_keeps_original_token() {
        // A corrector returning an empty string must not blank the token
        let normalizer = Normalizer::new(Box::new(TableSpellChecker::new(&[("hola", "")])));
        assert_eq!(normalizer.normalize("hola mundo"), "hola mundo");
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizer =
            Normalizer::new(Box::new(TableSpellChecker::new(&[("hóla", "hola")])));
        let once = normalizer.normalize("Hóla  Mundo grande");
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let normalizer = passthrough_normalizer();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   "), "");
    }

    #[test]
    fn suggestion_containing_spaces_is_collapsed() {
        // Compound suggestions must not introduce double spaces
        let normalizer =
            Normalizer::new(Box::new(TableSpellChecker::new(&[("holamundo", "hola  mundo")])));
        assert_eq!(normalizer.normalize("holamundo"), "hola mundo");
    }

    #[test]
    fn speller_name_is_exposed() {
        let normalizer = passthrough_normalizer();
        assert_eq!(normalizer.speller_name(), "null");
    }
}
