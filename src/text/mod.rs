//! Text normalization and linguistic annotation.

pub mod annotator;
pub mod normalizer;
pub mod speller;

pub use annotator::{Annotator, Token};
pub use normalizer::Normalizer;
pub use speller::{NullSpellChecker, SpellChecker};
#[cfg(feature = "symspell")]
pub use speller::SymSpellChecker;
