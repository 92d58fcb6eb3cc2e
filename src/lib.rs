//! escriba - Batch offline transcription with text preprocessing
//!
//! Splits a long recording into fixed-length chunks, transcribes each with
//! Whisper, and writes five parallel transcript files: original, normalized,
//! lemmatized, stop-words-removed, and all filters combined.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stt;
pub mod text;

// Core traits (audio → text → views)
pub use stt::transcriber::{MockTranscriber, Transcriber};
pub use text::speller::{NullSpellChecker, SpellChecker};

// Pipeline
pub use pipeline::{Pipeline, PipelineSummary, TranscriptViews};

// Components
pub use audio::chunker::{AudioSegment, Chunker};
pub use report::{ReportWriter, TranscriptVariant};
pub use text::annotator::Annotator;
pub use text::normalizer::Normalizer;

// Error handling
pub use error::{EscribaError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
