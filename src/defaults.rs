//! Default configuration constants for escriba.
//!
//! Shared constants used across configuration types to keep the defaults in
//! one place.

/// Audio sample rate in Hz that chunks are written at and models consume.
///
/// 16kHz is the standard for speech recognition; all input audio is
/// downmixed and resampled to this rate before chunking.
pub const SAMPLE_RATE: u32 = 16000;

/// Default chunk duration in milliseconds (5 minutes).
///
/// Transcribing a multi-hour recording in one pass can need tens of GB of
/// memory; bounded chunks cap peak usage to one chunk's worth.
pub const CHUNK_LENGTH_MS: u64 = 5 * 60 * 1000;

/// Default language code for transcription and text processing.
pub const DEFAULT_LANGUAGE: &str = "es";

/// Language value that lets Whisper detect the spoken language automatically.
/// The annotator and speller always need a concrete language.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default source audio path.
pub const SOURCE_AUDIO: &str = "./audio.wav";

/// Default directory for persisted audio chunks.
pub const CHUNK_DIR: &str = "./audio_chunks";

/// File name prefix for persisted chunks (`chunk_<index>.wav`).
pub const CHUNK_FILE_PREFIX: &str = "chunk_";

/// Output file for the unmodified transcript.
pub const ORIGINAL_FILE: &str = "transcription_original.txt";

/// Output file for the normalized transcript.
pub const NORMALIZED_FILE: &str = "transcription_normalized.txt";

/// Output file for the lemmatized transcript.
pub const LEMMATIZED_FILE: &str = "transcription_lemmatized.txt";

/// Output file for the stop-word-filtered transcript.
pub const STOPWORDS_FILE: &str = "transcription_stopwords_removed.txt";

/// Output file for the transcript with all filters applied.
pub const ALL_FILTERS_FILE: &str = "transcription_all_filters.txt";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else if cfg!(feature = "hipblas") {
        "HipBLAS (AMD)"
    } else if cfg!(feature = "openblas") {
        "OpenBLAS"
    } else {
        "CPU"
    }
}
