//! Fixed-duration audio chunking.
//!
//! Splits a waveform into contiguous, non-overlapping segments of a nominal
//! duration and persists each one as `chunk_<index>.wav` in the chunk
//! directory. The final segment may be shorter than the nominal duration.
//! Chunk files are intermediate artifacts and are left on disk after a run.

use crate::audio::wav::write_wav;
use crate::defaults::{self, CHUNK_FILE_PREFIX};
use crate::error::{EscribaError, Result};
use std::path::PathBuf;

/// A bounded time-slice of the source waveform, persisted as a WAV file.
///
/// Immutable once created; the index defines output ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// 0-based position in the source recording.
    pub index: usize,
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive).
    pub end_ms: u64,
    /// Backing file on disk.
    pub path: PathBuf,
}

/// Splits a waveform into fixed-duration segments.
pub struct Chunker {
    chunk_dir: PathBuf,
    chunk_length_ms: u64,
    sample_rate: u32,
}

impl Chunker {
    /// Create a chunker writing into `chunk_dir` (created on demand).
    pub fn new(chunk_dir: impl Into<PathBuf>, chunk_length_ms: u64) -> Self {
        Self {
            chunk_dir: chunk_dir.into(),
            chunk_length_ms,
            sample_rate: defaults::SAMPLE_RATE,
        }
    }

    /// Override the sample rate used for duration arithmetic.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Number of samples per nominal chunk.
    fn samples_per_chunk(&self) -> usize {
        (self.chunk_length_ms * self.sample_rate as u64 / 1000) as usize
    }

    /// Number of segments a waveform of `total_samples` splits into.
    pub fn segment_count(&self, total_samples: usize) -> usize {
        total_samples.div_ceil(self.samples_per_chunk().max(1))
    }

    /// Split `samples` into segments and persist each as a WAV file.
    ///
    /// Returns the ordered segment list. An empty waveform yields an empty
    /// list and no files.
    pub fn split(&self, samples: &[i16]) -> Result<Vec<AudioSegment>> {
        if self.chunk_length_ms == 0 {
            return Err(EscribaError::ConfigInvalidValue {
                key: "audio.chunk_length_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }

        std::fs::create_dir_all(&self.chunk_dir)?;

        // A sub-millisecond-per-sample configuration still yields 1-sample chunks
        let per_chunk = self.samples_per_chunk().max(1);
        let mut segments = Vec::with_capacity(self.segment_count(samples.len()));

        for (index, slice) in samples.chunks(per_chunk).enumerate() {
            let path = self
                .chunk_dir
                .join(format!("{CHUNK_FILE_PREFIX}{index}.wav"));
            write_wav(&path, slice)?;

            let start_ms = index as u64 * self.chunk_length_ms;
            let end_ms = start_ms + slice.len() as u64 * 1000 / self.sample_rate as u64;
            segments.push(AudioSegment {
                index,
                start_ms,
                end_ms,
                path,
            });
        }

        Ok(segments)
    }
}
