//! Audio loading, resampling, and chunking.

pub mod chunker;
pub mod wav;

pub use chunker::{AudioSegment, Chunker};
pub use wav::WavAudio;
