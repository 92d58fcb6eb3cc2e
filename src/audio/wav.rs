//! WAV decoding and encoding.
//!
//! Input files of arbitrary sample rate and channel count are accepted and
//! converted to 16kHz mono, the format chunks are persisted in and the
//! transcriber consumes.

use crate::defaults::SAMPLE_RATE;
use crate::error::{EscribaError, Result};
use std::io::Read;
use std::path::Path;

/// A decoded waveform: 16-bit PCM at 16kHz mono.
pub struct WavAudio {
    samples: Vec<i16>,
}

impl WavAudio {
    /// Load a WAV file from disk.
    ///
    /// Fails fast if the file is missing or not parseable, so the pipeline
    /// aborts before any output is produced.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| EscribaError::AudioRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(Box::new(file)).map_err(|e| match e {
            EscribaError::AudioRead { message, .. } => EscribaError::AudioRead {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Create from any reader (for testing/flexibility).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| EscribaError::AudioRead {
                path: "<reader>".to_string(),
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        let source_rate = spec.sample_rate;
        let source_channels = spec.channels;

        // Read all samples from the WAV file
        let raw_samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| EscribaError::AudioRead {
                path: "<reader>".to_string(),
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Convert to mono if stereo
        let mono_samples = if source_channels == 2 {
            raw_samples
                .chunks_exact(2)
                .map(|chunk| {
                    let left = chunk[0] as i32;
                    let right = chunk[1] as i32;
                    ((left + right) / 2) as i16
                })
                .collect()
        } else {
            raw_samples
        };

        // Resample to 16kHz if needed
        let samples = if source_rate != SAMPLE_RATE {
            resample(&mono_samples, source_rate, SAMPLE_RATE)
        } else {
            mono_samples
        };

        Ok(Self { samples })
    }

    /// Borrow the decoded samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the waveform and return all samples as a single buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / SAMPLE_RATE as u64
    }
}

/// Write samples as a 16kHz mono 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| EscribaError::ChunkWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| EscribaError::ChunkWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
    }
    writer.finalize().map_err(|e| EscribaError::ChunkWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
