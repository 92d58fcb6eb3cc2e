//! Command-line interface for escriba
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Batch offline transcription with text preprocessing
#[derive(Parser, Debug)]
#[command(
    name = "escriba",
    version,
    about = "Batch offline transcription with text preprocessing"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source audio file to transcribe
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for intermediate audio chunks
    #[arg(long, value_name = "DIR")]
    pub chunk_dir: Option<PathBuf>,

    /// Directory the transcript files are written into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Whisper model file
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Language code for transcription and text processing. Examples: es, en, de
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Frequency dictionary for spelling correction (`word count` per line)
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Chunk duration (default: 5m). Examples: 30s, 5m, 1h30m
    #[arg(long, short = 'c', value_name = "DURATION", value_parser = parse_chunk_length_ms)]
    pub chunk_length: Option<u64>,

    /// Number of CPU threads for inference (default: auto)
    #[arg(long, short = 't', value_name = "THREADS")]
    pub threads: Option<usize>,
}

/// Parse a chunk duration string into milliseconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`30s`, `5m`, `2h`), and compound (`1h30m`).
fn parse_chunk_length_ms(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs * 1000);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_millis() as u64)
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
