use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub text: TextConfig,
    pub output: OutputConfig,
}

/// Source audio and chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Path to the source recording.
    pub source: PathBuf,
    /// Directory where chunk files are written.
    pub chunk_dir: PathBuf,
    /// Chunk duration in milliseconds.
    pub chunk_length_ms: u64,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Path to the Whisper model file.
    pub model: PathBuf,
    /// Language code for transcription (e.g. "es", "en", or "auto").
    pub language: String,
    /// Number of inference threads (None = auto-detect).
    pub threads: Option<usize>,
}

/// Text processing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Frequency dictionary for spelling correction (`word count` per line).
    /// When unset, normalization skips correction and tokens pass through.
    pub dictionary: Option<PathBuf>,
    /// Language code for the annotator and speller (must be concrete).
    pub language: String,
}

/// Transcript output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the five transcript files are written into.
    pub dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(defaults::SOURCE_AUDIO),
            chunk_dir: PathBuf::from(defaults::CHUNK_DIR),
            chunk_length_ms: defaults::CHUNK_LENGTH_MS,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/ggml-base.bin"),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - ESCRIBA_MODEL → stt.model
    /// - ESCRIBA_LANGUAGE → stt.language and text.language
    /// - ESCRIBA_DICTIONARY → text.dictionary
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("ESCRIBA_MODEL")
            && !model.is_empty()
        {
            self.stt.model = PathBuf::from(model);
        }

        if let Ok(language) = std::env::var("ESCRIBA_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language.clone();
            self.text.language = language;
        }

        if let Ok(dictionary) = std::env::var("ESCRIBA_DICTIONARY")
            && !dictionary.is_empty()
        {
            self.text.dictionary = Some(PathBuf::from(dictionary));
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/escriba/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("escriba")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_escriba_env() {
        remove_env("ESCRIBA_MODEL");
        remove_env("ESCRIBA_LANGUAGE");
        remove_env("ESCRIBA_DICTIONARY");
    }

    #[test]
    fn default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.audio.source, PathBuf::from("./audio.wav"));
        assert_eq!(config.audio.chunk_dir, PathBuf::from("./audio_chunks"));
        assert_eq!(config.audio.chunk_length_ms, 300_000);

        assert_eq!(config.stt.model, PathBuf::from("models/ggml-base.bin"));
        assert_eq!(config.stt.language, "es");
        assert_eq!(config.stt.threads, None);

        assert_eq!(config.text.dictionary, None);
        assert_eq!(config.text.language, "es");

        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn load_from_toml_file() {
        let toml_content = r#"
            [audio]
            source = "/data/lecture.wav"
            chunk_dir = "/tmp/chunks"
            chunk_length_ms = 60000

            [stt]
            model = "/models/ggml-small.bin"
            language = "en"
            threads = 4

            [text]
            dictionary = "/data/en-words.txt"
            language = "en"

            [output]
            dir = "/data/out"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.audio.source, PathBuf::from("/data/lecture.wav"));
        assert_eq!(config.audio.chunk_dir, PathBuf::from("/tmp/chunks"));
        assert_eq!(config.audio.chunk_length_ms, 60_000);

        assert_eq!(config.stt.model, PathBuf::from("/models/ggml-small.bin"));
        assert_eq!(config.stt.language, "en");
        assert_eq!(config.stt.threads, Some(4));

        assert_eq!(config.text.dictionary, Some(PathBuf::from("/data/en-words.txt")));
        assert_eq!(config.text.language, "en");

        assert_eq!(config.output.dir, PathBuf::from("/data/out"));
    }

    #[test]
    fn load_partial_config_uses_defaults() {
        let toml_content = r#"
            [stt]
            language = "de"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        // Only stt.language should be overridden
        assert_eq!(config.stt.language, "de");

        // Everything else should be defaults
        assert_eq!(config.audio.chunk_length_ms, 300_000);
        assert_eq!(config.stt.model, PathBuf::from("models/ggml-base.bin"));
        assert_eq!(config.text.language, "es");
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"audio = not valid toml").unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn load_or_default_missing_file_gives_defaults() {
        let config = Config::load_or_default(Path::new("/nonexistent/escriba.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_invalid_toml_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[[[[").unwrap();

        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn env_override_model() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_escriba_env();

        set_env("ESCRIBA_MODEL", "/models/ggml-tiny.bin");
        let config = Config::default().with_env_overrides();
        clear_escriba_env();

        assert_eq!(config.stt.model, PathBuf::from("/models/ggml-tiny.bin"));
    }

    #[test]
    fn env_override_language_sets_both() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_escriba_env();

        set_env("ESCRIBA_LANGUAGE", "en");
        let config = Config::default().with_env_overrides();
        clear_escriba_env();

        assert_eq!(config.stt.language, "en");
        assert_eq!(config.text.language, "en");
    }

    #[test]
    fn env_override_dictionary() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_escriba_env();

        set_env("ESCRIBA_DICTIONARY", "/data/es-words.txt");
        let config = Config::default().with_env_overrides();
        clear_escriba_env();

        assert_eq!(config.text.dictionary, Some(PathBuf::from("/data/es-words.txt")));
    }

    #[test]
    fn env_override_empty_values_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_escriba_env();

        set_env("ESCRIBA_MODEL", "");
        set_env("ESCRIBA_LANGUAGE", "");
        let config = Config::default().with_env_overrides();
        clear_escriba_env();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
