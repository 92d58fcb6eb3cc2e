use anyhow::Result;
use clap::{CommandFactory, Parser};
use escriba::cli::{Cli, Commands};
use escriba::config::Config;
use escriba::defaults;
use escriba::pipeline::Pipeline;
use escriba::stt::whisper::{WhisperConfig, WhisperTranscriber};
use escriba::text::annotator::Annotator;
use escriba::text::normalizer::Normalizer;
use escriba::text::speller::{NullSpellChecker, SpellChecker};
use owo_colors::OwoColorize;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            run_pipeline(&cli)?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "escriba", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/escriba/config.toml)
/// 3. Built-in defaults
/// Environment variables override the file; CLI flags override everything.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = cli.config.as_deref() {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    }
    .with_env_overrides();

    if let Some(input) = &cli.input {
        config.audio.source = input.clone();
    }
    if let Some(chunk_dir) = &cli.chunk_dir {
        config.audio.chunk_dir = chunk_dir.clone();
    }
    if let Some(chunk_length) = cli.chunk_length {
        config.audio.chunk_length_ms = chunk_length;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.dir = output_dir.clone();
    }
    if let Some(model) = &cli.model {
        config.stt.model = model.clone();
    }
    if let Some(language) = &cli.language {
        config.stt.language = language.clone();
        config.text.language = language.clone();
    }
    if let Some(dictionary) = &cli.dictionary {
        config.text.dictionary = Some(dictionary.clone());
    }
    if cli.threads.is_some() {
        config.stt.threads = cli.threads;
    }

    Ok(config)
}

/// Build the spell checker from configuration.
fn build_speller(config: &Config) -> Result<Box<dyn SpellChecker>> {
    match &config.text.dictionary {
        Some(path) => dictionary_speller(path, &config.text.language),
        None => Ok(Box::new(NullSpellChecker)),
    }
}

#[cfg(feature = "symspell")]
fn dictionary_speller(path: &std::path::Path, language: &str) -> Result<Box<dyn SpellChecker>> {
    Ok(Box::new(escriba::text::speller::SymSpellChecker::from_file(
        path, language,
    )?))
}

#[cfg(not(feature = "symspell"))]
fn dictionary_speller(path: &std::path::Path, _language: &str) -> Result<Box<dyn SpellChecker>> {
    eprintln!(
        "Warning: dictionary '{}' ignored (built without the symspell feature)",
        path.display()
    );
    Ok(Box::new(NullSpellChecker))
}

/// Run the batch transcription pipeline.
fn run_pipeline(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let transcriber = WhisperTranscriber::new(WhisperConfig {
        model_path: config.stt.model.clone(),
        language: config.stt.language.clone(),
        threads: config.stt.threads,
    })?;

    if cli.verbose >= 1 {
        use escriba::stt::transcriber::Transcriber;
        eprintln!(
            "{}",
            format!(
                "escriba v{} — model {} ({}), language {}",
                escriba::version_string(),
                transcriber.model_name(),
                defaults::gpu_backend(),
                config.stt.language
            )
            .dimmed()
        );
    }

    let normalizer = Normalizer::new(build_speller(&config)?);
    let annotator = Annotator::new(&config.text.language)?;

    let pipeline =
        Pipeline::new(Box::new(transcriber), normalizer, annotator).quiet(cli.quiet);
    let summary = pipeline.run(&config)?;

    if !cli.quiet {
        println!(
            "{}",
            format!(
                "Transcribed {} chunks ({}s of audio) into {}",
                summary.segments,
                summary.duration_ms / 1000,
                config.output.dir.display()
            )
            .green()
        );
    }

    Ok(())
}
