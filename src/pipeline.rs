//! Sequential batch pipeline: chunk, transcribe, transform, write.
//!
//! Segments are processed strictly one at a time in index order. There is no
//! retry and no partial-success mode: the first failing step aborts the run
//! so the five output files never hold misaligned chunk entries.

use crate::audio::chunker::Chunker;
use crate::audio::wav::WavAudio;
use crate::config::Config;
use crate::error::Result;
use crate::report::ReportWriter;
use crate::stt::transcriber::Transcriber;
use crate::text::annotator::{self, Annotator};
use crate::text::normalizer::Normalizer;

/// The five text views derived from one segment's transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptViews {
    /// Raw model output.
    pub original: String,
    /// Lowercased, spell-corrected, whitespace-collapsed.
    pub normalized: String,
    /// Base form of every raw token, none dropped.
    pub lemmatized: String,
    /// Raw surface forms with stop words removed.
    pub stop_words_removed: String,
    /// Base forms of the normalized text with stop words removed.
    pub all_filters: String,
}

impl TranscriptViews {
    /// Derive all five views from a raw transcript.
    ///
    /// The lemmatized and stop-word views annotate the raw text; the
    /// all-filters view re-annotates the normalized text so it reflects
    /// normalization's effect on the base forms.
    pub fn build(raw: &str, normalizer: &Normalizer, annot: &Annotator) -> Self {
        let normalized = normalizer.normalize(raw);

        let raw_tokens = annot.annotate(raw);
        let lemmatized = annotator::lemma_view(&raw_tokens);
        let stop_words_removed = annotator::content_word_view(&raw_tokens);

        let normalized_tokens = annot.annotate(&normalized);
        let all_filters = annotator::filtered_lemma_view(&normalized_tokens);

        Self {
            original: raw.to_string(),
            normalized,
            lemmatized,
            stop_words_removed,
            all_filters,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Number of segments chunked, transcribed, and written.
    pub segments: usize,
    /// Total source duration in milliseconds.
    pub duration_ms: u64,
}

/// The batch transcription pipeline.
pub struct Pipeline {
    transcriber: Box<dyn Transcriber>,
    normalizer: Normalizer,
    annotator: Annotator,
    quiet: bool,
}

impl Pipeline {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        normalizer: Normalizer,
        annotator: Annotator,
    ) -> Self {
        Self {
            transcriber,
            normalizer,
            annotator,
            quiet: false,
        }
    }

    /// Suppress progress output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn progress(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Run the full pipeline: load, chunk, then per segment transcribe,
    /// transform, and write, in index order.
    pub fn run(&self, config: &Config) -> Result<PipelineSummary> {
        // Source errors abort before any output file is created
        let audio = WavAudio::from_path(&config.audio.source)?;
        let duration_ms = audio.duration_ms();

        let chunker = Chunker::new(&config.audio.chunk_dir, config.audio.chunk_length_ms);
        let segments = chunker.split(audio.samples())?;
        self.progress(&format!(
            "All audio chunks created ({} segments in {})",
            segments.len(),
            config.audio.chunk_dir.display()
        ));

        let mut writer = ReportWriter::create(&config.output.dir)?;

        for segment in &segments {
            self.progress(&format!(
                "Processing chunk {}/{}: {}",
                segment.index + 1,
                segments.len(),
                segment.path.display()
            ));

            let samples = WavAudio::from_path(&segment.path)?.into_samples();
            let raw = self.transcriber.transcribe(&samples)?;
            let views = TranscriptViews::build(&raw, &self.normalizer, &self.annotator);
            writer.write_segment(segment.index, &views)?;
        }

        writer.finish()?;
        self.progress(&format!(
            "Transcripts written to {}",
            config.output.dir.display()
        ));

        Ok(PipelineSummary {
            segments: segments.len(),
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::speller::{NullSpellChecker, SpellChecker};

    struct TableSpellChecker;

    impl SpellChecker for TableSpellChecker {
        fn suggest(&self, word: &str) -> Option<String> {
            match word {
                "hóla" => Some("hola".to_string()),
                _ => None,
            }
        }

        fn name(&self) -> &str {
            "table"
        }
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(Box::new(TableSpellChecker))
    }

    fn annotator() -> Annotator {
        Annotator::new("es").unwrap()
    }

    #[test]
    fn build_keeps_raw_text_as_original() {
        let views = TranscriptViews::build("El Perro corre", &normalizer(), &annotator());
        assert_eq!(views.original, "El Perro corre");
    }

    #[test]
    fn build_normalizes_case_spelling_and_spacing() {
        let views = TranscriptViews::build("Hóla  Mundo", &normalizer(), &annotator());
        assert_eq!(views.normalized, "hola mundo");
    }

    #[test]
    fn build_lemmatizes_every_raw_token() {
        let raw = "el perro corría por la casa";
        let views = TranscriptViews::build(raw, &normalizer(), &annotator());
        assert_eq!(
            views.lemmatized.split_whitespace().count(),
            raw.split_whitespace().count()
        );
    }

    #[test]
    fn build_removes_stop_words_from_raw_surface_forms() {
        let views =
            TranscriptViews::build("el perro y la casa", &normalizer(), &annotator());
        let kept: Vec<&str> = views.stop_words_removed.split_whitespace().collect();
        assert_eq!(kept, vec!["perro", "casa"]);
    }

    #[test]
    fn build_all_filters_reflects_the_normalized_text() {
        // "Hóla" normalizes to the stop-free content word "hola"; the
        // all-filters view must stem the corrected form, not the raw one.
        let views = TranscriptViews::build("Hóla  Perros", &normalizer(), &annotator());
        let annot = annotator();
        let expected =
            annotator::filtered_lemma_view(&annot.annotate(&views.normalized));
        assert_eq!(views.all_filters, expected);
    }

    #[test]
    fn build_all_filters_is_a_subset_of_normalized_by_count() {
        let views = TranscriptViews::build(
            "el perro corre por la casa grande",
            &normalizer(),
            &annotator(),
        );
        assert!(
            views.all_filters.split_whitespace().count()
                <= views.normalized.split_whitespace().count()
        );
    }

    #[test]
    fn build_empty_transcript_yields_empty_views() {
        let views = TranscriptViews::build("", &normalizer(), &annotator());
        assert_eq!(views.original, "");
        assert_eq!(views.normalized, "");
        assert_eq!(views.lemmatized, "");
        assert_eq!(views.stop_words_removed, "");
        assert_eq!(views.all_filters, "");
    }

    #[test]
    fn run_fails_fast_when_source_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.audio.source = dir.path().join("missing.wav");
        config.audio.chunk_dir = dir.path().join("chunks");
        config.output.dir = dir.path().join("out");

        let pipeline = Pipeline::new(
            Box::new(crate::stt::transcriber::MockTranscriber::new("mock")),
            Normalizer::new(Box::new(NullSpellChecker)),
            annotator(),
        )
        .quiet(true);

        assert!(pipeline.run(&config).is_err());
        // No output file may exist after an input error
        assert!(!config.output.dir.exists());
    }

    #[test]
    fn run_aborts_on_transcription_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("audio.wav");
        crate::audio::wav::write_wav(&source, &vec![100i16; 1600]).unwrap();

        let mut config = Config::default();
        config.audio.source = source;
        config.audio.chunk_dir = dir.path().join("chunks");
        config.audio.chunk_length_ms = 50;
        config.output.dir = dir.path().join("out");

        let pipeline = Pipeline::new(
            Box::new(crate::stt::transcriber::MockTranscriber::new("mock").with_failure()),
            Normalizer::new(Box::new(NullSpellChecker)),
            annotator(),
        )
        .quiet(true);

        assert!(pipeline.run(&config).is_err());
    }

    #[test]
    fn run_processes_every_segment_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("audio.wav");
        // 300ms at 16kHz with 100ms chunks → 3 segments
        crate::audio::wav::write_wav(&source, &vec![100i16; 4800]).unwrap();

        let mut config = Config::default();
        config.audio.source = source;
        config.audio.chunk_dir = dir.path().join("chunks");
        config.audio.chunk_length_ms = 100;
        config.output.dir = dir.path().join("out");

        let pipeline = Pipeline::new(
            Box::new(
                crate::stt::transcriber::MockTranscriber::new("mock")
                    .with_response("el perro corre"),
            ),
            Normalizer::new(Box::new(NullSpellChecker)),
            annotator(),
        )
        .quiet(true);

        let summary = pipeline.run(&config).unwrap();
        assert_eq!(summary.segments, 3);
        assert_eq!(summary.duration_ms, 300);

        let original = std::fs::read_to_string(
            config
                .output
                .dir
                .join(crate::report::TranscriptVariant::Original.file_name()),
        )
        .unwrap();
        assert_eq!(original.matches("Chunk ").count(), 3);
        assert!(original.contains("Chunk 1:\nel perro corre\n"));
        assert!(original.contains("Chunk 3:"));
    }
}
