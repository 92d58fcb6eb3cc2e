//! Transcript report writing.
//!
//! One writer owns the five output streams for the whole run. Records are
//! append-only and strictly increasing by segment index; an out-of-order
//! write is an error rather than silent file corruption.

use crate::defaults;
use crate::error::{EscribaError, Result};
use crate::pipeline::TranscriptViews;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The five derived transcript outputs, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptVariant {
    Original,
    Normalized,
    Lemmatized,
    StopWordsRemoved,
    AllFilters,
}

impl TranscriptVariant {
    /// All variants, in the order their files are created and written.
    pub const ALL: [TranscriptVariant; 5] = [
        TranscriptVariant::Original,
        TranscriptVariant::Normalized,
        TranscriptVariant::Lemmatized,
        TranscriptVariant::StopWordsRemoved,
        TranscriptVariant::AllFilters,
    ];

    /// File name this variant is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            TranscriptVariant::Original => defaults::ORIGINAL_FILE,
            TranscriptVariant::Normalized => defaults::NORMALIZED_FILE,
            TranscriptVariant::Lemmatized => defaults::LEMMATIZED_FILE,
            TranscriptVariant::StopWordsRemoved => defaults::STOPWORDS_FILE,
            TranscriptVariant::AllFilters => defaults::ALL_FILTERS_FILE,
        }
    }

    fn slot(&self) -> usize {
        match self {
            TranscriptVariant::Original => 0,
            TranscriptVariant::Normalized => 1,
            TranscriptVariant::Lemmatized => 2,
            TranscriptVariant::StopWordsRemoved => 3,
            TranscriptVariant::AllFilters => 4,
        }
    }
}

/// Writes `Chunk N:` records to the five transcript files.
///
/// Files are created fresh at construction and held open for the whole run;
/// `finish` flushes them all.
pub struct ReportWriter {
    writers: [BufWriter<File>; 5],
    next_index: usize,
}

impl ReportWriter {
    /// Create the five output files inside `dir` (created if absent),
    /// truncating any previous run's files.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;

        let mut files = Vec::with_capacity(TranscriptVariant::ALL.len());
        for variant in TranscriptVariant::ALL {
            let file = File::create(dir.join(variant.file_name()))?;
            files.push(BufWriter::new(file));
        }
        let writers: [BufWriter<File>; 5] = files
            .try_into()
            .map_err(|_| EscribaError::Report {
                message: "failed to open output streams".to_string(),
            })?;

        Ok(Self {
            writers,
            next_index: 0,
        })
    }

    /// Segment index the next `write_segment` call must use.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Append one record to a single variant's stream.
    ///
    /// Record format: `Chunk <1-based-index>:\n<text>\n\n`.
    fn write_record(
        &mut self,
        variant: TranscriptVariant,
        index: usize,
        text: &str,
    ) -> Result<()> {
        let writer = &mut self.writers[variant.slot()];
        write!(writer, "Chunk {}:\n{}\n\n", index + 1, text)?;
        Ok(())
    }

    /// Append all five views for one segment, enforcing index order.
    pub fn write_segment(&mut self, index: usize, views: &TranscriptViews) -> Result<()> {
        if index != self.next_index {
            return Err(EscribaError::Report {
                message: format!(
                    "segment {} written out of order (expected {})",
                    index, self.next_index
                ),
            });
        }

        self.write_record(TranscriptVariant::Original, index, &views.original)?;
        self.write_record(TranscriptVariant::Normalized, index, &views.normalized)?;
        self.write_record(TranscriptVariant::Lemmatized, index, &views.lemmatized)?;
        self.write_record(
            TranscriptVariant::StopWordsRemoved,
            index,
            &views.stop_words_removed,
        )?;
        self.write_record(TranscriptVariant::AllFilters, index, &views.all_filters)?;

        self.next_index += 1;
        Ok(())
    }

    /// Flush all five streams.
    pub fn finish(mut self) -> Result<()> {
        for writer in &mut self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}
