// ============================================================
// Layer 4 — Sentence Cache
// ============================================================
// Loads or builds the deduplicated, ordered sentence list.
//
// Two code paths, observably equivalent for downstream consumers:
//
//   cache hit:  read sents.txt line by line
//               (docid \t sentence_index \t text)
//   cache miss: read text.tsv line by line (docid \t full_text),
//               split each document into sentences, stream every
//               record to sents.txt as it is produced, so the
//               cache always reflects exactly one full pass.
//
// Reproducibility caveat: the sentence boundary detector is an
// external collaborator. If its behaviour changes between builds,
// a rebuilt cache may split differently — an existing cache file
// is therefore authoritative and never re-tokenized.
//
// A line with the wrong field count is a fatal FormatError; a
// corrupt file invalidates the whole run, so there is no per-line
// recovery.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::sentence::Sentence;
use crate::domain::traits::SentenceSplitter;
use crate::error::PipelineError;

/// Owns the on-disk sentence cache file: read-or-create, never
/// partially overwritten.
pub struct SentenceCache {
    cache_path: PathBuf,
}

impl SentenceCache {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    /// Return the ordered sentence texts, reading the cache if it
    /// exists and building it from `text_path` otherwise.
    pub fn load_or_build(
        &self,
        text_path: &Path,
        splitter: &impl SentenceSplitter,
    ) -> Result<Vec<String>> {
        if self.cache_path.exists() {
            tracing::info!("Loading sentence cache from '{}'", self.cache_path.display());
            self.load()
        } else {
            tracing::info!(
                "No sentence cache at '{}' — building from '{}'",
                self.cache_path.display(),
                text_path.display()
            );
            self.build(text_path, splitter)
        }
    }

    /// Read the cache file and return sentence texts in file order.
    /// No re-tokenization happens on this path.
    fn load(&self) -> Result<Vec<String>> {
        let file = File::open(&self.cache_path)
            .with_context(|| format!("Cannot open cache '{}'", self.cache_path.display()))?;
        let reader = BufReader::new(file);

        let mut sents = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 3 {
                return Err(PipelineError::format(&self.cache_path, line_no + 1, 3).into());
            }
            sents.push(fields[2].to_string());
        }

        tracing::info!("Loaded {} cached sentences", sents.len());
        Ok(sents)
    }

    /// Split every document into sentences, streaming each record to
    /// the cache file as it is produced. Never mutates `text_path`.
    fn build(&self, text_path: &Path, splitter: &impl SentenceSplitter) -> Result<Vec<String>> {
        let file = File::open(text_path)
            .with_context(|| format!("Cannot open text file '{}'", text_path.display()))?;
        let reader = BufReader::new(file);

        let out = File::create(&self.cache_path)
            .with_context(|| format!("Cannot create cache '{}'", self.cache_path.display()))?;
        let mut writer = BufWriter::new(out);

        let mut sents = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(PipelineError::format(text_path, line_no + 1, 2).into());
            }
            let doc_id: u64 = fields[0].parse().with_context(|| {
                format!(
                    "Invalid document id '{}' at {}:{}",
                    fields[0],
                    text_path.display(),
                    line_no + 1
                )
            })?;

            // sentence_index is a 1-based, per-document, gap-free counter
            for (offset, text) in splitter.split_sentences(fields[1]).into_iter().enumerate() {
                let record = Sentence::new(doc_id, offset + 1, text);
                writeln!(
                    writer,
                    "{}\t{}\t{}",
                    record.doc_id, record.sentence_index, record.text
                )?;
                sents.push(record.text);
            }
        }
        writer.flush()?;

        tracing::info!(
            "Built sentence cache: {} sentences → '{}'",
            sents.len(),
            self.cache_path.display()
        );
        Ok(sents)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::UnicodeSegmenter;
    use std::fs;
    use tempfile::TempDir;

    fn write_text_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("text.tsv");
        fs::write(&path, contents).expect("write text.tsv");
        path
    }

    #[test]
    fn builds_cache_with_per_document_indices() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_text_file(&dir, "1\tFirst one. Second one.\n2\tOnly one here.\n");
        let cache_path = dir.path().join("sents.txt");

        let cache = SentenceCache::new(&cache_path);
        let sents = cache.load_or_build(&text, &UnicodeSegmenter).unwrap();
        assert_eq!(sents.len(), 3);

        let written = fs::read_to_string(&cache_path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("1\t1\t"));
        assert!(lines[1].starts_with("1\t2\t"));
        // index restarts at 1 for the second document
        assert!(lines[2].starts_with("2\t1\t"));
    }

    #[test]
    fn cache_hit_is_idempotent_and_skips_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("sents.txt");
        fs::write(&cache_path, "1\t1\tHello there.\n1\t2\tGoodbye now.\n").unwrap();

        // text_path does not even exist — the cache path must win
        let missing = dir.path().join("no-such-text.tsv");
        let cache = SentenceCache::new(&cache_path);

        let first = cache.load_or_build(&missing, &UnicodeSegmenter).unwrap();
        let second = cache.load_or_build(&missing, &UnicodeSegmenter).unwrap();
        assert_eq!(first, vec!["Hello there.", "Goodbye now."]);
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_cache_line_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("sents.txt");
        fs::write(&cache_path, "1\t1\tfine line\nbroken line without tabs\n").unwrap();

        let cache = SentenceCache::new(&cache_path);
        let err = cache
            .load_or_build(dir.path().join("unused.tsv").as_path(), &UnicodeSegmenter)
            .unwrap_err();
        let format = err.downcast_ref::<PipelineError>();
        assert!(matches!(
            format,
            Some(PipelineError::Format { line_no: 2, expected: 3, .. })
        ));
    }

    #[test]
    fn malformed_text_line_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let text = write_text_file(&dir, "no tab on this line\n");
        let cache = SentenceCache::new(dir.path().join("sents.txt"));

        let err = cache.load_or_build(&text, &UnicodeSegmenter).unwrap_err();
        assert!(err.downcast_ref::<PipelineError>().is_some());
    }
}
