// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load or build the sentence cache   (Layer 4 - data)
//   Step 2: Normalize + count word frequencies (Layer 4 - data)
//   Step 3: Build the vocabulary               (Layer 4 - data)
//   Step 4: Train/validation split             (Layer 4 - data)
//   Step 5: Build the batch generators         (Layer 4 - data)
//   Step 6: Save config                        (Layer 6 - infra)
//   Step 7: Run the training loop              (Layer 5 - ml)
//
// The hyperparameters are a fixed set of named constants; a run
// is configured entirely by where its data directory is.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    batcher::BatchGenerator,
    normalizer::{LengthStats, Normalizer, UnicodeSegmenter, WordFreqs},
    sentence_cache::SentenceCache,
    splitter::split_train_val,
    vocab::Vocabulary,
};
use crate::infra::{checkpoint::CheckpointManager, history::HistoryLogger};
use crate::ml::trainer::run_training;

// ─── Fixed hyperparameters ────────────────────────────────────────────────────
pub const VOCAB_SIZE: usize = 50_000;
pub const EMBED_SIZE: usize = 300;
pub const SEQUENCE_LEN: usize = 50;
pub const LATENT_SIZE: usize = 512;
pub const BATCH_SIZE: usize = 64;
pub const NUM_EPOCHS: usize = 100;
pub const VAL_FRACTION: f64 = 0.3;
pub const LEARNING_RATE: f64 = 1e-3;

// ─── Training Configuration ───────────────────────────────────────────────────
// Serialisable so the exact architecture behind a checkpoint is
// recoverable from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir: String,
    pub vocab_size: usize,
    pub embed_size: usize,
    pub sequence_len: usize,
    pub latent_size: usize,
    pub batch_size: usize,
    pub num_epochs: usize,
    pub val_fraction: f64,
    pub learning_rate: f64,
}

impl TrainConfig {
    /// The fixed constants, rooted at the given data directory.
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            vocab_size: VOCAB_SIZE,
            embed_size: EMBED_SIZE,
            sequence_len: SEQUENCE_LEN,
            latent_size: LATENT_SIZE,
            batch_size: BATCH_SIZE,
            num_epochs: NUM_EPOCHS,
            val_fraction: VAL_FRACTION,
            learning_rate: LEARNING_RATE,
        }
    }

    pub fn text_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("text.tsv")
    }

    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("sents.txt")
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("sent-thoughts-loss.csv")
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::with_data_dir("data")
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load or build the sentence cache ─────────────────────────
        let cache = SentenceCache::new(cfg.cache_path());
        let sentences = cache.load_or_build(&cfg.text_path(), &UnicodeSegmenter)?;

        // ── Step 2: Normalize every sentence exactly once, in order ──────────
        // One sequential pass builds the frequency counts and the
        // parsed sentences the generators feed on.
        let normalizer = Normalizer::new(UnicodeSegmenter);
        let mut freqs = WordFreqs::new();
        let mut parsed_sentences = Vec::with_capacity(sentences.len());
        let mut sent_lens = Vec::with_capacity(sentences.len());

        for sentence in &sentences {
            let (tokens, parsed) = normalizer.normalize(sentence, &mut freqs);
            sent_lens.push(tokens.len());
            parsed_sentences.push(parsed);
        }

        tracing::info!("number of sentences: {}", parsed_sentences.len());
        if let Some(stats) = LengthStats::from_lengths(&sent_lens) {
            tracing::info!(
                "sentence lengths (words) — min: {}, max: {}, mean: {:.3}, med: {:.3}",
                stats.min,
                stats.max,
                stats.mean,
                stats.median
            );
        }
        tracing::info!("vocab size (full): {}", freqs.distinct());

        // ── Step 3: Build the lookup tables ──────────────────────────────────
        let vocab = Vocabulary::build(&freqs, cfg.vocab_size);
        tracing::info!("vocab size (capped): {}", vocab.len());

        // ── Step 4: Train/validation split ───────────────────────────────────
        let (train_sents, val_sents) = split_train_val(parsed_sentences, cfg.val_fraction);
        tracing::info!(
            "Split: {} train, {} validation",
            train_sents.len(),
            val_sents.len()
        );

        // ── Step 5: Batch generators ─────────────────────────────────────────
        let mut train_gen =
            BatchGenerator::new(&train_sents, &vocab, cfg.sequence_len, cfg.batch_size);
        let mut val_gen =
            BatchGenerator::new(&val_sents, &vocab, cfg.sequence_len, cfg.batch_size);

        // ── Step 6: Save config next to the checkpoint ───────────────────────
        let ckpt = CheckpointManager::new(&cfg.data_dir);
        ckpt.save_config(cfg)?;

        // ── Step 7: Train ────────────────────────────────────────────────────
        let history = HistoryLogger::new(cfg.history_path())?;
        run_training(cfg, &mut train_gen, &mut val_gen, &ckpt, &history)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::UNK_ID;

    // the data pipeline up to batches, wired exactly as execute() does
    #[test]
    fn pipeline_from_sentences_to_batches() {
        let sentences = vec![
            "The cat sat on the mat.".to_string(),
            "The dog ate 1,200 biscuits.".to_string(),
            "The cat and the dog slept.".to_string(),
            "A bird watched them all.".to_string(),
        ];

        let normalizer = Normalizer::new(UnicodeSegmenter);
        let mut freqs = WordFreqs::new();
        let mut parsed = Vec::new();
        for sentence in &sentences {
            let (_, p) = normalizer.normalize(sentence, &mut freqs);
            parsed.push(p);
        }
        // the numeric token was rewritten before counting
        assert!(parsed[1].contains(" 9 "));

        let vocab = Vocabulary::build(&freqs, 50);
        // "the" occurs most often across the corpus
        assert_eq!(vocab.word_to_id("the"), 2);
        // parsed text keeps original case, so "The" resolves to UNK
        assert_eq!(vocab.word_to_id("The"), UNK_ID);

        let mut gen = BatchGenerator::new(&parsed, &vocab, 10, 2);
        assert_eq!(gen.batches_per_epoch(), 2);
        let (input, target) = gen.next_batch();
        assert_eq!(input.len(), 2);
        assert!(input.iter().all(|row| row.len() == 10));
        assert_eq!(input, target);
    }

    #[test]
    fn config_paths_are_rooted_at_the_data_dir() {
        let cfg = TrainConfig::with_data_dir("corpus");
        assert_eq!(cfg.text_path(), PathBuf::from("corpus/text.tsv"));
        assert_eq!(cfg.cache_path(), PathBuf::from("corpus/sents.txt"));
        assert_eq!(
            cfg.history_path(),
            PathBuf::from("corpus/sent-thoughts-loss.csv")
        );
        assert_eq!(cfg.vocab_size, VOCAB_SIZE);
        assert_eq!(cfg.batch_size, BATCH_SIZE);
    }
}
