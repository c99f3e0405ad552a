// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw text TSV to padded id-sequence batches.
//
// The pipeline flows in this order:
//
//   text.tsv
//       │
//       ▼
//   SentenceCache     → loads sents.txt, or splits documents into
//       │               sentences and writes it
//       ▼
//   Normalizer        → tokenizes, rewrites numeric tokens to "9",
//       │               counts lowercase word frequencies
//       ▼
//   Vocabulary        → word ↔ id lookup tables with PAD/UNK reserved
//       │
//       ▼
//   split_train_val   → trailing-fraction validation split
//       │
//       ▼
//   BatchGenerator    → infinite epoch-shuffled padded batches
//       │
//       ▼
//   training loop     → pulls (input, target) pairs on demand
//
// Each module is responsible for exactly one step.

/// Loads or builds the on-disk sentence cache
pub mod sentence_cache;

/// Word tokenization, numeric normalization, frequency counting
pub mod normalizer;

/// Bounded word ↔ id vocabulary with PAD/UNK reserved ids
pub mod vocab;

/// Train/validation split over the parsed sentence list
pub mod splitter;

/// Infinite epoch-shuffling batch generator + tensor conversion
pub mod batcher;
