// ============================================================
// Layer 4 — Batch Generator
// ============================================================
// Infinite, epoch-shuffling producer of padded id-sequence
// batches. The autoencoding target equals the input, so every
// pull yields (batch, batch).
//
// The original coroutine is reimplemented as an explicit state
// machine — epoch counter, shuffled index buffer, cursor — so
// restart and step-counting are visible instead of implicit in a
// generator. One state cycle:
//
//   epoch start → fresh random permutation of sentence indices
//   batch loop  → contiguous batch_size chunks of the shuffled
//                 id sequences, final partial chunk dropped
//                 (floor division), each sequence left-padded /
//                 left-truncated with 0 to max_seqlen
//   exhausted   → back to epoch start with a new permutation
//
// Caveat: with fewer sentences than batch_size an epoch holds
// zero batches and next_batch() would spin through empty epochs
// forever. That is not auto-corrected here; callers check
// batches_per_epoch() before pulling (the trainer refuses to run).
//
// Single-threaded and pull-based: the caller controls pacing by
// how many batches it takes.

use burn::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::vocab::Vocabulary;

/// One padded batch: `batch_size` rows of `max_seqlen` word ids.
pub type Batch = Vec<Vec<u32>>;

pub struct BatchGenerator {
    /// Id sequences in corpus order, mapped once at construction
    sequences: Vec<Vec<u32>>,
    /// Shuffled index buffer for the current epoch
    order: Vec<usize>,
    /// Next batch within the current epoch
    cursor: usize,
    /// 1-based epoch counter
    epoch: usize,
    batch_size: usize,
    max_seqlen: usize,
    rng: StdRng,
}

impl BatchGenerator {
    /// Build a generator over `parsed_sentences`, mapping each
    /// whitespace token to its vocabulary id (OOV → UNK).
    pub fn new(
        parsed_sentences: &[String],
        vocab: &Vocabulary,
        max_seqlen: usize,
        batch_size: usize,
    ) -> Self {
        let sequences: Vec<Vec<u32>> = parsed_sentences
            .iter()
            .map(|sent| sent.split_whitespace().map(|w| vocab.word_to_id(w)).collect())
            .collect();

        let mut gen = Self {
            order: (0..sequences.len()).collect(),
            sequences,
            cursor: 0,
            epoch: 0,
            batch_size,
            max_seqlen,
            rng: StdRng::from_entropy(),
        };
        gen.start_epoch();
        gen
    }

    /// Full batches per epoch: floor(sentences / batch_size). The
    /// trailing `len % batch_size` sentences of each shuffle go
    /// untouched that epoch.
    pub fn batches_per_epoch(&self) -> usize {
        self.sequences.len() / self.batch_size
    }

    /// 1-based index of the epoch the next batch will come from.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    fn start_epoch(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
        self.epoch += 1;
    }

    /// Pull the next (input, target) pair; input == target by value.
    /// Reshuffles and continues when the current epoch is exhausted.
    pub fn next_batch(&mut self) -> (Batch, Batch) {
        // With zero batches per epoch this spins through empty
        // epochs forever, like the coroutine it replaces.
        while self.cursor >= self.batches_per_epoch() {
            self.start_epoch();
        }

        let start = self.cursor * self.batch_size;
        let batch: Batch = self.order[start..start + self.batch_size]
            .iter()
            .map(|&ix| pad_left(&self.sequences[ix], self.max_seqlen))
            .collect();
        self.cursor += 1;

        (batch.clone(), batch)
    }
}

/// Left-pad `seq` with 0 to `max_seqlen`, or keep only its last
/// `max_seqlen` ids when it is too long.
fn pad_left(seq: &[u32], max_seqlen: usize) -> Vec<u32> {
    if seq.len() >= max_seqlen {
        seq[seq.len() - max_seqlen..].to_vec()
    } else {
        let mut padded = vec![0; max_seqlen - seq.len()];
        padded.extend_from_slice(seq);
        padded
    }
}

/// Stack a padded batch into a `[batch_size, max_seqlen]` Int
/// tensor on the given device.
pub fn to_tensor<B: Backend>(batch: &Batch, device: &B::Device) -> Tensor<B, 2, Int> {
    let rows = batch.len();
    let cols = batch.first().map(Vec::len).unwrap_or(0);

    let flat: Vec<i32> = batch
        .iter()
        .flat_map(|row| row.iter().map(|&id| id as i32))
        .collect();

    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape([rows, cols])
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::WordFreqs;
    use crate::data::vocab::UNK_ID;

    type TestBackend = burn::backend::NdArray;

    fn small_vocab() -> Vocabulary {
        let mut freqs = WordFreqs::new();
        for word in ["cat", "cat", "cat", "dog", "dog", "bird"] {
            freqs.bump(word);
        }
        Vocabulary::build(&freqs, 10)
    }

    fn sentences(n: usize) -> Vec<String> {
        (0..n).map(|_| "cat dog bird".to_string()).collect()
    }

    #[test]
    fn batch_shape_and_reflexive_target() {
        let vocab = small_vocab();
        let mut gen = BatchGenerator::new(&sentences(8), &vocab, 5, 4);

        let (input, target) = gen.next_batch();
        assert_eq!(input.len(), 4);
        assert!(input.iter().all(|row| row.len() == 5));
        assert_eq!(input, target);
    }

    #[test]
    fn sequences_are_left_padded_with_zero() {
        let vocab = small_vocab();
        // "cat dog bird" → ids [2, 3, 4], left-padded to length 5
        let mut gen = BatchGenerator::new(&sentences(2), &vocab, 5, 2);
        let (input, _) = gen.next_batch();
        for row in &input {
            assert_eq!(row, &vec![0, 0, 2, 3, 4]);
        }
    }

    #[test]
    fn long_sequences_keep_the_tail() {
        assert_eq!(pad_left(&[1, 2, 3, 4, 5], 3), vec![3, 4, 5]);
        assert_eq!(pad_left(&[7], 3), vec![0, 0, 7]);
        assert_eq!(pad_left(&[1, 2, 3], 3), vec![1, 2, 3]);
    }

    #[test]
    fn oov_words_map_to_unk() {
        let vocab = small_vocab();
        let parsed = vec!["cat unicorn".to_string()];
        let mut gen = BatchGenerator::new(&parsed, &vocab, 2, 1);
        let (input, _) = gen.next_batch();
        assert_eq!(input[0], vec![2, UNK_ID]);
    }

    #[test]
    fn epoch_yields_exactly_floor_n_over_b_batches() {
        let vocab = small_vocab();
        // 10 sentences, batch 3 → 3 batches per epoch, 1 sentence dropped
        let mut gen = BatchGenerator::new(&sentences(10), &vocab, 5, 3);
        assert_eq!(gen.batches_per_epoch(), 3);
        assert_eq!(gen.epoch(), 1);

        for _ in 0..3 {
            gen.next_batch();
        }
        assert_eq!(gen.epoch(), 1);

        // the fourth pull crosses into a reshuffled second epoch
        gen.next_batch();
        assert_eq!(gen.epoch(), 2);
    }

    #[test]
    fn short_input_produces_zero_batches_per_epoch() {
        let vocab = small_vocab();
        let gen = BatchGenerator::new(&sentences(2), &vocab, 5, 4);
        // documented caveat: callers must guard before pulling
        assert_eq!(gen.batches_per_epoch(), 0);
    }

    #[test]
    fn to_tensor_stacks_rows() {
        let batch: Batch = vec![vec![0, 1, 2], vec![3, 4, 5]];
        let tensor = to_tensor::<TestBackend>(&batch, &Default::default());
        assert_eq!(tensor.dims(), [2, 3]);
    }
}
