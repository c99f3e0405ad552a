// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional word ↔ id lookup tables over the most frequent
// lowercase words.
//
// Id layout:
//   0            → "PAD" (padding)
//   1            → "UNK" (out-of-vocabulary)
//   2..vocab-1   → the top (vocab_size - 2) words by descending
//                  frequency, ties broken by first-seen order
//
// Lookup of a word outside the table is never an error: it
// resolves to the UNK id through an explicit fallback branch,
// not a default-map construct. Lookup is exact-case; since the
// table is keyed by lowercase words, an original-case token that
// differs from its lowercase form falls back to UNK.

use std::collections::HashMap;

use crate::data::normalizer::WordFreqs;

pub const PAD_ID: u32 = 0;
pub const UNK_ID: u32 = 1;
pub const PAD_TOKEN: &str = "PAD";
pub const UNK_TOKEN: &str = "UNK";

/// Immutable word ↔ id tables for the lifetime of a training run.
#[derive(Debug)]
pub struct Vocabulary {
    word2id: HashMap<String, u32>,
    id2word: HashMap<u32, String>,
}

impl Vocabulary {
    /// Build the lookup tables from the frequency accumulator,
    /// keeping the top `vocab_size - 2` distinct words.
    pub fn build(freqs: &WordFreqs, vocab_size: usize) -> Self {
        let mut word2id = HashMap::new();
        word2id.insert(PAD_TOKEN.to_string(), PAD_ID);
        word2id.insert(UNK_TOKEN.to_string(), UNK_ID);

        for (offset, (word, _count)) in freqs
            .most_common(vocab_size.saturating_sub(2))
            .into_iter()
            .enumerate()
        {
            word2id.insert(word.to_string(), offset as u32 + 2);
        }

        // id2word is the exact structural inverse of word2id
        let id2word = word2id
            .iter()
            .map(|(word, &id)| (id, word.clone()))
            .collect();

        Self { word2id, id2word }
    }

    /// Look up a word's id, falling back to UNK on miss.
    pub fn word_to_id(&self, word: &str) -> u32 {
        match self.word2id.get(word) {
            Some(&id) => id,
            None => UNK_ID,
        }
    }

    /// Look up the word assigned to `id`, if any.
    pub fn id_to_word(&self, id: u32) -> Option<&str> {
        self.id2word.get(&id).map(String::as_str)
    }

    /// Number of entries in the table, special tokens included.
    pub fn len(&self) -> usize {
        self.word2id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word2id.is_empty()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn freqs_from(words: &[&str]) -> WordFreqs {
        let mut freqs = WordFreqs::new();
        for word in words {
            freqs.bump(word);
        }
        freqs
    }

    #[test]
    fn reserved_ids() {
        let vocab = Vocabulary::build(&freqs_from(&["cat"]), 10);
        assert_eq!(vocab.word_to_id(PAD_TOKEN), PAD_ID);
        assert_eq!(vocab.word_to_id(UNK_TOKEN), UNK_ID);
        assert_eq!(vocab.id_to_word(PAD_ID), Some(PAD_TOKEN));
        assert_eq!(vocab.id_to_word(UNK_ID), Some(UNK_TOKEN));
    }

    #[test]
    fn ids_follow_descending_frequency() {
        let freqs = freqs_from(&["cat", "cat", "cat", "dog", "dog", "bird"]);
        let vocab = Vocabulary::build(&freqs, 10);
        assert_eq!(vocab.word_to_id("cat"), 2);
        assert_eq!(vocab.word_to_id("dog"), 3);
        assert_eq!(vocab.word_to_id("bird"), 4);
    }

    #[test]
    fn words_beyond_the_cap_map_to_unk() {
        // vocab_size 3 keeps only one real word beyond PAD/UNK
        let freqs = freqs_from(&["cat", "cat", "dog"]);
        let vocab = Vocabulary::build(&freqs, 3);
        assert_eq!(vocab.word_to_id("cat"), 2);
        assert_eq!(vocab.word_to_id("dog"), UNK_ID);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn unknown_words_are_never_errors() {
        let vocab = Vocabulary::build(&freqs_from(&["cat"]), 10);
        assert_eq!(vocab.word_to_id("unicorn"), UNK_ID);
        // exact-case lookup: the table holds "cat", not "Cat"
        assert_eq!(vocab.word_to_id("Cat"), UNK_ID);
    }

    #[test]
    fn round_trip_for_every_assigned_word() {
        let freqs = freqs_from(&["cat", "cat", "dog", "dog", "bird", "fish"]);
        let vocab = Vocabulary::build(&freqs, 6);

        for word in ["cat", "dog", "bird", "fish", PAD_TOKEN, UNK_TOKEN] {
            let id = vocab.word_to_id(word);
            assert_eq!(vocab.id_to_word(id), Some(word), "round trip for {word}");
        }
        // the inverse table has exactly one entry per word
        assert_eq!(vocab.len(), 6);
    }
}
