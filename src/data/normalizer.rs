// ============================================================
// Layer 4 — Tokenizer / Normalizer
// ============================================================
// Turns raw sentence text into normalized word sequences.
//
//   1. Tokenize with the external word tokenizer
//      (unicode-segmentation word boundaries, punctuation kept).
//   2. Replace every numeric-like token with the literal "9".
//   3. Count the lowercase form of each (possibly replaced) token
//      in the shared frequency accumulator.
//   4. Return the original-case tokens and their space-join.
//
// The frequency counter is an explicit accumulator passed by
// &mut — it is built in one sequential pass before training and
// read-only afterwards, so no synchronization is needed. Each
// sentence must be normalized exactly once, in sentence order,
// to keep counts and length statistics consistent.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::traits::{SentenceSplitter, WordTokenizer};

// ─── UnicodeSegmenter ─────────────────────────────────────────────────────────
/// Sentence and word segmentation backed by unicode-segmentation.
/// This is the external-collaborator seam: the rest of the
/// pipeline only sees the Layer 3 traits.
pub struct UnicodeSegmenter;

impl SentenceSplitter for UnicodeSegmenter {
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl WordTokenizer for UnicodeSegmenter {
    fn tokenize<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        // split_word_bounds keeps punctuation as standalone tokens;
        // whitespace segments are dropped.
        sentence
            .split_word_bounds()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect()
    }
}

// ─── WordFreqs ────────────────────────────────────────────────────────────────
/// Word frequency accumulator keyed by lowercase token.
///
/// Remembers the order in which words were first seen so that
/// `most_common` has a stable tie-break (first-seen wins), the
/// enumeration order a plain insertion-ordered counter would give.
#[derive(Debug, Default)]
pub struct WordFreqs {
    counts: HashMap<String, (u64, usize)>,
}

impl WordFreqs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for the lowercase form of `token`.
    pub fn bump(&mut self, token: &str) {
        let first_seen = self.counts.len();
        let entry = self
            .counts
            .entry(token.to_lowercase())
            .or_insert((0, first_seen));
        entry.0 += 1;
    }

    /// Number of distinct lowercase words seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The `n` most frequent words, descending by count, ties broken
    /// by first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut items: Vec<(&str, u64, usize)> = self
            .counts
            .iter()
            .map(|(word, &(count, order))| (word.as_str(), count, order))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        items.truncate(n);
        items.into_iter().map(|(word, count, _)| (word, count)).collect()
    }
}

// ─── Numeric normalization ────────────────────────────────────────────────────
/// A token is numeric-like when, after removing `.` `,` `-` `/`,
/// the remainder is non-empty and consists only of decimal digits.
/// "1,234" and "12-34" qualify; "abc123" and "v2.0beta" do not.
pub fn is_number(token: &str) -> bool {
    let stripped: String = token
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '-' | '/'))
        .collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

// ─── Normalizer ───────────────────────────────────────────────────────────────
/// Normalizes one sentence at a time with the given word tokenizer.
pub struct Normalizer<T: WordTokenizer> {
    tokenizer: T,
}

impl<T: WordTokenizer> Normalizer<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Tokenize `sentence`, replace numeric-like tokens with "9",
    /// update `freqs`, and return the tokens plus their space-join.
    /// Tokens keep their original case; only the counts are lowercased.
    pub fn normalize(&self, sentence: &str, freqs: &mut WordFreqs) -> (Vec<String>, String) {
        let mut tokens = Vec::new();
        for word in self.tokenizer.tokenize(sentence) {
            let word = if is_number(word) { "9" } else { word };
            freqs.bump(word);
            tokens.push(word.to_string());
        }
        let parsed = tokens.join(" ");
        (tokens, parsed)
    }
}

// ─── LengthStats ──────────────────────────────────────────────────────────────
/// Distribution of per-sentence token counts, logged after the
/// normalization pass so hyperparameters like the sequence length
/// can be sanity-checked against the corpus.
#[derive(Debug, PartialEq)]
pub struct LengthStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

impl LengthStats {
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }
        let mut sorted = lengths.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };

        Some(Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean: sorted.iter().sum::<usize>() as f64 / n as f64,
            median,
        })
    }
}
