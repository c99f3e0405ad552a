// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Sentence boundary detection and word tokenization are external
// collaborators of this system, not part of it. These traits are
// the seam: the pipeline is written against them, and the
// concrete unicode-segmentation implementation lives in Layer 4.
//
// This also pins down the reproducibility caveat: two builds with
// different segmenter implementations may split text differently,
// so a sentence cache written by one build is authoritative over
// re-splitting with another.

// ─── SentenceSplitter ─────────────────────────────────────────────────────────
/// Any component that can split a document's text into sentences.
///
/// Implementations:
///   - UnicodeSegmenter → unicode-segmentation sentence boundaries
pub trait SentenceSplitter {
    /// Split `text` into sentences, in order, with no text dropped
    /// other than surrounding whitespace.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// Any component that can split a sentence into word tokens.
///
/// Implementations:
///   - UnicodeSegmenter → unicode-segmentation word boundaries,
///     keeping punctuation as standalone tokens
pub trait WordTokenizer {
    /// Tokenize `sentence` into words and punctuation, in order.
    fn tokenize<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}
