// ============================================================
// Layer 3 — Sentence Domain Type
// ============================================================
// One sentence extracted from a source document. This is the
// record persisted verbatim to the sentence cache and never
// mutated afterwards.

use serde::{Deserialize, Serialize};

/// A sentence extracted from a document.
///
/// `sentence_index` is a 1-based, per-document, gap-free counter:
/// the first sentence of every document has index 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Identifier of the document this sentence came from
    pub doc_id: u64,

    /// 1-based position of the sentence within its document
    pub sentence_index: usize,

    /// The sentence text, exactly as the boundary detector produced it
    pub text: String,
}

impl Sentence {
    pub fn new(doc_id: u64, sentence_index: usize, text: impl Into<String>) -> Self {
        Self {
            doc_id,
            sentence_index,
            text: text.into(),
        }
    }
}
