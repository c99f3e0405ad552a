// ============================================================
// Layer 2 — Application Layer
// ============================================================
// Use cases that orchestrate the lower layers. The CLI calls in
// here; everything below (data, ml, infra) is wired together by
// the use case, never by the CLI directly.

/// End-to-end training pipeline: cache → vocabulary → batches →
/// autoencoder → checkpoint + loss history
pub mod train_use_case;
