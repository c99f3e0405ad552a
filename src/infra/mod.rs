// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by the training loop:
//
//   checkpoint.rs — best-model checkpoint via Burn's
//                   CompactRecorder, plus the TrainConfig JSON
//                   that records which hyperparameters produced it
//
//   history.rs    — the per-epoch loss history file, written
//                   incrementally (one tab-separated line per
//                   epoch) so a crashed run keeps everything up
//                   to the last completed epoch

/// Best-model checkpoint saving + config persistence
pub mod checkpoint;

/// Tab-separated per-epoch loss history
pub mod history;
