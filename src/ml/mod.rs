// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn-specific code lives here; the data layer only touches
// tensors at the batch-conversion seam.
//
//   model.rs   — the sequence autoencoder architecture:
//                embedding → LSTM encoder (thought vector) →
//                repeat → LSTM decoder → per-timestep dense →
//                reshape, plus the reconstruction loss
//
//   trainer.rs — the epoch loop: pulls batches from the
//                generators, runs forward/backward + Adam,
//                checkpoints on validation-loss improvement and
//                appends to the loss history

/// Encoder-decoder autoencoder architecture
pub mod model;

/// Training loop with validation, checkpointing, history logging
pub mod trainer;
