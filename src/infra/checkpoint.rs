// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Persists the best-so-far model using Burn's CompactRecorder
// (MessagePack, gzip-compressed). There is exactly one checkpoint
// file per run — the trainer only calls save_model when the
// validation loss improves, so the file on disk is always the
// best model seen, never just the latest.
//
// The TrainConfig is saved next to it as JSON so a later process
// can rebuild the exact architecture before loading the weights.

use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::AutoencoderModel;

const CHECKPOINT_STEM: &str = "sent-thoughts-autoencoder";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a manager rooted at `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Overwrite the checkpoint with the current model state.
    /// The recorder appends its own extension to the stem.
    pub fn save_model<B: AutodiffBackend>(&self, model: &AutoencoderModel<B>) -> Result<()> {
        let path = self.dir.join(CHECKPOINT_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved checkpoint '{}'", path.display());
        Ok(())
    }

    /// Save the training configuration as JSON next to the
    /// checkpoint so the architecture it encodes is recoverable.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}
