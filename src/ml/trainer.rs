// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch-based train + validation loop over the pull-based batch
// generators, with best-only checkpointing and incremental loss
// history.
//
//   - Training runs on Autodiff<NdArray> for gradients;
//     model.valid() strips autodiff for the validation passes.
//   - Each epoch consumes exactly steps_per_epoch train batches
//     and val_steps validation batches (floor(len / batch_size),
//     so the trailing partial batch of every shuffle is skipped).
//   - The checkpoint is overwritten only when validation loss
//     strictly improves on the best seen so far; the history file
//     gains one line per epoch either way, flushed immediately so
//     a crash keeps everything up to the last completed epoch.
//   - A failure inside an epoch is fatal to the whole run: no
//     retry, recovery is an operator re-run.

use anyhow::{ensure, Result};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::{to_tensor, BatchGenerator};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::history::HistoryLogger;
use crate::ml::model::{reconstruction_loss, AutoencoderConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type ValidBackend = burn::backend::NdArray;

pub fn run_training(
    cfg: &TrainConfig,
    train_gen: &mut BatchGenerator,
    val_gen: &mut BatchGenerator,
    ckpt: &CheckpointManager,
    history: &HistoryLogger,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();

    let steps_per_epoch = train_gen.batches_per_epoch();
    let val_steps = val_gen.batches_per_epoch();
    // a generator with zero batches per epoch would spin forever
    ensure!(
        steps_per_epoch > 0 && val_steps > 0,
        "not enough sentences for one full batch (train: {steps_per_epoch}, val: {val_steps} \
         batches per epoch at batch size {})",
        cfg.batch_size
    );

    let model_cfg = AutoencoderConfig::new(
        cfg.vocab_size,
        cfg.embed_size,
        cfg.sequence_len,
        cfg.latent_size,
    );
    let mut model = model_cfg.init::<TrainBackend>(&device);

    let mut optim = AdamConfig::new().init();
    let mut best = BestLoss::default();

    for epoch in 1..=cfg.num_epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        for _ in 0..steps_per_epoch {
            let (input, target) = train_gen.next_batch();
            let input = to_tensor::<TrainBackend>(&input, &device);
            let target = to_tensor::<TrainBackend>(&target, &device);

            let loss = model.forward_loss(input, target);
            train_loss_sum += loss.clone().into_scalar().elem::<f64>();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }
        let train_loss = train_loss_sum / steps_per_epoch as f64;

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let mut val_loss_sum = 0.0f64;
        for _ in 0..val_steps {
            let (input, target) = val_gen.next_batch();
            let input = to_tensor::<ValidBackend>(&input, &device);
            let target = to_tensor::<ValidBackend>(&target, &device);

            let scores = model_valid.forward(input);
            let loss = reconstruction_loss(scores, target);
            val_loss_sum += loss.into_scalar().elem::<f64>();
        }
        let val_loss = val_loss_sum / val_steps as f64;

        println!(
            "Epoch {:>3}/{} | loss={:.5} | val_loss={:.5}",
            epoch, cfg.num_epochs, train_loss, val_loss,
        );

        // ── Checkpoint on improvement only ────────────────────────────────────
        if best.improves(val_loss) {
            ckpt.save_model(&model)?;
            tracing::info!("val_loss improved to {:.5} — checkpoint saved", val_loss);
        }

        history.log(train_loss, val_loss)?;
    }

    tracing::info!("Training complete");
    Ok(())
}

// ─── BestLoss ─────────────────────────────────────────────────────────────────
/// Best-so-far validation loss. The first observation always
/// counts as an improvement; afterwards only strict decreases do.
#[derive(Debug, Default)]
pub struct BestLoss(Option<f64>);

impl BestLoss {
    /// Record `loss` and report whether it improved on the best seen.
    pub fn improves(&mut self, loss: f64) -> bool {
        match self.0 {
            Some(best) if loss >= best => false,
            _ => {
                self.0 = Some(loss);
                true
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoints_only_on_strict_improvement() {
        let mut best = BestLoss::default();
        let decisions: Vec<bool> = [0.9, 0.7, 0.8, 0.5]
            .into_iter()
            .map(|loss| best.improves(loss))
            .collect();
        // epochs 1, 2 and 4 improve; epoch 3 leaves the checkpoint alone
        assert_eq!(decisions, vec![true, true, false, true]);
    }

    #[test]
    fn equal_loss_is_not_an_improvement() {
        let mut best = BestLoss::default();
        assert!(best.improves(0.5));
        assert!(!best.improves(0.5));
        assert!(best.improves(0.49));
    }
}
