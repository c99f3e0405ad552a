// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
// One command is supported:
//   `train` — builds the sentence pipeline and trains the
//             autoencoder to reconstruct its own input.
//
// Hyperparameters are fixed named constants in the application
// layer; the CLI only selects where the data lives.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "sent-thoughts",
    version = "0.1.0",
    about = "Train a sentence autoencoder to learn fixed-size thought vectors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on data in: {}", args.data_dir);

    // Convert CLI args → application config (keeps clap types out of Layer 2)
    let use_case = TrainUseCase::new(args.into());
    use_case.execute()?;

    println!("Training complete. Checkpoint and loss history saved.");
    Ok(())
}
