// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand. The network hyperparameters
// are deliberately NOT flags — they are the fixed constants in
// the application layer, matching the contract that the whole
// configuration is a fixed set of named values. Only the data
// location is selectable here.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentence autoencoder on a TSV text corpus
    Train(TrainArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory containing text.tsv; the sentence cache, checkpoint
    /// and loss history are written next to it
    #[arg(long, default_value = "data")]
    pub data_dir: String,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// Everything except the data directory comes from the fixed constants.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig::with_data_dir(a.data_dir)
    }
}
