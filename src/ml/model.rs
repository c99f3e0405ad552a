// ============================================================
// Layer 5 — Sequence Autoencoder Model
// ============================================================
// Fixed-architecture reconstruction network over padded word-id
// sequences:
//
//   word ids [b, s]
//     → embedding            [b, s, embed]
//     → LSTM encoder         final hidden state [b, latent]
//                            (the sentence's "thought vector")
//     → repeat across s      [b, s, latent]
//     → LSTM decoder         [b, s, embed]
//     → dense to one scalar  [b, s, 1], softmax per timestep
//     → reshape              [b, s]
//
// The per-timestep projection to a SINGLE unit with a softmax
// activation, scored with a multi-class loss, is reproduced from
// the network being ported. A softmax over one unit is degenerate
// (it always outputs 1), so the declared shapes are kept faithful
// here rather than silently corrected. See DESIGN.md.

use burn::{
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig, Lstm, LstmConfig},
    prelude::*,
    tensor::activation::softmax,
    tensor::backend::AutodiffBackend,
};

#[derive(Config, Debug)]
pub struct AutoencoderConfig {
    pub vocab_size: usize,
    pub embed_size: usize,
    pub seq_len: usize,
    pub latent_size: usize,
}

impl AutoencoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> AutoencoderModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embed_size).init(device);
        let encoder = LstmConfig::new(self.embed_size, self.latent_size, true).init(device);
        let decoder = LstmConfig::new(self.latent_size, self.embed_size, true).init(device);
        let projection = LinearConfig::new(self.embed_size, 1).init(device);

        // layer summary, mirroring what the operator sees when the
        // network is declared
        tracing::info!("encoder_word2emb: [batch, {}] -> [batch, {}, {}]",
            self.seq_len, self.seq_len, self.embed_size);
        tracing::info!("encoder_lstm:     [batch, {}, {}] -> [batch, {}]",
            self.seq_len, self.embed_size, self.latent_size);
        tracing::info!("decoder_repeat:   [batch, {}] -> [batch, {}, {}]",
            self.latent_size, self.seq_len, self.latent_size);
        tracing::info!("decoder_lstm:     [batch, {}, {}] -> [batch, {}, {}]",
            self.seq_len, self.latent_size, self.seq_len, self.embed_size);
        tracing::info!("decoder_emb2word: [batch, {}, {}] -> [batch, {}, 1]",
            self.seq_len, self.embed_size, self.seq_len);
        tracing::info!("decoder_reshape:  [batch, {}, 1] -> [batch, {}]",
            self.seq_len, self.seq_len);

        AutoencoderModel {
            embedding,
            encoder,
            decoder,
            projection,
        }
    }
}

#[derive(Module, Debug)]
pub struct AutoencoderModel<B: Backend> {
    embedding: Embedding<B>,
    encoder: Lstm<B>,
    decoder: Lstm<B>,
    projection: Linear<B>,
}

impl<B: Backend> AutoencoderModel<B> {
    /// input_ids: [batch, seq_len] → per-position reconstruction
    /// scores: [batch, seq_len]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = input_ids.dims();

        let embedded = self.embedding.forward(input_ids); // [b, s, embed]

        // the final hidden state is the fixed-size thought vector
        let (_, state) = self.encoder.forward(embedded, None);
        let thought = state.hidden; // [b, latent]

        // feed the same vector to the decoder at every timestep
        let repeated = thought.unsqueeze_dim::<3>(1).repeat_dim(1, seq_len);

        let (decoded, _) = self.decoder.forward(repeated, None); // [b, s, embed]

        let scores = self.projection.forward(decoded); // [b, s, 1]
        let scores = softmax(scores, 2); // singleton softmax, kept as declared

        scores.reshape([batch_size, seq_len])
    }

    /// Forward pass plus reconstruction loss against the target
    /// id sequence (identical to the input for autoencoding).
    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        targets: Tensor<B, 2, Int>,
    ) -> Tensor<B, 1>
    where
        B: AutodiffBackend,
    {
        reconstruction_loss(self.forward(input_ids), targets)
    }
}

/// Categorical-crossentropy-style loss across the sequence axis:
/// scores are rescaled to sum to one per sequence, clipped away
/// from zero, and scored against the raw id sequence.
pub fn reconstruction_loss<B: Backend>(
    scores: Tensor<B, 2>,
    targets: Tensor<B, 2, Int>,
) -> Tensor<B, 1> {
    let total = scores.clone().sum_dim(1); // [b, 1]
    let probs = (scores / total).clamp(1e-7, 1.0);
    let per_sequence = -(targets.float() * probs.log()).sum_dim(1); // [b, 1]
    per_sequence.mean()
}
