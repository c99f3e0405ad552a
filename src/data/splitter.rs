// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits the parsed sentence list into a training head and a
// validation tail.
//
// The validation set is the trailing `val_fraction` of the list,
// in corpus order, without shuffling — per-epoch shuffling is the
// batch generator's job, and keeping the split positional makes
// it reproducible across runs over the same cache file.

/// Split `items` into (train, validation) where validation is the
/// trailing `val_fraction` of the list. The fraction is truncated
/// toward zero, so tiny inputs may yield an empty validation set.
pub fn split_train_val<T>(mut items: Vec<T>, val_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total = items.len();
    let val_len = ((total as f64) * val_fraction) as usize;
    let val = items.split_off(total - val_len.min(total));

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        items.len(),
        val.len(),
    );

    (items, val)
}
