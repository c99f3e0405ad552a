// ============================================================
// Layer 6 — Loss History Logger
// ============================================================
// Tab-separated per-epoch loss log for headless charting:
//
//   #loss<TAB>val_loss
//   0.91235<TAB>0.88765
//   ...
//
// One line per epoch, both values at 5 decimal places. The file
// is created fresh (header included) when the logger is built and
// appended to after every epoch — each append opens, writes and
// closes the handle, so the history survives a crash up to the
// last completed epoch. Visualization is an external consumer of
// this file, not part of the training system.

use anyhow::{Context, Result};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::PathBuf,
};

pub struct HistoryLogger {
    path: PathBuf,
}

impl HistoryLogger {
    /// Create (or truncate) the history file and write the header.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut f = File::create(&path)
            .with_context(|| format!("Cannot create history file '{}'", path.display()))?;
        writeln!(f, "#loss\tval_loss")?;
        Ok(Self { path })
    }

    /// Append one epoch's losses as a tab-separated line.
    pub fn log(&self, train_loss: f64, val_loss: f64) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Cannot open history file '{}'", self.path.display()))?;
        writeln!(f, "{}", format_line(train_loss, val_loss))?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn format_line(train_loss: f64, val_loss: f64) -> String {
    format!("{train_loss:.5}\t{val_loss:.5}")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn line_format_rounds_to_five_decimals() {
        assert_eq!(format_line(0.912347, 0.887653), "0.91235\t0.88765");
        assert_eq!(format_line(1.0, 0.5), "1.00000\t0.50000");
    }

    #[test]
    fn writes_header_then_one_line_per_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent-thoughts-loss.csv");

        let logger = HistoryLogger::new(&path).unwrap();
        logger.log(0.9, 0.8).unwrap();
        logger.log(0.7, 0.6).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec!["#loss\tval_loss", "0.90000\t0.80000", "0.70000\t0.60000"]
        );
    }

    #[test]
    fn new_run_truncates_old_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent-thoughts-loss.csv");

        let first = HistoryLogger::new(&path).unwrap();
        first.log(0.9, 0.8).unwrap();

        // a fresh logger owns the file for a fresh run
        let second = HistoryLogger::new(&path).unwrap();
        second.log(0.5, 0.4).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "#loss\tval_loss\n0.50000\t0.40000\n");
    }
}
