// ============================================================
// Layer 6 — Split Report
// ============================================================
// Records the outcome of a partitioning run to a CSV file, one
// row per (train, validation) pair. For a holdout split that is
// a single row; for k-fold it is one row per fold.
//
// Example output (reports/split_report.csv):
//   fold,train_size,valid_size
//   0,160,40
//   1,160,40
//   ...
//
// The header is written only when the file is new, so repeated
// runs append and the file doubles as a small run log.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

pub struct SplitReport {
    csv_path: PathBuf,
}

impl SplitReport {
    /// Create the report directory and CSV header if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir: PathBuf = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("split_report.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "fold,train_size,valid_size")?;
            tracing::debug!("Created split report: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one subset pair as a CSV row.
    pub fn log(&self, fold: usize, train_size: usize, valid_size: usize) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{},{}", fold, train_size, valid_size)?;

        tracing::debug!(
            "Logged fold {}: {} train / {} validation",
            fold,
            train_size,
            valid_size
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
