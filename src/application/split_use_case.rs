// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// The holdout path, in order:
//
//   Step 1: Load the corpus manifest       (Layer 4 - data)
//   Step 2: Build the dataset context      (Layer 2 + 6)
//   Step 3: Holdout split into two sets    (Layer 4 - data)
//   Step 4: Save config + report sizes     (Layer 6 - infra)
//   Step 5: Probe-collate the first batch  (Layer 4 - data)

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::pipeline::{probe_batch, PipelineConfig};
use crate::data::corpus::load_corpus;
use crate::data::splitter::split_holdout;
use crate::infra::report::SplitReport;

pub struct SplitUseCase {
    config:     PipelineConfig,
    valid_size: f64,
}

impl SplitUseCase {
    pub fn new(config: PipelineConfig, valid_size: f64) -> Self {
        Self { config, valid_size }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        anyhow::ensure!(
            self.valid_size > 0.0 && self.valid_size < 1.0,
            "valid_size must be in (0, 1), got {}",
            self.valid_size
        );

        // ── Step 1: corpus manifest ───────────────────────────────────────────
        let entries = load_corpus(&cfg.transcripts)?;

        // ── Step 2: vocabulary + front-end ────────────────────────────────────
        let ctx = cfg.dataset_context()?;

        // ── Step 3: holdout split ─────────────────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let (train, valid) = split_holdout(&entries, self.valid_size, &ctx, &mut rng);
        tracing::info!(
            "Datasets ready: {} train / {} validation samples{}",
            train.sample_count(),
            valid.sample_count(),
            if cfg.spec_augment { " (spec-augmented)" } else { "" }
        );

        // ── Step 4: persist config and sizes ──────────────────────────────────
        cfg.save(&cfg.report_dir)?;
        let report = SplitReport::new(&cfg.report_dir)?;
        report.log(0, train.sample_count(), valid.sample_count())?;

        // ── Step 5: probe one batch from each subset ──────────────────────────
        probe_batch(&train, cfg.batch_size, "train");
        probe_batch(&valid, cfg.batch_size, "valid");

        Ok(())
    }
}
