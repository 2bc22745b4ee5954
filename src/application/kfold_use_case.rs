// ============================================================
// Layer 2 — KfoldUseCase
// ============================================================
// Cross-validation path: the manifest is partitioned into k
// disjoint validation slices (plus complementary training
// slices), one dataset pair per fold, every pair logged to the
// split report. The first fold gets a probe collation; the rest
// share the same code paths, so one probe proves them all.

use anyhow::Result;

use crate::application::pipeline::{probe_batch, PipelineConfig};
use crate::data::corpus::load_corpus;
use crate::data::splitter::split_kfold;
use crate::infra::report::SplitReport;

pub struct KfoldUseCase {
    config:    PipelineConfig,
    num_folds: usize,
}

impl KfoldUseCase {
    pub fn new(config: PipelineConfig, num_folds: usize) -> Self {
        Self { config, num_folds }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        anyhow::ensure!(
            self.num_folds >= 2,
            "num_folds must be at least 2, got {}",
            self.num_folds
        );

        // ── Step 1: corpus manifest ───────────────────────────────────────────
        let entries = load_corpus(&cfg.transcripts)?;

        // ── Step 2: vocabulary + front-end ────────────────────────────────────
        let ctx = cfg.dataset_context()?;

        // ── Step 3: k-fold partitioning ───────────────────────────────────────
        let folds = split_kfold(&entries, self.num_folds, &ctx, cfg.seed);

        // ── Step 4: persist config and per-fold sizes ─────────────────────────
        cfg.save(&cfg.report_dir)?;
        let report = SplitReport::new(&cfg.report_dir)?;

        for (i, (train, valid)) in folds.iter().enumerate() {
            tracing::info!(
                "Fold {}: {} train / {} validation",
                i,
                train.sample_count(),
                valid.sample_count()
            );
            report.log(i, train.sample_count(), valid.sample_count())?;
        }

        // ── Step 5: probe the first fold ──────────────────────────────────────
        if let Some((train, _)) = folds.first() {
            probe_batch(train, cfg.batch_size, "fold-0 train");
        }

        Ok(())
    }
}
