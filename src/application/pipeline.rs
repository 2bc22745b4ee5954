// ============================================================
// Layer 2 — Shared Pipeline Config and Helpers
// ============================================================
// PipelineConfig carries every option both use cases share.
// It is serialisable so each run can persist the exact settings
// next to its report — six months later the CSV alone does not
// tell you which seed or frame size produced it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::batcher::SpectrogramBatcher;
use crate::data::dataset::{DatasetContext, SpectrogramDataset};
use crate::infra::feature::RawPcmExtractor;
use crate::infra::vocab::Vocabulary;

/// Tensor backend for probe collation. Batches are only
/// materialised to validate the pipeline, so the CPU backend is
/// all that is needed here.
pub type ProbeBackend = burn::backend::NdArray;

// ─── PipelineConfig ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the tab-separated corpus manifest
    pub transcripts:     String,
    /// Base directory joined with each relative audio path
    pub dataset_dir:     String,
    /// Extension appended to manifest paths that lack one
    pub audio_extension: String,
    /// Duplicate every sample with a SpecAugment twin
    pub spec_augment:    bool,
    /// Samples per feature frame (channel count)
    pub frame_size:      usize,
    /// Start-of-sequence marker id (ignored when vocab_csv is set)
    pub sos_id:          i32,
    /// End-of-sequence marker id (ignored when vocab_csv is set)
    pub eos_id:          i32,
    /// Optional label inventory CSV supplying the marker ids
    pub vocab_csv:       Option<String>,
    /// Probe batch size
    pub batch_size:      usize,
    /// Seed for every random decision in the run
    pub seed:            u64,
    /// Directory for the split report and saved config
    pub report_dir:      String,
}

impl PipelineConfig {
    /// Resolve the vocabulary: label CSV when given, explicit
    /// marker ids otherwise.
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocab_csv {
            Some(path) => Vocabulary::from_labels_csv(path),
            None => Ok(Vocabulary::new(self.sos_id, self.eos_id, 0)),
        }
    }

    /// Build the dataset construction context: vocabulary ids plus
    /// the PCM front-end, wired up from this config.
    pub fn dataset_context(&self) -> Result<DatasetContext> {
        let vocab = self.vocabulary()?;
        let extractor =
            RawPcmExtractor::new(self.frame_size, self.audio_extension.clone(), self.seed);

        Ok(DatasetContext {
            sos_id:       vocab.sos_id,
            eos_id:       vocab.eos_id,
            base_dir:     PathBuf::from(&self.dataset_dir),
            spec_augment: self.spec_augment,
            extractor:    Arc::new(extractor),
        })
    }

    /// Persist this config as JSON next to the report.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join("prepare_config.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }
}

// ─── Probe collation ──────────────────────────────────────────────────────────
/// Load and collate the first batch of a dataset to prove the
/// pipeline end to end: paths resolve, audio reads, transcripts
/// encode, padding shapes line up.
///
/// A failed probe is reported but absorbed — data preparation
/// degrades volume, it must not abort the surrounding run.
pub fn probe_batch(dataset: &SpectrogramDataset, batch_size: usize, label: &str) {
    let count = batch_size.min(dataset.len());
    if count == 0 {
        tracing::warn!("Probe skipped: '{}' dataset is empty", label);
        return;
    }

    let items: Vec<_> = (0..count).map(|i| dataset.get(i)).collect();
    let dropped = items.iter().filter(|i| i.is_none()).count();

    let batcher = SpectrogramBatcher::<ProbeBackend>::new(Default::default());
    match batcher.collate(items) {
        Ok(batch) => {
            let [n, frames, channels] = batch.features.dims();
            tracing::info!(
                "Probe '{}': features [{} x {} x {}], targets {:?}, {} dropped",
                label,
                n,
                frames,
                channels,
                batch.targets.dims(),
                dropped
            );
        }
        Err(e) => {
            tracing::warn!("Probe '{}' failed: {:#}", label, e);
        }
    }
}
