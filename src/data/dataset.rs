// ============================================================
// Layer 4 — Spectrogram Dataset
// ============================================================
// An indexed collection of sample descriptors plus everything
// needed to load one of them on demand: the sos/eos marker ids,
// the dataset base directory, and the injected acoustic
// front-end.
//
// Construction order matters and happens exactly once:
//   1. manifest entries become Vanilla descriptors
//   2. augmentation expansion appends SpecAugment twins
//   3. a seeded Fisher-Yates shuffle mixes the result
//
// After construction the descriptor list is only ever permuted
// (by explicit `shuffle` calls between epochs), never resized,
// and never mutated by `get`. That makes `get` safe to call
// concurrently for distinct indices from loader workers — the
// caller's only obligation is to serialise `shuffle` against an
// epoch boundary.
//
// Implements Burn's Dataset trait so a DataLoader can drive it
// with .get(index) and .len(). A `None` from `get` means "this
// sample failed to load, drop it" — the collator downstream
// filters those out.

use std::path::PathBuf;
use std::sync::Arc;

use burn::data::dataset::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::augment;
use crate::data::corpus::CorpusEntry;
use crate::data::transcript::{self, TranscriptStatus};
use crate::domain::sample::{LoadedSample, SampleDescriptor};
use crate::domain::traits::FeatureExtractor;

// ─── DatasetContext ───────────────────────────────────────────────────────────
/// Everything a dataset needs besides its own descriptors.
/// Shared by both subsets of a split, so it is cheap to clone
/// (the extractor rides in an Arc).
#[derive(Clone)]
pub struct DatasetContext {
    /// Start-of-sequence marker id, prepended to every transcript
    pub sos_id:       i32,
    /// End-of-sequence marker id, appended to every transcript
    pub eos_id:       i32,
    /// Base directory joined with each relative audio path
    pub base_dir:     PathBuf,
    /// Whether to duplicate every sample with a SpecAugment twin
    pub spec_augment: bool,
    /// The acoustic front-end (opaque to this layer)
    pub extractor:    Arc<dyn FeatureExtractor>,
}

// ─── SpectrogramDataset ───────────────────────────────────────────────────────
pub struct SpectrogramDataset {
    samples:   Vec<SampleDescriptor>,
    sos_id:    i32,
    eos_id:    i32,
    base_dir:  PathBuf,
    extractor: Arc<dyn FeatureExtractor>,
}

impl SpectrogramDataset {
    /// Build a dataset from manifest entries: expand for
    /// augmentation, then shuffle once with the caller's rng.
    pub fn new(entries: Vec<CorpusEntry>, ctx: &DatasetContext, rng: &mut StdRng) -> Self {
        let descriptors: Vec<SampleDescriptor> = entries
            .into_iter()
            .map(|e| SampleDescriptor::vanilla(e.audio_path, e.transcript))
            .collect();

        let samples = augment::expand(descriptors, ctx.spec_augment);

        let mut dataset = Self {
            samples,
            sos_id:    ctx.sos_id,
            eos_id:    ctx.eos_id,
            base_dir:  ctx.base_dir.clone(),
            extractor: Arc::clone(&ctx.extractor),
        };
        dataset.shuffle(rng);
        dataset
    }

    /// Reshuffle the descriptors in place (call between epochs).
    ///
    /// A single Fisher-Yates permutation of the descriptor vector:
    /// each descriptor carries its own path/transcript/method, so
    /// their correspondence cannot drift no matter how often this
    /// runs. Must not be called while `get` calls are in flight.
    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.samples.shuffle(rng);
    }

    /// Number of samples (after any augmentation expansion)
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Read-only view of the descriptors, in current order
    pub fn descriptors(&self) -> &[SampleDescriptor] {
        &self.samples
    }
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// `get` is the per-sample loader: resolve the path, ask the
// front-end for features, encode the transcript.
impl Dataset<LoadedSample> for SpectrogramDataset {
    fn get(&self, index: usize) -> Option<LoadedSample> {
        let desc = self.samples.get(index)?;

        let audio_path = self.base_dir.join(&desc.audio_path);

        // Front-end failure (missing/corrupt file) drops exactly
        // this sample; the batch and the run carry on.
        let feature = self.extractor.extract(&audio_path, desc.method)?;

        let (tokens, status) = transcript::encode(&desc.transcript, self.sos_id, self.eos_id);
        if status == TranscriptStatus::HadErrors {
            // Parse trouble is diagnostic, not a drop: the sample
            // is returned with its best-effort token list.
            tracing::warn!(
                "Transcript parse errors at index {}: '{}'",
                index,
                desc.transcript
            );
        }

        Some(LoadedSample { feature, tokens })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
