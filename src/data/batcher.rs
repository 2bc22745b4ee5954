// ============================================================
// Layer 4 — Spectrogram Batcher
// ============================================================
// Collates a list of per-index load results into one padded
// batch the training loop can consume directly.
//
// How batching works here:
//   Input:  Vec of N Option<LoadedSample>, variable lengths
//   Output: features [N, max_frames, channels]  (zero-padded)
//           targets  [N, max_tokens]            (pad-id-filled)
//           seq_lengths / target_lengths        (per-sample)
//
// Unlike the Q&A-style case where every sequence is pre-padded
// to one length, speech features vary per utterance, so the
// padding happens right here:
//
//   1. drop load failures (None entries)
//   2. stable-sort longest-first by frame count — downstream
//      sequence packing requires this ordering, and a stable
//      sort keeps tied samples in their arrival order
//   3. allocate flat zero/pad buffers at the max sizes, copy
//      each sample into the prefix of its row
//   4. flatten → 1D tensor → reshape, on the batcher's device
//
// An empty batch after filtering is an explicit error: every
// sample failing to load means the corpus or front-end is broken,
// and that deserves a loud failure rather than a zero-row batch.

use anyhow::{bail, ensure, Result};
use burn::prelude::*;

use crate::domain::sample::LoadedSample;

// ─── SpectrogramBatch ─────────────────────────────────────────────────────────
/// A batch of speech samples ready for the model forward pass.
/// Row order is fixed by the longest-first collation sort, not
/// by the dataset order the samples arrived in.
#[derive(Debug, Clone)]
pub struct SpectrogramBatch<B: Backend> {
    /// Padded features — shape: [batch_size, max_frames, channels]
    /// Positions at and beyond a sample's true frame count are 0.0
    pub features: Tensor<B, 3>,

    /// Padded token ids — shape: [batch_size, max_tokens]
    /// Positions beyond a sample's true token count hold the pad id
    pub targets: Tensor<B, 2, Int>,

    /// True frame count per sample — shape: [batch_size]
    /// Sorted descending; feeds packed-sequence construction
    pub seq_lengths: Tensor<B, 1, Int>,

    /// True token count minus one, per sample.
    /// The trailing eos marker is excluded from the length used
    /// for loss computation (shifted-target convention).
    pub target_lengths: Vec<usize>,
}

// ─── SpectrogramBatcher ───────────────────────────────────────────────────────
/// Holds the target device and the pad id so collation can build
/// tensors in the right place with the right filler.
#[derive(Clone, Debug)]
pub struct SpectrogramBatcher<B: Backend> {
    pub device: B::Device,
    pub pad_id: i32,
}

impl<B: Backend> SpectrogramBatcher<B> {
    /// Create a batcher with the conventional pad id of 0
    pub fn new(device: B::Device) -> Self {
        Self { device, pad_id: 0 }
    }

    /// Collate per-index load results into one padded batch.
    ///
    /// `None` entries are dropped samples (feature extraction
    /// failed upstream) — they cost batch rows, never errors.
    pub fn collate(&self, items: Vec<Option<LoadedSample>>) -> Result<SpectrogramBatch<B>> {
        // ── Step 1: drop load failures ────────────────────────────────────────
        let mut batch: Vec<LoadedSample> = items.into_iter().flatten().collect();

        if batch.is_empty() {
            bail!("empty batch: every sample failed to load — check dataset path and audio files");
        }

        // ── Step 2: longest-first stable sort by frame count ──────────────────
        // Vec::sort_by is stable, so ties keep their input order.
        batch.sort_by(|a, b| b.feature.frames.cmp(&a.feature.frames));

        let batch_size = batch.len();
        let channels   = batch[0].feature.channels;

        // Mixed channel counts cannot be stacked into one tensor.
        // This is a front-end configuration bug, surfaced loudly.
        for s in &batch {
            ensure!(
                s.feature.channels == channels,
                "channel mismatch in batch: {} vs {}",
                s.feature.channels,
                channels
            );
        }

        // ── Step 3: padded sizes ──────────────────────────────────────────────
        // After the sort the longest feature is first; the longest
        // token sequence may belong to a different sample, so it is
        // computed independently.
        let max_frames = batch[0].feature.frames;
        let max_tokens = batch
            .iter()
            .map(|s| s.tokens.len())
            .max()
            .unwrap_or(0);

        // ── Step 4: length metadata (post-sort order) ─────────────────────────
        let seq_lengths: Vec<i32> = batch.iter().map(|s| s.feature.frames as i32).collect();
        // tokens always include sos+eos, so len >= 2 and the -1 is safe
        let target_lengths: Vec<usize> = batch.iter().map(|s| s.tokens.len() - 1).collect();

        // ── Step 5: copy rows into flat padded buffers ────────────────────────
        let mut feat_flat = vec![0.0f32; batch_size * max_frames * channels];
        let mut tgt_flat  = vec![self.pad_id; batch_size * max_tokens];

        for (row, sample) in batch.iter().enumerate() {
            let feat_start = row * max_frames * channels;
            feat_flat[feat_start..feat_start + sample.feature.data.len()]
                .copy_from_slice(&sample.feature.data);

            let tgt_start = row * max_tokens;
            tgt_flat[tgt_start..tgt_start + sample.tokens.len()].copy_from_slice(&sample.tokens);
        }

        // ── Step 6: flat buffers → shaped tensors ─────────────────────────────
        let features = Tensor::<B, 1>::from_floats(feat_flat.as_slice(), &self.device)
            .reshape([batch_size, max_frames, channels]);

        let targets = Tensor::<B, 1, Int>::from_ints(tgt_flat.as_slice(), &self.device)
            .reshape([batch_size, max_tokens]);

        let seq_lengths =
            Tensor::<B, 1, Int>::from_ints(seq_lengths.as_slice(), &self.device);

        Ok(SpectrogramBatch {
            features,
            targets,
            seq_lengths,
            target_lengths,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transcript;
    use crate::domain::sample::Feature;

    type TestBackend = burn::backend::NdArray;

    fn batcher() -> SpectrogramBatcher<TestBackend> {
        SpectrogramBatcher::new(Default::default())
    }

    /// A sample with `frames` frames of 2 channels, every value
    /// set to `fill` so rows are recognisable after sorting.
    fn sample(frames: usize, fill: f32, tokens: Vec<i32>) -> Option<LoadedSample> {
        Some(LoadedSample {
            feature: Feature::new(vec![fill; frames * 2], frames, 2),
            tokens,
        })
    }

    fn int_rows(t: Tensor<TestBackend, 2, Int>) -> Vec<i32> {
        t.into_data().convert::<i32>().value
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let result = batcher().collate(vec![None, None]);
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_samples_are_dropped_silently() {
        let items = vec![None, sample(3, 1.0, vec![1, 5, 2]), None];
        let batch = batcher().collate(items).unwrap();
        assert_eq!(batch.features.dims(), [1, 3, 2]);
    }

    #[test]
    fn test_sorted_longest_first_with_stable_ties() {
        let items = vec![
            sample(3, 10.0, vec![1, 2]), // tie, arrived first
            sample(5, 20.0, vec![1, 2]),
            sample(3, 30.0, vec![1, 2]), // tie, arrived second
        ];
        let batch = batcher().collate(items).unwrap();

        let lengths = batch.seq_lengths.into_data().convert::<i32>().value;
        assert_eq!(lengths, vec![5, 3, 3]);

        // Tied rows keep arrival order: 10.0 before 30.0
        let flat = batch.features.into_data().value;
        let row = |r: usize| &flat[r * 5 * 2..(r + 1) * 5 * 2];
        assert_eq!(row(0)[0], 20.0);
        assert_eq!(row(1)[0], 10.0);
        assert_eq!(row(2)[0], 30.0);
    }

    #[test]
    fn test_feature_padding_is_zero_beyond_true_length() {
        let items = vec![sample(4, 1.5, vec![1, 2]), sample(2, 2.5, vec![1, 2])];
        let batch = batcher().collate(items).unwrap();

        assert_eq!(batch.features.dims(), [2, 4, 2]);
        let flat = batch.features.into_data().value;

        // Row 1 (the 2-frame sample): frames 0..2 real, 2..4 zero
        let row1 = &flat[4 * 2..8 * 2];
        assert!(row1[..4].iter().all(|&v| v == 2.5));
        assert!(row1[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_target_padding_and_lengths() {
        // Longest tokens belong to the *shorter* feature on
        // purpose: max_frames and max_tokens are independent.
        let items = vec![
            sample(5, 1.0, vec![1, 7, 2]),
            sample(2, 1.0, vec![1, 5, 6, 8, 2]),
        ];
        let batch = batcher().collate(items).unwrap();

        assert_eq!(batch.targets.dims(), [2, 5]);
        let rows = int_rows(batch.targets);
        assert_eq!(&rows[..5], &[1, 7, 2, 0, 0]);
        assert_eq!(&rows[5..], &[1, 5, 6, 8, 2]);

        // token count minus one — eos excluded from loss length
        assert_eq!(batch.target_lengths, vec![2, 4]);
    }

    #[test]
    fn test_channel_mismatch_is_an_error() {
        let odd = Some(LoadedSample {
            feature: Feature::new(vec![0.0; 9], 3, 3),
            tokens:  vec![1, 2],
        });
        let result = batcher().collate(vec![sample(3, 1.0, vec![1, 2]), odd]);
        assert!(result.is_err());
    }

    #[test]
    fn test_two_line_corpus_end_to_end() {
        // Manifest lines "a.wav\t안녕\t5 6" and "b.wav\t잘가\t7"
        // with sos=1, eos=2
        let (tokens_a, _) = transcript::encode("5 6", 1, 2);
        let (tokens_b, _) = transcript::encode("7", 1, 2);
        assert_eq!(tokens_a, vec![1, 5, 6, 2]);
        assert_eq!(tokens_b, vec![1, 7, 2]);

        let items = vec![sample(4, 1.0, tokens_a), sample(3, 1.0, tokens_b)];
        let batch = batcher().collate(items).unwrap();

        assert_eq!(batch.targets.dims(), [2, 4]);
        let rows = int_rows(batch.targets);
        // Shorter row padded with 0 in its last position
        assert_eq!(&rows[4..], &[1, 7, 2, 0]);
        assert_eq!(batch.target_lengths, vec![3, 2]);
    }
}
