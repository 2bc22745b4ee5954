// ============================================================
// Layer 3 — Sample Domain Types
// ============================================================
// One SampleDescriptor is one logical training example before
// any audio has been touched: where the audio lives, the numeric
// transcript that goes with it, and which feature-extraction
// variant to request when it is finally loaded.
//
// The original design for this kind of pipeline keeps three
// parallel lists (paths, transcripts, augment tags) that must
// stay index-aligned through augmentation and shuffling.
// We keep a single Vec<SampleDescriptor> instead — the
// correspondence invariant becomes structural and an entire
// class of desynchronisation bugs disappears.

use serde::{Deserialize, Serialize};

// ─── AugmentMethod ────────────────────────────────────────────────────────────
/// Which feature-extraction variant to apply for one sample.
///
/// Vanilla     → plain features
/// SpecAugment → the front-end additionally masks random time
///               frames and frequency channels (Park et al. 2019)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AugmentMethod {
    Vanilla,
    SpecAugment,
}

// ─── SampleDescriptor ─────────────────────────────────────────────────────────
/// One logical example, immutable once created.
///
/// `audio_path` is relative to the dataset base directory and
/// `transcript` is the whitespace-separated numeric id string
/// from the corpus manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDescriptor {
    pub audio_path: String,
    pub transcript: String,
    pub method:     AugmentMethod,
}

impl SampleDescriptor {
    /// Create a Vanilla-tagged descriptor.
    /// Augmentation duplicates are produced later, in one place,
    /// by the expansion step — never ad hoc.
    pub fn vanilla(audio_path: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            audio_path: audio_path.into(),
            transcript: transcript.into(),
            method:     AugmentMethod::Vanilla,
        }
    }

    /// The SpecAugment twin of this descriptor: same audio,
    /// same transcript, different extraction variant.
    pub fn augmented_twin(&self) -> Self {
        Self {
            audio_path: self.audio_path.clone(),
            transcript: self.transcript.clone(),
            method:     AugmentMethod::SpecAugment,
        }
    }
}

// ─── Feature ──────────────────────────────────────────────────────────────────
/// A 2D real feature matrix [frames × channels], stored row-major.
///
/// Kept tensor-free on purpose: features are produced by the
/// front-end and consumed by the collator, and only the collator
/// decides which backend the batch tensors live on.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Row-major values, length == frames * channels
    pub data:     Vec<f32>,
    /// Number of time frames (the variable, padded dimension)
    pub frames:   usize,
    /// Values per frame (constant across a well-formed corpus)
    pub channels: usize,
}

impl Feature {
    /// Build a feature, checking the shape against the buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != frames * channels` — a malformed
    /// feature here means a front-end bug, not bad input data.
    pub fn new(data: Vec<f32>, frames: usize, channels: usize) -> Self {
        assert_eq!(
            data.len(),
            frames * channels,
            "feature buffer ({}) does not match {} frames x {} channels",
            data.len(),
            frames,
            channels
        );
        Self { data, frames, channels }
    }

    /// One time frame as a slice of `channels` values
    pub fn frame(&self, t: usize) -> &[f32] {
        let start = t * self.channels;
        &self.data[start..start + self.channels]
    }
}

// ─── LoadedSample ─────────────────────────────────────────────────────────────
/// The transient result of loading one index: extracted feature
/// plus the sos/eos-framed token-id sequence. Produced on demand,
/// never persisted.
#[derive(Debug, Clone)]
pub struct LoadedSample {
    pub feature: Feature,
    pub tokens:  Vec<i32>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augmented_twin_keeps_path_and_transcript() {
        let s = SampleDescriptor::vanilla("dir/a.pcm", "5 6 7");
        let t = s.augmented_twin();
        assert_eq!(t.audio_path, "dir/a.pcm");
        assert_eq!(t.transcript, "5 6 7");
        assert_eq!(t.method, AugmentMethod::SpecAugment);
        // the original stays Vanilla
        assert_eq!(s.method, AugmentMethod::Vanilla);
    }

    #[test]
    fn test_feature_frame_access() {
        let f = Feature::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2);
        assert_eq!(f.frame(0), &[1.0, 2.0]);
        assert_eq!(f.frame(2), &[5.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn test_feature_shape_mismatch_panics() {
        let _ = Feature::new(vec![0.0; 5], 3, 2);
    }
}
