// ============================================================
// Layer 6 — Raw PCM Front-End
// ============================================================
// The simplest possible FeatureExtractor: read a headerless
// 16-bit little-endian PCM file, normalise to [-1, 1], and cut
// the sample stream into fixed-width frames. One frame becomes
// one feature row, frame_size samples become the channel axis.
//
// No filterbanks, no normalisation policy — the numeric
// transform is deliberately out of scope and swappable behind
// the FeatureExtractor trait. What this module does own is the
// SpecAugment variant: when a sample is tagged SpecAugment, a
// handful of random time frames and channel bands are zeroed
// out (Park et al. 2019), which is a property of the feature
// matrix, not of the acoustic transform.
//
// Failure policy: a missing, unreadable or too-short file logs
// a warning and returns None promptly. One bad file costs one
// sample, never the run.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::fs;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::sample::{AugmentMethod, Feature};
use crate::domain::traits::FeatureExtractor;

// ─── SpecAugmentConfig ────────────────────────────────────────────────────────
/// Masking knobs for the SpecAugment variant.
#[derive(Debug, Clone, Copy)]
pub struct SpecAugmentConfig {
    /// Maximum width (in channels) of one frequency mask
    pub freq_mask_para: usize,
    /// Number of time masks applied per sample
    pub time_mask_num:  usize,
    /// Number of frequency masks applied per sample
    pub freq_mask_num:  usize,
}

impl Default for SpecAugmentConfig {
    fn default() -> Self {
        Self {
            freq_mask_para: 18,
            time_mask_num:  4,
            freq_mask_num:  2,
        }
    }
}

// ─── RawPcmExtractor ──────────────────────────────────────────────────────────
pub struct RawPcmExtractor {
    /// Samples per frame — becomes the channel count of features
    frame_size: usize,
    /// Extension appended to manifest paths that lack one
    extension:  String,
    /// SpecAugment masking parameters
    augment:    SpecAugmentConfig,
    /// Base seed; per-file rngs derive from it so augmentation is
    /// reproducible without shared mutable state across workers
    seed:       u64,
}

impl RawPcmExtractor {
    pub fn new(frame_size: usize, extension: impl Into<String>, seed: u64) -> Self {
        assert!(frame_size > 0, "frame_size must be positive");
        Self {
            frame_size,
            extension: extension.into(),
            augment: SpecAugmentConfig::default(),
            seed,
        }
    }

    pub fn with_augment(mut self, augment: SpecAugmentConfig) -> Self {
        self.augment = augment;
        self
    }

    fn resolve_path(&self, audio_path: &Path) -> PathBuf {
        if audio_path.extension().is_some() {
            audio_path.to_path_buf()
        } else {
            audio_path.with_extension(&self.extension)
        }
    }

    /// Deterministic per-file rng: same seed + same path → same
    /// masks, and no locking between concurrent extract calls.
    fn rng_for(&self, path: &Path) -> StdRng {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }
}

impl FeatureExtractor for RawPcmExtractor {
    fn extract(&self, audio_path: &Path, method: AugmentMethod) -> Option<Feature> {
        let path = self.resolve_path(audio_path);

        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Dropping sample, cannot read '{}': {}", path.display(), e);
                return None;
            }
        };

        let mut feature = match frame_pcm(&bytes, self.frame_size) {
            Some(f) => f,
            None => {
                tracing::warn!(
                    "Dropping sample, '{}' is shorter than one frame ({} samples)",
                    path.display(),
                    self.frame_size
                );
                return None;
            }
        };

        if method == AugmentMethod::SpecAugment {
            apply_spec_augment(&mut feature, &self.augment, &mut self.rng_for(&path));
        }

        Some(feature)
    }
}

// ─── PCM framing ──────────────────────────────────────────────────────────────
/// Decode 16-bit LE PCM bytes and cut into `frame_size`-wide
/// rows. Trailing samples that do not fill a frame are dropped,
/// as is a trailing odd byte. None if not even one full frame.
fn frame_pcm(bytes: &[u8], frame_size: usize) -> Option<Feature> {
    let samples: Vec<f32> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();

    let frames = samples.len() / frame_size;
    if frames == 0 {
        return None;
    }

    let data = samples[..frames * frame_size].to_vec();
    Some(Feature::new(data, frames, frame_size))
}

// ─── SpecAugment masking ──────────────────────────────────────────────────────
/// Zero out `time_mask_num` random frame bands and
/// `freq_mask_num` random channel bands in place.
fn apply_spec_augment(feature: &mut Feature, cfg: &SpecAugmentConfig, rng: &mut StdRng) {
    let frames   = feature.frames;
    let channels = feature.channels;

    // Time masks: contiguous frame ranges up to a fifth of the
    // utterance, so short clips are never wiped out entirely.
    let max_time_width = (frames / 5).max(1);
    for _ in 0..cfg.time_mask_num {
        let width = rng.gen_range(0..=max_time_width.min(frames));
        if width == 0 {
            continue;
        }
        let start = rng.gen_range(0..=frames - width);
        for t in start..start + width {
            let row = t * channels;
            feature.data[row..row + channels].fill(0.0);
        }
    }

    // Frequency masks: contiguous channel bands
    let max_freq_width = cfg.freq_mask_para.min(channels);
    for _ in 0..cfg.freq_mask_num {
        let width = rng.gen_range(0..=max_freq_width);
        if width == 0 {
            continue;
        }
        let start = rng.gen_range(0..=channels - width);
        for t in 0..frames {
            let row = t * channels;
            feature.data[row + start..row + start + width].fill(0.0);
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_pcm_into_rows() {
        // 6 samples of i16 → frame_size 3 → 2 frames
        let mut bytes = Vec::new();
        for v in [0i16, 16384, -16384, 32767, 1, -1] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }

        let f = frame_pcm(&bytes, 3).unwrap();
        assert_eq!(f.frames, 2);
        assert_eq!(f.channels, 3);
        assert_eq!(f.frame(0)[0], 0.0);
        assert!((f.frame(0)[1] - 0.5).abs() < 1e-6);
        assert!((f.frame(0)[2] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_trailing_frame_is_dropped() {
        let bytes = vec![0u8; 10]; // 5 samples
        let f = frame_pcm(&bytes, 2).unwrap();
        assert_eq!(f.frames, 2);
    }

    #[test]
    fn test_too_short_input_is_none() {
        assert!(frame_pcm(&[0u8; 2], 4).is_none());
        assert!(frame_pcm(&[], 1).is_none());
    }

    #[test]
    fn test_spec_augment_keeps_shape_and_zeroes_something() {
        let mut feature = Feature::new(vec![1.0; 40 * 8], 40, 8);
        let cfg = SpecAugmentConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        apply_spec_augment(&mut feature, &cfg, &mut rng);

        assert_eq!(feature.frames, 40);
        assert_eq!(feature.channels, 8);
        assert!(feature.data.iter().any(|&v| v == 0.0));
        assert!(feature.data.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn test_spec_augment_is_deterministic_per_seed() {
        let run = || {
            let mut feature = Feature::new(vec![1.0; 30 * 6], 30, 6);
            let mut rng = StdRng::seed_from_u64(9);
            apply_spec_augment(&mut feature, &SpecAugmentConfig::default(), &mut rng);
            feature.data
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_missing_file_returns_none() {
        let extractor = RawPcmExtractor::new(4, "pcm", 0);
        let result = extractor.extract(
            Path::new("/definitely/not/here/utt"),
            AugmentMethod::Vanilla,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_extension_is_appended_when_missing() {
        let extractor = RawPcmExtractor::new(4, "pcm", 0);
        assert_eq!(
            extractor.resolve_path(Path::new("/d/utt")),
            PathBuf::from("/d/utt.pcm")
        );
        assert_eq!(
            extractor.resolve_path(Path::new("/d/utt.wav")),
            PathBuf::from("/d/utt.wav")
        );
    }

    #[test]
    fn test_single_frame_masking_does_not_panic() {
        let mut feature = Feature::new(vec![1.0; 4], 1, 4);
        let mut rng = StdRng::seed_from_u64(1);
        apply_spec_augment(&mut feature, &SpecAugmentConfig::default(), &mut rng);
        assert_eq!(feature.frames, 1);
    }
}
