// ============================================================
// Layer 4 — Augmentation Expansion
// ============================================================
// When spec augmentation is enabled, every descriptor gets one
// SpecAugment-tagged duplicate: same audio path, same transcript,
// different feature-extraction variant. The dataset doubles.
//
// Duplicates are appended after all originals rather than
// interleaved — the construction-time shuffle is the one place
// responsible for mixing. This expansion runs exactly once, at
// dataset construction, before that shuffle.

use crate::domain::sample::{AugmentMethod, SampleDescriptor};

/// Expand a descriptor list for spec augmentation.
///
/// Disabled → the input comes back unchanged (all Vanilla).
/// Enabled  → `[originals..., augmented twins...]`, size doubled.
pub fn expand(mut samples: Vec<SampleDescriptor>, spec_augment: bool) -> Vec<SampleDescriptor> {
    if !spec_augment {
        return samples;
    }

    tracing::info!("Applying spec augmentation: {} -> {} samples", samples.len(), samples.len() * 2);

    let twins: Vec<SampleDescriptor> = samples.iter().map(SampleDescriptor::augmented_twin).collect();
    samples.extend(twins);
    samples
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(n: usize) -> Vec<SampleDescriptor> {
        (0..n)
            .map(|i| SampleDescriptor::vanilla(format!("{i}.pcm"), format!("{i}")))
            .collect()
    }

    #[test]
    fn test_disabled_leaves_input_unchanged() {
        let out = expand(descriptors(4), false);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|s| s.method == AugmentMethod::Vanilla));
    }

    #[test]
    fn test_enabled_doubles_dataset() {
        let out = expand(descriptors(4), true);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_twins_are_appended_after_originals() {
        let out = expand(descriptors(3), true);

        // First half: the originals, untouched, in order
        for (i, s) in out[..3].iter().enumerate() {
            assert_eq!(s.audio_path, format!("{i}.pcm"));
            assert_eq!(s.method, AugmentMethod::Vanilla);
        }
        // Second half: twins in the same order, SpecAugment-tagged,
        // pointing at the same audio and transcript
        for (i, s) in out[3..].iter().enumerate() {
            assert_eq!(s.audio_path, out[i].audio_path);
            assert_eq!(s.transcript, out[i].transcript);
            assert_eq!(s.method, AugmentMethod::SpecAugment);
        }
    }
}
