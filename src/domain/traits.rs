// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The data pipeline never touches audio bytes directly; it only
// talks to an acoustic front-end through this trait. That keeps
// the core testable with a stub extractor and lets the numeric
// transform (filterbanks, MFCCs, whatever) be swapped without
// touching dataset, batching or splitting code.
//
// Implementations:
//   - RawPcmExtractor (infra) → frames raw 16-bit PCM files
//   - test stubs              → deterministic synthetic features

use std::path::Path;

use crate::domain::sample::{AugmentMethod, Feature};

// ─── FeatureExtractor ─────────────────────────────────────────────────────────
/// Any component that can turn an audio file into a 2D feature
/// matrix, keyed by path and augmentation variant.
///
/// Failure is per-call and signalled by `None` — a missing or
/// corrupt file must cost the pipeline one sample, not the run.
/// Implementations must return promptly on failure, never hang.
///
/// `Send + Sync` is required so datasets can serve concurrent
/// `get` calls across loader workers.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, audio_path: &Path, method: AugmentMethod) -> Option<Feature>;
}
