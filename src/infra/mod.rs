// ============================================================
// Layer 6 — Infrastructure
// ============================================================
// Concrete collaborators the data pipeline only knows through
// values and traits: the vocabulary that supplies marker ids,
// the acoustic front-end implementation, and the split report
// written to disk after a run.

/// Supplies sos/eos/pad marker ids, loadable from a label CSV
pub mod vocab;

/// Raw-PCM framing FeatureExtractor with SpecAugment masking
pub mod feature;

/// Appends per-subset sizes to a CSV split report
pub mod report;
