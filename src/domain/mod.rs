// ============================================================
// Layer 3 — Domain Types and Abstractions
// ============================================================
// Plain data types shared by every other layer, plus the
// trait seam to the acoustic front-end.
//
// Nothing in this layer does I/O or owns tensors — it is the
// vocabulary the data pipeline and the infrastructure agree on.

/// Sample descriptors, features and loaded samples
pub mod sample;

/// The FeatureExtractor trait — boundary to the acoustic front-end
pub mod traits;
