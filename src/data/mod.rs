// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw corpus manifest
// all the way to padded tensor batches.
//
// The pipeline flows in this order:
//
//   transcripts.txt (tab-separated manifest)
//       │
//       ▼
//   corpus              → parses lines into (path, transcript) entries
//       │
//       ▼
//   splitter            → holdout or k-fold index partitioning
//       │
//       ▼
//   augment             → duplicates entries for SpecAugment
//       │
//       ▼
//   SpectrogramDataset  → seeded shuffle + per-index sample loading
//       │
//       ▼
//   transcript          → numeric ids framed with sos/eos markers
//       │
//       ▼
//   SpectrogramBatcher  → filters, sorts longest-first, pads
//
// Each module is responsible for exactly one step, so each step
// is independently testable and replaceable.

/// Parses the tab-separated corpus manifest
pub mod corpus;

/// Encodes numeric transcripts with sos/eos framing
pub mod transcript;

/// Duplicates descriptors when spec augmentation is enabled
pub mod augment;

/// Indexed dataset: shuffle state + on-demand sample loading
pub mod dataset;

/// Collates loaded samples into padded batch tensors
pub mod batcher;

/// Holdout and k-fold partitioning into train/validation datasets
pub mod splitter;
