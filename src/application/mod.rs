// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data pipeline end to end. Each use case is a
// thin sequence of Layer 4/6 calls:
//
//   load manifest → build vocabulary → partition → construct
//   datasets → probe one collated batch → write the CSV report
//
// The CLI converts its arguments into the configs defined here
// and calls execute(); nothing below this layer knows clap.

/// Shared config and pipeline helpers (context, probe batch)
pub mod pipeline;

/// Single holdout train/validation split
pub mod split_use_case;

/// K-fold cross-validation splitting
pub mod kfold_use_case;
