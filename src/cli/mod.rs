// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `split` — single holdout train/validation split
//   2. `kfold` — k-fold cross-validation partitioning

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, KfoldArgs, SplitArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "asr-dataprep",
    version = "0.1.0",
    about = "Prepare a speech corpus: split, augment, and batch-collate training data."
)]
pub struct Cli {
    /// The subcommand to run (split or kfold)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use
    /// case. The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Split(args) => Self::run_split(args),
            Commands::Kfold(args) => Self::run_kfold(args),
        }
    }

    fn run_split(args: SplitArgs) -> Result<()> {
        use crate::application::split_use_case::SplitUseCase;

        tracing::info!("Holdout split of corpus '{}'", args.transcripts);

        let valid_size = args.valid_size;
        let use_case = SplitUseCase::new(args.into(), valid_size);
        use_case.execute()?;

        println!("Split complete. Report written.");
        Ok(())
    }

    fn run_kfold(args: KfoldArgs) -> Result<()> {
        use crate::application::kfold_use_case::KfoldUseCase;

        tracing::info!(
            "{}-fold cross-validation of corpus '{}'",
            args.num_folds,
            args.transcripts
        );

        let num_folds = args.num_folds;
        let use_case = KfoldUseCase::new(args.into(), num_folds);
        use_case.execute()?;

        println!("Cross-validation folds prepared. Report written.");
        Ok(())
    }
}
