// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `split` and `kfold`, and their
// configurable flags. clap's derive macros generate help text,
// missing-argument errors and type conversion.
//
// Both subcommands share the corpus/pipeline flags; they differ
// only in how the partition is made (fraction vs fold count).

use clap::{Args, Subcommand};

use crate::application::pipeline::PipelineConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Holdout split: one randomized train/validation partition
    Split(SplitArgs),

    /// K-fold cross-validation: k disjoint validation slices
    Kfold(KfoldArgs),
}

/// All arguments for the `split` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Tab-separated corpus manifest (path \t text \t numeric ids)
    #[arg(long, default_value = "data/transcripts.txt")]
    pub transcripts: String,

    /// Base directory containing the audio files
    #[arg(long, default_value = "data/audio")]
    pub dataset_dir: String,

    /// Extension appended to manifest paths that lack one
    #[arg(long, default_value = "pcm")]
    pub audio_extension: String,

    /// Duplicate every sample with a SpecAugment variant
    #[arg(long)]
    pub spec_augment: bool,

    /// Fraction of the corpus held out for validation, in (0, 1)
    #[arg(long, default_value_t = 0.2)]
    pub valid_size: f64,

    /// Samples per feature frame (the channel count)
    #[arg(long, default_value_t = 80)]
    pub frame_size: usize,

    /// Start-of-sequence marker id (overridden by --vocab-csv)
    #[arg(long, default_value_t = 1)]
    pub sos_id: i32,

    /// End-of-sequence marker id (overridden by --vocab-csv)
    #[arg(long, default_value_t = 2)]
    pub eos_id: i32,

    /// Label inventory CSV with <sos>/<eos> rows
    #[arg(long)]
    pub vocab_csv: Option<String>,

    /// Number of samples collated in the probe batch
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Seed for every random decision in the run
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory for the split report and saved config
    #[arg(long, default_value = "reports")]
    pub report_dir: String,
}

/// Convert CLI SplitArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 — the
/// application layer never sees clap types.
impl From<SplitArgs> for PipelineConfig {
    fn from(a: SplitArgs) -> Self {
        PipelineConfig {
            transcripts:     a.transcripts,
            dataset_dir:     a.dataset_dir,
            audio_extension: a.audio_extension,
            spec_augment:    a.spec_augment,
            frame_size:      a.frame_size,
            sos_id:          a.sos_id,
            eos_id:          a.eos_id,
            vocab_csv:       a.vocab_csv,
            batch_size:      a.batch_size,
            seed:            a.seed,
            report_dir:      a.report_dir,
        }
    }
}

/// All arguments for the `kfold` command
#[derive(Args, Debug)]
pub struct KfoldArgs {
    /// Tab-separated corpus manifest (path \t text \t numeric ids)
    #[arg(long, default_value = "data/transcripts.txt")]
    pub transcripts: String,

    /// Base directory containing the audio files
    #[arg(long, default_value = "data/audio")]
    pub dataset_dir: String,

    /// Extension appended to manifest paths that lack one
    #[arg(long, default_value = "pcm")]
    pub audio_extension: String,

    /// Duplicate every sample with a SpecAugment variant
    #[arg(long)]
    pub spec_augment: bool,

    /// Number of cross-validation folds (minimum 2)
    #[arg(long, default_value_t = 5)]
    pub num_folds: usize,

    /// Samples per feature frame (the channel count)
    #[arg(long, default_value_t = 80)]
    pub frame_size: usize,

    /// Start-of-sequence marker id (overridden by --vocab-csv)
    #[arg(long, default_value_t = 1)]
    pub sos_id: i32,

    /// End-of-sequence marker id (overridden by --vocab-csv)
    #[arg(long, default_value_t = 2)]
    pub eos_id: i32,

    /// Label inventory CSV with <sos>/<eos> rows
    #[arg(long)]
    pub vocab_csv: Option<String>,

    /// Number of samples collated in the probe batch
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Seed controlling fold assignment and shuffles
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory for the split report and saved config
    #[arg(long, default_value = "reports")]
    pub report_dir: String,
}

impl From<KfoldArgs> for PipelineConfig {
    fn from(a: KfoldArgs) -> Self {
        PipelineConfig {
            transcripts:     a.transcripts,
            dataset_dir:     a.dataset_dir,
            audio_extension: a.audio_extension,
            spec_augment:    a.spec_augment,
            frame_size:      a.frame_size,
            sos_id:          a.sos_id,
            eos_id:          a.eos_id,
            vocab_csv:       a.vocab_csv,
            batch_size:      a.batch_size,
            seed:            a.seed,
            report_dir:      a.report_dir,
        }
    }
}
