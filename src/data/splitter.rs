// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Partitions the corpus into training and validation subsets,
// two ways:
//
//   - holdout: one randomised split at a given validation
//     fraction, e.g. 0.2 → 80% train / 20% validation
//   - k-fold:  k disjoint validation slices whose union is the
//     whole corpus, each paired with the complementary training
//     slice — used to estimate generalisation across rounds
//
// Both operate on index sets first and only then construct the
// datasets, so the partition properties (no overlap, no
// omission, fold disjointness) can be tested without touching
// any audio. Every random decision comes from an explicitly
// seeded StdRng — identical seed and corpus size give identical
// folds, which is what makes experiments repeatable.
//
// Each subset becomes an independently constructed dataset with
// its own augmentation and shuffle state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::corpus::CorpusEntry;
use crate::data::dataset::{DatasetContext, SpectrogramDataset};

// ─── Fold ─────────────────────────────────────────────────────────────────────
/// One cross-validation fold over `0..n`:
/// train indices = complement of the validation indices.
#[derive(Debug, Clone)]
pub struct Fold {
    pub train_indices: Vec<usize>,
    pub valid_indices: Vec<usize>,
}

// ─── Index-level partitioning ─────────────────────────────────────────────────

/// Randomly split `0..n` into (train, validation) index sets.
///
/// Validation gets `ceil(n * valid_size)` indices, clamped to n.
/// Degenerate fractions are allowed — a zero-sized validation set
/// is the caller's problem to accept or reject, not a crash here.
pub fn holdout_indices(n: usize, valid_size: f64, rng: &mut StdRng) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let valid_count = ((n as f64) * valid_size).ceil() as usize;
    let valid_count = valid_count.min(n);

    let valid = indices.split_off(n - valid_count);

    if valid.is_empty() || indices.is_empty() {
        tracing::warn!(
            "Degenerate holdout split: {} train / {} validation",
            indices.len(),
            valid.len()
        );
    }

    (indices, valid)
}

/// Partition `0..n` into k folds: shuffle once, cut the shuffled
/// order into k nearly-equal contiguous groups (the first `n % k`
/// groups get one extra index), then pair each group with the
/// union of the others.
///
/// Deterministic for a fixed rng seed and n.
pub fn fold_indices(n: usize, k: usize, rng: &mut StdRng) -> Vec<Fold> {
    assert!(k >= 1, "fold count must be at least 1");

    let mut shuffled: Vec<usize> = (0..n).collect();
    shuffled.shuffle(rng);

    let base = n / k;
    let extra = n % k;

    // Group boundaries over the shuffled order
    let mut groups: Vec<Vec<usize>> = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let size = base + usize::from(i < extra);
        groups.push(shuffled[start..start + size].to_vec());
        start += size;
    }

    (0..k)
        .map(|i| {
            let valid_indices = groups[i].clone();
            let train_indices: Vec<usize> = groups
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, g)| g.iter().copied())
                .collect();
            Fold { train_indices, valid_indices }
        })
        .collect()
}

// ─── Dataset-level splitting ──────────────────────────────────────────────────

fn select(entries: &[CorpusEntry], indices: &[usize]) -> Vec<CorpusEntry> {
    indices.iter().map(|&i| entries[i].clone()).collect()
}

/// Holdout split: one (train, validation) dataset pair.
///
/// Training indices are re-shuffled before construction so the
/// training order carries no trace of the partition step.
pub fn split_holdout(
    entries: &[CorpusEntry],
    valid_size: f64,
    ctx: &DatasetContext,
    rng: &mut StdRng,
) -> (SpectrogramDataset, SpectrogramDataset) {
    let (mut train_idx, valid_idx) = holdout_indices(entries.len(), valid_size, rng);
    train_idx.shuffle(rng);

    tracing::info!(
        "Holdout split: {} train / {} validation",
        train_idx.len(),
        valid_idx.len()
    );

    let train = SpectrogramDataset::new(select(entries, &train_idx), ctx, rng);
    let valid = SpectrogramDataset::new(select(entries, &valid_idx), ctx, rng);
    (train, valid)
}

/// K-fold cross-validation: k (train, validation) dataset pairs.
///
/// All randomness flows from the given seed, so the same seed and
/// corpus reproduce the same folds and the same dataset orders.
pub fn split_kfold(
    entries: &[CorpusEntry],
    num_folds: usize,
    ctx: &DatasetContext,
    seed: u64,
) -> Vec<(SpectrogramDataset, SpectrogramDataset)> {
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!("Splitting {} entries into {} folds", entries.len(), num_folds);

    fold_indices(entries.len(), num_folds, &mut rng)
        .into_iter()
        .map(|mut fold| {
            fold.train_indices.shuffle(&mut rng);
            let train = SpectrogramDataset::new(select(entries, &fold.train_indices), ctx, &mut rng);
            let valid = SpectrogramDataset::new(select(entries, &fold.valid_indices), ctx, &mut rng);
            (train, valid)
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_holdout_sizes_80_20() {
        let mut rng = StdRng::seed_from_u64(3);
        let (train, valid) = holdout_indices(100, 0.2, &mut rng);
        assert_eq!(train.len(), 80);
        assert_eq!(valid.len(), 20);
    }

    #[test]
    fn test_holdout_no_overlap_no_omission() {
        let mut rng = StdRng::seed_from_u64(3);
        let (train, valid) = holdout_indices(50, 0.3, &mut rng);

        let all: BTreeSet<usize> = train.iter().chain(valid.iter()).copied().collect();
        assert_eq!(all.len(), 50);
        assert_eq!(train.len() + valid.len(), 50);
    }

    #[test]
    fn test_holdout_is_deterministic_per_seed() {
        let split = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            holdout_indices(100, 0.2, &mut rng)
        };

        // Same seed → identical split, run after run
        for _ in 0..100 {
            assert_eq!(split(11), split(11));
        }
        // Different seed → different assignment
        assert_ne!(split(11), split(12));
    }

    #[test]
    fn test_holdout_tiny_corpus_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(0);
        let (train, valid) = holdout_indices(1, 0.2, &mut rng);
        // ceil(0.2) = 1 → everything lands in validation
        assert!(train.is_empty());
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn test_kfold_disjoint_union_exact() {
        let mut rng = StdRng::seed_from_u64(42);
        let folds = fold_indices(10, 5, &mut rng);
        assert_eq!(folds.len(), 5);

        let mut seen = BTreeSet::new();
        for fold in &folds {
            assert_eq!(fold.valid_indices.len(), 2);
            for &i in &fold.valid_indices {
                // pairwise disjoint: no index validates twice
                assert!(seen.insert(i), "index {i} appears in two validation sets");
            }
            // train = complement of valid within 0..10
            let train: BTreeSet<usize> = fold.train_indices.iter().copied().collect();
            assert_eq!(train.len(), 8);
            assert!(fold.valid_indices.iter().all(|i| !train.contains(i)));
        }
        assert_eq!(seen, (0..10).collect::<BTreeSet<usize>>());
    }

    #[test]
    fn test_kfold_uneven_sizes_differ_by_at_most_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let folds = fold_indices(10, 3, &mut rng);

        let sizes: Vec<usize> = folds.iter().map(|f| f.valid_indices.len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 10);
        assert!(sizes.iter().all(|&s| s == 3 || s == 4));
    }

    #[test]
    fn test_kfold_deterministic_for_fixed_seed() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            fold_indices(20, 4, &mut rng)
                .into_iter()
                .map(|f| (f.train_indices, f.valid_indices))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_more_folds_than_samples_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(0);
        let folds = fold_indices(3, 5, &mut rng);
        assert_eq!(folds.len(), 5);

        // Two folds end up with empty validation sets — allowed,
        // the downstream consumer decides whether that is usable.
        let total: usize = folds.iter().map(|f| f.valid_indices.len()).sum();
        assert_eq!(total, 3);
    }
}
