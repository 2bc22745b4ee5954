// ============================================================
// Layer 6 — Vocabulary
// ============================================================
// The pipeline never sees token text — transcripts arrive as
// numeric ids. All it needs from the vocabulary are the three
// special ids: start-of-sequence, end-of-sequence, and padding.
//
// Two ways to get one:
//   - Vocabulary::new(sos, eos, pad) for tests and simple runs
//   - Vocabulary::from_labels_csv for corpora that ship a label
//     inventory file with rows of the form
//
//       id,label,freq
//       0,<pad>,0
//       1,<sos>,0
//       2,<eos>,0
//       3,아,12345
//       ...
//
// A label file without <sos> or <eos> rows is unusable for
// sequence framing, so that is a hard error with context.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// The marker ids used to frame every transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vocabulary {
    pub sos_id: i32,
    pub eos_id: i32,
    pub pad_id: i32,
}

impl Vocabulary {
    pub fn new(sos_id: i32, eos_id: i32, pad_id: i32) -> Self {
        Self { sos_id, eos_id, pad_id }
    }

    /// Load marker ids from a label inventory CSV.
    pub fn from_labels_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read label file '{}'", path.display()))?;

        let vocab = Self::parse_labels(&content)
            .with_context(|| format!("Invalid label file '{}'", path.display()))?;

        tracing::info!(
            "Vocabulary loaded: sos={}, eos={}, pad={}",
            vocab.sos_id,
            vocab.eos_id,
            vocab.pad_id
        );
        Ok(vocab)
    }

    fn parse_labels(content: &str) -> Result<Self> {
        let mut sos_id = None;
        let mut eos_id = None;
        let mut pad_id = 0; // conventional default when no <pad> row exists

        for line in content.lines() {
            // Header row and blanks
            if line.starts_with("id") || line.trim().is_empty() {
                continue;
            }

            // Only the marker rows matter here, and marker labels
            // never contain commas, so a plain split is enough.
            let mut fields = line.splitn(3, ',');
            let (Some(id), Some(label)) = (fields.next(), fields.next()) else {
                continue;
            };
            let Ok(id) = id.trim().parse::<i32>() else {
                continue;
            };

            match label.trim() {
                "<sos>" => sos_id = Some(id),
                "<eos>" => eos_id = Some(id),
                "<pad>" => pad_id = id,
                _ => {}
            }
        }

        let sos_id = sos_id.context("label file has no <sos> row")?;
        let eos_id = eos_id.context("label file has no <eos> row")?;

        Ok(Self { sos_id, eos_id, pad_id })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_marker_rows() {
        let csv = "id,char,freq\n0,<pad>,0\n1,<sos>,0\n2,<eos>,0\n3,아,999\n";
        let v = Vocabulary::parse_labels(csv).unwrap();
        assert_eq!(v.sos_id, 1);
        assert_eq!(v.eos_id, 2);
        assert_eq!(v.pad_id, 0);
    }

    #[test]
    fn test_pad_defaults_to_zero_without_pad_row() {
        let csv = "7,<sos>,0\n8,<eos>,0\n";
        let v = Vocabulary::parse_labels(csv).unwrap();
        assert_eq!(v.sos_id, 7);
        assert_eq!(v.pad_id, 0);
    }

    #[test]
    fn test_missing_markers_is_an_error() {
        let csv = "id,char,freq\n3,아,999\n";
        assert!(Vocabulary::parse_labels(csv).is_err());
    }

    #[test]
    fn test_garbage_rows_are_skipped() {
        let csv = "not a row\n1,<sos>,0\nx,y\n2,<eos>,0\n";
        let v = Vocabulary::parse_labels(csv).unwrap();
        assert_eq!((v.sos_id, v.eos_id), (1, 2));
    }
}
