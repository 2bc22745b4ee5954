// ============================================================
// Layer 4 — Corpus Manifest Parser
// ============================================================
// Reads the transcripts manifest: one line per utterance with
// three tab-separated fields,
//
//   audio_path <TAB> human_readable_text <TAB> numeric_transcript
//
// The middle field is the original-language sentence. It is kept
// on the entry for traceability (debugging a bad sample by eye)
// but the pipeline itself only ever consumes the numeric field.
//
// A line that does not split into exactly three fields is skipped
// with a warning naming the line number — one mangled line must
// not take down a multi-hour corpus load.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// One manifest line: where the audio lives and what was said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Audio path relative to the dataset base directory
    pub audio_path: String,
    /// Human-readable transcript (unused by the pipeline)
    pub text:       String,
    /// Whitespace-separated numeric token ids
    pub transcript: String,
}

/// Load the manifest from disk.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<CorpusEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Cannot open corpus manifest '{}'", path.display()))?;

    let entries = parse_corpus(BufReader::new(file))?;
    tracing::info!("Loaded {} corpus entries from '{}'", entries.len(), path.display());
    Ok(entries)
}

/// Parse manifest lines from any reader.
/// Split out from `load_corpus` so tests can feed strings
/// instead of touching the filesystem.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Vec<CorpusEntry>> {
    let mut entries = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Read error at manifest line {}", line_no + 1))?;

        // Blank trailing lines are common in hand-edited manifests
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            // Malformed line: skip, warn, keep going
            tracing::warn!(
                "Skipping manifest line {}: expected 3 tab-separated fields, got {}",
                line_no + 1,
                fields.len()
            );
            continue;
        }

        entries.push(CorpusEntry {
            audio_path: fields[0].to_string(),
            text:       fields[1].to_string(),
            // trim_end drops the '\n' remnants Windows editors leave
            transcript: fields[2].trim_end().to_string(),
        });
    }

    Ok(entries)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_three_field_lines() {
        let manifest = "a.wav\t안녕\t5 6\nb.wav\t잘가\t7\n";
        let entries  = parse_corpus(Cursor::new(manifest)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].audio_path, "a.wav");
        assert_eq!(entries[0].transcript, "5 6");
        assert_eq!(entries[1].transcript, "7");
    }

    #[test]
    fn test_skips_malformed_lines() {
        // Second line only has two fields — must be skipped, not fatal
        let manifest = "a.wav\thello\t1 2\nbroken line no tabs\nb.wav\tbye\t3\n";
        let entries  = parse_corpus(Cursor::new(manifest)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].audio_path, "b.wav");
    }

    #[test]
    fn test_ignores_blank_lines() {
        let manifest = "a.wav\tx\t1\n\n\n";
        let entries  = parse_corpus(Cursor::new(manifest)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_trims_trailing_newline_from_transcript() {
        let manifest = "a.wav\tx\t1 2 3\r\n";
        let entries  = parse_corpus(Cursor::new(manifest)).unwrap();
        assert_eq!(entries[0].transcript, "1 2 3");
    }
}
