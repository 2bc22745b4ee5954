// ============================================================
// Layer 4 — Transcript Codec
// ============================================================
// Turns a whitespace-separated numeric transcript string into a
// token-id sequence framed by sentence markers:
//
//   "5 6 7"  with sos=1, eos=2  →  [1, 5, 6, 7, 2]
//
// Parsing is best-effort: a token that fails to parse as an
// integer is skipped and the error is recorded in the returned
// status, but parsing continues. A single mangled token must not
// silently discard the whole sample — the caller looks at the
// status and decides whether to drop, log, or keep.

/// Outcome of encoding one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptStatus {
    /// Every token parsed cleanly (also the empty transcript)
    Clean,
    /// At least one token failed to parse and was skipped
    HadErrors,
}

impl TranscriptStatus {
    pub fn is_clean(self) -> bool {
        self == TranscriptStatus::Clean
    }
}

/// Encode a raw numeric transcript into `[sos, ids..., eos]`.
///
/// The output always has length >= 2: even an empty transcript
/// yields the two markers, so downstream target-length arithmetic
/// (`token_count - 1`) never underflows.
pub fn encode(raw: &str, sos_id: i32, eos_id: i32) -> (Vec<i32>, TranscriptStatus) {
    let mut tokens = Vec::with_capacity(raw.len() / 2 + 2);
    let mut status = TranscriptStatus::Clean;

    tokens.push(sos_id);

    for piece in raw.split_whitespace() {
        match piece.parse::<i32>() {
            Ok(id) => tokens.push(id),
            Err(_) => {
                // Skip the token, keep the rest of the sentence
                status = TranscriptStatus::HadErrors;
            }
        }
    }

    tokens.push(eos_id);

    (tokens, status)
}
