//! Line-bounded segment splitting for the annotation pipeline.
//!
//! Long documents are split before annotation so a single oracle call
//! never has to emit an unbounded token array (which risks output
//! truncation), while each segment still carries enough surrounding
//! lines for coherent morphological analysis.

/// Default number of input lines per segment.
pub const DEFAULT_MAX_SEGMENT_LINES: usize = 12;

/// Split `text` into segments of at most `max_lines` consecutive lines.
///
/// Splits fall on line boundaries only, never mid-line, and intra-segment
/// line breaks are preserved verbatim so the oracle can recover the
/// visual structure. The final segment may be shorter. Empty input yields
/// no segments at all, so an empty document never costs an oracle call.
pub fn split_segments(text: &str, max_lines: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    lines
        .chunks(max_lines.max(1))
        .map(|chunk| chunk.join("\n"))
        .collect()
}
