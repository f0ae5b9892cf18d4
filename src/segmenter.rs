use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::PipelineError;

// @module: Quote segmentation on sentence boundaries

// @const: Terminal punctuation run regex (., ?, !, ellipsis)
static TERMINAL_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.?!\u{2026}]+").unwrap()
});

/// Split a quote into ordered sentence-like segments.
///
/// A segment boundary is a run of terminal punctuation followed by whitespace
/// or the end of the quote; the punctuation stays attached to its segment.
/// A quote without terminal punctuation yields a single segment. Rejoining
/// the segments with single spaces reproduces a single-spaced original.
pub fn split_into_segments(quote: &str) -> Result<Vec<String>, PipelineError> {
    if quote.trim().is_empty() {
        return Err(PipelineError::EmptyQuote);
    }

    let mut segments = Vec::new();
    let mut start = 0;

    for mat in TERMINAL_PUNCTUATION.find_iter(quote) {
        // Only a punctuation run followed by whitespace (or the end of the
        // quote) closes a segment; "3.5" or "e.g.x" stays intact.
        let rest = &quote[mat.end()..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            continue;
        }

        if mat.end() > start {
            let candidate = quote[start..mat.end()].trim();
            if !candidate.is_empty() {
                segments.push(candidate.to_string());
            }
        }
        start = mat.end();
    }

    // Trailing text without terminal punctuation becomes the final segment.
    let tail = quote[start..].trim();
    if !tail.is_empty() {
        segments.push(tail.to_string());
    }

    if segments.is_empty() {
        return Err(PipelineError::EmptyQuote);
    }

    debug!("Quote divided into {} segment(s)", segments.len());

    Ok(segments)
}
