// src/parser.rs
//! Best-effort extraction of structured data from the model's free-text reply.
//!
//! The completion service is asked for a fixed three-section format but is
//! not contractually bound to it, so this module is a tolerant extractor,
//! not a validator: each section is located independently from the start of
//! the text, and anything unrecoverable yields an empty/absent value instead
//! of an error. Parsing never fails.

use crate::types::AnalysisResult;

const SCORE_MARKER: &str = "Score:";
const KEYWORDS_MARKER: &str = "Missing Keywords:";
const SUGGESTIONS_MARKER: &str = "Suggestions:";

/// Maximum number of suggestions surfaced to the caller.
const MAX_SUGGESTIONS: usize = 7;

/// Parse a raw model reply into an [`AnalysisResult`].
///
/// Pure and stateless; parsing the same text twice yields identical results.
pub fn parse_response(raw: &str) -> AnalysisResult {
    let score = extract_score(raw);
    AnalysisResult {
        score: score.unwrap_or(0),
        has_score: score.is_some(),
        missing_keywords: extract_missing_keywords(raw),
        suggestions: extract_suggestions(raw),
    }
}

/// Case-insensitive (ASCII) substring search starting at `from`.
///
/// Works on byte windows rather than a lowercased copy: `to_lowercase` is
/// not length-preserving, which would invalidate slice offsets on non-ASCII
/// input. A match of an ASCII needle always starts on a char boundary.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() || from > haystack.len() - needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// First `Score:` marker (case-sensitive, unlike the other two markers - the
/// asymmetry is part of the requested grammar and kept deliberately) that is
/// followed by whitespace and at least one decimal digit.
///
/// The whitespace is required: `Score:72` is not a score line, matching the
/// grammar the service is asked to produce.
fn extract_score(raw: &str) -> Option<u32> {
    let mut from = 0;
    while let Some(pos) = raw[from..].find(SCORE_MARKER) {
        let marker_end = from + pos + SCORE_MARKER.len();
        let rest = &raw[marker_end..];
        if !rest.starts_with(char::is_whitespace) {
            from = marker_end;
            continue;
        }
        let after = rest.trim_start();
        let digits: &str = after
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or("");
        if !digits.is_empty() {
            if let Ok(score) = digits.parse::<u32>() {
                return Some(score);
            }
        }
        // Marker without digits (or absurdly long digit run): keep scanning.
        from = marker_end;
    }
    None
}

/// Comma-separated keywords between the `Missing Keywords:` marker and the
/// nearest following `Suggestions:` marker (or end of text).
///
/// The boundary search is non-greedy: stopping at the nearest marker keeps a
/// stray repeated keyword list from swallowing the suggestions section.
fn extract_missing_keywords(raw: &str) -> Vec<String> {
    let Some(start) = find_ci(raw, KEYWORDS_MARKER, 0) else {
        return Vec::new();
    };
    let body_start = start + KEYWORDS_MARKER.len();
    let body_end = find_ci(raw, SUGGESTIONS_MARKER, body_start).unwrap_or(raw.len());

    raw[body_start..body_end]
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Bullet lines after the first `Suggestions:` marker, capped at
/// [`MAX_SUGGESTIONS`].
fn extract_suggestions(raw: &str) -> Vec<String> {
    let Some(start) = find_ci(raw, SUGGESTIONS_MARKER, 0) else {
        return Vec::new();
    };

    raw[start + SUGGESTIONS_MARKER.len()..]
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect()
}

/// Strip a leading run of bullet/formatting characters from a line:
/// bullet dots, hyphens, asterisks, hashes, digits, periods and whitespace.
fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| {
            matches!(c, '\u{2022}' | '-' | '*' | '#' | '.') || c.is_ascii_digit() || c.is_whitespace()
        })
        .trim()
}
