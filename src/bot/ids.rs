//! Telegram ID parsing

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[;,\s]+").expect("valid separator regex"))
}

fn candidate_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4,}\b").expect("valid candidate regex"))
}

/// Admin IDs from a `;`, `,` or whitespace separated list
///
/// Chunks that are not all digits are ignored.
pub fn parse_admin_ids(raw: &str) -> BTreeSet<String> {
    separators()
        .split(raw)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty() && chunk.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Standalone runs of 4+ digits, de-duplicated and sorted
pub fn extract_candidate_ids(text: &str) -> Vec<String> {
    candidate_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
