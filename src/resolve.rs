//! arXiv identifier resolution from user-supplied URLs or bare IDs

use regex::Regex;
use std::sync::LazyLock;

/// Pattern families tried in order; the first capturing-group match wins.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)arxiv\.org/abs/(\d+\.\d+)",
        r"(?i)arxiv\.org/pdf/(\d+\.\d+)",
        r"(?i)arxiv\.org/abs/([a-z-]+(?:\.[A-Za-z]{2})?/\d+)",
        r"(?i)arxiv\.org/pdf/([a-z-]+(?:\.[A-Za-z]{2})?/\d+)",
        r"(\d+\.\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("arXiv ID pattern is valid"))
    .collect()
});

/// Extract a canonical arXiv ID from `input`, which may be an abs/pdf URL
/// (new-style or legacy category IDs) or a bare ID anywhere in the string.
/// Returns `None` when no pattern matches; callers must not issue network
/// calls in that case.
pub fn resolve_arxiv_id(input: &str) -> Option<String> {
    ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_owned())
    })
}
