/// Canonical form used for answer comparison: surrounding whitespace trimmed,
/// then lower-cased.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// True when the typed answer matches the expected one after normalization.
#[must_use]
pub fn answers_match(input: &str, expected: &str) -> bool {
    normalize(input) == normalize(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_ignores_case() {
        assert!(answers_match(" Paris ", "paris"));
        assert!(answers_match("PARIS", "  Paris\n"));
    }

    #[test]
    fn inner_whitespace_still_matters() {
        assert!(!answers_match("new york", "newyork"));
        assert!(!answers_match("six", "6"));
    }

    #[test]
    fn empty_input_only_matches_blank_expected() {
        assert!(!answers_match("   ", "4"));
        assert!(answers_match("", "  "));
    }
}
