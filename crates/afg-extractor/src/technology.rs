//! Technology mention detection
//!
//! Two independent heuristics; their results are merged by name in the
//! registry. They can spell the same mention differently
//! ("DataRobot Platform" vs "DataRobot platform"), and both spellings are kept.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Words that mark the preceding token as a technology name
pub const TECHNOLOGY_KEYWORDS: [&str; 4] = ["system", "software", "tool", "platform"];

/// Capitalized alphanumeric token directly followed by a keyword
static TECHNOLOGY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z0-9]*\s(?:system|software|tool|platform)\b")
        .expect("technology pattern is valid")
});

/// Adjacent-token heuristic.
///
/// For every whitespace-separated pair `(t1, t2)` where `t2`, stripped of
/// punctuation and lowercased, is a keyword, yields `t1 + " " + Capitalized(t2)`.
pub fn adjacent_token_candidates(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for pair in tokens.windows(2) {
        let keyword = pair[1]
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_lowercase();
        if !TECHNOLOGY_KEYWORDS.contains(&keyword.as_str()) {
            continue;
        }

        let candidate = format!("{} {}", pair[0], capitalize(&keyword));
        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Regex heuristic: distinct matches of a capitalized token followed by a
/// keyword, in order of appearance.
pub fn pattern_candidates(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    TECHNOLOGY_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

/// Uppercase the first character, lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_token_basic() {
        let found = adjacent_token_candidates("Bob relies on MLAnalytics system for decisions.");
        assert_eq!(found, vec!["MLAnalytics System"]);
    }

    #[test]
    fn test_adjacent_token_strips_punctuation() {
        let found = adjacent_token_candidates("We moved to the Nimbus PLATFORM, finally.");
        assert_eq!(found, vec!["Nimbus Platform"]);
    }

    #[test]
    fn test_adjacent_token_keeps_preceding_token_verbatim() {
        // Lowercase preceding words are registered as-is
        let found = adjacent_token_candidates("She bought the software.");
        assert_eq!(found, vec!["the Software"]);
    }

    #[test]
    fn test_adjacent_token_distinct() {
        let found = adjacent_token_candidates("Jira tool. Jira tool again.");
        assert_eq!(found, vec!["Jira Tool"]);
    }

    #[test]
    fn test_pattern_candidates() {
        let found =
            pattern_candidates("The DataRobot platform and the ChatBot software. DataRobot platform!");
        assert_eq!(found, vec!["DataRobot platform", "ChatBot software"]);
    }

    #[test]
    fn test_pattern_requires_capital_and_boundary() {
        assert!(pattern_candidates("the legacy system").is_empty());
        assert!(pattern_candidates("Acme systems").is_empty());
        assert!(pattern_candidates("Acme System").is_empty());
    }

    #[test]
    fn test_heuristics_disagree_on_spelling() {
        let text = "Alice uses the DataRobot platform.";
        assert_eq!(adjacent_token_candidates(text), vec!["DataRobot Platform"]);
        assert_eq!(pattern_candidates(text), vec!["DataRobot platform"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("platform"), "Platform");
        assert_eq!(capitalize("tOOL"), "Tool");
        assert_eq!(capitalize(""), "");
    }
}
