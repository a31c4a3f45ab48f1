//! Affordance classification
//!
//! Technology-technology pairs are always intermachine teaming. Mixed pairs
//! are classified by the first keyword set with a match in the sentence.
//! Keywords match at a word start, so stems such as "analys" or "personaliz"
//! cover their inflections ("analysis", "personalized", "decisions").

use afg_core::{Affordance, EntityType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword sets for mixed pairs, in priority order
pub const AFFORDANCE_KEYWORDS: &[(Affordance, &[&str])] = &[
    (
        Affordance::Hdm,
        &[
            "decision", "decide", "analysis", "analys", "predict", "recommend", "suggest",
            "inference",
        ],
    ),
    (
        Affordance::Hca,
        &[
            "create", "creativity", "creative", "generate", "design", "idea", "art", "innovate",
            "write",
        ],
    ),
    (
        Affordance::Hrh,
        &[
            "interact", "assist", "help", "helpful", "use", "using", "personaliz", "adapt",
            "experience",
        ],
    ),
];

/// Label used when no keyword set matches
pub const DEFAULT_AFFORDANCE: Affordance = Affordance::Hrh;

static KEYWORD_RULES: Lazy<Vec<(Affordance, Regex)>> = Lazy::new(|| {
    AFFORDANCE_KEYWORDS
        .iter()
        .map(|(affordance, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"\b(?:{alternation})"))
                .expect("affordance keyword pattern is valid");
            (*affordance, regex)
        })
        .collect()
});

/// First keyword set matching the sentence, if any
pub fn keyword_affordance(sentence: &str) -> Option<Affordance> {
    let sentence = sentence.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(_, regex)| regex.is_match(&sentence))
        .map(|(affordance, _)| *affordance)
}

/// Classify the affordance of an interaction between two entity types
pub fn classify_affordance(sentence: &str, first: EntityType, second: EntityType) -> Affordance {
    if first == EntityType::Technology && second == EntityType::Technology {
        return Affordance::Hmt;
    }

    keyword_affordance(sentence).unwrap_or(DEFAULT_AFFORDANCE)
}
