//! Named Entity Recognition (NER) module
//!
//! Rule-based recognizer combining:
//! - A gazetteer of known person names
//! - Regex patterns for descriptive and reporting contexts
//!   ("Alice is a ...", "Bob, a ...", "Dr. Smith", "Carol said")
//! - An organization suffix pattern (AcmeCorp, Initech Inc)

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::Regex;

use crate::{ExtractedEntity, NamedEntityRecognizer, NerLabel};
use afg_core::Result;

/// Capitalized words that start sentences but never name a person
const NON_PERSON_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "She", "He", "It", "They", "We", "I", "You",
    "There", "Our", "Their", "His", "Her", "Its", "Everyone", "Someone", "Nobody", "Each",
    // Sentence-initial adverbs and connectives
    "Yesterday", "Today", "Tomorrow", "Later", "Earlier", "Then", "Now", "Also", "Still",
    "Meanwhile", "Recently", "Currently", "Previously", "Initially", "Eventually", "Finally",
    "However", "Sometimes", "Afterwards", "Here", "So", "And", "But", "When", "While",
];

/// Names recognized without any surrounding context
const DEFAULT_GAZETTEER: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
    "Mallory", "Oscar", "Peggy", "Trent", "Victor", "Walter",
];

// ============================================================================
// Rule-based NER
// ============================================================================

/// Rule-based NER using regex patterns and a name gazetteer
pub struct RuleBasedNer {
    /// Pattern rules (regex -> label, confidence); capture group 1 is the span
    patterns: Vec<(Regex, NerLabel, f32)>,
    /// Known person names with their whole-word matchers
    gazetteer: Vec<(String, Regex)>,
}

impl RuleBasedNer {
    /// Create a recognizer with the default patterns and gazetteer
    pub fn new() -> Self {
        let mut ner = Self {
            patterns: Vec::new(),
            gazetteer: Vec::new(),
        };

        ner.init_patterns();
        for name in DEFAULT_GAZETTEER {
            ner.add_name(name);
        }
        ner
    }

    /// Add extra gazetteer names (builder style)
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_name(name.as_ref());
        }
        self
    }

    fn init_patterns(&mut self) {
        const NAME: &str = r"([A-Z][a-z]+(?: [A-Z][a-z]+)?)";

        // Descriptive contexts
        self.add_pattern(&format!(r"\b{NAME} is an? "), NerLabel::Person, 0.85);
        self.add_pattern(&format!(r"\b{NAME}, an? "), NerLabel::Person, 0.85);

        // Honorifics
        self.add_pattern(
            &format!(r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.? {NAME}"),
            NerLabel::Person,
            0.9,
        );

        // Reporting verbs
        self.add_pattern(
            r"\b([A-Z][a-z]+) (?:said|says|explained|mentioned|noted|told|added|reported)\b",
            NerLabel::Person,
            0.8,
        );

        // Organizations
        self.add_pattern(
            r"\b([A-Z][A-Za-z0-9]*(?:Corp|Inc|Ltd|LLC|Labs))\b",
            NerLabel::Organization,
            0.8,
        );
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, label: NerLabel, confidence: f32) {
        match Regex::new(pattern) {
            Ok(regex) => self.patterns.push((regex, label, confidence)),
            Err(e) => tracing::warn!("Ignoring invalid NER pattern {}: {}", pattern, e),
        }
    }

    /// Add a gazetteer name
    fn add_name(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.gazetteer.iter().any(|(n, _)| n == name) {
            return;
        }
        if let Ok(regex) = Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
            self.gazetteer.push((name.to_string(), regex));
        }
    }

    /// Extract entities using pattern matching
    fn extract_by_patterns(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut entities = Vec::new();

        for (regex, label, confidence) in &self.patterns {
            for caps in regex.captures_iter(text) {
                let Some(span) = caps.get(1) else {
                    continue;
                };
                let offset = if *label == NerLabel::Person {
                    match person_offset(span.as_str()) {
                        Some(offset) => offset,
                        None => continue,
                    }
                } else {
                    0
                };
                entities.push(ExtractedEntity {
                    text: span.as_str()[offset..].to_string(),
                    label: *label,
                    start: span.start() + offset,
                    end: span.end(),
                    confidence: *confidence,
                });
            }
        }

        entities
    }

    /// Extract entities using gazetteer lookup
    fn extract_by_gazetteer(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut entities = Vec::new();

        for (name, regex) in &self.gazetteer {
            for mat in regex.find_iter(text) {
                entities.push(ExtractedEntity {
                    text: name.clone(),
                    label: NerLabel::Person,
                    start: mat.start(),
                    end: mat.end(),
                    confidence: 0.95,
                });
            }
        }

        entities
    }

    /// Remove overlapping entities, keeping highest confidence
    fn deduplicate(&self, mut entities: Vec<ExtractedEntity>) -> Vec<ExtractedEntity> {
        // Highest confidence first; ties go to the earlier, then the longer span
        entities.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then(a.start.cmp(&b.start))
                .then(b.end.cmp(&a.end))
        });

        let mut result = Vec::new();
        let mut covered: HashSet<usize> = HashSet::new();

        for entity in entities {
            let overlaps = (entity.start..entity.end).any(|i| covered.contains(&i));

            if !overlaps {
                covered.extend(entity.start..entity.end);
                result.push(entity);
            }
        }

        result.sort_by_key(|e| e.start);
        result
    }
}

impl Default for RuleBasedNer {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedEntityRecognizer for RuleBasedNer {
    fn recognize(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        let mut entities = self.extract_by_patterns(text);
        entities.extend(self.extract_by_gazetteer(text));

        Ok(self.deduplicate(entities))
    }
}

/// Byte offset of the first word of a captured span that can start a person
/// name; leading non-person words ("Yesterday Bob") are skipped.
fn person_offset(span: &str) -> Option<usize> {
    let mut offset = 0;
    for word in span.split(' ') {
        if !NON_PERSON_WORDS.contains(&word) {
            return Some(offset);
        }
        offset += word.len() + 1;
    }
    None
}

/// Distinct trimmed person spans of a text, in order of appearance
pub fn person_names(ner: &dyn NamedEntityRecognizer, text: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for entity in ner.recognize(text)? {
        if entity.label != NerLabel::Person {
            continue;
        }
        let name = entity.text.trim();
        if !name.is_empty() && seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(entities: &[ExtractedEntity], label: NerLabel) -> Vec<&str> {
        entities
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn test_descriptive_patterns() {
        let ner = RuleBasedNer::new();
        let entities = ner
            .recognize("Priya is a data engineer. Tomas, a director, joined later.")
            .unwrap();

        let people = texts(&entities, NerLabel::Person);
        assert_eq!(people, vec!["Priya", "Tomas"]);
    }

    #[test]
    fn test_pronouns_are_not_people() {
        let ner = RuleBasedNer::new();
        let entities = ner.recognize("She is a manager. The tool is a gem.").unwrap();

        assert!(texts(&entities, NerLabel::Person).is_empty());
    }

    #[test]
    fn test_honorific_and_reporting_verb() {
        let ner = RuleBasedNer::new();
        let entities = ner
            .recognize("Dr. Okafor reviewed it and Lena said it was fine.")
            .unwrap();

        let people = texts(&entities, NerLabel::Person);
        assert!(people.contains(&"Okafor"));
        assert!(people.contains(&"Lena"));
    }

    #[test]
    fn test_gazetteer_and_extra_names() {
        let ner = RuleBasedNer::new().with_names(["Zoltan"]);
        let entities = ner.recognize("Carol met Zoltan yesterday.").unwrap();

        assert_eq!(texts(&entities, NerLabel::Person), vec!["Carol", "Zoltan"]);
    }

    #[test]
    fn test_gazetteer_is_whole_word() {
        let ner = RuleBasedNer::new();
        let entities = ner.recognize("Bobby and Evelyn arrived.").unwrap();

        assert!(texts(&entities, NerLabel::Person).is_empty());
    }

    #[test]
    fn test_organization_suffix() {
        let ner = RuleBasedNer::new();
        let entities = ner.recognize("Carol is a customer of AcmeCorp.").unwrap();

        assert_eq!(texts(&entities, NerLabel::Organization), vec!["AcmeCorp"]);
        assert_eq!(texts(&entities, NerLabel::Person), vec!["Carol"]);
    }

    #[test]
    fn test_overlapping_spans_deduplicated() {
        let ner = RuleBasedNer::new();
        // Gazetteer and descriptive pattern both hit "Alice"
        let entities = ner.recognize("Alice is a scientist.").unwrap();

        assert_eq!(entities.len(), 1);
        assert!((entities[0].confidence - 0.95).abs() < f32::EPSILON);
    }

    fn span(text: &str, start: usize, confidence: f32) -> ExtractedEntity {
        ExtractedEntity {
            text: text.to_string(),
            label: NerLabel::Person,
            start,
            end: start + text.len(),
            confidence,
        }
    }

    #[test]
    fn test_later_higher_confidence_span_wins() {
        let ner = RuleBasedNer::new();
        let kept = ner.deduplicate(vec![
            span("Yesterday Bob", 0, 0.85),
            span("Bob", 10, 0.95),
            span("Priya", 20, 0.85),
        ]);

        assert_eq!(texts(&kept, NerLabel::Person), vec!["Bob", "Priya"]);
    }

    #[test]
    fn test_leading_adverb_is_not_part_of_name() {
        let ner = RuleBasedNer::new();
        let names = person_names(
            &ner,
            "Yesterday Bob, a project manager, used the Vega tool. Later Priya is a data engineer.",
        )
        .unwrap();

        assert_eq!(names, vec!["Bob", "Priya"]);
    }

    #[test]
    fn test_person_offset() {
        assert_eq!(person_offset("Priya"), Some(0));
        assert_eq!(person_offset("Later Priya"), Some(6));
        assert_eq!(person_offset("Mary Jones"), Some(0));
        assert_eq!(person_offset("She"), None);
        assert_eq!(person_offset("Then She"), None);
    }

    #[test]
    fn test_person_names_distinct_and_filtered() {
        let ner = RuleBasedNer::new();
        let names = person_names(
            &ner,
            "Bob uses it. Bob, a lead, likes AcmeCorp. Alice said so.",
        )
        .unwrap();

        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(NerLabel::Person.to_string(), "PERSON");
        assert_eq!(NerLabel::Organization.as_str(), "ORG");
    }
}
