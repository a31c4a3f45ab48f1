//! Interaction detection
//!
//! Splits documents into sentences, finds registered entities mentioned in
//! each sentence and emits one interaction per qualifying entity pair.

use afg_core::{Document, EntityRegistry, EntityType, Interaction};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::affordance::classify_affordance;
use crate::SentimentScorer;

/// Sentence terminator followed by whitespace
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

/// Split text after `.`, `!` or `?` followed by whitespace.
///
/// Segments are trimmed; blank segments are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Terminators are ASCII, so the sentence ends one byte in
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether a pair of entity types can interact: never two people, and at
/// least one technology.
pub fn qualifies(first: EntityType, second: EntityType) -> bool {
    if first == EntityType::Person && second == EntityType::Person {
        return false;
    }
    first == EntityType::Technology || second == EntityType::Technology
}

// ============================================================================
// Entity Matcher
// ============================================================================

/// Whole-word, case-insensitive matchers for every registry entity
#[derive(Debug, Clone)]
pub struct EntityMatcher {
    matchers: Vec<(String, EntityType, Regex)>,
}

impl EntityMatcher {
    /// Build matchers in registry order.
    ///
    /// Names that cannot be embedded in a word-boundary pattern are skipped.
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        let mut matchers = Vec::with_capacity(registry.len());

        for entity in registry {
            let name = entity.name.trim();
            if name.is_empty() {
                tracing::warn!("Skipping entity with blank name");
                continue;
            }

            match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))) {
                Ok(regex) => matchers.push((entity.name.clone(), entity.entity_type, regex)),
                Err(e) => tracing::warn!("Skipping entity {:?}: {}", entity.name, e),
            }
        }

        Self { matchers }
    }

    /// Entities mentioned in the sentence, in registry order
    pub fn present_in(&self, sentence: &str) -> Vec<(&str, EntityType)> {
        self.matchers
            .iter()
            .filter(|(_, _, regex)| regex.is_match(sentence))
            .map(|(name, entity_type, _)| (name.as_str(), *entity_type))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

// ============================================================================
// Interaction Detector
// ============================================================================

/// Detects interactions sentence by sentence
pub struct InteractionDetector {
    sentiment: Box<dyn SentimentScorer>,
}

impl InteractionDetector {
    pub fn new(sentiment: Box<dyn SentimentScorer>) -> Self {
        Self { sentiment }
    }

    /// Interactions of one sentence
    pub fn detect_sentence(
        &self,
        sentence: &str,
        matcher: &EntityMatcher,
        document_id: &str,
    ) -> Vec<Interaction> {
        let present = matcher.present_in(sentence);
        if present.len() < 2 {
            return Vec::new();
        }

        let sentiment = self.sentiment.polarity(sentence);
        let mut interactions = Vec::new();

        for (i, &(name_a, type_a)) in present.iter().enumerate() {
            for &(name_b, type_b) in &present[i + 1..] {
                if !qualifies(type_a, type_b) {
                    continue;
                }

                interactions.push(Interaction {
                    entity_a: name_a.to_string(),
                    entity_b: name_b.to_string(),
                    affordance: classify_affordance(sentence, type_a, type_b),
                    sentiment,
                    document_id: document_id.to_string(),
                    sentence: sentence.to_string(),
                });
            }
        }

        interactions
    }

    /// Interactions of one document
    pub fn detect(&self, document: &Document, matcher: &EntityMatcher) -> Vec<Interaction> {
        let sentences = split_sentences(&document.text);
        let interactions: Vec<Interaction> = sentences
            .iter()
            .flat_map(|s| self.detect_sentence(s, matcher, &document.id))
            .collect();

        tracing::debug!(
            "Document {}: {} sentences, {} interactions",
            document.id,
            sentences.len(),
            interactions.len()
        );
        interactions
    }

    /// Interactions of all documents against a completed registry
    pub fn detect_all(&self, documents: &[Document], registry: &EntityRegistry) -> Vec<Interaction> {
        let matcher = EntityMatcher::from_registry(registry);

        documents
            .iter()
            .flat_map(|doc| self.detect(doc, &matcher))
            .collect()
    }
}
