//! AFG Extractor - Entity and interaction extraction
//!
//! Implements the text heuristics of the pipeline:
//! - Named Entity Recognition for people
//! - Technology detection (adjacent-token and pattern heuristics)
//! - Role inference from descriptive sentences
//! - Sentence-level sentiment scoring
//! - Affordance classification and interaction detection

use afg_core::Result;
use serde::Serialize;

/// Label attached to a recognized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NerLabel {
    Person,
    Organization,
}

impl NerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
        }
    }
}

impl std::fmt::Display for NerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Span recognized in text
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub label: NerLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Trait for named entity recognizers
pub trait NamedEntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<ExtractedEntity>>;
}

/// Trait for sentence sentiment scorers
pub trait SentimentScorer: Send + Sync {
    /// Polarity of the text in `[-1.0, 1.0]`, 0.0 being neutral
    fn polarity(&self, text: &str) -> f64;
}

pub mod affordance;
pub mod entity;
pub mod interaction;
pub mod ner;
pub mod role;
pub mod sentiment;
pub mod technology;

pub use affordance::classify_affordance;
pub use entity::{EntityExtractor, ExtractionStats};
pub use interaction::{EntityMatcher, InteractionDetector};
pub use ner::RuleBasedNer;
pub use sentiment::LexiconSentiment;
