//! Lexicon-based sentence sentiment
//!
//! Maps words to polarity values in `[-1, 1]` and averages the values of the
//! words found in a sentence. A negator ("not", "never", "don't") flips and
//! dampens the next scored word within a few tokens of the same clause; an
//! intensifier ("very", "really") scales the word right after it.

use std::collections::HashMap;

use crate::SentimentScorer;

/// Multiplier applied to a word following a negator
const NEGATION_FACTOR: f64 = -0.5;

/// Tokens after a negator that a scored word may still be negated within
const NEGATION_WINDOW: usize = 3;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "hardly", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't",
    "can't", "won't", "cannot",
];

/// Word-level sentiment lexicon
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    /// Polarity per lowercase word
    words: HashMap<String, f64>,
    /// Scale per lowercase intensifier
    intensifiers: HashMap<String, f64>,
}

impl LexiconSentiment {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            intensifiers: HashMap::new(),
        }
    }

    /// Add a positive word with intensity in `[0, 1]`
    pub fn add_positive(&mut self, word: &str, intensity: f64) {
        self.words
            .insert(word.to_lowercase(), intensity.clamp(0.0, 1.0));
    }

    /// Add a negative word with intensity in `[0, 1]` (stored as negative)
    pub fn add_negative(&mut self, word: &str, intensity: f64) {
        self.words
            .insert(word.to_lowercase(), -intensity.clamp(0.0, 1.0));
    }

    /// Add an intensifier that scales the next scored word
    pub fn add_intensifier(&mut self, word: &str, scale: f64) {
        self.intensifiers.insert(word.to_lowercase(), scale);
    }

    /// Polarity of a single word, if known
    pub fn get_sentiment(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f64 {
        let mut scores = Vec::new();

        // Negation and intensifiers never reach across clause punctuation
        for clause in text.split(|c: char| matches!(c, ',' | ';' | ':')) {
            let mut negation: Option<usize> = None;
            let mut scale = 1.0;

            for token in clause.split(|c: char| !(c.is_alphabetic() || c == '\'')) {
                let token = token.trim_matches('\'').to_lowercase();
                if token.is_empty() {
                    continue;
                }

                if NEGATORS.contains(&token.as_str()) {
                    negation = Some(NEGATION_WINDOW);
                    continue;
                }
                if let Some(&s) = self.intensifiers.get(&token) {
                    scale *= s;
                    continue;
                }

                match self.words.get(&token) {
                    Some(&value) => {
                        let mut value = value * scale;
                        if negation.is_some() {
                            value *= NEGATION_FACTOR;
                        }
                        scores.push(value.clamp(-1.0, 1.0));
                        negation = None;
                        scale = 1.0;
                    }
                    None => {
                        negation = negation.and_then(|n| n.checked_sub(1)).filter(|&n| n > 0);
                        scale = 1.0;
                    }
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl Default for LexiconSentiment {
    /// Lexicon with common evaluative words of interview transcripts
    fn default() -> Self {
        let mut lexicon = Self::new();

        // Highly positive words
        for word in &[
            "excellent", "wonderful", "amazing", "fantastic", "brilliant", "outstanding",
            "perfect", "exceptional", "superb", "best", "love",
        ] {
            lexicon.add_positive(word, 0.9);
        }

        // Moderately positive words
        for word in &[
            "good", "great", "nice", "pleasant", "happy", "glad", "pleased", "satisfied",
            "impressive", "valuable", "useful", "helpful", "helps", "better", "reliable",
            "efficient", "easy", "creative",
        ] {
            lexicon.add_positive(word, 0.6);
        }

        // Mildly positive words
        for word in &[
            "okay", "fine", "decent", "adequate", "acceptable", "reasonable", "positive",
            "promising", "quick", "fast", "smooth",
        ] {
            lexicon.add_positive(word, 0.3);
        }

        // Highly negative words
        for word in &[
            "terrible", "awful", "horrible", "dreadful", "disastrous", "worst", "hate",
            "useless",
        ] {
            lexicon.add_negative(word, 0.9);
        }

        // Moderately negative words
        for word in &[
            "bad", "poor", "disappointing", "frustrating", "annoying", "difficult",
            "problematic", "confusing", "unclear", "broken", "buggy", "wrong", "worse",
            "unreliable",
        ] {
            lexicon.add_negative(word, 0.6);
        }

        // Mildly negative words
        for word in &[
            "mediocre", "lacking", "insufficient", "boring", "tedious", "slow", "clunky",
            "hard",
        ] {
            lexicon.add_negative(word, 0.3);
        }

        for (word, scale) in &[
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("incredibly", 1.5),
            ("quite", 1.1),
            ("somewhat", 0.7),
            ("slightly", 0.5),
        ] {
            lexicon.add_intensifier(word, *scale);
        }

        lexicon
    }
}
