//! Entity extraction into the shared registry
//!
//! For each document: people from the recognizer, technologies from both
//! heuristics, then role inference for people still without a role.

use afg_core::{AfgError, EntityRegistry, EntityType, Result};
use serde::Serialize;

use crate::ner::person_names;
use crate::role::assign_roles;
use crate::technology::{adjacent_token_candidates, pattern_candidates};
use crate::NamedEntityRecognizer;

/// Counts of registry changes made while processing documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub people_added: usize,
    pub technologies_added: usize,
    pub roles_assigned: usize,
    pub names_skipped: usize,
}

impl ExtractionStats {
    /// Entities added to the registry
    pub fn total_added(&self) -> usize {
        self.people_added + self.technologies_added
    }

    pub fn merge(&mut self, other: ExtractionStats) {
        self.people_added += other.people_added;
        self.technologies_added += other.technologies_added;
        self.roles_assigned += other.roles_assigned;
        self.names_skipped += other.names_skipped;
    }
}

/// Populates an entity registry from document text
pub struct EntityExtractor {
    ner: Box<dyn NamedEntityRecognizer>,
}

impl EntityExtractor {
    pub fn new(ner: Box<dyn NamedEntityRecognizer>) -> Self {
        Self { ner }
    }

    /// Extract the entities of one document into `registry`
    pub fn extract_document(
        &self,
        text: &str,
        registry: &mut EntityRegistry,
    ) -> Result<ExtractionStats> {
        let mut stats = ExtractionStats::default();

        for name in person_names(self.ner.as_ref(), text)? {
            if register(registry, &name, EntityType::Person, &mut stats)? {
                stats.people_added += 1;
            }
        }

        let technologies = adjacent_token_candidates(text)
            .into_iter()
            .chain(pattern_candidates(text));
        for name in technologies {
            if register(registry, &name, EntityType::Technology, &mut stats)? {
                stats.technologies_added += 1;
            }
        }

        stats.roles_assigned = assign_roles(text, registry);

        Ok(stats)
    }
}

/// Insert a name, skipping (and counting) names the registry rejects
fn register(
    registry: &mut EntityRegistry,
    name: &str,
    entity_type: EntityType,
    stats: &mut ExtractionStats,
) -> Result<bool> {
    match registry.insert(name, entity_type) {
        Ok(added) => Ok(added),
        Err(AfgError::InvalidEntityName(name)) => {
            tracing::warn!("Skipping invalid {} name {:?}", entity_type, name);
            stats.names_skipped += 1;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractedEntity, NerLabel, RuleBasedNer};
    use afg_core::Role;
    use proptest::prelude::*;

    /// Recognizer returning fixed spans regardless of input
    struct FixedNer(Vec<(&'static str, NerLabel)>);

    impl NamedEntityRecognizer for FixedNer {
        fn recognize(&self, _text: &str) -> Result<Vec<ExtractedEntity>> {
            Ok(self
                .0
                .iter()
                .map(|(text, label)| ExtractedEntity {
                    text: text.to_string(),
                    label: *label,
                    start: 0,
                    end: text.len(),
                    confidence: 1.0,
                })
                .collect())
        }
    }

    fn names(registry: &EntityRegistry) -> Vec<(&str, EntityType)> {
        registry
            .iter()
            .map(|e| (e.name.as_str(), e.entity_type))
            .collect()
    }

    #[test]
    fn test_extracts_people_technologies_and_roles() {
        let extractor = EntityExtractor::new(Box::new(RuleBasedNer::new()));
        let mut registry = EntityRegistry::new();

        let stats = extractor
            .extract_document(
                "Alice is a data scientist. Alice said the DataRobot platform helps.",
                &mut registry,
            )
            .unwrap();

        assert_eq!(
            names(&registry),
            vec![
                ("Alice", EntityType::Person),
                ("DataRobot Platform", EntityType::Technology),
                ("DataRobot platform", EntityType::Technology),
            ]
        );
        assert_eq!(registry.get("Alice").unwrap().role, Some(Role::Developer));
        assert_eq!(stats.people_added, 1);
        assert_eq!(stats.technologies_added, 2);
        assert_eq!(stats.roles_assigned, 1);
    }

    #[test]
    fn test_only_person_spans_are_consumed() {
        let ner = FixedNer(vec![
            ("Carol", NerLabel::Person),
            ("AcmeCorp", NerLabel::Organization),
        ]);
        let extractor = EntityExtractor::new(Box::new(ner));
        let mut registry = EntityRegistry::new();

        extractor
            .extract_document("Carol is a customer of AcmeCorp.", &mut registry)
            .unwrap();

        assert_eq!(names(&registry), vec![("Carol", EntityType::Person)]);
        assert_eq!(registry.get("Carol").unwrap().role, Some(Role::User));
    }

    #[test]
    fn test_blank_spans_are_ignored() {
        let ner = FixedNer(vec![("   ", NerLabel::Person), ("Dave", NerLabel::Person)]);
        let extractor = EntityExtractor::new(Box::new(ner));
        let mut registry = EntityRegistry::new();

        extractor.extract_document("", &mut registry).unwrap();
        assert_eq!(names(&registry), vec![("Dave", EntityType::Person)]);
    }

    #[test]
    fn test_role_found_in_later_document() {
        let extractor = EntityExtractor::new(Box::new(RuleBasedNer::new()));
        let mut registry = EntityRegistry::new();

        extractor
            .extract_document("Bob joined the call.", &mut registry)
            .unwrap();
        assert_eq!(registry.get("Bob").unwrap().role, None);

        let stats = extractor
            .extract_document("Nobody else came. Bob, a project manager, agreed.", &mut registry)
            .unwrap();
        assert_eq!(stats.people_added, 0);
        assert_eq!(registry.get("Bob").unwrap().role, Some(Role::Manager));
    }

    #[test]
    fn test_sentence_openers_stay_out_of_names() {
        let extractor = EntityExtractor::new(Box::new(RuleBasedNer::new()));
        let mut registry = EntityRegistry::new();

        extractor
            .extract_document(
                "Yesterday Bob, a project manager, used the Vega tool. \
                 Later Priya is a data engineer.",
                &mut registry,
            )
            .unwrap();

        assert_eq!(registry.get("Bob").unwrap().role, Some(Role::Manager));
        assert_eq!(registry.get("Priya").unwrap().role, Some(Role::Developer));
        assert!(!registry.contains("Yesterday Bob"));
        assert!(!registry.contains("Later Priya"));
        assert_eq!(registry.count_of(EntityType::Person), 2);
    }

    #[test]
    fn test_first_extraction_wins() {
        let extractor = EntityExtractor::new(Box::new(RuleBasedNer::new()));
        let mut registry = EntityRegistry::new();
        registry.insert("Nimbus Tool", EntityType::Person).unwrap();

        extractor
            .extract_document("We love the Nimbus tool.", &mut registry)
            .unwrap();

        assert_eq!(registry.get("Nimbus Tool").unwrap().entity_type, EntityType::Person);
        assert!(registry.contains("Nimbus tool"));
    }

    #[test]
    fn test_stats_merge() {
        let mut total = ExtractionStats::default();
        total.merge(ExtractionStats {
            people_added: 1,
            technologies_added: 2,
            roles_assigned: 1,
            names_skipped: 0,
        });
        total.merge(ExtractionStats {
            people_added: 1,
            ..Default::default()
        });

        assert_eq!(total.total_added(), 4);
        assert_eq!(total.roles_assigned, 1);
    }

    proptest! {
        #[test]
        fn prop_single_document_extraction_is_idempotent(
            words in prop::collection::vec(
                prop::sample::select(vec![
                    "Alice", "Bob", "is", "a", "scientist.", "manager,", "the", "DataRobot",
                    "platform", "Nimbus", "tool.", "said", "uses", "software", "Carol,",
                ]),
                0..24,
            )
        ) {
            let text = words.join(" ");
            let extractor = EntityExtractor::new(Box::new(RuleBasedNer::new()));

            let mut first = EntityRegistry::new();
            extractor.extract_document(&text, &mut first).unwrap();
            let mut second = EntityRegistry::new();
            extractor.extract_document(&text, &mut second).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
