//! AFG Core - Domain models and shared types
//!
//! This crate defines the core abstractions used throughout the AFG pipeline:
//! - Entity models (people, technologies, roles)
//! - The entity registry shared across documents
//! - Interaction records and affordance labels
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, ExtractionConfig, InputConfig, LoggingConfig, OutputConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for AFG operations
#[derive(Error, Debug)]
pub enum AfgError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to export {path}: {message}")]
    Export { path: PathBuf, message: String },

    #[error("Invalid entity name: {0:?}")]
    InvalidEntityName(String),

    #[error("Document source error: {0}")]
    Source(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, AfgError>;

// ============================================================================
// Entity Models
// ============================================================================

/// Kind of entity tracked by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Person,
    Technology,
}

impl EntityType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Technology => "Technology",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a person inferred from descriptive context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Developer,
    Manager,
    User,
}

impl Role {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Manager => "Manager",
            Self::User => "User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Affordance category of a person-technology or technology-technology
/// interaction (Melville et al.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Affordance {
    /// Expansive decision making
    Hdm,
    /// Creativity automation
    Hca,
    /// Relationship with humans
    Hrh,
    /// Intermachine teaming
    Hmt,
}

impl Affordance {
    pub const ALL: [Affordance; 4] = [Self::Hdm, Self::Hca, Self::Hrh, Self::Hmt];

    /// Get the short label used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hdm => "Hdm",
            Self::Hca => "Hca",
            Self::Hrh => "Hrh",
            Self::Hmt => "Hmt",
        }
    }

    /// Human-readable name of the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Hdm => "Expansive Decision Making",
            Self::Hca => "Creativity Automation",
            Self::Hrh => "Relationship with Humans",
            Self::Hmt => "Intermachine Teaming",
        }
    }
}

impl std::fmt::Display for Affordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named entity in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form, used verbatim as identity and label
    pub name: String,

    /// Person or Technology
    pub entity_type: EntityType,

    /// Inferred role (people only)
    pub role: Option<Role>,
}

impl Entity {
    /// Create a new entity without a role
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
            role: None,
        }
    }

    pub fn is_person(&self) -> bool {
        self.entity_type == EntityType::Person
    }

    pub fn is_technology(&self) -> bool {
        self.entity_type == EntityType::Technology
    }
}

// ============================================================================
// Entity Registry
// ============================================================================

/// Registry of entities accumulated across all documents.
///
/// Preserves insertion order so that downstream exports are deterministic.
/// Names are case-sensitive and the first insertion of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name with the given type.
    ///
    /// Returns `Ok(true)` when the entity was added, `Ok(false)` when the name
    /// was already present (its existing type is kept).
    pub fn insert(&mut self, name: &str, entity_type: EntityType) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AfgError::InvalidEntityName(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Ok(false);
        }

        self.index.insert(name.to_string(), self.entities.len());
        self.entities.push(Entity::new(name, entity_type));
        Ok(true)
    }

    /// Set the role of a person if it has none yet.
    ///
    /// Returns `true` if the role was assigned.
    pub fn assign_role(&mut self, name: &str, role: Role) -> bool {
        match self.index.get(name) {
            Some(&i) if self.entities[i].role.is_none() => {
                self.entities[i].role = Some(role);
                true
            }
            _ => false,
        }
    }

    /// Look up an entity by exact name
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Names of people that have no role yet, in insertion order
    pub fn unassigned_people(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.is_person() && e.role.is_none())
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Count entities of one type
    pub fn count_of(&self, entity_type: EntityType) -> usize {
        self.entities
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .count()
    }
}

impl<'a> IntoIterator for &'a EntityRegistry {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

// ============================================================================
// Documents and Interactions
// ============================================================================

/// A raw input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (file name or demo key)
    pub id: String,

    /// Full text content
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// An interaction between two entities found in one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// First entity name (order of appearance in the registry)
    pub entity_a: String,

    /// Second entity name
    pub entity_b: String,

    /// Affordance label of the sentence
    pub affordance: Affordance,

    /// Sentence polarity in [-1, 1]
    pub sentiment: f64,

    /// Document the sentence came from
    pub document_id: String,

    /// The sentence itself
    pub sentence: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_first_insert_wins() {
        let mut registry = EntityRegistry::new();

        assert!(registry.insert("Alice", EntityType::Person).unwrap());
        assert!(!registry.insert("Alice", EntityType::Technology).unwrap());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Alice").unwrap().entity_type, EntityType::Person);
    }

    #[test]
    fn test_registry_is_case_sensitive() {
        let mut registry = EntityRegistry::new();
        registry.insert("DataRobot Platform", EntityType::Technology).unwrap();
        registry.insert("DataRobot platform", EntityType::Technology).unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_rejects_blank_names() {
        let mut registry = EntityRegistry::new();
        let err = registry.insert("   ", EntityType::Person).unwrap_err();

        assert!(matches!(err, AfgError::InvalidEntityName(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_trims_names() {
        let mut registry = EntityRegistry::new();
        registry.insert(" Bob ", EntityType::Person).unwrap();

        assert!(registry.contains("Bob"));
    }

    #[test]
    fn test_assign_role_only_once() {
        let mut registry = EntityRegistry::new();
        registry.insert("Bob", EntityType::Person).unwrap();

        assert!(registry.assign_role("Bob", Role::Manager));
        assert!(!registry.assign_role("Bob", Role::User));
        assert!(!registry.assign_role("Nobody", Role::User));

        assert_eq!(registry.get("Bob").unwrap().role, Some(Role::Manager));
        assert!(registry.unassigned_people().is_empty());
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = EntityRegistry::new();
        registry.insert("Zed", EntityType::Person).unwrap();
        registry.insert("Acme Tool", EntityType::Technology).unwrap();
        registry.insert("Amy", EntityType::Person).unwrap();

        let names: Vec<&str> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Acme Tool", "Amy"]);
        assert_eq!(registry.count_of(EntityType::Person), 2);
    }

    #[test]
    fn test_affordance_labels() {
        assert_eq!(Affordance::Hdm.to_string(), "Hdm");
        assert_eq!(Affordance::Hmt.description(), "Intermachine Teaming");
        assert_eq!(Affordance::ALL.len(), 4);
    }
}
