//! Role inference for people
//!
//! Looks for `"<Name> is a <description>."` and then `"<Name>, a <description>,"`
//! (case-insensitive) and maps the description onto a role through an ordered
//! keyword table.

use afg_core::{EntityRegistry, Role};
use regex::Regex;

/// Role keyword table, evaluated in order; the first role with a keyword
/// contained in the description wins.
pub const ROLE_KEYWORDS: &[(Role, &[&str])] = &[
    (
        Role::Developer,
        &["developer", "engineer", "programmer", "coder", "scientist"],
    ),
    (
        Role::Manager,
        &["manager", "lead", "director", "chief", "project manager"],
    ),
    (
        Role::User,
        &["user", "customer", "client", "end-user", "employee"],
    ),
];

/// Map a free-text description onto a role
pub fn classify_role(description: &str) -> Option<Role> {
    let description = description.to_lowercase();

    ROLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| description.contains(k)))
        .map(|(role, _)| *role)
}

/// Description captured by `"<Name> is a <description>."`
pub fn is_a_description(text: &str, name: &str) -> Option<String> {
    capture_description(text, name, r" is a (.+?)\.")
}

/// Description captured by `"<Name>, a <description>,"`
pub fn appositive_description(text: &str, name: &str) -> Option<String> {
    capture_description(text, name, r", a (.+?),")
}

fn capture_description(text: &str, name: &str, suffix: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    // Anchor on a word start so "Bob" does not match inside "Jacob"
    let boundary = if name.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let pattern = format!("(?i){boundary}{}{suffix}", regex::escape(name));

    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::warn!("Cannot build role pattern for {:?}: {}", name, e);
            return None;
        }
    };

    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Infer the role of `name` from `text`.
///
/// The appositive pattern is only consulted when the "is a" pattern yields
/// no role.
pub fn infer_role(text: &str, name: &str) -> Option<Role> {
    is_a_description(text, name)
        .and_then(|d| classify_role(&d))
        .or_else(|| appositive_description(text, name).and_then(|d| classify_role(&d)))
}

/// Assign roles to every person of the registry that has none yet.
///
/// Returns the number of roles assigned.
pub fn assign_roles(text: &str, registry: &mut EntityRegistry) -> usize {
    let mut assigned = 0;

    for name in registry.unassigned_people() {
        if let Some(role) = infer_role(text, &name) {
            if registry.assign_role(&name, role) {
                tracing::debug!("Assigned role {} to {}", role, name);
                assigned += 1;
            }
        }
    }

    assigned
}
