//! Validation of roster entries against the known enemy kinds.

use super::registry::ContentRegistry;
use crate::enemies::EnemyKind;

/// A roster entry naming a kind the game does not know.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub unknown_value: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has unknown value '{}' in field '{}'",
            self.source_type, self.source_id, self.unknown_value, self.field
        )
    }
}

/// Resolve every roster entry to an [`EnemyKind`] in file order. Entries
/// with an unknown kind are left out and reported.
pub fn resolve_roster(registry: &ContentRegistry) -> (Vec<EnemyKind>, Vec<ValidationError>) {
    let mut kinds = Vec::new();
    let mut errors = Vec::new();

    for def in &registry.enemies {
        match EnemyKind::from_id(&def.kind) {
            Some(kind) => kinds.push(kind),
            None => errors.push(ValidationError {
                source_type: "Enemy",
                source_id: def.id.clone(),
                field: "kind",
                unknown_value: def.kind.clone(),
            }),
        }
    }

    (kinds, errors)
}
