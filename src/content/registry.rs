//! ContentRegistry resource holding the loaded roster definitions.

use bevy::prelude::*;

use super::data::EnemyDef;

/// Loaded definitions in file order. Ids are unique; a repeated id replaces
/// the earlier entry in place.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub enemies: Vec<EnemyDef>,
}

impl ContentRegistry {
    pub fn insert_enemy(&mut self, def: EnemyDef) {
        if let Some(existing) = self.enemies.iter_mut().find(|e| e.id == def.id) {
            *existing = def;
        } else {
            self.enemies.push(def);
        }
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!("ContentRegistry loaded:\n - Enemies: {}", self.enemies.len())
    }
}
