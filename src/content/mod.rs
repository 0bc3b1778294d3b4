//! Content domain: tuning and roster data read from assets/data at startup.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{DataFile, EnemyDef, GameplayDefaults, SCHEMA_VERSION, SessionConfig};
pub use loader::{ContentLoadError, LoadedContent, load_all_content, parse_data_file, parse_ron};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, resolve_roster};

use bevy::prelude::*;
use std::path::Path;

use crate::enemies::EnemyRoster;

const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let loaded = load_all_content(Path::new(DATA_DIR));
        for error in &loaded.errors {
            warn!("{}; using built-in defaults", error);
        }
        info!("{}", loaded.registry.summary());

        let roster = build_roster(&loaded.registry);
        let GameplayDefaults {
            movement,
            combat,
            session,
            ..
        } = loaded.defaults;

        app.insert_resource(movement)
            .insert_resource(combat)
            .insert_resource(session)
            .insert_resource(roster)
            .insert_resource(loaded.registry);
    }
}

/// Known kinds from the registry; falls back to every kind when none
/// survive validation.
pub fn build_roster(registry: &ContentRegistry) -> EnemyRoster {
    let (kinds, errors) = resolve_roster(registry);
    for error in &errors {
        warn!("Dropping roster entry: {}", error);
    }
    if kinds.is_empty() {
        warn!("Enemy roster is empty; allowing every kind");
        return EnemyRoster::default();
    }
    EnemyRoster { kinds }
}
