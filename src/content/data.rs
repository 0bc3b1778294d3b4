//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron and are only used for
//! deserialization; the loader turns them into runtime resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::CombatTuning;
use crate::hero::HeroSkin;
use crate::movement::MovementTuning;

pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

/// One roster entry. `kind` names the behavior, e.g. `"super_socket"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnemyDef {
    pub id: String,
    pub kind: String,
}

// ============================================================================
// Gameplay defaults (gameplay.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            movement: MovementTuning::default(),
            combat: CombatTuning::default(),
            session: SessionConfig::default(),
        }
    }
}

/// How a session begins.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Zero-based index into the accepted levels.
    pub starting_level: usize,
    pub starting_lives: u32,
    pub hero_skin: HeroSkin,
    /// Fixed seed for reproducible sessions.
    pub seed: Option<u64>,
    /// Every this many bonuses collected grants a life.
    pub bonuses_per_life: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_level: 0,
            starting_lives: 5,
            hero_skin: HeroSkin::Bub,
            seed: None,
            bonuses_per_life: 10,
        }
    }
}
