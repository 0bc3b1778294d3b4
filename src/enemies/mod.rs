//! Enemies domain: enemy kinds, their behavior patterns and wave spawning.

mod behavior;
mod components;
mod spawn;
mod systems;


pub use behavior::{EnemyContext, EnemyTick};
pub use components::{ENEMY_SIZE, Enemy, EnemyClip, EnemyKind, Pattern};
pub use spawn::{SPAWN_LIMIT, SpawnOrder, SpawnSequence, in_spawn_order, spawn_wave};
pub use systems::{EnemyRoster, populate_level};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::sprites::DrawSet;
use systems::{queue_enemy_draws, retire_defeated_enemies, update_enemies};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRoster>()
            .init_resource::<SpawnSequence>()
            .add_systems(FixedUpdate, update_enemies.in_set(TickSet::Enemies))
            .add_systems(FixedUpdate, retire_defeated_enemies.in_set(TickSet::Cleanup))
            .add_systems(Update, queue_enemy_draws.in_set(DrawSet::Queue));
    }
}
