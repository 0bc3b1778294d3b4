//! Combat domain: projectiles, arsenals and collision dispatch between the
//! hero and enemies.

mod collisions;
mod projectile;
mod resources;

#[cfg(test)]
mod tests;

pub use collisions::{Contact, capture_with_bubbles, resolve_hero_contact};
pub use projectile::{Arsenal, BubblePhase, HeroTarget, Projectile, ProjectileKind};
pub use resources::CombatTuning;

use bevy::prelude::*;

use crate::core::TickSet;
use collisions::{capture_enemies, hero_enemy_contact};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>().add_systems(
            FixedUpdate,
            (capture_enemies, hero_enemy_contact)
                .chain()
                .in_set(TickSet::Collisions),
        );
    }
}
