//! Hero domain: the player character driven by keyboard intent.

mod components;
mod systems;


pub use components::{Hero, HeroClip, HeroSkin, HeroTick};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::sprites::DrawSet;
use systems::{apply_hero_input, queue_hero_draws, update_hero};

pub struct HeroPlugin;

impl Plugin for HeroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_hero_input.in_set(TickSet::Input))
            .add_systems(FixedUpdate, update_hero.in_set(TickSet::Hero))
            .add_systems(Update, queue_hero_draws.in_set(DrawSet::Queue));
    }
}
