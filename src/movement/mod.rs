//! Movement domain: shared character locomotion, physics step and input.

mod components;
mod input;
mod physics;
mod resources;


pub use components::{Body, Character, CharacterState, Facing, Positioned};
pub use physics::wall_ahead;
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::movement::input::read_input;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Update, read_input);
    }
}
