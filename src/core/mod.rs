//! Core domain: session states, the fixed simulation tick and shared
//! resources.
//!
//! Every gameplay system runs in [`FixedUpdate`] inside one of the chained
//! [`TickSet`]s. A tick first settles level progression from the previous
//! tick, then applies input and moves the hero before the enemies.

mod events;
mod resources;
mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use events::{AudioCue, AudioCueEvent, GameOverEvent};
pub use resources::{GameOutcome, GameRng, Session};
pub use state::GameState;
pub use systems::{LevelProgress, TransitionStep, level_progress, step_transition};

use bevy::prelude::*;

use crate::core::systems::{
    advance_transition, announce_game_over, check_level_complete, finish_loading, log_audio_cues,
    seed_rng, setup_camera,
};
use crate::maps::LevelBuildSet;

/// Simulation ticks per second.
pub const TICK_RATE: f64 = 60.0;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    Progress,
    Input,
    Hero,
    Enemies,
    Collisions,
    Cleanup,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<Session>()
            .init_resource::<GameRng>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
            .add_message::<AudioCueEvent>()
            .add_message::<GameOverEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Progress,
                    TickSet::Input,
                    TickSet::Hero,
                    TickSet::Enemies,
                    TickSet::Collisions,
                    TickSet::Cleanup,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Startup, (setup_camera, seed_rng))
            .add_systems(
                Update,
                finish_loading
                    .after(LevelBuildSet)
                    .run_if(in_state(GameState::Loading)),
            )
            .add_systems(FixedUpdate, check_level_complete.in_set(TickSet::Progress))
            .add_systems(
                FixedUpdate,
                advance_transition.run_if(in_state(GameState::LevelTransition)),
            )
            .add_systems(Update, log_audio_cues)
            .add_systems(OnEnter(GameState::GameOver), announce_game_over);
    }
}
