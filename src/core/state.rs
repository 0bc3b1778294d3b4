//! Core domain: game state definitions for the session flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Levels are sampled from the sheet one per frame.
    #[default]
    Loading,
    Playing,
    /// The view scrolls from the cleared level to the next one.
    LevelTransition,
    GameOver,
}
