//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Speeds are pixels per tick.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovementTuning {
    /// Added to vertical velocity every airborne tick.
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,
    pub hero_walk_speed: f32,
    pub enemy_walk_speed: f32,
    pub enemy_run_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            max_fall_speed: 1.0,
            jump_velocity: 4.75,
            hero_walk_speed: 1.0,
            enemy_walk_speed: 0.25,
            enemy_run_speed: 0.75,
        }
    }
}

/// Keyboard state sampled each frame and consumed by the fixed tick.
///
/// Release flags latch until a tick consumes them so a release between two
/// ticks is never lost.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct MovementInput {
    pub left_held: bool,
    pub right_held: bool,
    pub jump_held: bool,
    pub left_released: bool,
    pub right_released: bool,
    pub fire_released: bool,
}

impl MovementInput {
    pub fn clear_releases(&mut self) {
        self.left_released = false;
        self.right_released = false;
        self.fire_released = false;
    }
}
