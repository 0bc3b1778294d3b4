//! Combat domain: tuning for projectiles, collisions and timers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Speeds are pixels per tick, durations seconds.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CombatTuning {
    /// Fraction of a target's width used as its collision radius.
    pub collision_ratio: f32,
    /// Run speed multiplier for popped enemies and enemy shots.
    pub dead_multiplier: f32,
    pub bubble_speed: f32,
    pub bubble_rise_speed: f32,
    pub hero_projectile_limit: usize,
    pub fire_cooldown: f32,
    pub angry_fire_cooldown: f32,
    pub invincibility: f32,
    pub bonus_lifetime: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            collision_ratio: 0.75,
            dead_multiplier: 3.0,
            bubble_speed: 0.75,
            bubble_rise_speed: 0.5,
            hero_projectile_limit: 5,
            fire_cooldown: 2.0,
            angry_fire_cooldown: 1.0,
            invincibility: 3.0,
            bonus_lifetime: 7.5,
        }
    }
}

impl CombatTuning {
    /// Speed of enemy shots given the enemy run speed.
    pub fn shot_speed(&self, enemy_run_speed: f32) -> f32 {
        enemy_run_speed * self.dead_multiplier
    }

    pub fn fire_interval(&self, angry: bool) -> f32 {
        if angry {
            self.angry_fire_cooldown
        } else {
            self.fire_cooldown
        }
    }
}
