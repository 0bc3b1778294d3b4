//! Movement domain: the per-tick physics step shared by every character.
//!
//! Order within a tick: glide while starting, otherwise gravity, then the
//! leading-edge wall check, then out-of-bounds handling. Owners update their
//! projectiles between [`Character::step_body`] and [`Character::integrate`].

use bevy::prelude::*;

use super::components::{Body, Character, CharacterState};
use super::resources::MovementTuning;
use crate::maps::{MAP_HEIGHT, Map, ROW_MIN, row_of};
use crate::sprites::ClipKey;

impl<K: ClipKey> Character<K> {
    /// Locomotion for one tick, before owned projectiles update.
    pub fn step_body(&mut self, map: &Map, tuning: &MovementTuning) {
        if self.is_starting() {
            self.locate_destination();
        } else {
            self.apply_gravity(map, tuning);
            self.check_horizontal_collision(map);
            self.check_location(map);
        }
    }

    /// Move by velocity and advance the animation clock.
    pub fn integrate(&mut self, dt: f32) {
        self.body.integrate();
        self.animation.advance(dt);
        self.sync_size();
    }

    pub fn apply_gravity(&mut self, map: &Map, tuning: &MovementTuning) {
        let body = self.body;
        let feet_blocked = map.has_south_collision(body.position.x, body.feet());
        let hit_ground = feet_blocked && !self.is(CharacterState::Jumping);
        let at_top = row_of(body.feet()) <= ROW_MIN;
        let stuck = feet_blocked && map.has_south_collision(body.position.x, body.position.y);

        if hit_ground && !stuck && !at_top {
            self.body.velocity.y = 0.0;
            if self.is(CharacterState::Falling) {
                self.set_state(CharacterState::Idle);
            }
            return;
        }

        if self.body.velocity.y == 0.0 {
            self.body.velocity.y = tuning.gravity;
            self.set_state(CharacterState::Falling);
            return;
        }

        self.body.velocity.y += tuning.gravity;
        if self.body.velocity.y > 0.0 {
            if !self.is(CharacterState::Attacking) {
                self.set_state(CharacterState::Falling);
            }
            self.body.velocity.y = self.body.velocity.y.min(tuning.max_fall_speed);
        } else {
            self.set_state(CharacterState::Jumping);
        }
    }

    pub fn check_horizontal_collision(&mut self, map: &Map) {
        if wall_ahead(&self.body, map) {
            self.body.velocity.x = 0.0;
        }
    }

    /// While falling: stop drifting outside the playable area and wrap to the
    /// top after dropping off the bottom of the map.
    pub fn check_location(&mut self, map: &Map) {
        if self.body.velocity.y <= 0.0 {
            return;
        }
        if !map.has_bounds(self.body.position.x, self.body.feet()) {
            self.body.velocity.x = 0.0;
        }
        if self.body.feet() >= MAP_HEIGHT {
            self.body.position.y = -self.body.size.y;
        }
    }

    /// Glide toward the destination at walk speed, snapping within one step.
    pub fn locate_destination(&mut self) {
        let speed = self.walk_speed;
        let (x, vx) = approach(self.body.position.x, self.destination.x, speed);
        let (y, vy) = approach(self.body.position.y, self.destination.y, speed);
        self.body.position = Vec2::new(x, y);
        self.body.velocity = Vec2::new(vx, vy);

        if self.body.position == self.destination {
            self.body.velocity = Vec2::ZERO;
            self.set_state(CharacterState::Idle);
        }
    }
}

/// True when the leading edge at mid-body height touches a wall.
pub fn wall_ahead(body: &Body, map: &Map) -> bool {
    let vx = body.velocity.x;
    if vx == 0.0 {
        return false;
    }
    let edge = body.position.x + vx.signum() * body.size.x / 2.0;
    map.has_horizontal_collision(edge, body.position.y + body.size.y / 4.0)
}

/// One axis of the destination glide: (new position, velocity this tick).
fn approach(current: f32, target: f32, speed: f32) -> (f32, f32) {
    if current < target {
        if current + speed > target {
            (target, 0.0)
        } else {
            (current, speed)
        }
    } else if current > target {
        if current - speed <= target {
            (target, 0.0)
        } else {
            (current, -speed)
        }
    } else {
        (current, 0.0)
    }
}
