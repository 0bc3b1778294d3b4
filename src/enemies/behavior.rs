//! Enemies domain: per-tick decision making layered on the shared physics.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::components::{Enemy, Pattern};
use crate::combat::{CombatTuning, HeroTarget, Projectile, ProjectileKind};
use crate::maps::{MAP_HEIGHT, Map, ROW_MIN, row_of};
use crate::movement::{CharacterState, Facing, MovementTuning, wall_ahead};
use crate::sprites::secs;

/// Read-only world state an enemy sees during its update.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext<'a> {
    pub map: &'a Map,
    pub dt: f32,
    pub movement: &'a MovementTuning,
    pub combat: &'a CombatTuning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyTick {
    /// A new shot left this enemy.
    pub fired: bool,
    /// One of its shots hit the hero.
    pub hit_hero: bool,
}

impl Enemy {
    pub fn update(
        &mut self,
        ctx: &EnemyContext,
        hero: &mut HeroTarget,
        rng: &mut impl Rng,
    ) -> EnemyTick {
        let mut tick = EnemyTick::default();

        if self.character.is_starting() {
            self.character.locate_destination();
            self.character.integrate(ctx.dt);
        } else if self.character.is_dead() {
            self.step_death(ctx);
            self.character.integrate(ctx.dt);
        } else if self.is_captured() {
            self.step_capture(ctx);
            tick.hit_hero = self.character.update_projectiles(ctx.map, ctx.dt, Some(&mut *hero));
            self.character.integrate(ctx.dt);
            if self.character.animation.is_finished() {
                self.release();
                debug!("{:?} escaped its bubble", self.kind);
            }
        } else {
            tick = match self.kind.pattern() {
                Pattern::Chase | Pattern::Hop => self.step_chase(ctx, hero),
                Pattern::Wander => self.step_wander(ctx, hero, rng),
                Pattern::Fly => self.step_fly(ctx, hero),
            };
        }

        self.correct_clip();
        tick
    }

    fn step_chase(&mut self, ctx: &EnemyContext, hero: &mut HeroTarget) -> EnemyTick {
        let speed = self.speed();
        let pattern = self.kind.pattern();
        let c = &mut self.character;

        if c.body.velocity.x == 0.0 {
            if !c.is_airborne() {
                c.set_state(CharacterState::Walking);
            }
            let facing = Facing::toward(c.body.position.x, hero.body.position.x);
            c.body.velocity.x = facing.sign() * speed;
            c.check_location(ctx.map);
        }

        let vx = c.body.velocity.x;
        c.step_body(ctx.map, ctx.movement);
        let hit_hero = c.update_projectiles(ctx.map, ctx.dt, Some(&mut *hero));
        c.integrate(ctx.dt);

        if c.body.velocity.x == 0.0 {
            c.body.velocity.x = -vx;
        }
        c.face_velocity();

        if !c.is_airborne() {
            let hop = match pattern {
                Pattern::Hop => Some(ctx.movement.jump_velocity / 2.0),
                _ => {
                    let above = hero.body.position.y < c.body.position.y;
                    let close = (hero.body.position.x - c.body.position.x).abs() <= hero.body.size.x;
                    (above && close).then_some(ctx.movement.jump_velocity)
                }
            };
            if let Some(velocity) = hop {
                c.set_state(CharacterState::Jumping);
                c.body.velocity.y = -velocity;
            }
        }

        EnemyTick {
            fired: false,
            hit_hero,
        }
    }

    fn step_wander(
        &mut self,
        ctx: &EnemyContext,
        hero: &mut HeroTarget,
        rng: &mut impl Rng,
    ) -> EnemyTick {
        let speed = self.speed();
        let c = &mut self.character;
        c.step_body(ctx.map, ctx.movement);
        let hit_hero = c.update_projectiles(ctx.map, ctx.dt, Some(&mut *hero));
        c.integrate(ctx.dt);

        if c.is_airborne() {
            c.body.velocity.x = 0.0;
            return EnemyTick {
                fired: false,
                hit_hero,
            };
        }

        if c.body.velocity.x == 0.0 {
            c.set_state(CharacterState::Walking);
            c.body.velocity.x = if rng.random_bool(0.5) { speed } else { -speed };
            c.face_velocity();
        }

        let mut fired = false;
        if let Some(weapon) = self.kind.weapon() {
            if self.has_line_of_fire(weapon, &hero.body) {
                self.fire_timer += secs(ctx.dt);
                fired = self.try_fire(weapon, ctx);
            }
        }

        EnemyTick { fired, hit_hero }
    }

    fn step_fly(&mut self, ctx: &EnemyContext, hero: &mut HeroTarget) -> EnemyTick {
        let speed = self.speed();
        let c = &mut self.character;

        if c.body.velocity.x == 0.0 {
            let facing = Facing::toward(c.body.position.x, hero.body.position.x);
            c.body.velocity.x = facing.sign() * speed;
        }
        if c.body.velocity.y == 0.0 {
            c.set_state(CharacterState::Jumping);
            c.body.velocity.y = c.body.velocity.x.abs();
        }

        let vx = c.body.velocity.x;
        c.check_horizontal_collision(ctx.map);
        if c.body.velocity.x == 0.0 {
            c.body.velocity.x = -vx;
        }
        c.face_velocity();

        let body = c.body;
        if body.velocity.y < 0.0 {
            if ctx.map.has_north_collision(body.position.x, body.head()) {
                c.body.velocity.y = -body.velocity.y;
            }
        } else if ctx.map.has_south_collision(body.position.x, body.feet())
            && row_of(body.position.y) > ROW_MIN
        {
            c.body.velocity.y = -body.velocity.y;
        } else {
            c.check_location(ctx.map);
        }

        let hit_hero = c.update_projectiles(ctx.map, ctx.dt, Some(&mut *hero));
        c.integrate(ctx.dt);
        EnemyTick {
            fired: false,
            hit_hero,
        }
    }

    /// Rise inside the bubble until the head meets the ceiling.
    fn step_capture(&mut self, ctx: &EnemyContext) {
        let body = &mut self.character.body;
        body.velocity.x = 0.0;
        body.velocity.y = if ctx.map.has_north_collision(body.position.x, body.head()) {
            0.0
        } else {
            -ctx.combat.bubble_rise_speed
        };
    }

    /// Tumble after being popped: one wall bounce, ceiling bounces, then
    /// fall until landing.
    fn step_death(&mut self, ctx: &EnemyContext) {
        let map = ctx.map;
        let body = self.character.body;

        if wall_ahead(&body, map) {
            if self.bounced {
                self.character.body.velocity.x = 0.0;
            } else {
                self.character.body.velocity.x = -body.velocity.x;
                self.bounced = true;
            }
        }

        let body = &mut self.character.body;
        if body.velocity.y < 0.0 && map.has_north_collision(body.position.x, body.head()) {
            body.velocity.y = -body.velocity.y;
        } else if body.velocity.y > 0.0
            && map.has_south_collision(body.position.x, body.feet())
            && !map.has_south_collision(body.position.x, body.position.y)
            && row_of(body.feet()) > ROW_MIN
        {
            body.velocity = Vec2::ZERO;
            return;
        }

        body.velocity.y += ctx.movement.gravity;
        // Never rest mid-air at the top of the arc.
        if body.velocity.y == 0.0 {
            body.velocity.y = ctx.movement.gravity;
        }
        body.velocity.y = body.velocity.y.min(ctx.movement.max_fall_speed);

        if body.feet() >= MAP_HEIGHT {
            body.position.y = -body.size.y;
        }
    }

    fn has_line_of_fire(&self, weapon: ProjectileKind, hero: &crate::movement::Body) -> bool {
        let body = &self.character.body;
        let dx = hero.position.x - body.position.x;
        match weapon {
            ProjectileKind::Laser => {
                hero.position.y > body.position.y && dx.abs() < body.size.x
            }
            _ => {
                let level = (hero.position.y - body.position.y).abs() <= hero.size.y;
                let facing_hero =
                    (dx > 0.0 && body.velocity.x > 0.0) || (dx < 0.0 && body.velocity.x < 0.0);
                level && facing_hero
            }
        }
    }

    /// Fire once the cooldown has built up and the arsenal has room.
    fn try_fire(&mut self, weapon: ProjectileKind, ctx: &EnemyContext) -> bool {
        if !self.character.can_attack() {
            return false;
        }
        if self.fire_timer < secs(ctx.combat.fire_interval(self.is_angry())) {
            return false;
        }
        self.fire_timer = Duration::ZERO;
        if self.kind.halts_to_fire() {
            self.character.body.velocity.x = 0.0;
        }
        let speed = ctx.combat.shot_speed(ctx.movement.enemy_run_speed);
        let body = &self.character.body;
        // Lasers drop from the underside of the body.
        let origin = match weapon {
            ProjectileKind::Laser => body.position + Vec2::new(0.0, body.size.y / 2.0),
            _ => body.position,
        };
        let shot = Projectile::shot(
            weapon,
            origin,
            self.character.facing,
            self.is_angry(),
            speed,
        );
        self.character.arsenal.fire(shot)
    }
}
