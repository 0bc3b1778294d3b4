//! Hero domain: the player character, its lives and invincibility.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{Arsenal, CombatTuning, HeroTarget, Projectile};
use crate::maps::Map;
use crate::movement::{
    Body, Character, CharacterState, Facing, MovementInput, MovementTuning, Positioned,
};
use crate::sprites::{AnimationPlayer, Clip, Renderable, SheetId, SpriteDraw, Surface, secs};

const HERO_SIZE: f32 = 16.0;
const WALK_DELAY: f32 = 0.175;
const JUMP_DELAY: f32 = 0.25;
const FALL_DELAY: f32 = 0.25;
const ATTACK_DELAY: f32 = 0.333;
const DIE_DELAY: f32 = 0.175;
const START_DELAY: f32 = 0.5;

/// Which of the two heroes is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum HeroSkin {
    /// Starts on the west side.
    #[default]
    Bub,
    /// Starts on the east side, facing left.
    Bob,
}

impl HeroSkin {
    fn sheet_offset(self) -> f32 {
        match self {
            HeroSkin::Bub => 0.0,
            HeroSkin::Bob => 112.0,
        }
    }

    pub fn start_point(self, map: &Map) -> Vec2 {
        match self {
            HeroSkin::Bub => map.start_west(),
            HeroSkin::Bob => map.start_east(),
        }
    }

    pub fn initial_facing(self) -> Facing {
        match self {
            HeroSkin::Bub => Facing::Right,
            HeroSkin::Bob => Facing::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClip {
    Idle,
    Walk,
    Jump,
    Fall,
    Attack,
    Die,
    Start,
}

fn hero_clips(skin: HeroSkin) -> AnimationPlayer<HeroClip> {
    let o = skin.sheet_offset();
    let s = HERO_SIZE;
    AnimationPlayer::new(HeroClip::Start)
        .with_clip(HeroClip::Idle, Clip::strip(1, 0.0, o, s, s, 0.0, false))
        .with_clip(HeroClip::Walk, Clip::strip(4, 0.0, o, s, s, WALK_DELAY, true))
        .with_clip(HeroClip::Jump, Clip::strip(2, 0.0, o + 16.0, s, s, JUMP_DELAY, true))
        .with_clip(HeroClip::Fall, Clip::strip(2, 32.0, o + 16.0, s, s, FALL_DELAY, true))
        .with_clip(HeroClip::Attack, Clip::strip(1, 0.0, o + 32.0, s, s, ATTACK_DELAY, false))
        .with_clip(HeroClip::Die, Clip::strip(6, 0.0, o + 48.0, s, s, DIE_DELAY, false))
        .with_clip(HeroClip::Start, Clip::strip(2, 0.0, o + 80.0, 28.0, 32.0, START_DELAY, true))
}

/// What happened to the hero during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroTick {
    Alive,
    Dying,
    /// The death animation ended with lives to spare.
    Respawned { lives: u32 },
    OutOfLives,
}

#[derive(Component, Debug, Clone)]
pub struct Hero {
    pub character: Character<HeroClip>,
    pub skin: HeroSkin,
    pub lives: u32,
    /// Invincibility left.
    invincible: Duration,
}

impl Hero {
    pub fn new(
        skin: HeroSkin,
        position: Vec2,
        lives: u32,
        movement: &MovementTuning,
        combat: &CombatTuning,
    ) -> Self {
        let mut character = Character::new(
            position,
            movement.hero_walk_speed,
            movement.hero_walk_speed,
            hero_clips(skin),
            Arsenal::new(combat.hero_projectile_limit),
        );
        character.facing = skin.initial_facing();
        Self {
            character,
            skin,
            lives,
            invincible: Duration::ZERO,
        }
    }

    /// A hero dropping in from above the map toward the skin's start point.
    pub fn entering(
        skin: HeroSkin,
        map: &Map,
        lives: u32,
        movement: &MovementTuning,
        combat: &CombatTuning,
    ) -> Self {
        let start = skin.start_point(map);
        let mut hero = Self::new(skin, start, lives, movement, combat);
        hero.character.body.position = Vec2::new(start.x, -hero.character.body.size.y);
        hero.begin_level(start);
        hero
    }

    pub fn is_invincible(&self) -> bool {
        !self.invincible.is_zero()
    }

    pub fn is_dead(&self) -> bool {
        self.character.is_dead()
    }

    /// Can be hit by enemies and their shots.
    pub fn is_vulnerable(&self) -> bool {
        !self.is_dead() && !self.character.is_starting() && !self.is_invincible()
    }

    pub fn target(&self) -> HeroTarget {
        HeroTarget {
            body: self.character.body,
            vulnerable: self.is_vulnerable(),
        }
    }

    /// Start dying. Returns false when the hero was already dead or is
    /// invincible.
    pub fn kill(&mut self) -> bool {
        if self.is_dead() || self.is_invincible() {
            return false;
        }
        self.character.set_state(CharacterState::Dead);
        self.character.body.velocity = Vec2::ZERO;
        self.character.animation.restart(HeroClip::Die);
        true
    }

    /// Glide to the start of a level; live bubbles are dropped.
    pub fn begin_level(&mut self, destination: Vec2) {
        self.character.arsenal.clear();
        self.character.begin_start(destination);
        self.character.facing = self.skin.initial_facing();
    }

    pub fn grant_invincibility(&mut self, seconds: f32) {
        self.invincible = self.invincible.max(secs(seconds));
    }

    pub fn add_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }

    /// Apply one tick of keyboard intent. Returns true when a bubble was
    /// blown.
    pub fn apply_input(
        &mut self,
        input: &MovementInput,
        movement: &MovementTuning,
        combat: &CombatTuning,
    ) -> bool {
        let c = &mut self.character;
        if c.is_starting() || c.is_dead() {
            return false;
        }

        let held = if input.left_held {
            Some(Facing::Left)
        } else if input.right_held {
            Some(Facing::Right)
        } else {
            None
        };
        if let Some(facing) = held {
            if c.can_walk() {
                c.body.velocity.x = facing.sign() * c.walk_speed;
                c.facing = facing;
                if !c.is_airborne() {
                    c.set_state(CharacterState::Walking);
                }
            }
        }

        let released = if input.left_released {
            Some(Facing::Left)
        } else if input.right_released {
            Some(Facing::Right)
        } else {
            None
        };
        if let Some(facing) = released {
            c.body.velocity.x = 0.0;
            if !c.is(CharacterState::Attacking) {
                c.facing = facing;
                if !c.is_airborne() {
                    c.set_state(CharacterState::Idle);
                }
            }
        }

        if input.jump_held && c.can_jump() {
            c.set_state(CharacterState::Jumping);
            c.body.velocity.y = -movement.jump_velocity;
        }

        if input.fire_released && c.can_attack() {
            c.set_state(CharacterState::Attacking);
            let bubble = Projectile::bubble(c.body.position, c.facing, combat);
            return c.arsenal.fire(bubble);
        }
        false
    }

    pub fn update(
        &mut self,
        map: &Map,
        dt: f32,
        movement: &MovementTuning,
        combat: &CombatTuning,
    ) -> HeroTick {
        if self.is_dead() {
            return self.update_dying(dt, combat);
        }

        let starting = self.character.is_starting();
        self.character.step_body(map, movement);
        if !starting {
            self.character.update_projectiles(map, dt, None);
        }
        self.character.integrate(dt);
        self.correct_clip();

        self.invincible = self.invincible.saturating_sub(secs(dt));
        HeroTick::Alive
    }

    fn update_dying(&mut self, dt: f32, combat: &CombatTuning) -> HeroTick {
        self.character.body.velocity = Vec2::ZERO;
        self.character.integrate(dt);
        self.character.animation.set_clip(HeroClip::Die);
        if !self.character.animation.is_finished() {
            return HeroTick::Dying;
        }

        self.lives = self.lives.saturating_sub(1);
        self.character.animation.restart(HeroClip::Die);
        if self.lives == 0 {
            return HeroTick::OutOfLives;
        }

        self.grant_invincibility(combat.invincibility);
        self.character.set_state(CharacterState::Walking);
        self.character.body.position = self.character.destination;
        self.correct_clip();
        HeroTick::Respawned { lives: self.lives }
    }

    fn correct_clip(&mut self) {
        let c = &mut self.character;
        if c.is(CharacterState::Attacking) {
            if !c.animation.is(HeroClip::Attack) {
                c.animation.restart(HeroClip::Attack);
            } else if c.animation.is_finished() {
                c.animation.set_clip(HeroClip::Idle);
                c.set_state(CharacterState::Idle);
            }
            return;
        }
        let clip = match c.state() {
            CharacterState::Starting => HeroClip::Start,
            CharacterState::Idle | CharacterState::Attacking => HeroClip::Idle,
            CharacterState::Walking => HeroClip::Walk,
            CharacterState::Jumping => HeroClip::Jump,
            CharacterState::Falling => HeroClip::Fall,
            CharacterState::Dead => HeroClip::Die,
        };
        c.animation.set_clip(clip);
        c.sync_size();
    }
}

impl Positioned for Hero {
    fn body(&self) -> &Body {
        &self.character.body
    }
}

impl Renderable for Hero {
    fn render(&self, surface: &mut dyn Surface) {
        for projectile in self.character.arsenal.iter() {
            projectile.render(surface);
        }
        let Some(draw) = SpriteDraw::from_animation(
            SheetId::Heroes,
            &self.character.animation,
            self.character.body.position,
        ) else {
            return;
        };
        surface.draw(
            draw.flipped(self.character.facing == Facing::Left)
                .translucent(self.is_invincible())
                .on_layer(2.0),
        );
    }
}
