//! Enemies domain: enemy kinds and the enemy component.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{Arsenal, CombatTuning, Projectile, ProjectileKind};
use crate::maps::block_coord;
use crate::movement::{Character, CharacterState, Facing, MovementTuning, Positioned};
use crate::sprites::{AnimationPlayer, Clip, Renderable, SheetId, SpriteDraw, Surface};

pub const ENEMY_SIZE: f32 = 18.0;
const FRAME_DELAY: f32 = 0.25;
const CAPTURE_DELAY: f32 = 3.25;
const INCENDO_WALK_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum EnemyKind {
    BubbleBuster,
    Incendo,
    Beluga,
    Stoner,
    Coiley,
    Hullaballoon,
    SuperSocket,
    WillyWhistle,
}

/// How an enemy picks its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Walk toward the hero, jumping when the hero is right above.
    Chase,
    /// Walk toward the hero with constant short hops.
    Hop,
    /// Random direction whenever stopped on the ground.
    Wander,
    /// Diagonal flight bouncing off floors and ceilings, no gravity.
    Fly,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::BubbleBuster,
        EnemyKind::Incendo,
        EnemyKind::Beluga,
        EnemyKind::Stoner,
        EnemyKind::Coiley,
        EnemyKind::Hullaballoon,
        EnemyKind::SuperSocket,
        EnemyKind::WillyWhistle,
    ];

    /// Parse a roster id such as `"bubble_buster"`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "bubble_buster" => Some(EnemyKind::BubbleBuster),
            "incendo" => Some(EnemyKind::Incendo),
            "beluga" => Some(EnemyKind::Beluga),
            "stoner" => Some(EnemyKind::Stoner),
            "coiley" => Some(EnemyKind::Coiley),
            "hullaballoon" => Some(EnemyKind::Hullaballoon),
            "super_socket" => Some(EnemyKind::SuperSocket),
            "willy_whistle" => Some(EnemyKind::WillyWhistle),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|kind| *kind == self).unwrap_or(0)
    }

    /// Top of this kind's row in the enemy sheet.
    pub fn sheet_row(self) -> f32 {
        self.index() as f32 * ENEMY_SIZE
    }

    pub fn pattern(self) -> Pattern {
        match self {
            EnemyKind::BubbleBuster => Pattern::Chase,
            EnemyKind::Coiley => Pattern::Hop,
            EnemyKind::Beluga => Pattern::Fly,
            _ => Pattern::Wander,
        }
    }

    pub fn weapon(self) -> Option<ProjectileKind> {
        match self {
            EnemyKind::Incendo => Some(ProjectileKind::SpikeBall),
            EnemyKind::Stoner => Some(ProjectileKind::Fire),
            EnemyKind::SuperSocket => Some(ProjectileKind::Laser),
            _ => None,
        }
    }

    /// Kinds that stop walking when they fire.
    pub fn halts_to_fire(self) -> bool {
        matches!(self, EnemyKind::Stoner | EnemyKind::SuperSocket)
    }

    /// (walk, run) speeds.
    pub fn speeds(self, tuning: &MovementTuning) -> (f32, f32) {
        match self {
            EnemyKind::Incendo => (
                tuning.enemy_run_speed * INCENDO_WALK_FACTOR,
                tuning.enemy_run_speed,
            ),
            _ => (tuning.enemy_walk_speed, tuning.enemy_run_speed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyClip {
    Idle,
    Moving,
    MovingAngry,
    Destroyed,
    Captured,
    CapturedAngry,
}

fn enemy_clips(kind: EnemyKind) -> AnimationPlayer<EnemyClip> {
    let y = kind.sheet_row();
    let strip = |count, x, delay, looping| {
        Clip::strip(count, x, y, ENEMY_SIZE, ENEMY_SIZE, delay, looping)
    };
    AnimationPlayer::new(EnemyClip::Idle)
        .with_clip(EnemyClip::Idle, strip(1, 0.0, FRAME_DELAY, false))
        .with_clip(EnemyClip::Moving, strip(2, 18.0, FRAME_DELAY, true))
        .with_clip(EnemyClip::MovingAngry, strip(2, 54.0, FRAME_DELAY, true))
        .with_clip(EnemyClip::Destroyed, strip(4, 90.0, FRAME_DELAY, true))
        .with_clip(EnemyClip::Captured, strip(1, 162.0, CAPTURE_DELAY, false))
        .with_clip(EnemyClip::CapturedAngry, strip(1, 180.0, CAPTURE_DELAY, false))
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub character: Character<EnemyClip>,
    angry: bool,
    captured: bool,
    /// Time spent with a line of fire since the last shot.
    pub(super) fire_timer: Duration,
    pub(super) bounced: bool,
}

impl Enemy {
    /// A new enemy entering from above the map toward `destination`.
    pub fn new(kind: EnemyKind, destination: Vec2, tuning: &MovementTuning) -> Self {
        let (walk, run) = kind.speeds(tuning);
        let start = Vec2::new(destination.x, block_coord(-1));
        let mut character = Character::new(start, walk, run, enemy_clips(kind), Arsenal::new(1));
        character.begin_start(destination);
        Self {
            kind,
            character,
            angry: false,
            captured: false,
            fire_timer: Duration::ZERO,
            bounced: false,
        }
    }

    pub fn is_angry(&self) -> bool {
        self.angry
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn is_dead(&self) -> bool {
        self.character.is_dead()
    }

    pub fn speed(&self) -> f32 {
        if self.angry {
            self.character.run_speed
        } else {
            self.character.walk_speed
        }
    }

    /// Trap the enemy in a bubble. Ignored when dead, starting or already
    /// captured.
    pub fn capture(&mut self) -> bool {
        if self.captured || self.character.is_dead() || self.character.is_starting() {
            return false;
        }
        self.captured = true;
        self.character.body.velocity = Vec2::ZERO;
        self.character.set_state(CharacterState::Idle);
        let clip = if self.angry {
            EnemyClip::CapturedAngry
        } else {
            EnemyClip::Captured
        };
        self.character.animation.restart(clip);
        true
    }

    /// Capture when `projectile` is a floating bubble within reach.
    pub fn try_capture(&mut self, projectile: &Projectile, tuning: &CombatTuning) -> bool {
        if !projectile.is_capturable() {
            return false;
        }
        let reach = self.character.body.size.x * tuning.collision_ratio;
        if self.character.body.distance(&projectile.body) > reach {
            return false;
        }
        self.capture()
    }

    /// Escape a capture: the enemy comes out angry for good.
    pub(super) fn release(&mut self) {
        self.captured = false;
        self.angry = true;
        self.fire_timer = Duration::ZERO;
        self.character.set_state(CharacterState::Idle);
        self.character.animation.restart(EnemyClip::MovingAngry);
    }

    /// Burst the bubble holding this enemy, launching it in the hero's
    /// direction of travel.
    pub fn pop(&mut self, hero_vx: f32, tuning: &CombatTuning) {
        let speed = self.character.run_speed * tuning.dead_multiplier;
        let vx = if hero_vx > 0.0 { speed } else { -speed };
        self.captured = false;
        self.bounced = false;
        self.character.set_state(CharacterState::Dead);
        self.character.body.velocity = Vec2::new(vx, -vx.abs());
        self.character.arsenal.clear();
        self.character.animation.restart(EnemyClip::Destroyed);
    }

    /// Dead and settled; ready to turn into a bonus.
    pub fn has_death_finished(&self) -> bool {
        self.character.is_dead() && self.character.body.velocity == Vec2::ZERO
    }

    pub(super) fn correct_clip(&mut self) {
        let clip = if self.character.is_dead() {
            EnemyClip::Destroyed
        } else if self.captured {
            if self.angry {
                EnemyClip::CapturedAngry
            } else {
                EnemyClip::Captured
            }
        } else if self.angry {
            EnemyClip::MovingAngry
        } else if self.character.is(CharacterState::Idle) && !self.character.body.is_moving() {
            EnemyClip::Idle
        } else {
            EnemyClip::Moving
        };
        self.character.animation.set_clip(clip);
    }
}

impl Positioned for Enemy {
    fn body(&self) -> &crate::movement::Body {
        &self.character.body
    }
}

impl Renderable for Enemy {
    fn render(&self, surface: &mut dyn Surface) {
        for projectile in self.character.arsenal.iter() {
            projectile.render(surface);
        }
        let Some(draw) = SpriteDraw::from_animation(
            SheetId::Enemies,
            &self.character.animation,
            self.character.body.position,
        ) else {
            return;
        };
        // Enemy art faces left.
        surface.draw(
            draw.flipped(self.character.facing == Facing::Right)
                .on_layer(1.0),
        );
    }
}
