//! Combat domain: projectiles and the arsenal each character carries.
//!
//! Bubbles are the hero's weapon and walk through Begin, Middle and End
//! phases. Enemy shots fly straight for a fixed lifetime. Once a projectile
//! is discarded it stays discarded.

use bevy::prelude::*;

use super::resources::CombatTuning;
use crate::maps::Map;
use crate::movement::{Body, Character, CharacterState, Facing};
use crate::sprites::{AnimationPlayer, ClipKey, Clip, Renderable, SheetId, SpriteDraw, Surface};

const BUBBLE_SIZE: f32 = 16.0;
const BUBBLE_SHEET_Y: f32 = 64.0;
const BUBBLE_BEGIN_DELAY: f32 = 0.2;
const BUBBLE_MIDDLE_DELAY: f32 = 3.25;
const BUBBLE_END_DELAY: f32 = 0.175;

const SHOT_SIZE: f32 = 18.0;
const SHOT_LIFETIME: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    Bubble,
    Fire,
    SpikeBall,
    Laser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubblePhase {
    Begin,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileClip {
    Bubble(BubblePhase),
    Flight,
}

/// What an enemy shot can hit this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroTarget {
    pub body: Body,
    /// Cleared after the first hit so one tick kills at most once.
    pub vulnerable: bool,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    kind: ProjectileKind,
    pub body: Body,
    animation: AnimationPlayer<ProjectileClip>,
    rise_speed: f32,
    discarded: bool,
}

impl Projectile {
    pub fn bubble(position: Vec2, facing: Facing, tuning: &CombatTuning) -> Self {
        let animation = AnimationPlayer::new(ProjectileClip::Bubble(BubblePhase::Begin))
            .with_clip(
                ProjectileClip::Bubble(BubblePhase::Begin),
                Clip::strip(4, 0.0, BUBBLE_SHEET_Y, BUBBLE_SIZE, BUBBLE_SIZE, BUBBLE_BEGIN_DELAY, false),
            )
            .with_clip(
                ProjectileClip::Bubble(BubblePhase::Middle),
                Clip::strip(1, 48.0, BUBBLE_SHEET_Y, BUBBLE_SIZE, BUBBLE_SIZE, BUBBLE_MIDDLE_DELAY, false),
            )
            .with_clip(
                ProjectileClip::Bubble(BubblePhase::End),
                Clip::strip(2, 64.0, BUBBLE_SHEET_Y, BUBBLE_SIZE, BUBBLE_SIZE, BUBBLE_END_DELAY, false),
            );

        let mut body = Body::new(position, Vec2::splat(BUBBLE_SIZE));
        body.velocity.x = facing.sign() * tuning.bubble_speed;
        Self {
            kind: ProjectileKind::Bubble,
            body,
            animation,
            rise_speed: tuning.bubble_rise_speed,
            discarded: false,
        }
    }

    /// An enemy shot. Lasers drop straight down; the rest fly along `facing`.
    pub fn shot(kind: ProjectileKind, position: Vec2, facing: Facing, angry: bool, speed: f32) -> Self {
        let (x, y) = match (kind, angry) {
            (ProjectileKind::Laser, false) => (216.0, 18.0),
            (ProjectileKind::Laser, true) => (198.0, 18.0),
            (ProjectileKind::SpikeBall, false) => (216.0, 36.0),
            (ProjectileKind::SpikeBall, true) => (198.0, 36.0),
            _ => (198.0, 0.0),
        };
        let animation = AnimationPlayer::new(ProjectileClip::Flight).with_clip(
            ProjectileClip::Flight,
            Clip::strip(1, x, y, SHOT_SIZE, SHOT_SIZE, SHOT_LIFETIME, false),
        );

        let mut body = Body::new(position, Vec2::splat(SHOT_SIZE));
        if kind == ProjectileKind::Laser {
            body.velocity.y = speed;
        } else {
            body.velocity.x = facing.sign() * speed;
        }
        Self {
            kind,
            body,
            animation,
            rise_speed: 0.0,
            discarded: false,
        }
    }

    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Bubble phase; `None` for enemy shots.
    pub fn phase(&self) -> Option<BubblePhase> {
        match self.animation.current() {
            ProjectileClip::Bubble(phase) => Some(phase),
            ProjectileClip::Flight => None,
        }
    }

    pub fn is_capturable(&self) -> bool {
        !self.discarded && self.phase() == Some(BubblePhase::Middle)
    }

    pub fn can_stand(&self) -> bool {
        self.is_capturable()
    }

    pub fn mark_discard(&mut self) {
        self.discarded = true;
        self.animation.force_finish();
    }

    pub fn can_discard(&self) -> bool {
        self.discarded
    }

    /// Height the firing character should snap to when landing on this
    /// projectile, if it is standing room and the character is dropping in.
    pub fn landing_for(&self, parent: &Body, state: CharacterState) -> Option<f32> {
        if !self.can_stand() {
            return None;
        }
        if !matches!(state, CharacterState::Falling | CharacterState::Attacking) {
            return None;
        }
        let half_width = self.body.size.x / 2.0;
        let x = parent.position.x;
        let y = parent.position.y;
        let within_x = x >= self.body.position.x - half_width && x <= self.body.position.x + half_width;
        let within_y = y < self.body.position.y && y > self.body.position.y - self.body.size.y;
        (within_x && within_y).then(|| self.body.position.y - parent.size.y)
    }

    /// Advance one tick; returns true when an enemy shot hit `target`.
    pub fn update(&mut self, map: &Map, dt: f32, target: Option<&mut HeroTarget>) -> bool {
        if self.discarded {
            return false;
        }
        self.body.integrate();
        self.animation.advance(dt);

        match self.kind {
            ProjectileKind::Bubble => {
                self.check_bubble_map_collision(map);
                self.advance_bubble_phase();
                false
            }
            _ => self.update_shot(map, target),
        }
    }

    fn check_bubble_map_collision(&mut self, map: &Map) {
        let body = self.body;
        if body.velocity.x != 0.0 {
            let edge = body.position.x + body.velocity.x.signum() * body.size.x / 2.0;
            if map.has_horizontal_collision(edge, body.position.y)
                || map.has_horizontal_collision(edge, body.head())
            {
                self.enter_middle();
            }
        }
        if self.body.velocity.y != 0.0 && map.has_north_collision(body.position.x, body.head()) {
            self.body.velocity.y = 0.0;
        }
    }

    fn advance_bubble_phase(&mut self) {
        if !self.animation.is_finished() {
            return;
        }
        match self.phase() {
            Some(BubblePhase::Begin) => self.enter_middle(),
            Some(BubblePhase::Middle) => {
                self.animation.restart(ProjectileClip::Bubble(BubblePhase::End));
                self.body.velocity = Vec2::ZERO;
            }
            _ => self.discarded = true,
        }
    }

    fn enter_middle(&mut self) {
        self.animation.restart(ProjectileClip::Bubble(BubblePhase::Middle));
        self.body.velocity = Vec2::new(0.0, -self.rise_speed);
    }

    fn update_shot(&mut self, map: &Map, target: Option<&mut HeroTarget>) -> bool {
        if !map.has_bounds(self.body.position.x, self.body.position.y) {
            self.mark_discard();
            return false;
        }
        if self.animation.is_finished() {
            self.discarded = true;
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        if target.vulnerable && self.body.distance(&target.body) <= self.body.size.x / 2.0 {
            target.vulnerable = false;
            self.mark_discard();
            return true;
        }
        false
    }
}

impl Renderable for Projectile {
    fn render(&self, surface: &mut dyn Surface) {
        if self.discarded {
            return;
        }
        let sheet = match self.kind {
            ProjectileKind::Bubble => SheetId::Heroes,
            _ => SheetId::Enemies,
        };
        if let Some(draw) = SpriteDraw::from_animation(sheet, &self.animation, self.body.position) {
            surface.draw(draw.flipped(self.body.velocity.x < 0.0).on_layer(3.0));
        }
    }
}

/// Projectiles owned by one character, capped at `limit` live at once.
#[derive(Debug, Clone)]
pub struct Arsenal {
    projectiles: Vec<Projectile>,
    limit: usize,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Arsenal {
    pub fn new(limit: usize) -> Self {
        Self {
            projectiles: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn has_room(&self) -> bool {
        self.projectiles.len() < self.limit
    }

    /// Add a projectile; ignored when the arsenal is full.
    pub fn fire(&mut self, projectile: Projectile) -> bool {
        if !self.has_room() {
            return false;
        }
        self.projectiles.push(projectile);
        true
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    pub fn purge_discarded(&mut self) {
        self.projectiles.retain(|projectile| !projectile.can_discard());
    }
}

impl<K: ClipKey> Character<K> {
    /// Parent collision then movement for every owned projectile.
    ///
    /// Returns true when one of them hit `target`.
    pub fn update_projectiles(&mut self, map: &Map, dt: f32, mut target: Option<&mut HeroTarget>) -> bool {
        let state = self.state();
        let landing = self
            .arsenal
            .iter()
            .filter_map(|projectile| projectile.landing_for(&self.body, state))
            .last();
        if let Some(y) = landing {
            self.body.position.y = y;
            if state != CharacterState::Attacking {
                self.set_state(CharacterState::Idle);
            }
        }

        let mut hit = false;
        for projectile in self.arsenal.iter_mut() {
            hit |= projectile.update(map, dt, target.as_deref_mut());
        }
        self.arsenal.purge_discarded();
        hit
    }
}
