//! Bonus domain: pickups left behind by defeated enemies.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::movement::{Body, Positioned};
use crate::sprites::{AnimationPlayer, Clip, Renderable, SheetId, SpriteDraw, Surface, secs};

const BONUS_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    Vegetable1,
    Vegetable2,
    Vegetable3,
    Vegetable4,
    Vegetable5,
}

impl BonusKind {
    pub const ALL: [BonusKind; 5] = [
        BonusKind::Vegetable1,
        BonusKind::Vegetable2,
        BonusKind::Vegetable3,
        BonusKind::Vegetable4,
        BonusKind::Vegetable5,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    fn sheet_x(self) -> f32 {
        let index = Self::ALL.iter().position(|kind| *kind == self).unwrap_or(0);
        index as f32 * BONUS_SIZE
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bonus {
    pub kind: BonusKind,
    pub body: Body,
    animation: AnimationPlayer<BonusKind>,
    /// Time before the bonus disappears.
    ttl: Duration,
}

impl Bonus {
    /// Place a bonus where a defeated enemy settled, raised by half the
    /// enemy's height.
    pub fn drop_from(kind: BonusKind, source: &Body, lifetime: f32) -> Self {
        let position = Vec2::new(source.position.x, source.position.y - source.size.y / 2.0);
        let animation = AnimationPlayer::new(kind).with_clip(
            kind,
            Clip::strip(1, kind.sheet_x(), 0.0, BONUS_SIZE, BONUS_SIZE, 0.0, false),
        );
        Self {
            kind,
            body: Body::new(position, Vec2::splat(BONUS_SIZE)),
            animation,
            ttl: secs(lifetime),
        }
    }

    /// Seconds left before the bonus disappears.
    pub fn ttl(&self) -> f32 {
        self.ttl.as_secs_f32()
    }

    /// Count down; true once the lifetime is spent.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.ttl = self.ttl.saturating_sub(secs(dt));
        self.ttl.is_zero()
    }

    /// A moving hero within reach picks the bonus up.
    pub fn can_collect(&self, hero: &Body, collision_ratio: f32) -> bool {
        hero.is_moving() && hero.distance(&self.body) <= self.body.size.x * collision_ratio
    }
}

impl Positioned for Bonus {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Renderable for Bonus {
    fn render(&self, surface: &mut dyn Surface) {
        if let Some(draw) = SpriteDraw::from_animation(SheetId::Bonuses, &self.animation, self.body.position) {
            surface.draw(draw);
        }
    }
}

/// Running count of collected bonuses.
#[derive(Resource, Debug, Default)]
pub struct BonusTally {
    pub collected: u32,
}

impl BonusTally {
    /// Count one pickup; true when it earns an extra life.
    pub fn record(&mut self, per_life: u32) -> bool {
        self.collected += 1;
        per_life > 0 && self.collected % per_life == 0
    }
}
