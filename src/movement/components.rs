//! Movement domain: bodies, facing and the shared character state machine.

use bevy::prelude::*;

use crate::combat::Arsenal;
use crate::sprites::{AnimationPlayer, ClipKey};

/// Centre-based box in map pixels (y down) moving `velocity` pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn distance(&self, other: &Body) -> f32 {
        self.position.distance(other.position)
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// y of the bottom edge.
    pub fn feet(&self) -> f32 {
        self.position.y + self.size.y / 2.0
    }

    /// y of the top edge.
    pub fn head(&self) -> f32 {
        self.position.y - self.size.y / 2.0
    }

    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn toward(from: f32, to: f32) -> Self {
        if to > from { Facing::Right } else { Facing::Left }
    }
}

/// Exactly one locomotion state at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Gliding to a spawn point; no gravity or collision.
    #[default]
    Starting,
    Idle,
    Walking,
    Jumping,
    Falling,
    Attacking,
    Dead,
}

impl CharacterState {
    pub fn is_airborne(self) -> bool {
        matches!(self, CharacterState::Jumping | CharacterState::Falling)
    }
}

/// Shared locomotion data for the hero and every enemy.
#[derive(Debug, Clone)]
pub struct Character<K: ClipKey> {
    pub body: Body,
    pub facing: Facing,
    state: CharacterState,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Target while [`CharacterState::Starting`].
    pub destination: Vec2,
    pub animation: AnimationPlayer<K>,
    pub arsenal: Arsenal,
}

impl<K: ClipKey> Character<K> {
    pub fn new(
        position: Vec2,
        walk_speed: f32,
        run_speed: f32,
        animation: AnimationPlayer<K>,
        arsenal: Arsenal,
    ) -> Self {
        let size = animation.frame_size();
        Self {
            body: Body::new(position, size),
            facing: Facing::default(),
            state: CharacterState::Starting,
            walk_speed,
            run_speed,
            destination: position,
            animation,
            arsenal,
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn set_state(&mut self, state: CharacterState) {
        self.state = state;
    }

    pub fn is(&self, state: CharacterState) -> bool {
        self.state == state
    }

    pub fn is_dead(&self) -> bool {
        self.state == CharacterState::Dead
    }

    pub fn is_starting(&self) -> bool {
        self.state == CharacterState::Starting
    }

    pub fn is_airborne(&self) -> bool {
        self.state.is_airborne()
    }

    pub fn can_attack(&self) -> bool {
        !matches!(self.state, CharacterState::Attacking | CharacterState::Dead)
            && self.arsenal.has_room()
    }

    pub fn can_walk(&self) -> bool {
        matches!(
            self.state,
            CharacterState::Idle
                | CharacterState::Walking
                | CharacterState::Jumping
                | CharacterState::Falling
        )
    }

    pub fn can_jump(&self) -> bool {
        matches!(self.state, CharacterState::Idle | CharacterState::Walking)
    }

    /// Enter [`CharacterState::Starting`] toward `destination`.
    pub fn begin_start(&mut self, destination: Vec2) {
        self.destination = destination;
        self.body.velocity = Vec2::ZERO;
        self.state = CharacterState::Starting;
    }

    /// Keep the body box in sync with the active frame.
    pub fn sync_size(&mut self) {
        let size = self.animation.frame_size();
        if size != Vec2::ZERO {
            self.body.size = size;
        }
    }

    pub fn face_velocity(&mut self) {
        if let Some(facing) = Facing::from_velocity(self.body.velocity.x) {
            self.facing = facing;
        }
    }
}

/// Anything with a position in map space.
pub trait Positioned {
    fn body(&self) -> &Body;

    fn position(&self) -> Vec2 {
        self.body().position
    }

    fn distance_to(&self, other: &impl Positioned) -> f32 {
        self.body().distance(other.body())
    }
}

impl<K: ClipKey> Positioned for Character<K> {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Positioned for Body {
    fn body(&self) -> &Body {
        self
    }
}
