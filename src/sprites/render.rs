//! Draw requests emitted by simulation objects.
//!
//! Simulation types never touch Bevy sprites directly. They describe what
//! they look like through [`Renderable`] and the sync system turns the
//! collected [`SpriteDraw`]s into sprite entities each frame.

use bevy::prelude::*;

use super::animation::{AnimationPlayer, ClipKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    Heroes,
    Enemies,
    Bonuses,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sheet: SheetId,
    pub source: Rect,
    /// Centre in map pixels, y down.
    pub center: Vec2,
    pub flip_x: bool,
    pub translucent: bool,
    /// Higher layers draw on top.
    pub layer: f32,
}

impl SpriteDraw {
    /// Draw the current frame of `animation` centred at `center`.
    pub fn from_animation<K: ClipKey>(
        sheet: SheetId,
        animation: &AnimationPlayer<K>,
        center: Vec2,
    ) -> Option<Self> {
        animation.current_frame().map(|frame| Self {
            sheet,
            source: frame.source,
            center,
            flip_x: false,
            translucent: false,
            layer: 0.0,
        })
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub fn translucent(mut self, translucent: bool) -> Self {
        self.translucent = translucent;
        self
    }

    pub fn on_layer(mut self, layer: f32) -> Self {
        self.layer = layer;
        self
    }
}

pub trait Surface {
    fn draw(&mut self, draw: SpriteDraw);
}

impl Surface for Vec<SpriteDraw> {
    fn draw(&mut self, draw: SpriteDraw) {
        self.push(draw);
    }
}

/// Read-only description of how an object appears this frame.
pub trait Renderable {
    fn render(&self, surface: &mut dyn Surface);
}
