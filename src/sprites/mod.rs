//! Sprites domain: animation playback and the bridge from simulation draw
//! requests to Bevy sprites.
//!
//! Domains push [`SpriteDraw`]s into the [`DrawQueue`] during
//! [`DrawSet::Queue`]; [`DrawSet::Flush`] replaces last frame's sprites
//! with the queued ones.

mod animation;
mod render;


pub use animation::{AnimationPlayer, Clip, ClipKey, Frame, secs};
pub use render::{Renderable, SheetId, SpriteDraw, Surface};

use bevy::prelude::*;

use crate::maps::{MAP_HEIGHT, MAP_WIDTH};

const HERO_SHEET_PATH: &str = "images/heroes.png";
const ENEMY_SHEET_PATH: &str = "images/enemies.png";
const BONUS_SHEET_PATH: &str = "images/bonuses.png";

/// Map pixels (origin top-left, y down) to world space (origin centre, y up).
pub fn to_world(position: Vec2, z: f32) -> Vec3 {
    Vec3::new(
        position.x - MAP_WIDTH / 2.0,
        MAP_HEIGHT / 2.0 - position.y,
        z,
    )
}

#[derive(Resource, Debug, Default)]
pub struct SpriteSheets {
    pub heroes: Handle<Image>,
    pub enemies: Handle<Image>,
    pub bonuses: Handle<Image>,
}

impl SpriteSheets {
    pub fn handle(&self, sheet: SheetId) -> Handle<Image> {
        match sheet {
            SheetId::Heroes => self.heroes.clone(),
            SheetId::Enemies => self.enemies.clone(),
            SheetId::Bonuses => self.bonuses.clone(),
        }
    }
}

/// Draw requests gathered this frame.
#[derive(Resource, Debug, Default)]
pub struct DrawQueue(pub Vec<SpriteDraw>);

impl Surface for DrawQueue {
    fn draw(&mut self, draw: SpriteDraw) {
        self.0.push(draw);
    }
}

/// Marker for sprites rebuilt from the queue every frame.
#[derive(Component, Debug)]
pub struct QueuedSprite;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DrawSet {
    Queue,
    Flush,
}

#[cfg(feature = "dev-tools")]
#[derive(Resource, Debug, Default)]
pub struct HitboxOverlay {
    pub enabled: bool,
}

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteSheets>()
            .init_resource::<DrawQueue>()
            .configure_sets(Update, (DrawSet::Queue, DrawSet::Flush).chain())
            .add_systems(Startup, load_sprite_sheets)
            .add_systems(Update, clear_draw_queue.before(DrawSet::Queue))
            .add_systems(Update, flush_draw_queue.in_set(DrawSet::Flush));

        #[cfg(feature = "dev-tools")]
        app.init_resource::<HitboxOverlay>().add_systems(
            Update,
            (toggle_hitbox_overlay, draw_hitboxes.in_set(DrawSet::Flush)),
        );
    }
}

fn load_sprite_sheets(mut sheets: ResMut<SpriteSheets>, asset_server: Res<AssetServer>) {
    sheets.heroes = asset_server.load(HERO_SHEET_PATH);
    sheets.enemies = asset_server.load(ENEMY_SHEET_PATH);
    sheets.bonuses = asset_server.load(BONUS_SHEET_PATH);
}

fn clear_draw_queue(mut queue: ResMut<DrawQueue>) {
    queue.0.clear();
}

fn flush_draw_queue(
    mut commands: Commands,
    queue: Res<DrawQueue>,
    sheets: Res<SpriteSheets>,
    stale: Query<Entity, With<QueuedSprite>>,
) {
    for entity in &stale {
        commands.entity(entity).despawn();
    }

    for draw in &queue.0 {
        let alpha = if draw.translucent { 0.5 } else { 1.0 };
        commands.spawn((
            QueuedSprite,
            Sprite {
                image: sheets.handle(draw.sheet),
                rect: Some(draw.source),
                flip_x: draw.flip_x,
                color: Color::srgba(1.0, 1.0, 1.0, alpha),
                ..default()
            },
            Transform::from_translation(to_world(draw.center, draw.layer)),
        ));
    }
}

#[cfg(feature = "dev-tools")]
fn toggle_hitbox_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<HitboxOverlay>) {
    if keyboard.just_pressed(KeyCode::F3) {
        overlay.enabled = !overlay.enabled;
        info!("Hitbox overlay: {}", if overlay.enabled { "on" } else { "off" });
    }
}

#[cfg(feature = "dev-tools")]
fn draw_hitboxes(overlay: Res<HitboxOverlay>, queue: Res<DrawQueue>, mut gizmos: Gizmos) {
    if !overlay.enabled {
        return;
    }
    for draw in &queue.0 {
        let center = to_world(draw.center, 0.0).truncate();
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            draw.source.size(),
            Color::srgb(0.2, 1.0, 0.3),
        );
    }
}
