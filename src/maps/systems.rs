//! Maps domain: sheet loading, incremental level building and backgrounds.

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::levels::Levels;
use super::map::{MAP_HEIGHT, MAP_WIDTH};
use super::sheet::{PixelSource, SheetGeometry, sample_level};
use crate::sprites::to_world;

pub const LEVEL_SHEET_PATH: &str = "images/levels.png";

/// Handle to the master image holding every level background.
#[derive(Resource, Debug, Clone)]
pub struct LevelSheet {
    pub image: Handle<Image>,
    pub failure_reported: bool,
}

/// Background sprite for the level at `index` in [`Levels`].
#[derive(Component, Debug)]
pub struct LevelBackground {
    pub index: usize,
}

impl PixelSource for Image {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.get_color_at(x, y).ok()?.to_srgba();
        Some([
            channel_to_u8(color.red),
            channel_to_u8(color.green),
            channel_to_u8(color.blue),
            channel_to_u8(color.alpha),
        ])
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn load_level_sheet(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(LevelSheet {
        image: asset_server.load(LEVEL_SHEET_PATH),
        failure_reported: false,
    });
}

/// Sample one level per frame until the sheet is exhausted.
pub(crate) fn build_next_level(
    mut sheet: ResMut<LevelSheet>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    mut levels: ResMut<Levels>,
) {
    let Some(index) = levels.next_to_build() else {
        return;
    };

    let Some(image) = images.get(&sheet.image) else {
        if matches!(asset_server.load_state(&sheet.image), LoadState::Failed(_))
            && !sheet.failure_reported
        {
            warn!("Level sheet '{}' failed to load", LEVEL_SHEET_PATH);
            sheet.failure_reported = true;
        }
        return;
    };

    let geometry = levels.geometry;
    if let Err(e) = levels.record_build(sample_level(image, &geometry, index)) {
        warn!("Skipping level {}: {}", index + 1, e);
    }

    if index % 20 == 0 {
        debug!(
            "Building levels: {:.0}% ({} accepted)",
            levels.progress() * 100.0,
            levels.len()
        );
    }
    if levels.is_built() {
        info!(
            "Built {} of {} levels from {}",
            levels.len(),
            geometry.map_count,
            LEVEL_SHEET_PATH
        );
    }
}

pub(crate) fn spawn_level_backgrounds(
    mut commands: Commands,
    sheet: Res<LevelSheet>,
    levels: Res<Levels>,
) {
    for (index, entry) in levels.entries().iter().enumerate() {
        let (x, y) = levels.geometry.origin(entry.sheet_index);
        let rect = Rect::new(
            x as f32,
            y as f32,
            (x + SheetGeometry::MAP_PIXEL_WIDTH) as f32,
            (y + SheetGeometry::MAP_PIXEL_HEIGHT) as f32,
        );
        commands.spawn((
            LevelBackground { index },
            Sprite {
                image: sheet.image.clone(),
                rect: Some(rect),
                ..default()
            },
            Transform::from_translation(background_translation(index, levels.view_offset())),
        ));
    }
}

pub(crate) fn scroll_level_backgrounds(
    levels: Res<Levels>,
    mut backgrounds: Query<(&LevelBackground, &mut Transform)>,
) {
    let offset = levels.view_offset();
    for (background, mut transform) in &mut backgrounds {
        transform.translation = background_translation(background.index, offset);
    }
}

fn background_translation(index: usize, view_offset: f32) -> Vec3 {
    let center = Vec2::new(
        MAP_WIDTH / 2.0,
        MAP_HEIGHT / 2.0 + index as f32 * MAP_HEIGHT - view_offset,
    );
    to_world(center, -10.0)
}
