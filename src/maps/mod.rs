//! Maps domain: tile grids sampled from the level sheet, collision queries
//! and the level stack.

mod levels;
mod map;
mod sheet;
mod systems;

#[cfg(test)]
pub(crate) mod fixtures;

pub use levels::{LevelEntry, Levels, TRANSITION_SCROLL_SPEED};
pub use map::{
    BLOCK_SIZE, COL_MAX, COL_MIN, COLUMNS, MAP_HEIGHT, MAP_WIDTH, MIN_SOLID_BLOCKS, Map,
    MapError, ROW_MAX, ROW_MIN, ROWS, SpawnCell, block_coord, column_of, row_of,
};
pub use sheet::{
    BACKGROUND, PixelSource, RgbaBuffer, SheetGeometry, sample_level, sample_map,
};
pub use systems::{LEVEL_SHEET_PATH, LevelBackground, LevelSheet};

use bevy::prelude::*;

use crate::core::GameState;
use crate::maps::systems::{
    build_next_level, load_level_sheet, scroll_level_backgrounds, spawn_level_backgrounds,
};

pub struct MapsPlugin;

impl Plugin for MapsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Levels>()
            .add_systems(Startup, load_level_sheet)
            .add_systems(
                Update,
                build_next_level
                    .in_set(LevelBuildSet)
                    .run_if(in_state(GameState::Loading)),
            )
            .add_systems(OnExit(GameState::Loading), spawn_level_backgrounds)
            .add_systems(Update, scroll_level_backgrounds);
    }
}

/// Level construction; session setup runs after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelBuildSet;
