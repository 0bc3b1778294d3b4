//! Maps domain: the per-level tile grid and its collision queries.
//!
//! Coordinates are screen pixels with y growing downward. A map covers
//! COLUMNS x ROWS cells of BLOCK_SIZE pixels; the playable area is bounded
//! by the COL_MIN..=COL_MAX and ROW_MIN..=ROW_MAX rectangle.

use std::ops::RangeInclusive;

use bevy::prelude::*;

pub const BLOCK_SIZE: i32 = 8;
pub const COLUMNS: i32 = 32;
pub const ROWS: i32 = 24;

pub const MAP_WIDTH: f32 = (COLUMNS * BLOCK_SIZE) as f32;
pub const MAP_HEIGHT: f32 = (ROWS * BLOCK_SIZE) as f32;

pub const COL_MIN: i32 = 2;
pub const COL_MAX: i32 = COLUMNS - 3;
pub const ROW_MIN: i32 = 1;
pub const ROW_MAX: i32 = ROWS - 2;

/// Walls on both sides plus a ceiling and floor band must be present.
pub const MIN_SOLID_BLOCKS: usize = (ROWS * 4 + (COLUMNS - 12) * 2) as usize;

/// Columns where the floor below ROW_MAX is open.
const FLOOR_GAPS: [RangeInclusive<i32>; 2] = [9..=12, 19..=22];

const HERO_POCKET_RANGE: i32 = 1;
const ENEMY_POCKET_RANGE: i32 = 2;

/// Column containing pixel x (truncating division).
pub fn column_of(x: f32) -> i32 {
    (x / BLOCK_SIZE as f32) as i32
}

/// Row containing pixel y (truncating division).
pub fn row_of(y: f32) -> i32 {
    (y / BLOCK_SIZE as f32) as i32
}

/// Pixel coordinate of a cell edge.
pub fn block_coord(cell: i32) -> f32 {
    (cell * BLOCK_SIZE) as f32
}

fn in_floor_gap(col: i32) -> bool {
    FLOOR_GAPS.iter().any(|gap| gap.contains(&col))
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Fewer solid cells than MIN_SOLID_BLOCKS.
    InsufficientSolidBlocks {
        origin: (u32, u32),
        found: usize,
    },
    /// A sample point fell outside the pixel source.
    SampleOutOfBounds { x: u32, y: u32 },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::InsufficientSolidBlocks { origin, found } => write!(
                f,
                "map at ({}, {}) has {} solid blocks, {} required",
                origin.0, origin.1, found, MIN_SOLID_BLOCKS
            ),
            MapError::SampleOutOfBounds { x, y } => {
                write!(f, "sample point ({}, {}) is outside the image", x, y)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// A grid cell an enemy pair can spawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCell {
    pub col: i32,
    pub row: i32,
}

impl SpawnCell {
    /// Destination of the west enemy of the pair.
    pub fn west(&self) -> Vec2 {
        Vec2::new(block_coord(self.col), block_coord(self.row))
    }

    /// Destination of the east enemy, mirrored across the map.
    pub fn east(&self) -> Vec2 {
        Vec2::new(block_coord(COLUMNS - self.col), block_coord(self.row))
    }
}

/// Immutable solidity grid with the spawn anchors found at build time.
#[derive(Debug, Clone)]
pub struct Map {
    solid: Vec<bool>,
    solid_count: usize,
    start_west: Vec2,
    start_east: Vec2,
    spawn_cells: Vec<SpawnCell>,
}

impl Map {
    /// Build a map from a solidity predicate over (col, row).
    ///
    /// `origin` identifies the map in error reports (its pixel offset in the
    /// level sheet).
    pub fn from_fn(
        origin: (u32, u32),
        mut is_solid: impl FnMut(i32, i32) -> bool,
    ) -> Result<Self, MapError> {
        let mut solid = Vec::with_capacity((COLUMNS * ROWS) as usize);
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                solid.push(is_solid(col, row));
            }
        }
        Self::from_cells(origin, solid)
    }

    /// Build a map from a row-major solidity grid.
    pub fn from_cells(origin: (u32, u32), solid: Vec<bool>) -> Result<Self, MapError> {
        let solid_count = solid.iter().filter(|cell| **cell).count();
        if solid_count < MIN_SOLID_BLOCKS {
            return Err(MapError::InsufficientSolidBlocks {
                origin,
                found: solid_count,
            });
        }

        let mut map = Self {
            solid,
            solid_count,
            start_west: fallback_start(COL_MIN),
            start_east: fallback_start(COL_MAX - 1),
            spawn_cells: Vec::new(),
        };
        map.locate_anchors();
        Ok(map)
    }

    fn locate_anchors(&mut self) {
        let mut west = None;
        let mut east = None;

        for row in (ROW_MIN..ROW_MAX).rev() {
            if west.is_none() {
                west = (COL_MIN..=COLUMNS / 2)
                    .find(|col| self.has_free_space(*col, row, HERO_POCKET_RANGE))
                    .map(|col| anchor_point(col, row));
            }
            if east.is_none() {
                east = (COLUMNS / 2..COL_MAX)
                    .rev()
                    .find(|col| self.has_free_space(*col, row, HERO_POCKET_RANGE))
                    .map(|col| anchor_point(col, row));
            }
            if west.is_some() && east.is_some() {
                break;
            }
        }

        if let Some(point) = west {
            self.start_west = point;
        }
        if let Some(point) = east {
            self.start_east = point;
        }

        for row in ROW_MIN..ROW_MAX - 2 {
            for col in COL_MIN + 2..COLUMNS / 2 - 1 {
                if self.has_free_space(col, row, ENEMY_POCKET_RANGE)
                    && self.has_free_space(COLUMNS - col, row, ENEMY_POCKET_RANGE)
                {
                    self.spawn_cells.push(SpawnCell {
                        col: col + 1,
                        row: row + 1,
                    });
                }
            }
        }
    }

    /// True when the (2*range+1) x 2 pocket anchored at (col, row) is open.
    pub fn has_free_space(&self, col: i32, row: i32, range: i32) -> bool {
        (-range..=range).all(|dx| (0..=1).all(|dy| !self.is_solid(col + dx, row + dy)))
    }

    /// Out-of-grid cells are never solid.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if !(0..COLUMNS).contains(&col) || !(0..ROWS).contains(&row) {
            return false;
        }
        self.solid[(row * COLUMNS + col) as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    pub fn has_north_collision(&self, x: f32, y: f32) -> bool {
        self.is_above_ceiling(y) || self.is_solid(column_of(x), row_of(y))
    }

    pub fn has_south_collision(&self, x: f32, y: f32) -> bool {
        let col = column_of(x);
        let row = row_of(y);
        if row > ROW_MAX && !in_floor_gap(col) {
            return true;
        }
        self.is_solid(col, row)
    }

    pub fn has_horizontal_collision(&self, x: f32, y: f32) -> bool {
        if self.has_west_collision(x) || self.has_east_collision(x) {
            return true;
        }
        if self.is_above_ceiling(y) {
            return false;
        }
        self.is_solid(column_of(x), row_of(y))
    }

    pub fn has_west_collision(&self, x: f32) -> bool {
        column_of(x) < COL_MIN
    }

    pub fn has_east_collision(&self, x: f32) -> bool {
        column_of(x) > COL_MAX
    }

    fn is_above_ceiling(&self, y: f32) -> bool {
        row_of(y) < ROW_MIN
    }

    /// Inside the playable columns and not below the last playable row.
    pub fn has_bounds(&self, x: f32, y: f32) -> bool {
        let col = column_of(x);
        (COL_MIN..=COL_MAX).contains(&col) && row_of(y) <= ROW_MAX
    }

    pub fn start_west(&self) -> Vec2 {
        self.start_west
    }

    pub fn start_east(&self) -> Vec2 {
        self.start_east
    }

    pub fn spawn_locations(&self) -> &[SpawnCell] {
        &self.spawn_cells
    }

    /// Remove and return a spawn cell; `None` when the index is out of range.
    pub fn take_spawn_location(&mut self, index: usize) -> Option<SpawnCell> {
        (index < self.spawn_cells.len()).then(|| self.spawn_cells.remove(index))
    }
}

fn anchor_point(col: i32, row: i32) -> Vec2 {
    Vec2::new(block_coord(col + 1), block_coord(row + 1))
}

fn fallback_start(col: i32) -> Vec2 {
    Vec2::new(block_coord(col + 1), block_coord(ROW_MAX))
}
