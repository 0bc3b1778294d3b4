//! Maps domain: sampling level grids out of the master level sheet.
//!
//! The sheet packs every level background on one image. Sampling is a pure
//! function of a [`PixelSource`] and the sheet geometry, so it runs against
//! a Bevy `Image` in the game and a plain byte buffer in tests.

use super::map::{BLOCK_SIZE, COLUMNS, Map, MapError, ROWS};

/// Opaque black marks an empty cell.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Read access to RGBA pixels.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// RGBA at (x, y), `None` when outside the source.
    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]>;
}

/// Tightly packed RGBA8 buffer.
#[derive(Debug, Clone)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl RgbaBuffer {
    /// `None` when the byte count does not match the dimensions.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Option<Self> {
        (bytes.len() == (width as usize) * (height as usize) * 4).then_some(Self {
            width,
            height,
            bytes,
        })
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let bytes = rgba
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 4)
            .collect();
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let offset = ((y * self.width + x) * 4) as usize;
            self.bytes[offset..offset + 4].copy_from_slice(&rgba);
        }
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        for py in y..y + height {
            for px in x..x + width {
                self.set(px, py, rgba);
            }
        }
    }
}

impl PixelSource for RgbaBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.bytes[offset..offset + 4]);
        Some(rgba)
    }
}

/// Layout of the level sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    pub start_x: u32,
    pub start_y: u32,
    pub spacing: u32,
    pub maps_per_row: u32,
    pub map_count: u32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self {
            start_x: 3,
            start_y: 3,
            spacing: 3,
            maps_per_row: 10,
            map_count: 200,
        }
    }
}

impl SheetGeometry {
    pub const MAP_PIXEL_WIDTH: u32 = (COLUMNS * BLOCK_SIZE) as u32;
    pub const MAP_PIXEL_HEIGHT: u32 = (ROWS * BLOCK_SIZE) as u32;

    /// Top-left pixel of the map at `index`.
    pub fn origin(&self, index: u32) -> (u32, u32) {
        let column = index % self.maps_per_row;
        let row = index / self.maps_per_row;
        (
            self.start_x + column * (Self::MAP_PIXEL_WIDTH + self.spacing),
            self.start_y + row * (Self::MAP_PIXEL_HEIGHT + self.spacing),
        )
    }
}

/// Sample one map from `source` with its top-left corner at `origin`.
///
/// A cell is solid when its north-west corner, south-east corner or centre
/// pixel differs from [`BACKGROUND`].
pub fn sample_map(source: &impl PixelSource, origin: (u32, u32)) -> Result<Map, MapError> {
    let block = BLOCK_SIZE as u32;
    let samples = [(0, 0), (block - 1, block - 1), (block / 2, block / 2)];

    let mut solid = Vec::with_capacity((COLUMNS * ROWS) as usize);
    for row in 0..ROWS as u32 {
        for col in 0..COLUMNS as u32 {
            let x = origin.0 + col * block;
            let y = origin.1 + row * block;
            let mut cell_solid = false;
            for (dx, dy) in samples {
                let rgba = source
                    .rgba_at(x + dx, y + dy)
                    .ok_or(MapError::SampleOutOfBounds {
                        x: x + dx,
                        y: y + dy,
                    })?;
                if rgba != BACKGROUND {
                    cell_solid = true;
                    break;
                }
            }
            solid.push(cell_solid);
        }
    }

    Map::from_cells(origin, solid)
}

/// Sample the map at `index` of the sheet.
pub fn sample_level(
    source: &impl PixelSource,
    geometry: &SheetGeometry,
    index: u32,
) -> Result<Map, MapError> {
    sample_map(source, geometry.origin(index))
}
