//! Maps domain: the stack of built levels and the scroll between them.

use bevy::prelude::*;

use super::map::{MAP_HEIGHT, Map, MapError};
use super::sheet::SheetGeometry;

/// Pixels the viewport moves per tick while changing levels.
pub const TRANSITION_SCROLL_SPEED: f32 = 1.0;

/// Built levels stacked top to bottom, one map height apart.
#[derive(Resource, Debug)]
pub struct Levels {
    pub geometry: SheetGeometry,
    maps: Vec<LevelEntry>,
    next_index: u32,
    current: usize,
    scroll: Option<f32>,
}

#[derive(Debug)]
pub struct LevelEntry {
    /// Index of the level in the sheet.
    pub sheet_index: u32,
    pub map: Map,
}

impl Default for Levels {
    fn default() -> Self {
        Self::new(SheetGeometry::default())
    }
}

impl Levels {
    pub fn new(geometry: SheetGeometry) -> Self {
        Self {
            geometry,
            maps: Vec::new(),
            next_index: 0,
            current: 0,
            scroll: None,
        }
    }

    pub fn is_built(&self) -> bool {
        self.next_index >= self.geometry.map_count
    }

    /// Sheet index of the next level to build, if any remain.
    pub fn next_to_build(&self) -> Option<u32> {
        (!self.is_built()).then_some(self.next_index)
    }

    /// Record the result of building the next level.
    ///
    /// A rejected level is skipped; the error is handed back for reporting.
    pub fn record_build(&mut self, result: Result<Map, MapError>) -> Result<(), MapError> {
        let sheet_index = self.next_index;
        self.next_index += 1;
        let map = result?;
        self.maps.push(LevelEntry { sheet_index, map });
        Ok(())
    }

    /// Fraction of the sheet processed so far.
    pub fn progress(&self) -> f32 {
        if self.geometry.map_count == 0 {
            return 1.0;
        }
        self.next_index.min(self.geometry.map_count) as f32 / self.geometry.map_count as f32
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn entries(&self) -> &[LevelEntry] {
        &self.maps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Jump to a level, clamped to the built range.
    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.maps.len().saturating_sub(1));
        self.scroll = None;
    }

    pub fn current_map(&self) -> Option<&Map> {
        self.maps.get(self.current).map(|entry| &entry.map)
    }

    pub fn current_map_mut(&mut self) -> Option<&mut Map> {
        self.maps.get_mut(self.current).map(|entry| &mut entry.map)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.maps.len()
    }

    pub fn start_transition(&mut self) {
        if !self.is_last() {
            self.scroll = Some(0.0);
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.scroll.is_some()
    }

    /// Scroll toward the next level; returns true on the tick it arrives.
    pub fn advance_transition(&mut self) -> bool {
        let Some(scroll) = self.scroll.as_mut() else {
            return false;
        };
        *scroll += TRANSITION_SCROLL_SPEED;
        if *scroll >= MAP_HEIGHT {
            self.scroll = None;
            self.current += 1;
            return true;
        }
        false
    }

    /// Vertical offset of the viewport into the level stack.
    pub fn view_offset(&self) -> f32 {
        self.current as f32 * MAP_HEIGHT + self.scroll.unwrap_or(0.0)
    }
}
