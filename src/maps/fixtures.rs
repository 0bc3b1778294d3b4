//! Maps shared by tests across domains.

use super::map::{COL_MAX, COL_MIN, Map, ROWS};

/// Side walls, a ceiling row and a floor row; everything else open.
pub(crate) fn arena() -> Map {
    Map::from_fn((0, 0), |col, row| {
        col < COL_MIN || col > COL_MAX || row == 0 || row == ROWS - 1
    })
    .unwrap()
}

/// The arena plus a ledge on row `row` spanning `cols`.
pub(crate) fn arena_with_ledge(row: i32, cols: std::ops::RangeInclusive<i32>) -> Map {
    Map::from_fn((0, 0), |col, r| {
        col < COL_MIN || col > COL_MAX || r == 0 || r == ROWS - 1 || (r == row && cols.contains(&col))
    })
    .unwrap()
}

/// The arena with the floor row open over the floor-gap columns.
pub(crate) fn arena_with_floor_gaps() -> Map {
    Map::from_fn((0, 0), |col, row| {
        let gap = (9..=12).contains(&col) || (19..=22).contains(&col);
        col < COL_MIN || col > COL_MAX || row == 0 || (row == ROWS - 1 && !gap)
    })
    .unwrap()
}
