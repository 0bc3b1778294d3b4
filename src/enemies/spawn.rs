//! Enemies domain: spawn waves placed in mirrored pairs.

use bevy::prelude::*;
use rand::Rng;

use super::components::{Enemy, EnemyKind};
use crate::maps::Map;
use crate::movement::MovementTuning;

/// Enemies on screen after a wave is placed.
pub const SPAWN_LIMIT: usize = 4;

/// Where an enemy falls in the order enemies entered play. Scans where the
/// first enemy found wins visit enemies in this order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

/// Hands out increasing [`SpawnOrder`]s for the whole session.
#[derive(Resource, Debug, Default)]
pub struct SpawnSequence {
    next: u64,
}

impl SpawnSequence {
    pub fn issue(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }
}

/// Drop the spawn orders, keeping items sorted by them.
pub fn in_spawn_order<'a, T>(items: impl IntoIterator<Item = (&'a SpawnOrder, T)>) -> Vec<T> {
    let mut items: Vec<(&SpawnOrder, T)> = items.into_iter().collect();
    items.sort_by_key(|(order, _)| **order);
    items.into_iter().map(|(_, item)| item).collect()
}

/// Build enemy pairs until `existing` plus the wave reaches [`SPAWN_LIMIT`]
/// or the map runs out of spawn cells. Each pair shares a random kind from
/// `roster` and a random cell, mirrored left and right.
pub fn spawn_wave(
    map: &mut Map,
    roster: &[EnemyKind],
    existing: usize,
    rng: &mut impl Rng,
    tuning: &MovementTuning,
) -> Vec<Enemy> {
    let mut wave = Vec::new();
    if roster.is_empty() {
        return wave;
    }

    while existing + wave.len() < SPAWN_LIMIT {
        let kind = roster[rng.random_range(0..roster.len())];
        let cells = map.spawn_locations().len();
        if cells == 0 {
            break;
        }
        let Some(cell) = map.take_spawn_location(rng.random_range(0..cells)) else {
            break;
        };
        wave.push(Enemy::new(kind, cell.west(), tuning));
        wave.push(Enemy::new(kind, cell.east(), tuning));
    }
    wave
}
