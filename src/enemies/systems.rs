//! Enemies domain: per-tick update, wave placement and retirement into bonuses.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use super::behavior::EnemyContext;
use super::components::{Enemy, EnemyKind};
use super::spawn::{SpawnOrder, SpawnSequence, in_spawn_order, spawn_wave};
use crate::bonus::{Bonus, BonusKind};
use crate::combat::CombatTuning;
use crate::core::{AudioCue, AudioCueEvent, GameRng};
use crate::hero::Hero;
use crate::maps::{Levels, Map};
use crate::movement::MovementTuning;
use crate::sprites::{DrawQueue, Renderable};

/// Enemy kinds allowed to appear in waves.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnemyRoster {
    pub kinds: Vec<EnemyKind>,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            kinds: EnemyKind::ALL.to_vec(),
        }
    }
}

/// Place a wave on `map` and spawn it, each enemy stamped with its
/// [`SpawnOrder`]. Returns how many enemies entered.
pub fn populate_level(
    commands: &mut Commands,
    map: &mut Map,
    roster: &EnemyRoster,
    sequence: &mut SpawnSequence,
    existing: usize,
    rng: &mut impl Rng,
    tuning: &MovementTuning,
) -> usize {
    let wave = spawn_wave(map, &roster.kinds, existing, rng, tuning);
    let count = wave.len();
    for enemy in wave {
        debug!("{:?} entering toward {}", enemy.kind, enemy.character.destination);
        commands.spawn((enemy, sequence.issue()));
    }
    count
}

pub(super) fn update_enemies(
    time: Res<Time>,
    levels: Res<Levels>,
    movement: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    mut rng: ResMut<GameRng>,
    mut heroes: Query<&mut Hero>,
    mut enemies: Query<(&SpawnOrder, &mut Enemy)>,
    mut cues: MessageWriter<AudioCueEvent>,
) {
    let Ok(mut hero) = heroes.single_mut() else {
        return;
    };
    // Enemies hold still while the hero is still entering the level.
    if hero.character.is_starting() {
        return;
    }
    let Some(map) = levels.current_map() else {
        return;
    };

    let ctx = EnemyContext {
        map,
        dt: time.delta_secs(),
        movement: &movement,
        combat: &combat,
    };
    let mut target = hero.target();
    let mut fired = false;
    for mut enemy in in_spawn_order(&mut enemies) {
        let tick = enemy.update(&ctx, &mut target, &mut rng.0);
        fired |= tick.fired;
        if tick.hit_hero && hero.kill() {
            info!("hero shot by {:?}, {} lives left", enemy.kind, hero.lives);
        }
    }

    if fired {
        cues.write(AudioCueEvent::new(AudioCue::EnemyFire));
    }
}

/// Settled dead enemies leave a bonus behind and are removed.
pub(super) fn retire_defeated_enemies(
    mut commands: Commands,
    combat: Res<CombatTuning>,
    mut rng: ResMut<GameRng>,
    enemies: Query<(Entity, &SpawnOrder, &Enemy)>,
) {
    let settled = in_spawn_order(enemies.iter().map(|(entity, order, enemy)| (order, (entity, enemy))));
    for (entity, enemy) in settled {
        if !enemy.has_death_finished() {
            continue;
        }
        let kind = BonusKind::random(&mut rng.0);
        debug!("{:?} settled, dropping {:?}", enemy.kind, kind);
        commands.spawn(Bonus::drop_from(kind, &enemy.character.body, combat.bonus_lifetime));
        commands.entity(entity).despawn();
    }
}

pub(super) fn queue_enemy_draws(mut queue: ResMut<DrawQueue>, enemies: Query<&Enemy>) {
    for enemy in &enemies {
        enemy.render(&mut *queue);
    }
}
